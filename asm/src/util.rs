use color_print::cformat;

use crate::assembler::Assembly;

const RULE: &str = "+------+------+------+-----------------------------------------------";

/// Prints the assembled listing: source line, PC, encoded word and instruction.
pub fn print_dump(asm: &Assembly) {
    println!("{}", RULE);
    println!("| {:>4} | {:<4} | {:<4} | {}", "line", "pc", "word", "inst");
    println!("{}", RULE);
    for listed in &asm.listing {
        println!(
            "| {:>4} | {} | {} | {}",
            listed.stmt.line.num,
            cformat!("<green>{:04X}</>", listed.stmt.pc),
            cformat!("<yellow>{:04X}</>", listed.bin),
            listed.inst.cformat(),
        );
    }
    println!("{}", RULE);

    if !asm.labels.is_empty() {
        for (name, pc) in asm.labels.iter() {
            println!("{}", cformat!("  <green>{:04X}</> {}", pc, name));
        }
        println!("{}", RULE);
    }
}
