use arch::{
    inst::{AluSrc, Inst, Target},
    op::Mnemonic,
    reg::Reg,
};
use cas::{assemble, write_mif, Error};

fn case(src: &str, expects: &[u16]) {
    let asm = match assemble(src) {
        Ok(asm) => asm,
        Err(report) => panic!("{:?}: {}", report.line, report.error),
    };

    for listed in &asm.listing {
        println!("{:04X} {:04X} {}", listed.stmt.pc, listed.bin, listed.stmt.code);
    }

    assert_eq!(asm.program.words(), expects);
}

fn fails(src: &str) -> (Option<usize>, Error) {
    let report = assemble(src).expect_err(src);
    (report.line.map(|line| line.num), report.error)
}

#[test]
fn every_family() {
    case(
        "\
start:  add  r1, r2, r3
        add  r1, r2, 5
        ldi  r0, 255
        ldw  r1, r2
        stw  r0, r0
        jnz  r2, r3
        call r7
        jez  r1, start
        noop
        stop
",
        &[
            0x2983, 0x2963, 0x1FE9, 0x2841, 0x0061, 0x4C0E, 0x1C0A,
            // start(0) - (7 + 1) = -8
            0b0110 | 1 << 4 | 0xF8 << 5 | 1 << 13,
            0x0000, 0x8000,
        ],
    );
}

#[test]
fn forward_reference() {
    case(
        "\
        jmp  end
        nop
        nop
end:
",
        // end resolves to the instruction count: 3 - (0 + 1) = 2
        &[0b0010 | 1 << 4 | 2 << 5, 0, 0],
    );
}

#[test]
fn blank_and_comment_lines_take_no_pc() {
    let plain = assemble("a: nop\njmp a\nstop").unwrap();
    let noisy = assemble("; header\n\na:\n  ; gap\n\n  nop ; first\n\n jmp a\n;\nstop\n").unwrap();
    assert_eq!(plain.program, noisy.program);
    assert_eq!(noisy.labels.get_pc("a"), Some(0));
    assert_eq!(noisy.program.len(), 3);
}

#[test]
fn aliases() {
    case("add sp, lr, r0\nldw lr, sp", &[0xDC03, 0xF841]);
}

#[test]
fn round_trip() {
    let asm = assemble(
        "\
top:  xor  r7, r6, r5
      sll  r1, r1, 3
      ldhi r4, 0x80
      stw  r3, r2
      jez  r0, top
      jnz  r0, r1
      jmp  top
      call lr
      nop
      stop
",
    )
    .unwrap();

    for listed in &asm.listing {
        assert_eq!(Inst::from_bin(listed.bin), Some(listed.inst), "{}", listed.stmt.code);
    }
    assert_eq!(
        asm.listing[1].inst,
        Inst::Alu(Mnemonic::Sll, Reg::R1, Reg::R1, AluSrc::Imm(3))
    );
    assert_eq!(asm.listing[6].inst, Inst::Jump(Mnemonic::Jmp, Target::Offset(-7)));
}

#[test]
fn cond_jump_bounds() {
    let pad = |n: usize| "nop\n".repeat(n);

    // forward: target = pc + 1 + 127
    assert!(assemble(&format!("jez r0, t\n{}t: stop", pad(127))).is_ok());
    let (line, err) = fails(&format!("jez r0, t\n{}t: stop", pad(128)));
    assert_eq!(line, Some(1));
    assert!(matches!(err, Error::BranchOutOfRange { offset: 128, .. }));

    // backward: -128 reaches 127 instructions behind the jump
    assert!(assemble(&format!("t: nop\n{}jnz r0, t", pad(126))).is_ok());
    let (_, err) = fails(&format!("t: nop\n{}jnz r0, t", pad(127)));
    assert!(matches!(err, Error::BranchOutOfRange { offset: -129, .. }));
}

#[test]
fn jump_bounds() {
    let pad = |n: usize| "nop\n".repeat(n);

    assert!(assemble(&format!("jmp t\n{}t: stop", pad(1023))).is_ok());
    let (_, err) = fails(&format!("jmp t\n{}t: stop", pad(1024)));
    assert!(matches!(err, Error::BranchOutOfRange { offset: 1024, min: -1024, max: 1023 }));

    assert!(assemble(&format!("t: nop\n{}call t", pad(1022))).is_ok());
    let (_, err) = fails(&format!("t: nop\n{}call t", pad(1023)));
    assert!(matches!(err, Error::BranchOutOfRange { offset: -1025, .. }));

    assert!(assemble("jmp 1023\ncall -1024").is_ok());
    assert!(matches!(fails("jmp 1024").1, Error::BranchOutOfRange { .. }));
}

#[test]
fn capacity_boundary() {
    let asm = assemble(&"nop\n".repeat(32768)).unwrap();
    assert_eq!(asm.program.len(), 32768);
    assert_eq!(asm.program.depth(), 65536);

    let (line, err) = fails(&"nop\n".repeat(32769));
    assert_eq!(line, None);
    assert!(matches!(err, Error::ProgramTooLarge { len: 32769, max: 32768 }));
}

#[test]
fn reserved_labels() {
    for name in ["add", "jmp", "noop", "stop", "r3", "sp", "lr"] {
        let (line, err) = fails(&format!("nop\n{name}: nop"));
        assert_eq!(line, Some(2));
        assert!(matches!(err, Error::ReservedLabelName(n) if n == name));
    }
    for name in ["main", "r8", "Add", "loop_1", "end-2", "0x10"] {
        assert!(assemble(&format!("{name}: nop")).is_ok(), "{name}");
    }
}

#[test]
fn error_kinds() {
    assert!(matches!(fails("x: nop\nx: stop"), (Some(2), Error::DuplicateLabel(_))));
    assert!(matches!(fails("a b: nop"), (Some(1), Error::MalformedLine)));
    assert!(matches!(fails("nop\npush r1"), (Some(2), Error::UnknownInstruction(_))));
    assert!(matches!(fails("ldi r1"), (Some(1), Error::MalformedArguments(..))));
    assert!(matches!(fails("ldw r1, 0x10"), (Some(1), Error::InvalidOperand(..))));
    assert!(matches!(fails("ldi r1, 0b12"), (Some(1), Error::InvalidLiteral(_))));
    assert!(matches!(fails("add r1, r2, loop"), (Some(1), Error::InvalidOperand(..))));
    assert!(matches!(fails("ldi r1, foo"), (Some(1), Error::InvalidOperand(..))));
    assert!(matches!(fails("jnz r1, nowhere"), (Some(1), Error::UnresolvedLabel(_))));
}

#[test]
fn oversized_literal() {
    let (line, err) = fails("nop\nldi r1, 99999999999999999999");
    assert_eq!(line, Some(2));
    assert!(matches!(err, Error::InvalidLiteral(n) if n == "99999999999999999999"));
}

#[test]
fn report_carries_source_text() {
    let report = assemble("nop\n\n   jmp   missing   ; far away\n").unwrap_err();
    let line = report.line.unwrap();
    assert_eq!(line.num, 3);
    assert_eq!(line.text, "   jmp   missing   ; far away");
    assert_eq!(report.error.to_string(), "Undefined label: `missing`");
}

#[test]
fn writes_mif() {
    let asm = assemble("ldi r0, 255\nadd r1, r2, r3\nstop").unwrap();
    let mut buf = vec![];
    write_mif(&asm.program, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "DEPTH = 8;");
    assert_eq!(lines[7], "0000 : 1fe9;");
    assert_eq!(lines[8], "0001 : 2983;");
    assert_eq!(lines[9], "0002 : 8000;");
    assert_eq!(lines[14], "0007 : 0000;");
    assert_eq!(lines[15], "");
    assert_eq!(lines[16], "END;");
    assert_eq!(lines.len(), 17);
}
