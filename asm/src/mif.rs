use std::io::{self, Write};

use crate::error::Error;

/// Instruction memory capacity in words.
pub const MAX_WORDS: usize = 32768;

/// Encoded instruction words in PC order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program(Vec<u16>);

impl Program {
    pub fn new(words: Vec<u16>) -> Result<Self, Error> {
        if words.len() > MAX_WORDS {
            return Err(Error::ProgramTooLarge {
                len: words.len(),
                max: MAX_WORDS,
            });
        }
        Ok(Program(words))
    }

    pub fn words(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Memory depth in words: the program rounded up to a power of two, doubled
    /// so the upper half is left for data.
    pub fn depth(&self) -> usize {
        match self.0.len() {
            0 => 0,
            len => len.next_power_of_two() * 2,
        }
    }
}

/// Writes an Altera memory initialization file.
pub fn write_mif<W: Write>(program: &Program, mut out: W) -> io::Result<()> {
    let depth = program.depth();
    writeln!(out, "DEPTH = {};", depth)?;
    writeln!(out, "WIDTH = 16;")?;
    writeln!(out, "ADDRESS_RADIX = HEX;")?;
    writeln!(out, "DATA_RADIX = HEX;")?;
    writeln!(out, "CONTENT")?;
    writeln!(out, "BEGIN")?;
    writeln!(out)?;

    let words = program.words().iter().copied();
    let fill = std::iter::repeat(0u16).take(depth - program.len());
    for (addr, word) in words.chain(fill).enumerate() {
        writeln!(out, "{:04x} : {:04x};", addr, word)?;
    }

    writeln!(out)?;
    writeln!(out, "END;")?;
    Ok(())
}
