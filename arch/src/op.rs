use bimap::BiMap;
use once_cell::sync::Lazy;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mnemonic {
    Add,
    And,
    Call,
    Gt,
    Gts,
    Jez,
    Jmp,
    Jnz,
    Ldhi,
    Ldi,
    Ldsi,
    Ldw,
    Lt,
    Lts,
    #[strum(to_string = "nop", serialize = "noop")]
    Nop,
    Or,
    Stw,
    Sll,
    Sra,
    Srl,
    Stop,
    Sub,
    Xor,
}

/// Encoding family: decides the operand signature and the bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// `dest, opA, opB` with opB a register or a 4-bit immediate
    Alu,
    /// `dest, imm8`
    LoadImm,
    /// `data, address`
    LoadStore,
    /// `cond, target` with an 8-bit signed offset
    CondJump,
    /// `target` with an 11-bit signed offset
    Jump,
    Zero,
}

impl Family {
    /// Width in bits of the opcode that identifies this family's instructions.
    pub fn opcode_width(self) -> u32 {
        match self {
            Family::Alu | Family::LoadImm => 5,
            Family::LoadStore => 7,
            Family::CondJump | Family::Jump => 4,
            Family::Zero => 16,
        }
    }

    /// Argument list shown in diagnostics.
    pub fn signature(self) -> &'static str {
        match self {
            Family::Alu => "`dest, opA, opB`",
            Family::LoadImm => "`dest, immediate`",
            Family::LoadStore => "`data, address`",
            Family::CondJump => "`cond, target`",
            Family::Jump => "`target`",
            Family::Zero => "no arguments",
        }
    }
}

impl Mnemonic {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    pub fn family(self) -> Family {
        use Mnemonic::*;
        match self {
            Add | And | Gt | Gts | Lt | Lts | Or | Sll | Sra | Srl | Sub | Xor => Family::Alu,
            Ldi | Ldsi | Ldhi => Family::LoadImm,
            Ldw | Stw => Family::LoadStore,
            Jez | Jnz => Family::CondJump,
            Jmp | Call => Family::Jump,
            Nop | Stop => Family::Zero,
        }
    }

    pub fn opcode(self) -> u16 {
        use Mnemonic::*;
        match self {
            Add => 0b00011,
            And => 0b10111,
            Call => 0b1010,
            Gt => 0b01100,
            Gts => 0b11100,
            Jez => 0b0110,
            Jmp => 0b0010,
            Jnz => 0b1110,
            Ldhi => 0b10001,
            Ldi => 0b01001,
            Ldsi => 0b11001,
            Ldw => 0b1000001,
            Lt => 0b00100,
            Lts => 0b10100,
            Nop => 0,
            Or => 0b11011,
            Stw => 0b1100001,
            Sll => 0b10011,
            Sra => 0b01111,
            Srl => 0b01011,
            Stop => 0x8000,
            Sub => 0b00111,
            Xor => 0b11111,
        }
    }

    /// Looks up the instruction whose opcode occupies the low `width` bits of `bin`.
    pub fn from_opcode(bin: u16, width: u32) -> Option<Self> {
        let mask = if width >= 16 { 0xFFFF } else { (1u16 << width) - 1 };
        OPCODES
            .get_by_right(&(bin & mask))
            .copied()
            .filter(|m| m.family().opcode_width() == width)
    }
}

pub static OPCODES: Lazy<BiMap<Mnemonic, u16>> = Lazy::new(|| {
    let mut map: BiMap<Mnemonic, u16> = BiMap::new();
    for m in Mnemonic::iter() {
        map.insert(m, m.opcode());
    }
    map
});
