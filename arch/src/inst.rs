use crate::{
    op::{Family, Mnemonic},
    reg::Reg,
};

use color_print::cformat;

// ----------------------------------------------------------------------------
// Field layout

const ALU_IMM: u16 = 1 << 5;
const JUMP_IMM: u16 = 1 << 4;

const DEST: u16 = 13;
const SRC: u16 = 10;
const ALU_REG_B: u16 = 7;
const ALU_IMM_B: u16 = 6;
const IMM: u16 = 5;

pub const ALU_IMM_BITS: u32 = 4;
pub const LOAD_IMM_BITS: u32 = 8;
pub const COND_OFFSET_BITS: u32 = 8;
pub const JUMP_OFFSET_BITS: u32 = 11;

/// Third ALU operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluSrc {
    Reg(Reg),
    /// 4-bit field value, already masked
    Imm(u8),
}

/// Jump destination: a register holding the address, or a PC-relative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Reg(Reg),
    Offset(i16),
}

/// Fully resolved instruction. The mnemonic always belongs to the variant's family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    Alu(Mnemonic, Reg, Reg, AluSrc),
    LoadImm(Mnemonic, Reg, u8),
    LoadStore(Mnemonic, Reg, Reg),
    CondJump(Mnemonic, Reg, Target),
    Jump(Mnemonic, Target),
    Zero(Mnemonic),
}

fn mask(bits: u32) -> u16 {
    ((1u32 << bits) - 1) as u16
}

fn sign_extend(raw: u16, bits: u32) -> i16 {
    let shift = 16 - bits;
    ((raw << shift) as i16) >> shift
}

impl Inst {
    pub fn mnemonic(&self) -> Mnemonic {
        match *self {
            Inst::Alu(m, ..)
            | Inst::LoadImm(m, ..)
            | Inst::LoadStore(m, ..)
            | Inst::CondJump(m, ..)
            | Inst::Jump(m, ..)
            | Inst::Zero(m) => m,
        }
    }

    pub fn to_bin(&self) -> u16 {
        let opcode = self.mnemonic().opcode();
        match *self {
            Inst::Alu(_, rd, ra, AluSrc::Reg(rb)) => {
                opcode | rd.field(DEST) | ra.field(SRC) | rb.field(ALU_REG_B)
            }
            Inst::Alu(_, rd, ra, AluSrc::Imm(imm)) => {
                opcode
                    | ALU_IMM
                    | rd.field(DEST)
                    | ra.field(SRC)
                    | (imm as u16 & mask(ALU_IMM_BITS)) << ALU_IMM_B
            }
            Inst::LoadImm(_, rd, imm) => opcode | (imm as u16) << IMM | rd.field(DEST),
            Inst::LoadStore(_, data, addr) => opcode | data.field(DEST) | addr.field(SRC),
            Inst::CondJump(_, cond, Target::Reg(rs)) => opcode | cond.field(DEST) | rs.field(SRC),
            Inst::CondJump(_, cond, Target::Offset(off)) => {
                opcode
                    | JUMP_IMM
                    | (off as u16 & mask(COND_OFFSET_BITS)) << IMM
                    | cond.field(DEST)
            }
            Inst::Jump(_, Target::Reg(rs)) => opcode | rs.field(SRC),
            Inst::Jump(_, Target::Offset(off)) => {
                opcode | JUMP_IMM | (off as u16 & mask(JUMP_OFFSET_BITS)) << IMM
            }
            Inst::Zero(_) => opcode,
        }
    }

    /// Decodes a word produced by [`Inst::to_bin`]. Any other word yields `None`.
    pub fn from_bin(bin: u16) -> Option<Inst> {
        let mnemonic = [16, 7, 5, 4]
            .into_iter()
            .find_map(|width| Mnemonic::from_opcode(bin, width))?;

        let inst = match mnemonic.family() {
            Family::Alu => {
                let src = if bin & ALU_IMM != 0 {
                    AluSrc::Imm(((bin >> ALU_IMM_B) & mask(ALU_IMM_BITS)) as u8)
                } else {
                    AluSrc::Reg(Reg::from_field(bin, ALU_REG_B))
                };
                Inst::Alu(
                    mnemonic,
                    Reg::from_field(bin, DEST),
                    Reg::from_field(bin, SRC),
                    src,
                )
            }
            Family::LoadImm => Inst::LoadImm(
                mnemonic,
                Reg::from_field(bin, DEST),
                ((bin >> IMM) & mask(LOAD_IMM_BITS)) as u8,
            ),
            Family::LoadStore => Inst::LoadStore(
                mnemonic,
                Reg::from_field(bin, DEST),
                Reg::from_field(bin, SRC),
            ),
            Family::CondJump => {
                let target = if bin & JUMP_IMM != 0 {
                    let raw = (bin >> IMM) & mask(COND_OFFSET_BITS);
                    Target::Offset(sign_extend(raw, COND_OFFSET_BITS))
                } else {
                    Target::Reg(Reg::from_field(bin, SRC))
                };
                Inst::CondJump(mnemonic, Reg::from_field(bin, DEST), target)
            }
            Family::Jump => {
                let target = if bin & JUMP_IMM != 0 {
                    let raw = (bin >> IMM) & mask(JUMP_OFFSET_BITS);
                    Target::Offset(sign_extend(raw, JUMP_OFFSET_BITS))
                } else {
                    Target::Reg(Reg::from_field(bin, SRC))
                };
                Inst::Jump(mnemonic, target)
            }
            Family::Zero => Inst::Zero(mnemonic),
        };

        // Reject words with stray bits outside the fields of their layout.
        (inst.to_bin() == bin).then_some(inst)
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        macro_rules! fmt {
            ($name:expr, $args:expr) => {
                cformat!("<r>{:<6}</><b>{}</>", $name.to_string(), $args)
            };
        }

        let target = |t: &Target| match t {
            Target::Reg(rs) => rs.to_string(),
            Target::Offset(off) => cformat!("<y>{:+}</>", off),
        };

        match self {
            Inst::Alu(m, rd, ra, AluSrc::Reg(rb)) => fmt!(m, format!("{rd}, {ra}, {rb}")),
            Inst::Alu(m, rd, ra, AluSrc::Imm(imm)) => {
                fmt!(m, cformat!("{}, {}, <y>0x{:X}</>", rd, ra, imm))
            }
            Inst::LoadImm(m, rd, imm) => fmt!(m, cformat!("{}, <y>0x{:02X}</>", rd, imm)),
            Inst::LoadStore(m, data, addr) => fmt!(m, format!("{data}, {addr}")),
            Inst::CondJump(m, cond, t) => fmt!(m, format!("{cond}, {}", target(t))),
            Inst::Jump(m, t) => fmt!(m, target(t)),
            Inst::Zero(m) => fmt!(m, ""),
        }
    }
}
