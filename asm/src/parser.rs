use arch::{
    inst::{
        AluSrc, Inst, Target, ALU_IMM_BITS, COND_OFFSET_BITS, JUMP_OFFSET_BITS, LOAD_IMM_BITS,
    },
    op::{Family, Mnemonic},
    reg::Reg,
};

use crate::{
    error::Error,
    label::Labels,
    line::is_ident,
    literal::{looks_numeric, parse_literal},
};

// ----------------------------------------------------------------------------
// Operands

/// Third ALU operand before masking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Src {
    Reg(Reg),
    Imm(i64),
}

/// Jump target before label resolution: a register, or a label / literal offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dest {
    Reg(Reg),
    Ident(String),
}

fn reg(arg: &str) -> Result<Reg, Error> {
    Reg::parse(arg).ok_or_else(|| Error::InvalidOperand(arg.to_string(), "a register"))
}

fn imm(arg: &str) -> Result<i64, Error> {
    if Reg::parse(arg).is_some() {
        return Err(Error::InvalidOperand(arg.to_string(), "an integer literal"));
    }
    literal(arg, "an integer literal")
}

fn src(arg: &str) -> Result<Src, Error> {
    match Reg::parse(arg) {
        Some(r) => Ok(Src::Reg(r)),
        None => literal(arg, "a register or an integer literal").map(Src::Imm),
    }
}

/// Number-shaped tokens that fail to parse are bad literals; other names are bad operands.
fn literal(arg: &str, expected: &'static str) -> Result<i64, Error> {
    match parse_literal(arg) {
        Some(v) => Ok(v),
        None if looks_numeric(arg) => Err(Error::InvalidLiteral(arg.to_string())),
        None => Err(Error::InvalidOperand(arg.to_string(), expected)),
    }
}

fn dest(arg: &str) -> Dest {
    match Reg::parse(arg) {
        Some(r) => Dest::Reg(r),
        None => Dest::Ident(arg.to_string()),
    }
}

/// Bits of an `i64` kept by a `bits`-wide field, read as unsigned.
fn truncate(v: i64, bits: u32) -> u16 {
    (v & ((1i64 << bits) - 1)) as u16
}

/// Accepts anything representable in the field as signed or unsigned.
fn fits(v: i64, bits: u32) -> bool {
    (-(1i64 << (bits - 1))..(1i64 << bits)).contains(&v)
}

impl Dest {
    /// Register targets pass through. Names resolve as labels first (offset
    /// relative to `pc + 1`), then as literal offsets.
    fn resolve(&self, labels: &Labels, pc: usize, bits: u32) -> Result<Target, Error> {
        let name = match self {
            Dest::Reg(r) => return Ok(Target::Reg(*r)),
            Dest::Ident(name) => name,
        };

        let offset = match labels.get_pc(name) {
            Some(to) => to as i64 - (pc as i64 + 1),
            None => match parse_literal(name) {
                Some(v) => v,
                None if looks_numeric(name) => return Err(Error::InvalidLiteral(name.clone())),
                None => return Err(Error::UnresolvedLabel(name.clone())),
            },
        };

        let (min, max) = (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1);
        if offset < min || offset > max {
            return Err(Error::BranchOutOfRange { offset, min, max });
        }
        Ok(Target::Offset(offset as i16))
    }
}

// ----------------------------------------------------------------------------
// Operation

/// One instruction statement with operands classified but labels unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    Alu(Mnemonic, Reg, Reg, Src),
    LoadImm(Mnemonic, Reg, i64),
    LoadStore(Mnemonic, Reg, Reg),
    CondJump(Mnemonic, Reg, Dest),
    Jump(Mnemonic, Dest),
    Zero(Mnemonic),
}

impl Code {
    pub fn parse(code: &str) -> Result<Code, Error> {
        let (op, rest) = match code.split_once(char::is_whitespace) {
            Some((op, rest)) => (op, rest.trim()),
            None => (code, ""),
        };
        if !is_ident(op) {
            return Err(Error::MalformedLine);
        }
        let op = Mnemonic::parse(op).ok_or_else(|| Error::UnknownInstruction(op.to_string()))?;
        let family = op.family();

        let args: Vec<&str> = if rest.is_empty() {
            vec![]
        } else {
            rest.split(',').map(str::trim).collect()
        };

        let arity = match family {
            Family::Alu => 3,
            Family::LoadImm | Family::LoadStore | Family::CondJump => 2,
            Family::Jump => 1,
            Family::Zero => 0,
        };
        if args.len() != arity || !args.iter().all(|arg| is_ident(arg)) {
            return Err(Error::MalformedArguments(op, family.signature()));
        }

        match family {
            Family::Alu => Ok(Code::Alu(op, reg(args[0])?, reg(args[1])?, src(args[2])?)),
            Family::LoadImm => Ok(Code::LoadImm(op, reg(args[0])?, imm(args[1])?)),
            Family::LoadStore => Ok(Code::LoadStore(op, reg(args[0])?, reg(args[1])?)),
            Family::CondJump => Ok(Code::CondJump(op, reg(args[0])?, dest(args[1]))),
            Family::Jump => Ok(Code::Jump(op, dest(args[0]))),
            Family::Zero => Ok(Code::Zero(op)),
        }
    }
}

impl Code {
    /// Second pass: resolves labels for the statement placed at `pc`.
    pub fn resolve(&self, labels: &Labels, pc: usize) -> Result<Inst, Error> {
        match self {
            Code::Alu(op, rd, ra, Src::Reg(rb)) => Ok(Inst::Alu(*op, *rd, *ra, AluSrc::Reg(*rb))),
            Code::Alu(op, rd, ra, Src::Imm(v)) => Ok(Inst::Alu(
                *op,
                *rd,
                *ra,
                AluSrc::Imm(truncate(*v, ALU_IMM_BITS) as u8),
            )),
            Code::LoadImm(op, rd, v) => {
                Ok(Inst::LoadImm(*op, *rd, truncate(*v, LOAD_IMM_BITS) as u8))
            }
            Code::LoadStore(op, data, addr) => Ok(Inst::LoadStore(*op, *data, *addr)),
            Code::CondJump(op, cond, dest) => Ok(Inst::CondJump(
                *op,
                *cond,
                dest.resolve(labels, pc, COND_OFFSET_BITS)?,
            )),
            Code::Jump(op, dest) => Ok(Inst::Jump(*op, dest.resolve(labels, pc, JUMP_OFFSET_BITS)?)),
            Code::Zero(op) => Ok(Inst::Zero(*op)),
        }
    }

    /// Describes an immediate that loses bits when masked into its field.
    pub fn truncation(&self) -> Option<String> {
        let (v, bits) = match self {
            Code::Alu(_, _, _, Src::Imm(v)) => (*v, ALU_IMM_BITS),
            Code::LoadImm(_, _, v) => (*v, LOAD_IMM_BITS),
            _ => return None,
        };
        if fits(v, bits) {
            return None;
        }
        Some(format!(
            "Immediate `{}` does not fit in {} bits, truncated to 0x{:X}",
            v,
            bits,
            truncate(v, bits)
        ))
    }
}
