pub mod inst;
pub mod op;
pub mod reg;

/// True for every spelling the assembler reserves: mnemonics and register names.
pub fn is_reserved(name: &str) -> bool {
    op::Mnemonic::parse(name).is_some() || reg::Reg::parse(name).is_some()
}
