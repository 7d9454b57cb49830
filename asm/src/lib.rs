pub mod assembler;
pub mod error;
pub mod label;
pub mod line;
pub mod literal;
pub mod mif;
pub mod msg;
pub mod parser;
pub mod util;

pub use assembler::{assemble, Assembly};
pub use error::{Error, Report};
pub use mif::{write_mif, Program, MAX_WORDS};
