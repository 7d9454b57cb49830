use num_enum::{FromPrimitive, IntoPrimitive};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
pub enum Reg {
    #[default]
    #[strum(to_string = "r0")]
    R0,
    #[strum(to_string = "r1")]
    R1,
    #[strum(to_string = "r2")]
    R2,
    #[strum(to_string = "r3")]
    R3,
    #[strum(to_string = "r4")]
    R4,
    #[strum(to_string = "r5")]
    R5,
    #[strum(to_string = "r6", serialize = "sp")]
    R6,
    #[strum(to_string = "r7", serialize = "lr")]
    R7,
}

impl Reg {
    /// Case-sensitive lookup, aliases included.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    /// 3-bit register index placed at `shift`.
    pub fn field(self, shift: u16) -> u16 {
        (u8::from(self) as u16) << shift
    }

    /// Inverse of [`Reg::field`].
    pub fn from_field(bin: u16, shift: u16) -> Self {
        Reg::from(((bin >> shift) & 0b111) as u8)
    }
}
