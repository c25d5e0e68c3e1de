use std::fmt::{Display, Write};

pub mod eui;
pub mod errors;

#[derive(PartialEq, Eq, Debug)]
pub struct PrettyHexSlice<'a>(pub &'a [u8]);

impl <'a> Display for PrettyHexSlice<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();
        for elem in self.0.iter() {
            write!(s, "{elem:02x}")?
        }
        write!(f, "{s}")
    }
}

/// Formats a frequency in Hz as MHz, as operators read channel plans.
pub fn format_mhz(frequency: u32) -> String {
    format!("{}.{:06} MHz", frequency / 1_000_000, frequency % 1_000_000)
}
