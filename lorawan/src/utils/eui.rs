use std::{convert::TryFrom, fmt::Display, ops::Deref};

use serde::{Serialize, Deserialize};

use crate::utils::PrettyHexSlice;

use super::errors::RegionalError;

/// 64 bit extended unique identifier, serialized as a hex string.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct EUI64([u8; 8]);

impl EUI64 {
    pub fn from_hex(hex_str: &str) -> Result<Self, RegionalError> {
        Self::try_from(hex_str)
    }
}

impl TryFrom<&str> for EUI64 {
    type Error = RegionalError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut bytes: [u8; 8] = [0; 8];
        hex::decode_to_slice(s, &mut bytes)
            .map(|_| Self ( bytes ))
            .map_err(|_| RegionalError::InvalidEUI64Buffer(s.to_string()))
    }
}

impl TryFrom<String> for EUI64 {
    type Error = RegionalError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}

impl From<EUI64> for String {
    fn from(value: EUI64) -> Self {
        value.to_string()
    }
}

impl From<[u8; 8]> for EUI64 {
    fn from(s: [u8; 8]) -> Self {
        Self(s)
    }
}

impl Deref for EUI64 {
    type Target=[u8;8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for EUI64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PrettyHexSlice(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eui_hex_roundtrip_through_json() {
        let eui = EUI64::from_hex("70B3D57ED004E5E6").unwrap();
        assert_eq!(eui[0], 0x70);
        let json = serde_json::to_string(&eui).unwrap();
        assert_eq!(json, "\"70b3d57ed004e5e6\"");
        assert_eq!(serde_json::from_str::<EUI64>(&json).unwrap(), eui);
    }

    #[test]
    fn eui_rejects_short_buffer() {
        assert_eq!(
            EUI64::from_hex("70B3D5"),
            Err(RegionalError::InvalidEUI64Buffer("70B3D5".to_string()))
        );
    }
}
