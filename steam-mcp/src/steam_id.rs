//! SteamID64 newtype and the 32-bit account id transform.
//!
//! Trade offers report partners by 32-bit account id while every user endpoint
//! wants the 64-bit id. The two are related by a fixed offset for individual
//! accounts in the public universe. All arithmetic is integer; ids exceed the
//! range a JSON `f64` can hold exactly, so they travel as strings on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// SteamID64 of account id 0: universe public, type individual, instance 1.
pub const ACCOUNT_ID_BASE: u64 = 76_561_197_960_265_728;

/// A 64-bit Steam identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SteamId(u64);

impl SteamId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Forward transform: 32-bit account id to SteamID64.
    pub const fn from_account_id(account_id: u32) -> Self {
        Self(ACCOUNT_ID_BASE + account_id as u64)
    }

    /// Reverse transform. `None` when the id is not in the individual-account range.
    pub fn account_id(self) -> Option<u32> {
        self.0
            .checked_sub(ACCOUNT_ID_BASE)
            .and_then(|v| u32::try_from(v).ok())
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSteamIdError(String);

impl fmt::Display for ParseSteamIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid SteamID64: {}", self.0)
    }
}

impl std::error::Error for ParseSteamIdError {}

impl FromStr for SteamId {
    type Err = ParseSteamIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(SteamId)
            .map_err(|_| ParseSteamIdError(s.to_string()))
    }
}

impl Serialize for SteamId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SteamId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Number(n) => Ok(SteamId(n)),
        }
    }
}
