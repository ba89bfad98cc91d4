//! Core types for planets

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use crate::Error;

/// Message returned to clients for malformed planet identifiers
pub const INVALID_ID_MESSAGE: &str = "planet id is not a valid id";

const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Planet identifier
///
/// 12 bytes rendered as 24 lowercase hex characters:
/// - 4 bytes: seconds since the Unix epoch (big-endian)
/// - 5 bytes: random value fixed for the lifetime of the process
/// - 3 bytes: wrapping counter, randomly seeded (big-endian)
///
/// Ids generated by one process sort in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanetId([u8; 12]);

impl PlanetId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
        static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

        let process = PROCESS_UNIQUE.get_or_init(|| {
            let mut bytes = [0u8; 5];
            fastrand::fill(&mut bytes);
            bytes
        });
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(fastrand::u32(..=COUNTER_MASK)))
            .fetch_add(1, Ordering::Relaxed)
            & COUNTER_MASK;
        let seconds = chrono::Utc::now().timestamp() as u32;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Creation time in seconds since the Unix epoch
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for PlanetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PlanetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 24 {
            return Err(Error::InvalidId(INVALID_ID_MESSAGE.to_string()));
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| Error::InvalidId(INVALID_ID_MESSAGE.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for PlanetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PlanetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A registered planet
///
/// Serialized as the API representation: the id is never exposed in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Planet {
    #[serde(skip)]
    pub id: PlanetId,
    pub name: String,
    pub weather: String,
    pub land: String,
    /// Number of films the planet appears in, fixed at creation
    pub appearance_quantity: usize,
}

/// Client payload for planet creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlanetRequest {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Weather")]
    pub weather: String,
    #[serde(alias = "Land")]
    pub land: String,
}

/// List filter taken from the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub name: Option<String>,
}

impl Filter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Effective name constraint; an empty name matches everything
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn matches(&self, planet: &Planet) -> bool {
        match self.name() {
            Some(name) => planet.name == name,
            None => true,
        }
    }
}
