// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size of entity identifiers in bytes.
pub const ID_LEN: usize = 16;

/// Opaque unique identifier assigned to every entity at creation.
///
/// Identifiers are 16 random bytes, hex-encoded for display and
/// serialization. Two identifiers are equal exactly when their bytes are
/// equal; ownership and self-reference checks throughout the stack rely on
/// this value equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId([u8; ID_LEN]);

impl EntityId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Create an `EntityId` from its raw bytes representation.
    pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Bytes of the identifier.
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// Convert the identifier to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for EntityId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ID_LEN]> for EntityId {
    fn from(value: [u8; ID_LEN]) -> Self {
        Self(value)
    }
}

impl From<EntityId> for [u8; ID_LEN] {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

impl TryFrom<&[u8]> for EntityId {
    type Error = IdError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let value_len = value.len();

        let checked_value: [u8; ID_LEN] = value
            .try_into()
            .map_err(|_| IdError::InvalidLength(value_len, ID_LEN))?;

        Ok(Self(checked_value))
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(hex::decode(value)?.as_slice())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityId").field(&self.to_hex()).finish()
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value
            .parse()
            .map_err(|err: IdError| serde::de::Error::custom(err.to_string()))
    }
}

/// Error types for `EntityId` struct.
#[derive(Error, Debug)]
pub enum IdError {
    /// Identifier has an invalid length.
    #[error("invalid identifier length {0} bytes, expected {1} bytes")]
    InvalidLength(usize, usize),

    /// Identifier string contains invalid hexadecimal characters.
    #[error("invalid hex encoding in identifier string")]
    InvalidHexEncoding(#[from] hex::FromHexError),
}
