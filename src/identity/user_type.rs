use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Account role. Travels as its numeric code on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum UserType {
    #[default]
    Invalid = 0x0,
    Root = 0x1,
    Admin = 0x2,
    Normal = 0x3,
}

impl UserType {
    pub fn valid(&self) -> bool {
        matches!(self, UserType::Root | UserType::Admin | UserType::Normal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Root => "root",
            UserType::Admin => "admin",
            UserType::Normal => "normal",
            UserType::Invalid => "invalid",
        }
    }

    /// Lenient lookup: anything unrecognised maps to `Invalid`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "root" => UserType::Root,
            "admin" => UserType::Admin,
            "normal" => UserType::Normal,
            _ => UserType::Invalid,
        }
    }

    pub fn code(&self) -> u8 { *self as u8 }
}

impl From<u8> for UserType {
    fn from(code: u8) -> Self {
        match code {
            0x1 => UserType::Root,
            0x2 => UserType::Admin,
            0x3 => UserType::Normal,
            _ => UserType::Invalid,
        }
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for UserType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match UserType::from_name(s) {
            UserType::Invalid => Err(Error::InvalidUserType(s.to_string())),
            t => Ok(t),
        }
    }
}

impl Serialize for UserType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for UserType {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        u8::deserialize(d).map(UserType::from)
    }
}
