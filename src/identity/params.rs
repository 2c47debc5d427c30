use serde::{Deserialize, Serialize};

use super::user_type::UserType;
use crate::error::{Error, Result};

/// Body of a user create request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCreateParam {
    pub id: String,
    #[serde(rename = "pwd", default)]
    pub password: String,
    #[serde(rename = "ak", default)]
    pub access_key: String,
    #[serde(rename = "sk", default)]
    pub secret_key: String,
    #[serde(rename = "Type", default)]
    pub user_type: UserType,
}

pub type UserUpdateParam = UserCreateParam;

impl UserCreateParam {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() { return Err(Error::MissingField("id")); }
        if !self.user_type.valid() { return Err(Error::InvalidUserType(self.user_type.code().to_string())); }
        Ok(())
    }
}
