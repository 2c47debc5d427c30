//! Access-key records carried between the authorization service and its store.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::policy::{null_as_empty, UserPolicy};
use super::user_type::UserType;

pub const CREATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAk {
    pub user_id: String,
    pub access_key: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AkPolicy {
    pub access_key: String,
    pub secret_key: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub policy: UserPolicy,
    pub user_id: String,
    pub user_type: UserType,
    #[serde(default)]
    pub create_time: String,
}

impl AkPolicy {
    /// Empty record with an initialized policy.
    pub fn new() -> Self { Self::default() }

    /// Record for a freshly created user, stamped with the local time.
    pub fn for_user(user_id: &str, access_key: &str, secret_key: &str, user_type: UserType) -> Self {
        Self {
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            policy: UserPolicy::new(),
            user_id: user_id.to_string(),
            user_type,
            create_time: chrono::Local::now().format(CREATE_TIME_FORMAT).to_string(),
        }
    }

    /// Merge `add` into the stored policy and keep the deduplicated result.
    pub fn add_policy(&mut self, add: &UserPolicy) {
        self.policy.merge_in(add);
        self.policy = self.policy.dedup();
        debug!(target: "volauth::policy", "add_policy user='{}' ak='{}'", self.user_id, self.access_key);
    }

    /// Subtract `del` from the stored policy and keep the deduplicated result.
    pub fn delete_policy(&mut self, del: &UserPolicy) {
        self.policy.subtract_out(del);
        self.policy = self.policy.dedup();
        debug!(target: "volauth::policy", "delete_policy user='{}' ak='{}'", self.user_id, self.access_key);
    }

    pub fn owns_vol(&self, volume: &str) -> bool { self.policy.is_own_vol(volume) }

    /// Owners may do anything on their volumes; otherwise the action must be granted.
    pub fn can(&self, volume: &str, action: &str) -> bool {
        self.owns_vol(volume) || self.policy.is_authorized(volume, action)
    }
}
