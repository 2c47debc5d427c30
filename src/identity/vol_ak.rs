//! Reverse index kept per volume: which access keys hold which actions on it.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::policy::null_as_empty;

#[derive(Debug, Default)]
pub struct VolAk {
    pub vol: String,
    ak_and_actions: RwLock<BTreeMap<String, Vec<String>>>,
}

#[derive(Serialize, Deserialize)]
struct VolAkWire {
    vol: String,
    #[serde(rename = "AKAndActions", default, deserialize_with = "null_as_empty")]
    ak_and_actions: BTreeMap<String, Vec<String>>,
}

impl VolAk {
    pub fn new(vol: &str) -> Self {
        Self { vol: vol.to_string(), ak_and_actions: RwLock::new(BTreeMap::new()) }
    }

    /// Add actions for `ak`, skipping ones it already holds.
    pub fn grant(&self, ak: &str, actions: &[String]) {
        let mut g = self.ak_and_actions.write();
        let cur = g.entry(ak.to_string()).or_default();
        for a in actions {
            if !cur.contains(a) {
                cur.push(a.clone());
            }
        }
        debug!(target: "volauth::policy", "vol_ak.grant vol='{}' ak='{}' actions={}", self.vol, ak, cur.len());
    }

    /// Remove one occurrence of each listed action. The key stays even when emptied.
    pub fn revoke_actions(&self, ak: &str, actions: &[String]) {
        let mut g = self.ak_and_actions.write();
        if let Some(cur) = g.get_mut(ak) {
            for a in actions {
                if let Some(i) = cur.iter().position(|x| x == a) {
                    cur.remove(i);
                }
            }
        }
    }

    /// Drop every grant held by `ak`. Returns whether it had an entry.
    pub fn revoke(&self, ak: &str) -> bool {
        let removed = self.ak_and_actions.write().remove(ak).is_some();
        if removed {
            debug!(target: "volauth::policy", "vol_ak.revoke vol='{}' ak='{}'", self.vol, ak);
        }
        removed
    }

    pub fn actions_for(&self, ak: &str) -> Option<Vec<String>> {
        self.ak_and_actions.read().get(ak).cloned()
    }

    pub fn access_keys(&self) -> Vec<String> { self.ak_and_actions.read().keys().cloned().collect() }
}

impl Clone for VolAk {
    fn clone(&self) -> Self {
        Self { vol: self.vol.clone(), ak_and_actions: RwLock::new(self.ak_and_actions.read().clone()) }
    }
}

impl Serialize for VolAk {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = VolAkWire { vol: self.vol.clone(), ak_and_actions: self.ak_and_actions.read().clone() };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VolAk {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let w = VolAkWire::deserialize(d)?;
        Ok(Self { vol: w.vol, ak_and_actions: RwLock::new(w.ak_and_actions) })
    }
}
