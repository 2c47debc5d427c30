//! Per-user volume policy: owned volumes plus per-volume granted actions.
//!
//! All state sits behind one `RwLock`. Mutators hold it exclusively for the
//! whole operation, readers hold it shared. When another record is merged in
//! or subtracted out, that record is copied under its own read lock first and
//! the copy is applied under the target's write lock, so only the target is
//! ever locked for the mutation.

use std::collections::{BTreeMap, HashSet};

use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// Volume name -> granted action names.
pub type AuthorizedVols = BTreeMap<String, Vec<String>>;

/// Plain, unlocked copy of a policy. This is also the wire shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicySnapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub own_vols: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authorized_vols: AuthorizedVols,
}

pub(crate) fn null_as_empty<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Default)]
pub struct UserPolicy {
    inner: RwLock<PolicySnapshot>,
}

impl UserPolicy {
    pub fn new() -> Self { Self::default() }

    pub fn from_parts(own_vols: Vec<String>, authorized_vols: AuthorizedVols) -> Self {
        Self::from(PolicySnapshot { own_vols, authorized_vols })
    }

    /// Copy of the current state, taken under the read lock.
    pub fn snapshot(&self) -> PolicySnapshot { self.inner.read().clone() }

    pub fn own_vols(&self) -> Vec<String> { self.inner.read().own_vols.clone() }

    pub fn authorized_vols(&self) -> AuthorizedVols { self.inner.read().authorized_vols.clone() }

    pub fn is_own_vol(&self, volume: &str) -> bool {
        self.inner.read().own_vols.iter().any(|v| v == volume)
    }

    /// Granted actions on `volume`, or `None` when the volume has no entry.
    pub fn actions_for(&self, volume: &str) -> Option<Vec<String>> {
        self.inner.read().authorized_vols.get(volume).cloned()
    }

    pub fn is_authorized(&self, volume: &str, action: &str) -> bool {
        self.inner
            .read()
            .authorized_vols
            .get(volume)
            .is_some_and(|acts| acts.iter().any(|a| a == action))
    }

    pub fn is_empty(&self) -> bool {
        let g = self.inner.read();
        g.own_vols.is_empty() && g.authorized_vols.is_empty()
    }

    /// Append `volume` to the owned set unless it is already there.
    pub fn add_own_vol(&self, volume: &str) {
        let mut g = self.inner.write();
        if g.own_vols.iter().any(|v| v == volume) {
            return;
        }
        g.own_vols.push(volume.to_string());
        debug!(target: "volauth::policy", "add_own_vol vol='{}' own_vols={}", volume, g.own_vols.len());
    }

    /// Stable removal of the first occurrence; absent volumes are ignored.
    pub fn remove_own_vol(&self, volume: &str) {
        let mut g = self.inner.write();
        if let Some(i) = g.own_vols.iter().position(|v| v == volume) {
            g.own_vols.remove(i);
            debug!(target: "volauth::policy", "remove_own_vol vol='{}' own_vols={}", volume, g.own_vols.len());
        }
    }

    /// Additive merge. Does not deduplicate: merging the same record twice
    /// doubles its entries. Lists for new volume keys are copied, never shared.
    pub fn merge_in(&self, other: &UserPolicy) {
        let add = other.snapshot();
        self.merge_snapshot(add);
    }

    pub fn merge_snapshot(&self, add: PolicySnapshot) {
        let mut g = self.inner.write();
        g.own_vols.extend(add.own_vols);
        for (vol, actions) in add.authorized_vols {
            g.authorized_vols.entry(vol).or_default().extend(actions);
        }
        debug!(
            target: "volauth::policy",
            "merge_in own_vols={} authorized_vols={}", g.own_vols.len(), g.authorized_vols.len()
        );
    }

    /// Remove one occurrence per listed name. Volumes whose action list
    /// becomes empty keep their key.
    pub fn subtract_out(&self, other: &UserPolicy) {
        let del = other.snapshot();
        self.subtract_snapshot(&del);
    }

    pub fn subtract_snapshot(&self, del: &PolicySnapshot) {
        let mut g = self.inner.write();
        remove_first_each(&mut g.own_vols, &del.own_vols);
        for (vol, actions) in del.authorized_vols.iter() {
            if let Some(cur) = g.authorized_vols.get_mut(vol) {
                remove_first_each(cur, actions);
            }
        }
        debug!(
            target: "volauth::policy",
            "subtract_out own_vols={} authorized_vols={}", g.own_vols.len(), g.authorized_vols.len()
        );
    }

    /// New record with duplicates collapsed in first-occurrence order.
    /// The receiver is left untouched.
    pub fn dedup(&self) -> UserPolicy {
        let g = self.inner.read();
        let own_vols = dedup_keep_first(&g.own_vols);
        let authorized_vols = g
            .authorized_vols
            .iter()
            .map(|(vol, acts)| (vol.clone(), dedup_keep_first(acts)))
            .collect();
        UserPolicy::from(PolicySnapshot { own_vols, authorized_vols })
    }
}

fn remove_first_each(s: &mut Vec<String>, remove: &[String]) {
    for elem in remove {
        if let Some(i) = s.iter().position(|v| v == elem) {
            s.remove(i);
        }
    }
}

fn dedup_keep_first(s: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(s.len());
    s.iter().filter(|v| seen.insert(v.as_str())).cloned().collect()
}

impl From<PolicySnapshot> for UserPolicy {
    fn from(s: PolicySnapshot) -> Self { Self { inner: RwLock::new(s) } }
}

impl Clone for UserPolicy {
    fn clone(&self) -> Self { Self::from(self.snapshot()) }
}

impl PartialEq for UserPolicy {
    fn eq(&self, other: &Self) -> bool {
        // One lock at a time so comparing a record with itself cannot deadlock.
        let lhs = self.snapshot();
        lhs == other.snapshot()
    }
}

impl Eq for UserPolicy {}

impl Serialize for UserPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let g = self.inner.read();
        (*g).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UserPolicy {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        PolicySnapshot::deserialize(d).map(UserPolicy::from)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod policy_tests;
