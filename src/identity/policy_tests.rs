use super::*;

fn vols(v: &[&str]) -> Vec<String> { v.iter().map(|s| s.to_string()).collect() }

fn grants(pairs: Vec<(&str, Vec<&str>)>) -> AuthorizedVols {
    pairs.into_iter().map(|(k, acts)| (k.to_string(), vols(&acts))).collect()
}

#[test]
fn new_policy_is_empty_and_initialized() {
    let p = UserPolicy::new();
    assert!(p.is_empty());
    assert!(p.own_vols().is_empty());
    assert!(p.authorized_vols().is_empty());
}

#[test]
fn add_own_vol_skips_existing() {
    let p = UserPolicy::from_parts(vols(&["vol1"]), AuthorizedVols::new());
    p.add_own_vol("vol2");
    assert_eq!(p.own_vols(), vols(&["vol1", "vol2"]));
    p.add_own_vol("vol1");
    assert_eq!(p.own_vols(), vols(&["vol1", "vol2"]));
}

#[test]
fn add_own_vol_twice_keeps_one_copy() {
    let p = UserPolicy::new();
    p.add_own_vol("a");
    p.add_own_vol("a");
    assert_eq!(p.own_vols(), vols(&["a"]));
}

#[test]
fn empty_volume_name_is_accepted() {
    let p = UserPolicy::new();
    p.add_own_vol("");
    assert!(p.is_own_vol(""));
    p.remove_own_vol("");
    assert!(p.own_vols().is_empty());
}

#[test]
fn remove_own_vol_is_stable_and_ignores_missing() {
    let p = UserPolicy::from_parts(vols(&["a", "b", "c", "d"]), AuthorizedVols::new());
    p.remove_own_vol("b");
    assert_eq!(p.own_vols(), vols(&["a", "c", "d"]));
    p.remove_own_vol("d");
    assert_eq!(p.own_vols(), vols(&["a", "c"]));
    p.remove_own_vol("zzz");
    assert_eq!(p.own_vols(), vols(&["a", "c"]));
}

#[test]
fn remove_own_vol_drops_only_first_duplicate() {
    let p = UserPolicy::from_parts(vols(&["a", "b", "a"]), AuthorizedVols::new());
    p.remove_own_vol("a");
    assert_eq!(p.own_vols(), vols(&["b", "a"]));
}

#[test]
fn merge_appends_actions_on_existing_volume() {
    let a = UserPolicy::from_parts(vec![], grants(vec![("vol1", vec!["read"])]));
    let b = UserPolicy::from_parts(vec![], grants(vec![("vol1", vec!["write"])]));
    a.merge_in(&b);
    assert_eq!(a.authorized_vols(), grants(vec![("vol1", vec!["read", "write"])]));
}

#[test]
fn merge_adopts_new_volume_and_appends_owned() {
    let a = UserPolicy::from_parts(vols(&["v1"]), grants(vec![("x", vec!["read"])]));
    let b = UserPolicy::from_parts(vols(&["v1", "v2"]), grants(vec![("y", vec!["write", "read"])]));
    a.merge_in(&b);
    // merge never deduplicates
    assert_eq!(a.own_vols(), vols(&["v1", "v1", "v2"]));
    assert_eq!(a.authorized_vols(), grants(vec![("x", vec!["read"]), ("y", vec!["write", "read"])]));
}

#[test]
fn merge_twice_doubles_entries() {
    let a = UserPolicy::new();
    let b = UserPolicy::from_parts(vols(&["v"]), grants(vec![("g", vec!["read"])]));
    a.merge_in(&b);
    a.merge_in(&b);
    assert_eq!(a.own_vols(), vols(&["v", "v"]));
    assert_eq!(a.actions_for("g"), Some(vols(&["read", "read"])));
}

#[test]
fn merge_copies_adopted_action_list() {
    let a = UserPolicy::new();
    let b = UserPolicy::from_parts(vec![], grants(vec![("vol9", vec!["read"])]));
    a.merge_in(&b);
    // later changes to the source must not show through the target
    let extra = UserPolicy::from_parts(vec![], grants(vec![("vol9", vec!["delete"])]));
    b.merge_in(&extra);
    assert_eq!(b.actions_for("vol9"), Some(vols(&["read", "delete"])));
    assert_eq!(a.actions_for("vol9"), Some(vols(&["read"])));
}

#[test]
fn merge_with_self_doubles_without_deadlock() {
    let a = UserPolicy::from_parts(vols(&["v"]), grants(vec![("g", vec!["read"])]));
    a.merge_in(&a);
    assert_eq!(a.own_vols(), vols(&["v", "v"]));
    assert_eq!(a.actions_for("g"), Some(vols(&["read", "read"])));
}

#[test]
fn subtract_removes_one_action() {
    let a = UserPolicy::from_parts(vec![], grants(vec![("vol1", vec!["read", "write"])]));
    let b = UserPolicy::from_parts(vec![], grants(vec![("vol1", vec!["read"])]));
    a.subtract_out(&b);
    assert_eq!(a.authorized_vols(), grants(vec![("vol1", vec!["write"])]));
}

#[test]
fn subtract_keeps_emptied_volume_key() {
    let a = UserPolicy::from_parts(vec![], grants(vec![("vol1", vec!["read"])]));
    let b = UserPolicy::from_parts(vec![], grants(vec![("vol1", vec!["read"])]));
    a.subtract_out(&b);
    assert_eq!(a.actions_for("vol1"), Some(vec![]));
    assert!(!a.is_authorized("vol1", "read"));
    assert!(!a.is_empty());
}

#[test]
fn subtract_removes_single_copy_per_name() {
    let a = UserPolicy::from_parts(vols(&["v", "v", "w"]), grants(vec![("g", vec!["read", "read", "write"])]));
    let b = UserPolicy::from_parts(vols(&["v"]), grants(vec![("g", vec!["read"])]));
    a.subtract_out(&b);
    assert_eq!(a.own_vols(), vols(&["v", "w"]));
    assert_eq!(a.actions_for("g"), Some(vols(&["read", "write"])));
}

#[test]
fn subtract_ignores_unknown_volumes_and_actions() {
    let a = UserPolicy::from_parts(vols(&["v"]), grants(vec![("g", vec!["read"])]));
    let b = UserPolicy::from_parts(vols(&["nope"]), grants(vec![("g", vec!["write"]), ("other", vec!["read"])]));
    a.subtract_out(&b);
    assert_eq!(a.own_vols(), vols(&["v"]));
    assert_eq!(a.authorized_vols(), grants(vec![("g", vec!["read"])]));
}

#[test]
fn dedup_collapses_owned_volumes() {
    let a = UserPolicy::from_parts(vols(&["vol1", "vol1", "vol2"]), AuthorizedVols::new());
    let clean = a.dedup();
    assert_eq!(clean.own_vols(), vols(&["vol1", "vol2"]));
    // receiver untouched
    assert_eq!(a.own_vols(), vols(&["vol1", "vol1", "vol2"]));
}

#[test]
fn dedup_collapses_actions_in_first_seen_order() {
    let a = UserPolicy::from_parts(vec![], grants(vec![("g", vec!["write", "read", "write", "read"]), ("h", vec![])]));
    let clean = a.dedup();
    assert_eq!(clean.authorized_vols(), grants(vec![("g", vec!["write", "read"]), ("h", vec![])]));
}

#[test]
fn dedup_is_idempotent() {
    let a = UserPolicy::from_parts(vols(&["b", "a", "b", "c", "a"]), grants(vec![("g", vec!["x", "y", "x"])]));
    let once = a.dedup();
    let twice = once.dedup();
    assert_eq!(once, twice);
}

#[test]
fn merge_then_subtract_restores_owned_count() {
    let a = UserPolicy::from_parts(vols(&["v1", "v2"]), grants(vec![("g", vec!["read"])]));
    let b = UserPolicy::from_parts(vols(&["v2", "v3"]), grants(vec![("g", vec!["read", "write"])]));
    let before_owned = a.own_vols().len();
    a.merge_in(&b);
    a.subtract_out(&b);
    assert_eq!(a.own_vols().len(), before_owned);
    // the first copy of v2 goes, the merged one stays
    assert_eq!(a.own_vols(), vols(&["v1", "v2"]));
    assert_eq!(a.actions_for("g"), Some(vols(&["read"])));
}

#[test]
fn merge_clean_subtract_loses_overlapping_actions() {
    let a = UserPolicy::from_parts(vols(&["v1"]), grants(vec![("g", vec!["read"])]));
    let b = UserPolicy::from_parts(vols(&["v2"]), grants(vec![("g", vec!["read", "write"])]));
    a.merge_in(&b);
    let a = a.dedup();
    a.subtract_out(&b);
    assert_eq!(a.own_vols(), vols(&["v1"]));
    // "read" was held before the merge but is gone now
    assert_eq!(a.actions_for("g"), Some(vec![]));
}

#[test]
fn merge_then_subtract_is_not_an_inverse_for_new_keys() {
    let a = UserPolicy::new();
    let b = UserPolicy::from_parts(vec![], grants(vec![("g", vec!["read"])]));
    a.merge_in(&b);
    a.subtract_out(&b);
    // the adopted key survives with an empty list
    assert_eq!(a.authorized_vols(), grants(vec![("g", vec![])]));
}

#[test]
fn owned_and_granted_are_independent() {
    let a = UserPolicy::from_parts(vols(&["v"]), grants(vec![("v", vec!["read"])]));
    a.remove_own_vol("v");
    assert!(!a.is_own_vol("v"));
    assert!(a.is_authorized("v", "read"));
}

#[test]
fn clone_and_eq_compare_contents() {
    let a = UserPolicy::from_parts(vols(&["v"]), grants(vec![("g", vec!["read"])]));
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(a, a);
    b.add_own_vol("w");
    assert_ne!(a, b);
}
