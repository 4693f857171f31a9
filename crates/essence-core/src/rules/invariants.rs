use std::collections::{HashMap, HashSet};

use crate::errors::EssenceError;
use crate::ops::Store;
use crate::traversal::all_successors;

/// Find non-group elements that have no owner
///
/// Every language element that is not an element group needs an owner.
///
/// Returns the offending element ids.
pub fn find_missing_owners(store: &Store) -> Vec<String> {
    store
        .list_elements()
        .filter(|e| !e.is_group() && e.owner.is_none())
        .map(|e| e.id.clone())
        .collect()
}

/// Find groups that transitively own or refer to themselves
///
/// Depth-first traversal per root group over owned+referred group edges.
/// The failure signal is re-encountering the *root*: revisiting a shared
/// sub-group on another branch is legal DAG sharing and is skipped via the
/// visited set, not reported.
///
/// Returns (group_id, containment path root..root) tuples.
pub fn find_self_containing_groups(store: &Store) -> Vec<(String, Vec<String>)> {
    let mut offenders = Vec::new();

    for group in store.list_groups() {
        let mut visited = HashSet::new();
        let mut path = vec![group.id.clone()];
        if reaches_root(store, &group.id, &group.id, &mut visited, &mut path) {
            offenders.push((group.id.clone(), path));
        }
    }

    offenders
}

fn reaches_root(
    store: &Store,
    root_id: &str,
    current_id: &str,
    visited: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> bool {
    let Ok(element) = store.get(current_id) else {
        return false;
    };
    let Some(data) = element.as_group() else {
        return false;
    };

    for member_id in data.member_ids() {
        let Ok(member) = store.get(member_id) else {
            continue; // dangling ids are a store-level concern
        };
        if !member.is_group() {
            continue;
        }
        if member_id == root_id {
            path.push(member_id.clone());
            return true;
        }
        if !visited.insert(member_id.clone()) {
            continue; // shared sub-group, legal
        }
        path.push(member_id.clone());
        if reaches_root(store, root_id, member_id, visited, path) {
            return true;
        }
        path.pop();
    }

    false
}

/// Find extensions whose target is itself an extension or merge resolution
///
/// Returns (extension_id, target_id) tuples.
pub fn find_invalid_extension_targets(store: &Store) -> Vec<(String, String)> {
    let mut invalid = Vec::new();

    for element in store.list_elements() {
        let Some(data) = element.as_extension() else {
            continue;
        };
        let Ok(target) = store.get(&data.target_element) else {
            continue;
        };
        if target.as_extension().is_some() || target.as_merge_resolution().is_some() {
            invalid.push((element.id.clone(), target.id.clone()));
        }
    }

    invalid
}

/// Find states in which two checkpoints share a name
///
/// Returns (state_id, duplicated name) tuples, one per duplicated name.
pub fn find_duplicate_checkpoint_names(store: &Store) -> Vec<(String, String)> {
    let mut duplicates = Vec::new();

    for state in store.list_states() {
        let Some(data) = state.as_state() else {
            continue;
        };

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for checkpoint in &data.checkpoints {
            *counts.entry(checkpoint.name.as_str()).or_insert(0) += 1;
        }

        let mut reported = HashSet::new();
        for checkpoint in &data.checkpoints {
            let name = checkpoint.name.as_str();
            if counts[name] > 1 && reported.insert(name) {
                duplicates.push((state.id.clone(), name.to_string()));
            }
        }
    }

    duplicates
}

/// Find states that are their own direct or indirect successor
///
/// Runs the successor walk for every state. A walk can also fail on a
/// cycle the queried state merely points into without being part of; that
/// cycle is attributed to its own members (each of which is caught by its
/// own walk), not to the pointing state.
///
/// Returns (state_id, partial successor chain) tuples.
pub fn find_cyclic_successors(store: &Store) -> Vec<(String, Vec<String>)> {
    let mut cyclic = Vec::new();

    for state in store.list_states() {
        if let Err(EssenceError::CyclicSuccessor { state_id, partial }) =
            all_successors(store, &state.id)
        {
            if state_id == state.id {
                cyclic.push((state.id.clone(), partial));
            }
        }
    }

    cyclic
}
