use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::errors::{EssenceError, Result};
use crate::model::ElementKind;
use crate::ops::Store;

/// Memoized sub-results for one resolution call, keyed by (group, kind).
/// Shared sub-groups in a DAG are resolved once per query.
type Memo = HashMap<(String, ElementKind), Vec<String>>;

/// Compute the effective elements of a group for a requested kind
///
/// Implements the Essence `allElements(t)` composition: the union of the
/// group's owned elements of the kind, its referred elements of the kind,
/// and the recursive resolution of every owned or referred sub-group.
/// Output order is first-encounter order: owned, then referred, then
/// nested. Colliding elements (same kind, same name) collapse to a single
/// representative per the merge resolutions scoped to `group_id`, falling
/// back to the default policy: prefer the copy directly owned by the
/// queried group, else the first in traversal order.
///
/// The recursion guard assumes nothing about prior validation: a cyclic
/// group graph that slipped past the validator fails fast with
/// `CyclicReference` instead of looping.
///
/// # Arguments
/// * `store` - Reference to the Store
/// * `group_id` - ID of the group being viewed
/// * `kind` - Dynamic kind of the elements to resolve
///
/// # Returns
/// Element IDs in deterministic first-encounter order, one per
/// (kind, name) identity
///
/// # Errors
/// * `ElementNotFound` / `NotAGroup` - Missing or non-group ids in the graph
/// * `CyclicReference` - The group transitively contains itself
pub fn resolve_elements(store: &Store, group_id: &str, kind: ElementKind) -> Result<Vec<String>> {
    debug!(group_id, kind = ?kind, "resolving effective elements");

    let mut memo = Memo::new();
    let mut chain = Vec::new();
    let collected = collect(store, group_id, kind, &mut memo, &mut chain)?;
    apply_merges(store, group_id, kind, collected)
}

/// The viewing group itself plus every group reachable through its
/// owned/referred closure, in first-encounter order
///
/// This is the scope in which extensions are active for the extension
/// applier. No merging is applied: a group that would lose a name
/// collision still contributes its extensions.
///
/// # Errors
/// Same failure modes as `resolve_elements`.
pub fn reference_closure(store: &Store, group_id: &str) -> Result<Vec<String>> {
    store.get_group(group_id)?;

    let mut memo = Memo::new();
    let mut chain = Vec::new();
    let reachable = collect(store, group_id, ElementKind::Group, &mut memo, &mut chain)?;

    let mut closure = vec![group_id.to_string()];
    for id in reachable {
        if id != group_id {
            closure.push(id);
        }
    }
    Ok(closure)
}

fn collect(
    store: &Store,
    group_id: &str,
    kind: ElementKind,
    memo: &mut Memo,
    chain: &mut Vec<String>,
) -> Result<Vec<String>> {
    let key = (group_id.to_string(), kind);
    if let Some(hit) = memo.get(&key) {
        return Ok(hit.clone());
    }

    if chain.iter().any(|id| id == group_id) {
        let mut cycle = chain.clone();
        cycle.push(group_id.to_string());
        return Err(EssenceError::CyclicReference {
            group_id: group_id.to_string(),
            chain: cycle,
        });
    }
    chain.push(group_id.to_string());

    let owned = store.get_owned_by(group_id)?;
    let referred = store.get_referred_by(group_id)?;

    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for element in owned.iter().filter(|e| e.kind() == kind) {
        push_unique(&mut out, &mut seen, &element.id);
    }
    for element in referred.iter().filter(|e| e.kind() == kind) {
        push_unique(&mut out, &mut seen, &element.id);
    }
    for element in owned.iter().chain(referred.iter()).filter(|e| e.is_group()) {
        let nested = collect(store, &element.id, kind, memo, chain)?;
        for id in nested {
            push_unique(&mut out, &mut seen, &id);
        }
    }

    chain.pop();
    memo.insert(key, out.clone());
    Ok(out)
}

fn push_unique(out: &mut Vec<String>, seen: &mut HashSet<String>, id: &str) {
    if seen.insert(id.to_string()) {
        out.push(id.to_string());
    }
}

/// Collapse (kind, name) collisions to one representative per name
fn apply_merges(
    store: &Store,
    group_id: &str,
    kind: ElementKind,
    ids: Vec<String>,
) -> Result<Vec<String>> {
    let mut names_in_order: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, Vec<String>> = HashMap::new();

    for id in ids {
        let name = store.get(&id)?.name.clone();
        if !by_name.contains_key(&name) {
            names_in_order.push(name.clone());
        }
        by_name.entry(name).or_default().push(id);
    }

    let group = store.get_group(group_id)?;
    let owned_direct: HashSet<&String> = group
        .as_group()
        .map(|data| data.owned_ids.iter().collect())
        .unwrap_or_default();

    let mut out = Vec::with_capacity(names_in_order.len());
    for name in names_in_order {
        let members = &by_name[&name];
        if members.len() == 1 {
            out.push(members[0].clone());
            continue;
        }

        let designated = store
            .find_merge_resolution(group_id, kind, &name)
            .and_then(|e| e.as_merge_resolution())
            .map(|data| data.winner_id.clone())
            .filter(|winner| members.contains(winner));

        let winner = match designated {
            Some(winner) => winner,
            None => members
                .iter()
                .find(|id| owned_direct.contains(id))
                .unwrap_or(&members[0])
                .clone(),
        };
        out.push(winner);
    }

    Ok(out)
}
