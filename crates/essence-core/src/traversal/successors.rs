use std::collections::HashSet;

use crate::errors::{EssenceError, Result};
use crate::ops::Store;

/// Compute the full successor closure of a state
///
/// Walks `successor` links starting at `state_id`, accumulating state ids
/// in walk order (the starting state is not part of its own closure). A
/// visited set keyed by id guards the walk: re-encountering any state is a
/// cycle, reported as `CyclicSuccessor` carrying the chain walked so far,
/// so a partial chain is never mistaken for a complete one and the walk
/// never loops.
///
/// # Arguments
/// * `store` - Reference to the Store
/// * `state_id` - ID of the state to start from
///
/// # Returns
/// Vector of state IDs in successor order, excluding the start state
///
/// # Errors
/// * `ElementNotFound` / `NotAState` - If the start state is missing or
///   not a state, or a successor link dangles
/// * `CyclicSuccessor` - If a state repeats; `state_id` names the repeated
///   state and `partial` holds the chain accumulated before the repeat
pub fn all_successors(store: &Store, state_id: &str) -> Result<Vec<String>> {
    let start = store.get_state(state_id)?;

    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(state_id.to_string());

    let mut current = start
        .as_state()
        .and_then(|data| data.successor.clone());

    while let Some(id) = current {
        if !visited.insert(id.clone()) {
            return Err(EssenceError::CyclicSuccessor {
                state_id: id,
                partial: chain,
            });
        }

        let state = store.get_state(&id)?;
        chain.push(id);
        current = state.as_state().and_then(|data| data.successor.clone());
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;

    fn state(id: &str, successor: Option<&str>) -> Element {
        let mut element = Element::new_state(id.to_string(), id.to_string());
        if let Some(data) = element.as_state_mut() {
            data.successor = successor.map(str::to_string);
        }
        element
    }

    #[test]
    fn test_all_successors_of_terminal_state() {
        let mut store = Store::new();
        store.insert(state("s1", None));

        let chain = all_successors(&store, "s1").unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_all_successors_chain_order() {
        let mut store = Store::new();
        store.insert(state("s1", Some("s2")));
        store.insert(state("s2", Some("s3")));
        store.insert(state("s3", None));

        let chain = all_successors(&store, "s1").unwrap();
        assert_eq!(chain, vec!["s2", "s3"]);
    }

    #[test]
    fn test_self_successor_is_cyclic() {
        let mut store = Store::new();
        store.insert(state("s1", Some("s1")));

        let result = all_successors(&store, "s1");
        match result {
            Err(EssenceError::CyclicSuccessor { state_id, partial }) => {
                assert_eq!(state_id, "s1");
                assert!(partial.is_empty());
            }
            other => panic!("expected CyclicSuccessor, got {:?}", other),
        }
    }

    #[test]
    fn test_indirect_cycle_returns_partial_chain() {
        let mut store = Store::new();
        store.insert(state("s1", Some("s2")));
        store.insert(state("s2", Some("s1")));

        let result = all_successors(&store, "s1");
        match result {
            Err(EssenceError::CyclicSuccessor { state_id, partial }) => {
                assert_eq!(state_id, "s1");
                assert_eq!(partial, vec!["s2"]);
            }
            other => panic!("expected CyclicSuccessor, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_not_through_start_names_repeated_state() {
        // s1 -> s2 -> s3 -> s2: s1 is not its own successor, but the walk
        // must still stop and report the repeat.
        let mut store = Store::new();
        store.insert(state("s1", Some("s2")));
        store.insert(state("s2", Some("s3")));
        store.insert(state("s3", Some("s2")));

        let result = all_successors(&store, "s1");
        match result {
            Err(EssenceError::CyclicSuccessor { state_id, partial }) => {
                assert_eq!(state_id, "s2");
                assert_eq!(partial, vec!["s2", "s3"]);
            }
            other => panic!("expected CyclicSuccessor, got {:?}", other),
        }
    }
}
