//! `ResolutionEngine` - cached query facade over one element graph snapshot.
//!
//! The engine owns the `Store` and memoizes composition results in a
//! concurrent map keyed by `(group, kind, store version)`. Every read-side
//! method takes `&self`; mutation goes through `store_mut`, which advances
//! the store version so that previously cached id lists can never be served
//! for the mutated graph.

use dashmap::DashMap;
use tracing::debug;

use essence_core::view::project_ids;
use essence_core::{
    all_successors, effective_attributes, resolve_elements, validate, Attributes, ElementKind,
    FeatureSelection, ProjectedElement, Result, Store, ValidationReport, ViewSelection,
};

/// Cache key for one memoized composition result.
///
/// The store version is part of the key, so entries written against an
/// earlier graph are unreachable after any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResolutionKey {
    group_id: String,
    kind: ElementKind,
    version: u64,
}

/// Query facade over a loaded element graph
///
/// All query methods are pure with respect to the graph: parallel queries
/// over one snapshot are safe, the only shared mutable state being the
/// concurrent memoization cache.
pub struct ResolutionEngine {
    store: Store,
    cache: DashMap<ResolutionKey, Vec<String>>,
}

impl ResolutionEngine {
    /// Create an engine over the given snapshot
    pub fn new(store: Store) -> Self {
        Self {
            store,
            cache: DashMap::new(),
        }
    }

    /// Shared access to the underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access to the underlying store
    ///
    /// Entries cached against earlier store versions are swept here; any
    /// entry written against the version handed out by this call becomes
    /// unreachable once the mutation bumps the version.
    pub fn store_mut(&mut self) -> &mut Store {
        let version = self.store.version();
        self.cache.retain(|key, _| key.version == version);
        &mut self.store
    }

    /// Resolve the composed element set of a group, memoized
    ///
    /// Semantics match [`essence_core::resolve_elements`]; repeated queries
    /// against an unchanged graph are served from the cache.
    ///
    /// # Errors
    /// * `ElementNotFound` / `NotAGroup` - If the group is missing or not a
    ///   group
    /// * `CyclicReference` - If the group transitively contains itself
    pub fn resolve_elements(&self, group_id: &str, kind: ElementKind) -> Result<Vec<String>> {
        let key = ResolutionKey {
            group_id: group_id.to_string(),
            kind,
            version: self.store.version(),
        };

        if let Some(hit) = self.cache.get(&key) {
            debug!(group_id, ?kind, "composition cache hit");
            return Ok(hit.clone());
        }

        let resolved = resolve_elements(&self.store, group_id, kind)?;
        self.cache.insert(key, resolved.clone());
        Ok(resolved)
    }

    /// Effective attribute values of an element as seen through a group
    ///
    /// # Errors
    /// Propagates lookup errors and `ExtensionEvaluationError` from the
    /// underlying applier.
    pub fn effective_attributes(
        &self,
        element_id: &str,
        viewing_group_id: &str,
    ) -> Result<Attributes> {
        effective_attributes(&self.store, element_id, viewing_group_id)
    }

    /// Full successor closure of a state
    ///
    /// # Errors
    /// * `ElementNotFound` / `NotAState` - Bad start state or dangling link
    /// * `CyclicSuccessor` - If a state repeats along the chain
    pub fn all_successors(&self, state_id: &str) -> Result<Vec<String>> {
        all_successors(&self.store, state_id)
    }

    /// Project resolved element ids through view and feature selections
    ///
    /// # Errors
    /// Returns `ElementNotFound` if an id dangles.
    pub fn project(
        &self,
        element_ids: &[String],
        view: &ViewSelection,
        features: &FeatureSelection,
    ) -> Result<Vec<ProjectedElement>> {
        project_ids(&self.store, element_ids, view, features)
    }

    /// Resolve, extend, and project a group's elements in one query
    ///
    /// Equivalent to composing `resolve_elements`, `effective_attributes`
    /// (with the queried group as viewing context), and `project`.
    ///
    /// # Errors
    /// Propagates errors from any of the three stages; no partial result is
    /// returned.
    pub fn resolve_view(
        &self,
        group_id: &str,
        kind: ElementKind,
        view: &ViewSelection,
        features: &FeatureSelection,
    ) -> Result<Vec<ProjectedElement>> {
        let resolved = self.resolve_elements(group_id, kind)?;

        let mut inputs = Vec::with_capacity(resolved.len());
        for element_id in &resolved {
            let attributes = effective_attributes(&self.store, element_id, group_id)?;
            let element = self.store.get(element_id)?;
            inputs.push(ProjectedElement::with_attributes(element, attributes));
        }

        Ok(essence_core::project(inputs, view, features))
    }

    /// Run all structural invariant checks over the snapshot
    pub fn validate(&self) -> ValidationReport {
        validate(&self.store)
    }
}

impl From<Store> for ResolutionEngine {
    fn from(store: Store) -> Self {
        Self::new(store)
    }
}

impl Default for ResolutionEngine {
    fn default() -> Self {
        Self::new(Store::new())
    }
}
