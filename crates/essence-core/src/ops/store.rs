use std::collections::HashMap;

use crate::errors::{EssenceError, Result};
use crate::model::{Element, ElementKind};

/// In-memory store of the loaded element graph
///
/// HashMap-backed arena keyed by element id, with a parallel insertion-order
/// list so that every listing is deterministic (HashMap iteration order is
/// not). Loading and refreshing the snapshot from wherever it persists is
/// the caller's concern; the resolution components only read.
///
/// The version counter increments on every mutation. Cached resolutions
/// keyed by an older version are stale and must not be served.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Map of element id to element
    elements: HashMap<String, Element>,
    /// Element ids in insertion order
    order: Vec<String>,
    /// Monotonic graph version, bumped on every mutation
    version: u64,
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self::default()
    }

    /// Current graph version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get an element by id
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element has this id.
    pub fn get(&self, id: &str) -> Result<&Element> {
        self.elements
            .get(id)
            .ok_or_else(|| EssenceError::ElementNotFound {
                element_id: id.to_string(),
            })
    }

    /// Get a mutable reference to an element by id
    ///
    /// Bumps the graph version: handing out `&mut` counts as a mutation,
    /// so cached resolutions against the old version go stale.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element has this id.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut Element> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| EssenceError::ElementNotFound {
                element_id: id.to_string(),
            })?;
        self.version += 1;
        Ok(element)
    }

    /// Get an element by id, requiring it to be a group
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` or `NotAGroup`.
    pub fn get_group(&self, id: &str) -> Result<&Element> {
        let element = self.get(id)?;
        if !element.is_group() {
            return Err(EssenceError::NotAGroup {
                element_id: id.to_string(),
            });
        }
        Ok(element)
    }

    /// Get an element by id, requiring it to be a state
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` or `NotAState`.
    pub fn get_state(&self, id: &str) -> Result<&Element> {
        let element = self.get(id)?;
        if element.as_state().is_none() {
            return Err(EssenceError::NotAState {
                element_id: id.to_string(),
            });
        }
        Ok(element)
    }

    /// Insert an element, replacing any element with the same id
    pub fn insert(&mut self, element: Element) {
        if !self.elements.contains_key(&element.id) {
            self.order.push(element.id.clone());
        }
        self.elements.insert(element.id.clone(), element);
        self.version += 1;
    }

    /// Check if an element exists
    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// List all elements in insertion order
    pub fn list_elements(&self) -> impl Iterator<Item = &Element> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    /// List all element groups in insertion order
    pub fn list_groups(&self) -> impl Iterator<Item = &Element> {
        self.list_elements().filter(|e| e.is_group())
    }

    /// List all states in insertion order
    pub fn list_states(&self) -> impl Iterator<Item = &Element> {
        self.list_elements().filter(|e| e.as_state().is_some())
    }

    /// Elements the group owns by value, in declaration order
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound`/`NotAGroup` for the group itself, or
    /// `ElementNotFound` for a dangling member id.
    pub fn get_owned_by(&self, group_id: &str) -> Result<Vec<&Element>> {
        let group = self.get(group_id)?;
        let data = group.as_group().ok_or_else(|| EssenceError::NotAGroup {
            element_id: group_id.to_string(),
        })?;
        data.owned_ids.iter().map(|id| self.get(id)).collect()
    }

    /// Elements the group owns by reference, in declaration order
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound`/`NotAGroup` for the group itself, or
    /// `ElementNotFound` for a dangling member id.
    pub fn get_referred_by(&self, group_id: &str) -> Result<Vec<&Element>> {
        let group = self.get(group_id)?;
        let data = group.as_group().ok_or_else(|| EssenceError::NotAGroup {
            element_id: group_id.to_string(),
        })?;
        data.referred_ids.iter().map(|id| self.get(id)).collect()
    }

    /// Extension elements whose context is the given group, in insertion
    /// order (deterministic application order for the applier)
    pub fn get_extensions_for(&self, group_id: &str) -> Vec<&Element> {
        self.list_elements()
            .filter(|e| {
                e.as_extension()
                    .is_some_and(|data| data.element_group == group_id)
            })
            .collect()
    }

    /// Merge resolutions scoped to the given group, in insertion order
    pub fn get_merge_resolutions_for(&self, group_id: &str) -> Vec<&Element> {
        self.list_elements()
            .filter(|e| {
                e.as_merge_resolution()
                    .is_some_and(|data| data.group_id == group_id)
            })
            .collect()
    }

    /// Look up the merge resolution, if any, that reconciles collisions of
    /// the given kind and name within the group's scope
    pub fn find_merge_resolution(
        &self,
        group_id: &str,
        kind: ElementKind,
        name: &str,
    ) -> Option<&Element> {
        self.get_merge_resolutions_for(group_id)
            .into_iter()
            .find(|e| {
                e.as_merge_resolution()
                    .is_some_and(|data| data.target_kind == kind && data.target_name == name)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BasicKind, Element, ExtensionData};

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new();
        assert_eq!(store.list_elements().count(), 0);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = Store::new();
        store.insert(Element::new_group("g1".to_string(), "Kernel".to_string()));

        let group = store.get("g1").unwrap();
        assert_eq!(group.name, "Kernel");
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_get_missing_element() {
        let store = Store::new();
        let result = store.get("nope");
        assert!(matches!(result, Err(EssenceError::ElementNotFound { .. })));
    }

    #[test]
    fn test_get_group_rejects_non_group() {
        let mut store = Store::new();
        store.insert(Element::new_basic(
            "a1".to_string(),
            "Requirements".to_string(),
            BasicKind::Alpha,
        ));

        let result = store.get_group("a1");
        assert!(matches!(result, Err(EssenceError::NotAGroup { .. })));
    }

    #[test]
    fn test_list_elements_insertion_order() {
        let mut store = Store::new();
        store.insert(Element::new_group("g2".to_string(), "B".to_string()));
        store.insert(Element::new_group("g1".to_string(), "A".to_string()));

        let ids: Vec<&str> = store.list_elements().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["g2", "g1"]);
    }

    #[test]
    fn test_owned_by_preserves_declaration_order() {
        let mut store = Store::new();
        let mut group = Element::new_group("g1".to_string(), "Kernel".to_string());
        let data = group.as_group_mut().unwrap();
        data.add_owned_id("a2".to_string());
        data.add_owned_id("a1".to_string());
        store.insert(group);
        store.insert(Element::new_basic(
            "a1".to_string(),
            "One".to_string(),
            BasicKind::Alpha,
        ));
        store.insert(Element::new_basic(
            "a2".to_string(),
            "Two".to_string(),
            BasicKind::Alpha,
        ));

        let owned = store.get_owned_by("g1").unwrap();
        let ids: Vec<&str> = owned.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a1"]);
    }

    #[test]
    fn test_owned_by_dangling_member_errors() {
        let mut store = Store::new();
        let mut group = Element::new_group("g1".to_string(), "Kernel".to_string());
        group.as_group_mut().unwrap().add_owned_id("ghost".to_string());
        store.insert(group);

        let result = store.get_owned_by("g1");
        assert!(matches!(result, Err(EssenceError::ElementNotFound { .. })));
    }

    #[test]
    fn test_extensions_for_filters_by_group() {
        let mut store = Store::new();
        store.insert(Element::new_extension(
            "x1".to_string(),
            "Beta note".to_string(),
            ExtensionData::new(
                "g1".to_string(),
                "a1".to_string(),
                "description".to_string(),
                "append \" [beta]\"".to_string(),
            ),
        ));
        store.insert(Element::new_extension(
            "x2".to_string(),
            "Other".to_string(),
            ExtensionData::new(
                "g2".to_string(),
                "a1".to_string(),
                "description".to_string(),
                "append \" [other]\"".to_string(),
            ),
        ));

        let exts = store.get_extensions_for("g1");
        assert_eq!(exts.len(), 1);
        assert_eq!(exts[0].id, "x1");
    }

    #[test]
    fn test_version_bumps_on_mutation() {
        let mut store = Store::new();
        store.insert(Element::new_group("g1".to_string(), "Kernel".to_string()));
        let v1 = store.version();

        store.get_mut("g1").unwrap().name = "Renamed".to_string();
        assert!(store.version() > v1);
    }
}
