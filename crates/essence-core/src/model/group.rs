use serde::{Deserialize, Serialize};

/// Membership data of an element group
///
/// Groups are recursive: both lists may contain other groups. Declaration
/// order is preserved; the composition resolver's traversal order (and with
/// it the default merge policy) depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupData {
    /// Elements this group owns by value. Deleting the group cascades to
    /// these; each listed element should name this group as its owner.
    pub owned_ids: Vec<String>,

    /// Elements this group owns by reference. Non-owning: deleting the
    /// group leaves these untouched.
    pub referred_ids: Vec<String>,
}

impl GroupData {
    /// Create empty group data
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element id to the owned list (no duplicates)
    pub fn add_owned_id(&mut self, element_id: String) {
        if !self.owned_ids.contains(&element_id) {
            self.owned_ids.push(element_id);
        }
    }

    /// Add an element id to the referred list (no duplicates)
    pub fn add_referred_id(&mut self, element_id: String) {
        if !self.referred_ids.contains(&element_id) {
            self.referred_ids.push(element_id);
        }
    }

    /// Check whether the group directly owns the given element
    pub fn owns(&self, element_id: &str) -> bool {
        self.owned_ids.iter().any(|id| id == element_id)
    }

    /// Iterate over owned then referred member ids, in declaration order
    pub fn member_ids(&self) -> impl Iterator<Item = &String> {
        self.owned_ids.iter().chain(self.referred_ids.iter())
    }
}
