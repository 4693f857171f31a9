use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::element::ElementKind;

/// Selection narrowing which elements are visible to a viewing context
///
/// Both filters are optional; `None` means no narrowing on that axis, and a
/// default selection is the identity (everything visible). An element is
/// visible when it passes both the kind filter and the instance filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewSelection {
    /// Kinds to include, or `None` for all kinds
    pub kinds: Option<BTreeSet<ElementKind>>,

    /// Explicit element ids to include, or `None` for all instances
    pub element_ids: Option<BTreeSet<String>>,
}

impl ViewSelection {
    /// The identity selection: everything visible
    pub fn all() -> Self {
        Self::default()
    }

    /// Select elements of the given kinds only
    pub fn of_kinds(kinds: impl IntoIterator<Item = ElementKind>) -> Self {
        Self {
            kinds: Some(kinds.into_iter().collect()),
            element_ids: None,
        }
    }

    /// Select the given element instances only
    pub fn of_elements(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            kinds: None,
            element_ids: Some(ids.into_iter().collect()),
        }
    }

    /// Check whether an element of the given kind and id passes this
    /// selection
    pub fn permits(&self, kind: ElementKind, element_id: &str) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&kind) {
                return false;
            }
        }
        if let Some(ids) = &self.element_ids {
            if !ids.contains(element_id) {
                return false;
            }
        }
        true
    }
}

/// Selection narrowing which attributes of a visible element are included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FeatureSelection {
    /// Attribute names to include, or `None` for all attributes
    pub attributes: Option<BTreeSet<String>>,
}

impl FeatureSelection {
    /// The identity selection: all attributes included
    pub fn all() -> Self {
        Self::default()
    }

    /// Include only the given attribute names
    pub fn of_attributes(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            attributes: Some(names.into_iter().collect()),
        }
    }

    /// Check whether an attribute name passes this selection
    pub fn permits(&self, attribute: &str) -> bool {
        match &self.attributes {
            Some(names) => names.contains(attribute),
            None => true,
        }
    }
}
