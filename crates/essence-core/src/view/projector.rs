use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::{Attributes, Element, ElementKind, FeatureSelection, ViewSelection};
use crate::ops::Store;

/// One element as exposed to a viewing context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedElement {
    /// Id of the underlying element
    pub element_id: String,

    /// Dynamic kind
    pub kind: ElementKind,

    /// Element name
    pub name: String,

    /// Whether the element may be suppressed by composition/extension
    /// rules
    pub suppressable: bool,

    /// Attribute values exposed to the caller. Raw or effective,
    /// depending on how the projection input was built.
    pub attributes: Attributes,
}

impl ProjectedElement {
    /// Build a projection input from an element's raw attributes
    pub fn from_element(element: &Element) -> Self {
        Self {
            element_id: element.id.clone(),
            kind: element.kind(),
            name: element.name.clone(),
            suppressable: element.suppressable,
            attributes: element.attributes.clone(),
        }
    }

    /// Build a projection input carrying precomputed (effective)
    /// attributes
    pub fn with_attributes(element: &Element, attributes: Attributes) -> Self {
        Self {
            element_id: element.id.clone(),
            kind: element.kind(),
            name: element.name.clone(),
            suppressable: element.suppressable,
            attributes,
        }
    }
}

/// Narrow a resolved element set to what a viewing context exposes
///
/// Elements excluded by the view selection are dropped only when they are
/// suppressable; a non-suppressable element stays visible regardless of
/// the selection (Essence 9.4.3.2). The feature selection then filters
/// each retained element's attribute map. Default selections are the
/// identity projection. Input order is preserved.
pub fn project(
    elements: Vec<ProjectedElement>,
    view: &ViewSelection,
    features: &FeatureSelection,
) -> Vec<ProjectedElement> {
    elements
        .into_iter()
        .filter(|e| !e.suppressable || view.permits(e.kind, &e.element_id))
        .map(|mut e| {
            e.attributes.retain(|name| features.permits(name));
            e
        })
        .collect()
}

/// Convenience wrapper: look up resolved ids in the store and project
/// their raw attributes
///
/// # Errors
/// Returns `ElementNotFound` if a resolved id dangles.
pub fn project_ids(
    store: &Store,
    element_ids: &[String],
    view: &ViewSelection,
    features: &FeatureSelection,
) -> Result<Vec<ProjectedElement>> {
    let elements = element_ids
        .iter()
        .map(|id| store.get(id).map(ProjectedElement::from_element))
        .collect::<Result<Vec<_>>>()?;
    Ok(project(elements, view, features))
}
