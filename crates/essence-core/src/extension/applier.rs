use serde_json::Value;
use tracing::debug;

use crate::errors::{EssenceError, Result};
use crate::model::Attributes;
use crate::ops::Store;
use crate::resolve::reference_closure;

use super::function::ExtensionFunction;

/// Compute an element's effective attribute values when viewed through a
/// group
///
/// Starts from the element's raw attributes, then applies every extension
/// whose context is the viewing group or a group reachable through its
/// reference closure and whose target is the element. Application order is
/// deterministic: closure traversal order, then extension declaration
/// order within each group. Each application replaces the named
/// attribute's current value, so stacked extensions compose.
///
/// # Arguments
/// * `store` - Reference to the Store
/// * `element_id` - The element being viewed
/// * `viewing_group_id` - The group providing the viewing context
///
/// # Errors
/// * `ElementNotFound` / `NotAGroup` - Missing element or viewing group
/// * `CyclicReference` - The viewing group's closure is cyclic
/// * `ExtensionEvaluationError` - An applicable extension could not be
///   parsed or applied. The whole call fails; no partially transformed
///   attribute set is ever returned. Callers may surface the raw
///   attributes as a degraded fallback.
pub fn effective_attributes(
    store: &Store,
    element_id: &str,
    viewing_group_id: &str,
) -> Result<Attributes> {
    let element = store.get(element_id)?;
    let mut attributes = element.attributes.clone();

    let closure = reference_closure(store, viewing_group_id)?;
    let mut applied = 0usize;

    for group_id in &closure {
        for extension in store.get_extensions_for(group_id) {
            let Some(data) = extension.as_extension() else {
                continue;
            };
            if data.target_element != element_id {
                continue;
            }

            let function = ExtensionFunction::parse(&data.extension_function).map_err(|reason| {
                EssenceError::ExtensionEvaluationError {
                    extension_id: extension.id.clone(),
                    target_id: element_id.to_string(),
                    reason,
                }
            })?;

            let current = attributes
                .get(&data.target_attribute)
                .cloned()
                .unwrap_or(Value::Null);
            let next = function.apply(&current).map_err(|reason| {
                EssenceError::ExtensionEvaluationError {
                    extension_id: extension.id.clone(),
                    target_id: element_id.to_string(),
                    reason,
                }
            })?;

            attributes.set(data.target_attribute.clone(), next);
            applied += 1;
        }
    }

    debug!(element_id, viewing_group_id, applied, "applied extensions");
    Ok(attributes)
}
