use serde::{Deserialize, Serialize};

/// Extension-specific data of a language element
///
/// If an extension X is associated with target element T and context group
/// C, then when T is viewed through C, what is seen is T with X's function
/// applied to the named attribute. The target may not itself be an
/// extension or a merge resolution (validated as `InvalidExtensionTarget`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionData {
    /// The group through which this extension is active
    pub element_group: String,

    /// The element to be extended
    pub target_element: String,

    /// The name of the attribute which is to be extended
    pub target_attribute: String,

    /// Source text of the function applied to the target attribute,
    /// parsed by `extension::ExtensionFunction`
    pub extension_function: String,
}

impl ExtensionData {
    /// Create new extension data
    pub fn new(
        element_group: String,
        target_element: String,
        target_attribute: String,
        extension_function: String,
    ) -> Self {
        Self {
            element_group,
            target_element,
            target_attribute,
            extension_function,
        }
    }
}
