use serde::{Deserialize, Serialize};

use super::element::ElementKind;

/// Merge resolution data
///
/// Records how two or more elements of identical kind and name visible
/// within a group's effective scope reconcile into a single element: the
/// designated winner is the one representative the composition resolver
/// keeps. Collisions with no matching resolution fall back to the default
/// policy (owned copy first, then traversal order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeResolutionData {
    /// The group whose effective scope this resolution applies to
    pub group_id: String,

    /// Kind of the colliding elements
    pub target_kind: ElementKind,

    /// Name of the colliding elements
    pub target_name: String,

    /// The element chosen as the merged representative
    pub winner_id: String,
}

impl MergeResolutionData {
    /// Create new merge resolution data
    pub fn new(
        group_id: String,
        target_kind: ElementKind,
        target_name: String,
        winner_id: String,
    ) -> Self {
        Self {
            group_id,
            target_kind,
            target_name,
            winner_id,
        }
    }
}
