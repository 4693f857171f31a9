use serde::{Deserialize, Serialize};

use crate::ops::Store;

use super::invariants;

/// Canonical taxonomy of structural violations
///
/// Each kind maps to a stable code usable for programmatic handling and
/// test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// A non-group element has no owner
    MissingOwner,
    /// A group transitively owns or refers to itself
    SelfContainment,
    /// A state is its own direct or indirect successor
    CyclicSuccessor,
    /// An extension targets an extension or a merge resolution
    InvalidExtensionTarget,
    /// Two checkpoints of one state share a name
    DuplicateCheckpointName,
}

impl ViolationKind {
    /// Get the stable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MissingOwner => "VIOLATION_MISSING_OWNER",
            ViolationKind::SelfContainment => "VIOLATION_SELF_CONTAINMENT",
            ViolationKind::CyclicSuccessor => "VIOLATION_CYCLIC_SUCCESSOR",
            ViolationKind::InvalidExtensionTarget => "VIOLATION_INVALID_EXTENSION_TARGET",
            ViolationKind::DuplicateCheckpointName => "VIOLATION_DUPLICATE_CHECKPOINT_NAME",
        }
    }
}

/// One structural violation found by the validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Classification of the violation
    pub kind: ViolationKind,

    /// The offending element
    pub element_id: String,

    /// Further involved element ids (containment path, extension target,
    /// partial successor chain), empty when not applicable
    pub related: Vec<String>,

    /// Human-readable detail
    pub detail: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.code(), self.element_id, self.detail)
    }
}

/// Result of validating a full graph
///
/// Violations are collected in full, never truncated at the first hit, so
/// an operator fixing a malformed graph sees all problems at once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All violations found, in check order
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Check if the graph is valid (no violations)
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterate over violations of one kind
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Check if any violation of the given kind was found
    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.of_kind(kind).next().is_some()
    }
}

/// Validate the structural invariants of the loaded graph
///
/// Runs every check independently and reports all violations together:
///
/// 1. Ownership rule: every non-group element has an owner
/// 2. Group self-containment: no group transitively contains itself
/// 3. Extension target validity: targets are neither extensions nor merge
///    resolutions
/// 4. Checklist uniqueness: checkpoint names unique per state
/// 5. Successor acyclicity: no state in its own successor closure
///
/// Resolution components may assume a graph this function reported clean.
/// Resolving a graph with unreported `SelfContainment` or
/// `DuplicateCheckpointName` violations is undefined (the resolver still
/// fails fast on cycles rather than looping, but merge results are not
/// meaningful).
pub fn validate(store: &Store) -> ValidationReport {
    let mut report = ValidationReport::default();

    for element_id in invariants::find_missing_owners(store) {
        report.violations.push(Violation {
            kind: ViolationKind::MissingOwner,
            detail: format!("element {} is not a group and has no owner", element_id),
            element_id,
            related: Vec::new(),
        });
    }

    for (group_id, path) in invariants::find_self_containing_groups(store) {
        report.violations.push(Violation {
            kind: ViolationKind::SelfContainment,
            detail: format!("group {} transitively contains itself", group_id),
            element_id: group_id,
            related: path,
        });
    }

    for (extension_id, target_id) in invariants::find_invalid_extension_targets(store) {
        report.violations.push(Violation {
            kind: ViolationKind::InvalidExtensionTarget,
            detail: format!(
                "extension {} targets {}, which is an extension or merge resolution",
                extension_id, target_id
            ),
            element_id: extension_id,
            related: vec![target_id],
        });
    }

    for (state_id, name) in invariants::find_duplicate_checkpoint_names(store) {
        report.violations.push(Violation {
            kind: ViolationKind::DuplicateCheckpointName,
            detail: format!("state {} has two checkpoints named {:?}", state_id, name),
            element_id: state_id,
            related: Vec::new(),
        });
    }

    for (state_id, partial) in invariants::find_cyclic_successors(store) {
        report.violations.push(Violation {
            kind: ViolationKind::CyclicSuccessor,
            detail: format!("state {} is its own direct or indirect successor", state_id),
            element_id: state_id,
            related: partial,
        });
    }

    report
}
