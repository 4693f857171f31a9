use thiserror::Error;

/// Result type alias using EssenceError
pub type Result<T> = std::result::Result<T, EssenceError>;

/// Error taxonomy for resolution-time failures
///
/// Structural problems found by the graph validator are not errors; they
/// are `rules::Violation` records collected into a `ValidationReport` so
/// that all of them surface together. The variants here are the per-call
/// recoverable failures a resolution query can hit; none of them poisons
/// results for unrelated queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EssenceError {
    /// Element not found in store
    #[error("Element not found: {element_id}")]
    ElementNotFound { element_id: String },

    /// The element exists but is not an element group
    #[error("Element is not a group: {element_id}")]
    NotAGroup { element_id: String },

    /// The element exists but is not a state
    #[error("Element is not a state: {element_id}")]
    NotAState { element_id: String },

    /// Cyclic group references reached the resolver despite validation.
    /// The recursion guard fails fast instead of looping.
    #[error("Cyclic group reference involving {group_id} (chain: {chain:?})")]
    CyclicReference { group_id: String, chain: Vec<String> },

    /// A successor walk re-encountered a state. Carries the chain walked
    /// up to the repeat, so partial results are never mistaken for
    /// complete ones.
    #[error("State {state_id} re-encountered in its own successor chain (partial: {partial:?})")]
    CyclicSuccessor {
        state_id: String,
        partial: Vec<String>,
    },

    /// An extension function could not be parsed or applied. The whole
    /// query fails; no partial transform is ever surfaced.
    #[error("Extension {extension_id} failed on target {target_id}: {reason}")]
    ExtensionEvaluationError {
        extension_id: String,
        target_id: String,
        reason: String,
    },
}
