use serde::{Deserialize, Serialize};

/// A named, independently evaluable condition contributing to a state's
/// completion determination
///
/// Checkpoints are value objects owned by their state; their only
/// cross-entity rule is name uniqueness within the state (validated as
/// `DuplicateCheckpointName`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint name, unique within the owning state
    pub name: String,

    /// What has to hold for this checkpoint to be fulfilled
    pub description: String,
}

impl Checkpoint {
    /// Create a new checkpoint
    pub fn new(name: String, description: String) -> Self {
        Self { name, description }
    }
}

/// State-specific data of a language element
///
/// A state expresses a situation in which all its checkpoints are
/// fulfilled. States form a chain through the successor link; a state may
/// never be its own direct or indirect successor (validated as
/// `CyclicSuccessor`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StateData {
    /// Ordered checklist of this state
    pub checkpoints: Vec<Checkpoint>,

    /// The successor state, if any
    pub successor: Option<String>,

    /// The predecessor state, if any. Non-owning back reference.
    pub predecessor: Option<String>,

    /// The alpha whose progress this state describes
    pub alpha: Option<String>,
}

impl StateData {
    /// Create empty state data
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a checkpoint to the checklist
    pub fn add_checkpoint(&mut self, checkpoint: Checkpoint) {
        self.checkpoints.push(checkpoint);
    }
}
