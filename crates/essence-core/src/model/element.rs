use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attributes::Attributes;
use super::extension::ExtensionData;
use super::group::GroupData;
use super::merge::MergeResolutionData;
use super::state::StateData;

/// Dynamic type of a language element
///
/// This is the query type accepted by `resolve_elements`: the resolver
/// selects members whose `Element::kind()` matches it. Kinds are flat
/// (no subtype hierarchy); a Kernel or Practice is a `Group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Group,
    Alpha,
    Activity,
    ActivitySpace,
    WorkProduct,
    Competency,
    Pattern,
    State,
    Extension,
    MergeResolution,
}

/// Family of a basic (non-group, non-auxiliary) element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicKind {
    Alpha,
    Activity,
    ActivitySpace,
    WorkProduct,
    Competency,
    Pattern,
}

impl From<BasicKind> for ElementKind {
    fn from(kind: BasicKind) -> Self {
        match kind {
            BasicKind::Alpha => ElementKind::Alpha,
            BasicKind::Activity => ElementKind::Activity,
            BasicKind::ActivitySpace => ElementKind::ActivitySpace,
            BasicKind::WorkProduct => ElementKind::WorkProduct,
            BasicKind::Competency => ElementKind::Competency,
            BasicKind::Pattern => ElementKind::Pattern,
        }
    }
}

/// Kind-specific payload of a language element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementPayload {
    /// An element group (Kernel, Practice, Library): owns and refers to
    /// other elements
    Group(GroupData),
    /// A state of an alpha with its checklist and successor chain
    State(StateData),
    /// An attribute override active when the target is viewed through a
    /// specific group
    Extension(ExtensionData),
    /// A rule reconciling same-kind-same-name collisions within a group
    MergeResolution(MergeResolutionData),
    /// A basic element with no engine-visible structure of its own
    Basic(BasicKind),
}

/// A language element record
///
/// The root entity of the metamodel. All relationships are stored as element
/// ids and resolved through the `Store`, so the graph carries no live object
/// references and no reference cycles at the ownership level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier
    pub id: String,

    /// Element name; `(kind, name)` is the merge identity during composition
    pub name: String,

    /// The element group that owns this element. Mandatory for every
    /// element that is not itself a group (validated as `MissingOwner`).
    pub owner: Option<String>,

    /// Whether this element may be suppressed in an extension or
    /// composition (Essence 9.4.3.2)
    pub suppressable: bool,

    /// Tags associated with this element
    pub tags: Vec<String>,

    /// Extensible attribute values (description and friends). The name is
    /// identity, not an attribute, so extensions cannot rewrite it.
    pub attributes: Attributes,

    /// Kind-specific data
    pub payload: ElementPayload,

    /// Timestamp when this element was created. Audit data owned by the
    /// authoring/persistence side; the resolution engine never reads it.
    pub created_at: DateTime<Utc>,

    /// Timestamp when this element was last updated
    pub updated_at: DateTime<Utc>,
}

impl Element {
    /// Create a new element with the given id, name, and payload
    pub fn new(id: String, name: String, payload: ElementPayload) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            owner: None,
            suppressable: true,
            tags: Vec::new(),
            attributes: Attributes::new(),
            payload,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new empty element group
    pub fn new_group(id: String, name: String) -> Self {
        Self::new(id, name, ElementPayload::Group(GroupData::new()))
    }

    /// Create a new state with an empty checklist
    pub fn new_state(id: String, name: String) -> Self {
        Self::new(id, name, ElementPayload::State(StateData::new()))
    }

    /// Create a new basic element of the given family
    pub fn new_basic(id: String, name: String, kind: BasicKind) -> Self {
        Self::new(id, name, ElementPayload::Basic(kind))
    }

    /// Create a new extension element
    pub fn new_extension(id: String, name: String, data: ExtensionData) -> Self {
        Self::new(id, name, ElementPayload::Extension(data))
    }

    /// Create a new merge resolution
    pub fn new_merge_resolution(id: String, name: String, data: MergeResolutionData) -> Self {
        Self::new(id, name, ElementPayload::MergeResolution(data))
    }

    /// The dynamic kind of this element, derived from its payload
    pub fn kind(&self) -> ElementKind {
        match &self.payload {
            ElementPayload::Group(_) => ElementKind::Group,
            ElementPayload::State(_) => ElementKind::State,
            ElementPayload::Extension(_) => ElementKind::Extension,
            ElementPayload::MergeResolution(_) => ElementKind::MergeResolution,
            ElementPayload::Basic(kind) => (*kind).into(),
        }
    }

    /// Check if this element is an element group
    pub fn is_group(&self) -> bool {
        matches!(self.payload, ElementPayload::Group(_))
    }

    /// Borrow the group data, if this element is a group
    pub fn as_group(&self) -> Option<&GroupData> {
        match &self.payload {
            ElementPayload::Group(data) => Some(data),
            _ => None,
        }
    }

    /// Mutably borrow the group data, if this element is a group
    pub fn as_group_mut(&mut self) -> Option<&mut GroupData> {
        match &mut self.payload {
            ElementPayload::Group(data) => Some(data),
            _ => None,
        }
    }

    /// Borrow the state data, if this element is a state
    pub fn as_state(&self) -> Option<&StateData> {
        match &self.payload {
            ElementPayload::State(data) => Some(data),
            _ => None,
        }
    }

    /// Mutably borrow the state data, if this element is a state
    pub fn as_state_mut(&mut self) -> Option<&mut StateData> {
        match &mut self.payload {
            ElementPayload::State(data) => Some(data),
            _ => None,
        }
    }

    /// Borrow the extension data, if this element is an extension
    pub fn as_extension(&self) -> Option<&ExtensionData> {
        match &self.payload {
            ElementPayload::Extension(data) => Some(data),
            _ => None,
        }
    }

    /// Borrow the merge resolution data, if this element is one
    pub fn as_merge_resolution(&self) -> Option<&MergeResolutionData> {
        match &self.payload {
            ElementPayload::MergeResolution(data) => Some(data),
            _ => None,
        }
    }
}
