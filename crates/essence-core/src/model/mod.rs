pub mod attributes;
pub mod element;
pub mod extension;
pub mod group;
pub mod merge;
pub mod state;
pub mod view;

pub use attributes::Attributes;
pub use element::{BasicKind, Element, ElementKind, ElementPayload};
pub use extension::ExtensionData;
pub use group::GroupData;
pub use merge::MergeResolutionData;
pub use state::{Checkpoint, StateData};
pub use view::{FeatureSelection, ViewSelection};
