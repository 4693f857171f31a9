pub mod projector;

pub use projector::{project, project_ids, ProjectedElement};
