pub mod composition;

pub use composition::{reference_closure, resolve_elements};
