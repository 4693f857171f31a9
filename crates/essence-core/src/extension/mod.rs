pub mod applier;
pub mod function;

pub use applier::effective_attributes;
pub use function::ExtensionFunction;
