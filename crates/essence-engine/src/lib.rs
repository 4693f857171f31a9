//! Essence Engine - Orchestration layer
//!
//! Provides the `ResolutionEngine` facade that coordinates composition,
//! extension application, and view projection over one element graph
//! snapshot, with a version-keyed memoization cache.

pub mod engine;

pub use engine::ResolutionEngine;
