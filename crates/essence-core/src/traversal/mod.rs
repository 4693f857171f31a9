pub mod successors;

pub use successors::all_successors;
