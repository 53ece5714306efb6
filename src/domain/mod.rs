pub mod batch;
pub mod change;
pub mod chunk;
pub mod snapshot;
pub mod summary;
