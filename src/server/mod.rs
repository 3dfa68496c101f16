//! Accept loop and worker pool.

pub mod listener;
pub mod pool;

pub use pool::WorkerPool;
