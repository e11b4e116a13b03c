//! Database module

pub mod backend;
pub mod memory;
pub mod operations;
pub mod schema;

// Re-export for convenience
pub use backend::KeyValueBackend;
pub use memory::MemoryBackend;
pub use operations::SqliteBackend;
pub use schema::initialize_database;
