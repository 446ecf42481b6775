#![forbid(unsafe_code)]

pub mod keys;
pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryRepository, KeyValueRepository, Storage, StorageError};
