#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{CourseRepository, InMemoryRepository, Storage, StorageError, UserRepository};
