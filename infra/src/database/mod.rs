//! Database module - MongoDB implementations
//!
//! This module provides the document store access layer:
//! - Client construction and connectivity checks
//! - Unique index setup for the users collection
//! - Repository implementations over typed collections

pub mod connection;
pub mod mongo;


// Re-export commonly used types
pub use connection::DatabaseConnection;
pub use mongo::MongoUserRepository;
