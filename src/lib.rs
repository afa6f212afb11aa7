//! catalogd - catalog management backend
//!
//! REST CRUD over users, products, and categories with a relational store,
//! Argon2 password hashing, and many-to-many association reconciliation.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::categories;
pub use modules::products;
pub use modules::users;
