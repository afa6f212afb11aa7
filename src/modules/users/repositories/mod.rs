pub mod role_repository;
pub mod user_repository;

pub use role_repository::{MySqlRoleRepository, RoleRepository};
pub use user_repository::{MySqlUserRepository, UserRepository};
