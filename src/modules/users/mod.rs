// Users module. Roles live here too since they are only reachable
// through users.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Role, RoleDto, User, UserCreateRequest, UserDto, UserUpdateRequest};
pub use repositories::{MySqlRoleRepository, MySqlUserRepository, RoleRepository, UserRepository};
pub use services::UserService;
