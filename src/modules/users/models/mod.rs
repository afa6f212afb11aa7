mod role;
mod user;

pub use role::{Role, RoleDto};
pub use user::{User, UserCreateRequest, UserDto, UserUpdateRequest};
