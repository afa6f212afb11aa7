pub mod error;
pub mod pagination;
pub mod security;

pub use error::{AppError, Result};
pub use pagination::{Page, PageQuery, PageRequest, SortDirection};
pub use security::PasswordEncoder;
