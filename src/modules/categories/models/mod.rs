mod category;

pub use category::{Category, CategoryDto, CategoryRequest};
