mod product;

pub use product::{Product, ProductDto, ProductRequest};
