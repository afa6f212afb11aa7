pub mod categories;
pub mod health;
pub mod products;
pub mod users;
