pub mod error;
pub mod handlers;
pub mod page;
pub mod routes;

pub use error::ShareError;
