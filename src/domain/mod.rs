pub mod dto;
pub mod entities;
pub mod models;

pub use dto::*;
pub use entities::*;
pub use models::*;
