pub mod auth;
pub mod oauth;
pub mod token;

pub use auth::*;
pub use oauth::*;
pub use token::*;
