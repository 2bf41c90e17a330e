pub mod auth_service;
pub mod google_auth_service;
pub mod password;
pub mod token_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use google_auth_service::GoogleAuthService;
pub use password::PasswordHasher;
pub use token_service::TokenService;
pub use user_service::UserService;
