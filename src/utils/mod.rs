pub mod cookies;
pub mod seed;
