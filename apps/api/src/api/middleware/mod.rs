// Request guards for protected routes

pub mod auth;

pub use auth::{AdminUser, AuthUser, OptionalUser};
