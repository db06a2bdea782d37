// Authentication primitives
// Token signing and password hashing used by the auth handlers and extractors

pub mod jwt;
pub mod password;
