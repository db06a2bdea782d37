// Infrastructure layer module
// Contains database adapters and startup plumbing
// Follows Hexagonal Architecture

pub mod bootstrap;
pub mod repositories;
pub mod seed;
