// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod contact;
pub mod enhanced_project;
pub mod errors;
pub mod pagination;
pub mod profile;
pub mod project;
pub mod repositories;
pub mod ui_effect;
pub mod user;
pub mod validation;
