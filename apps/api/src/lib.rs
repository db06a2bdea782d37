//! Portfolio API Library
//!
//! REST backend of a personal portfolio site: projects, contact messages,
//! the owner's profile and the UI effect configuration consumed by the
//! front end, with JWT authentication for the admin role.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod state;
