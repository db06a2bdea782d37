// Project domain module
// Portfolio projects and their listing rules

#![allow(clippy::module_inception)]

pub mod project;
pub mod value_objects;

pub use project::{
    Project, ProjectDetails, ProjectFilter, ProjectInput, ProjectSort, ProjectSortField,
    FEATURED_PRIORITY,
};
pub use value_objects::{ProjectCategory, ProjectStatus};
