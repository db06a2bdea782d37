// Repository traits (ports)
// Implemented by the infrastructure layer; handlers only see these interfaces

pub mod contact_repository;
pub mod enhanced_project_repository;
pub mod profile_repository;
pub mod project_repository;
pub mod ui_effect_repository;
pub mod user_repository;

pub use contact_repository::ContactRepository;
pub use enhanced_project_repository::EnhancedProjectRepository;
pub use profile_repository::ProfileRepository;
pub use project_repository::ProjectRepository;
pub use ui_effect_repository::UiEffectRepository;
pub use user_repository::UserRepository;
