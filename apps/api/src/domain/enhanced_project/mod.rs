// Enhanced project domain module
// Projects with interactive card and background effect settings

#![allow(clippy::module_inception)]

pub mod project;
pub mod settings;

pub use project::{
    BulkUpdate, BulkUpdateResult, CategoryCount, CloneOverrides, EnhancedProject,
    EnhancedProjectDraft, EnhancedProjectFilter, EnhancedProjectInput, ProjectStats,
    StatsOverview, StatusCount,
};
pub use settings::{
    CardDisplay, CardSettings, DitherWave, EffectSettings, ProfileCardStyle, SpotlightCardStyle,
};
