// UI effect domain module
// Stored configuration for the front end's animated components

pub mod effect;
pub mod settings;

pub use effect::{EffectType, UiEffect, UiEffectFilter, UiEffectInput};
pub use settings::{
    merge_settings, CardAnimations, ComponentSettings, Coverage, DitherSettings, MenuDirection,
    MenuSocialLink, MenuTransform, ProfileCardSettings, SpotlightSettings, StaggeredMenuSettings,
};
