use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::effect::EffectType;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::validation::{is_http_url, Validator};

/// Component settings with a fixed shape for one effect type
pub trait ComponentSettings: Serialize + DeserializeOwned + Default {
    const EFFECT_TYPE: EffectType;

    fn check(&self, v: &mut Validator);

    fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::default();
        self.check(&mut v);
        v.finish()
    }
}

/// Shallow-merges `patch` over `stored`, then parses and validates the result
///
/// Keys missing from both take the settings' defaults. Returns the
/// normalised settings as stored JSON.
///
/// # Example
/// ```
/// use portfolio_api::domain::ui_effect::{merge_settings, DitherSettings};
/// use serde_json::json;
///
/// let stored = json!({ "colorNum": 8 });
/// let merged = merge_settings::<DitherSettings>(&stored, &json!({ "intensity": 0.5 })).unwrap();
/// assert_eq!(merged["colorNum"], 8);
/// assert_eq!(merged["intensity"], 0.5);
/// assert_eq!(merged["coverage"], "section");
/// ```
pub fn merge_settings<S: ComponentSettings>(stored: &Value, patch: &Value) -> DomainResult<Value> {
    let patch = patch
        .as_object()
        .ok_or_else(|| DomainError::invalid("settings", "Settings must be an object"))?;

    let mut merged: Map<String, Value> = stored.as_object().cloned().unwrap_or_default();
    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }

    let settings: S = serde_json::from_value(Value::Object(merged))
        .map_err(|e| DomainError::invalid("settings", e.to_string()))?;
    settings.validate()?;

    serde_json::to_value(&settings).map_err(|e| DomainError::Storage(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    Full,
    #[default]
    Section,
    Element,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DitherSettings {
    pub wave_color: [f64; 3],
    pub color_num: i32,
    pub wave_amplitude: f64,
    pub wave_frequency: f64,
    pub enable_mouse_interaction: bool,
    pub animation_speed: f64,
    pub intensity: f64,
    pub coverage: Coverage,
    pub z_index: i32,
}

impl Default for DitherSettings {
    fn default() -> Self {
        Self {
            wave_color: [0.54, 0.36, 0.96],
            color_num: 6,
            wave_amplitude: 0.25,
            wave_frequency: 2.5,
            enable_mouse_interaction: true,
            animation_speed: 1.0,
            intensity: 0.8,
            coverage: Coverage::Section,
            z_index: 1000,
        }
    }
}

/// Rules shared by the dither block of enhanced projects
pub(crate) fn check_wave(
    v: &mut Validator,
    wave_color: &[f64; 3],
    color_num: i32,
    wave_amplitude: f64,
    wave_frequency: f64,
) {
    if wave_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
        v.push(
            "waveColor",
            "Wave color must be an array of 3 values between 0 and 1",
        );
    }
    v.range("colorNum", color_num, 2, 32, "Color number must be between 2 and 32");
    v.range(
        "waveAmplitude",
        wave_amplitude,
        0.0,
        2.0,
        "Wave amplitude must be between 0 and 2",
    );
    v.range(
        "waveFrequency",
        wave_frequency,
        0.1,
        10.0,
        "Wave frequency must be between 0.1 and 10",
    );
}

impl ComponentSettings for DitherSettings {
    const EFFECT_TYPE: EffectType = EffectType::Dither;

    fn check(&self, v: &mut Validator) {
        check_wave(
            v,
            &self.wave_color,
            self.color_num,
            self.wave_amplitude,
            self.wave_frequency,
        );
        v.range(
            "animationSpeed",
            self.animation_speed,
            0.1,
            5.0,
            "Animation speed must be between 0.1 and 5",
        );
        v.range("intensity", self.intensity, 0.0, 1.0, "Intensity must be between 0 and 1");
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpotlightSettings {
    pub enabled: bool,
    pub spotlight_color: String,
    pub spotlight_size: f64,
    pub border_radius: String,
    pub background_color: String,
    pub border_color: String,
    pub transition: String,
    pub hover_scale: f64,
    pub glow_intensity: f64,
}

impl Default for SpotlightSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            spotlight_color: "rgba(139, 92, 246, 0.3)".into(),
            spotlight_size: 200.0,
            border_radius: "1.5rem".into(),
            background_color: "rgba(15, 15, 15, 0.95)".into(),
            border_color: "rgba(75, 85, 99, 0.3)".into(),
            transition: "all 0.3s ease".into(),
            hover_scale: 1.02,
            glow_intensity: 0.5,
        }
    }
}

impl ComponentSettings for SpotlightSettings {
    const EFFECT_TYPE: EffectType = EffectType::Spotlight;

    fn check(&self, v: &mut Validator) {
        v.range(
            "spotlightSize",
            self.spotlight_size,
            50.0,
            500.0,
            "Spotlight size must be between 50 and 500 pixels",
        );
        v.range("hoverScale", self.hover_scale, 1.0, 1.2, "Hover scale must be between 1 and 1.2");
        v.range(
            "glowIntensity",
            self.glow_intensity,
            0.0,
            1.0,
            "Glow intensity must be between 0 and 1",
        );
    }
}

pub const DEFAULT_BEHIND_GRADIENT: &str = "radial-gradient(farthest-side circle at var(--pointer-x) var(--pointer-y), hsla(262, 100%, 88%, var(--card-opacity)) 4%, hsla(262, 50%, 78%, calc(var(--card-opacity)*0.75)) 10%, hsla(262, 25%, 68%, calc(var(--card-opacity)*0.5)) 50%, hsla(262, 0%, 58%, 0) 100%), conic-gradient(from 124deg at 50% 50%, #8B5CF6 0%, #06B6D4 40%, #06B6D4 60%, #8B5CF6 100%)";

pub const DEFAULT_INNER_GRADIENT: &str =
    "linear-gradient(145deg, rgba(30, 27, 75, 0.9) 0%, rgba(67, 56, 202, 0.3) 100%)";

pub(crate) fn default_custom_colors() -> Vec<String> {
    vec!["#8B5CF6".into(), "#06B6D4".into()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardAnimations {
    pub hover: bool,
    pub float: bool,
    pub glow: bool,
}

impl Default for CardAnimations {
    fn default() -> Self {
        Self {
            hover: true,
            float: false,
            glow: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileCardSettings {
    pub enable_tilt: bool,
    pub tilt_max_angle: f64,
    pub tilt_reverse: bool,
    pub behind_gradient: String,
    pub inner_gradient: String,
    pub show_behind_gradient: bool,
    pub card_opacity: f64,
    pub border_radius: String,
    pub custom_colors: Vec<String>,
    pub animations: CardAnimations,
}

impl Default for ProfileCardSettings {
    fn default() -> Self {
        Self {
            enable_tilt: true,
            tilt_max_angle: 15.0,
            tilt_reverse: false,
            behind_gradient: DEFAULT_BEHIND_GRADIENT.into(),
            inner_gradient: DEFAULT_INNER_GRADIENT.into(),
            show_behind_gradient: true,
            card_opacity: 0.8,
            border_radius: "1.5rem".into(),
            custom_colors: default_custom_colors(),
            animations: CardAnimations::default(),
        }
    }
}

impl ComponentSettings for ProfileCardSettings {
    const EFFECT_TYPE: EffectType = EffectType::ProfileCard;

    fn check(&self, v: &mut Validator) {
        v.range(
            "tiltMaxAngle",
            self.tilt_max_angle,
            0.0,
            45.0,
            "Tilt angle must be between 0 and 45 degrees",
        );
        v.range("cardOpacity", self.card_opacity, 0.0, 1.0, "Card opacity must be between 0 and 1");
        for (i, color) in self.custom_colors.iter().enumerate() {
            v.hex_color(&format!("customColors[{}]", i), color);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuDirection {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuTransform {
    pub initial: String,
    #[serde(rename = "final")]
    pub end: String,
}

impl Default for MenuTransform {
    fn default() -> Self {
        Self {
            initial: "translateY(30px)".into(),
            end: "translateY(0px)".into(),
        }
    }
}

fn default_link_color() -> String {
    "#8B5CF6".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSocialLink {
    pub name: String,
    pub url: String,
    pub icon: String,
    #[serde(default = "default_link_color")]
    pub color: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaggeredMenuSettings {
    pub enabled: bool,
    pub direction: MenuDirection,
    pub stagger_delay: f64,
    pub animation_duration: f64,
    pub ease: String,
    pub initial_opacity: f64,
    pub final_opacity: f64,
    pub transform: MenuTransform,
    pub social_links: Vec<MenuSocialLink>,
}

impl Default for StaggeredMenuSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            direction: MenuDirection::Horizontal,
            stagger_delay: 0.1,
            animation_duration: 0.6,
            ease: "power2.out".into(),
            initial_opacity: 0.0,
            final_opacity: 1.0,
            transform: MenuTransform::default(),
            social_links: vec![
                MenuSocialLink {
                    name: "GitHub".into(),
                    url: "https://github.com".into(),
                    icon: "github".into(),
                    color: "#8B5CF6".into(),
                    order: 1,
                },
                MenuSocialLink {
                    name: "LinkedIn".into(),
                    url: "https://linkedin.com".into(),
                    icon: "linkedin".into(),
                    color: "#06B6D4".into(),
                    order: 2,
                },
            ],
        }
    }
}

impl ComponentSettings for StaggeredMenuSettings {
    const EFFECT_TYPE: EffectType = EffectType::StaggeredMenu;

    fn check(&self, v: &mut Validator) {
        v.range(
            "staggerDelay",
            self.stagger_delay,
            0.0,
            1.0,
            "Stagger delay must be between 0 and 1 second",
        );
        v.range(
            "animationDuration",
            self.animation_duration,
            0.1,
            3.0,
            "Animation duration must be between 0.1 and 3 seconds",
        );
        v.range(
            "initialOpacity",
            self.initial_opacity,
            0.0,
            1.0,
            "Initial opacity must be between 0 and 1",
        );
        v.range(
            "finalOpacity",
            self.final_opacity,
            0.0,
            1.0,
            "Final opacity must be between 0 and 1",
        );
        for (i, link) in self.social_links.iter().enumerate() {
            if link.name.trim().is_empty() {
                v.push(format!("socialLinks[{}].name", i), "Link name is required");
            }
            if !is_http_url(&link.url) {
                v.push(format!("socialLinks[{}].url", i), "Please enter a valid URL");
            }
        }
    }
}
