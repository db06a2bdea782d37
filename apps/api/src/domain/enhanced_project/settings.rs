use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainResult;
use crate::domain::ui_effect::settings::{
    check_wave, default_custom_colors, DEFAULT_BEHIND_GRADIENT, DEFAULT_INNER_GRADIENT,
};
use crate::domain::validation::{is_hex_color, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpotlightCardStyle {
    pub spotlight_color: String,
    pub border_radius: String,
    pub background_color: String,
    pub border_color: String,
    pub enable_spotlight: bool,
}

impl Default for SpotlightCardStyle {
    fn default() -> Self {
        Self {
            spotlight_color: "rgba(139, 92, 246, 0.3)".into(),
            border_radius: "1.5rem".into(),
            background_color: "rgba(15, 15, 15, 0.95)".into(),
            border_color: "rgba(75, 85, 99, 0.3)".into(),
            enable_spotlight: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileCardStyle {
    pub enable_tilt: bool,
    pub behind_gradient: String,
    pub inner_gradient: String,
    pub show_behind_gradient: bool,
    pub avatar_url: Option<String>,
    pub icon_url: Option<String>,
    pub custom_colors: Vec<String>,
}

impl Default for ProfileCardStyle {
    fn default() -> Self {
        Self {
            enable_tilt: true,
            behind_gradient: DEFAULT_BEHIND_GRADIENT.into(),
            inner_gradient: DEFAULT_INNER_GRADIENT.into(),
            show_behind_gradient: true,
            avatar_url: None,
            icon_url: None,
            custom_colors: default_custom_colors(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardDisplay {
    pub accent_color: String,
    pub text_color: String,
    pub tags: Vec<String>,
    pub display_order: i32,
}

impl Default for CardDisplay {
    fn default() -> Self {
        Self {
            accent_color: "#8B5CF6".into(),
            text_color: "#F8FAFC".into(),
            tags: Vec::new(),
            display_order: 0,
        }
    }
}

/// How a project renders as an interactive card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardSettings {
    pub spotlight_card: SpotlightCardStyle,
    pub profile_card: ProfileCardStyle,
    pub display: CardDisplay,
}

impl CardSettings {
    pub fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::default();
        v.http_url(
            "profileCard.avatarUrl",
            self.profile_card.avatar_url.as_deref(),
            "Avatar URL must be a valid URL",
        );
        v.http_url(
            "profileCard.iconUrl",
            self.profile_card.icon_url.as_deref(),
            "Icon URL must be a valid URL",
        );
        for (i, color) in self.profile_card.custom_colors.iter().enumerate() {
            v.hex_color(&format!("profileCard.customColors[{}]", i), color);
        }
        if !is_hex_color(&self.display.accent_color) {
            v.push("display.accentColor", "Accent color must be a valid hex color");
        }
        if self.display.display_order < 0 {
            v.push(
                "display.displayOrder",
                "Display order must be a non-negative integer",
            );
        }
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DitherWave {
    pub wave_color: [f64; 3],
    pub color_num: i32,
    pub wave_amplitude: f64,
    pub wave_frequency: f64,
}

impl Default for DitherWave {
    fn default() -> Self {
        Self {
            wave_color: [0.54, 0.36, 0.96],
            color_num: 6,
            wave_amplitude: 0.25,
            wave_frequency: 2.5,
        }
    }
}

/// Background effect tuning for a project page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub dither: DitherWave,
}

impl EffectSettings {
    pub fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::default();
        let mut wave = Validator::default();
        check_wave(
            &mut wave,
            &self.dither.wave_color,
            self.dither.color_num,
            self.dither.wave_amplitude,
            self.dither.wave_frequency,
        );
        v.nested("dither", wave.finish());
        v.finish()
    }
}
