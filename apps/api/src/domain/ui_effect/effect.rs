use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::validation::Validator;

/// Front-end visual effect a configuration applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "effect_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EffectType {
    Dither,
    Spotlight,
    ProfileCard,
    StaggeredMenu,
    ElectricBorder,
    LogoLoop,
    ShapeBlur,
}

impl EffectType {
    pub const ALL: [EffectType; 7] = [
        EffectType::Dither,
        EffectType::Spotlight,
        EffectType::ProfileCard,
        EffectType::StaggeredMenu,
        EffectType::ElectricBorder,
        EffectType::LogoLoop,
        EffectType::ShapeBlur,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectType::Dither => "dither",
            EffectType::Spotlight => "spotlight",
            EffectType::ProfileCard => "profile-card",
            EffectType::StaggeredMenu => "staggered-menu",
            EffectType::ElectricBorder => "electric-border",
            EffectType::LogoLoop => "logo-loop",
            EffectType::ShapeBlur => "shape-blur",
        }
    }

    /// Human label used in default names and messages, e.g. "Profile Card"
    pub fn label(&self) -> &'static str {
        match self {
            EffectType::Dither => "Dither",
            EffectType::Spotlight => "Spotlight",
            EffectType::ProfileCard => "Profile Card",
            EffectType::StaggeredMenu => "Staggered Menu",
            EffectType::ElectricBorder => "Electric Border",
            EffectType::LogoLoop => "Logo Loop",
            EffectType::ShapeBlur => "Shape Blur",
        }
    }

    pub fn default_effect_name(&self) -> String {
        format!("Default {} Effect", self.label())
    }
}

impl FromStr for EffectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| "Invalid effect type".to_string())
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored configuration of one effect
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiEffect {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    pub is_active: bool,
    pub global_settings: Value,
    pub component_settings: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UiEffect {
    pub fn new(name: String, effect_type: EffectType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            effect_type,
            is_active: true,
            global_settings: json!({}),
            component_settings: json!({}),
            created_at: now,
            updated_at: now,
        }
    }

    /// Settings the public endpoints hand to the front end
    pub fn effective_settings(&self) -> &Value {
        match &self.component_settings {
            Value::Object(map) if map.is_empty() => &self.global_settings,
            Value::Null => &self.global_settings,
            settings => settings,
        }
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
        self.updated_at = Utc::now();
    }
}

/// Request body for creating or updating an effect
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiEffectInput {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub effect_type: Option<String>,
    pub is_active: Option<bool>,
    pub global_settings: Option<Value>,
    pub component_settings: Option<Value>,
}

impl UiEffectInput {
    fn check(&self, v: &mut Validator) -> Option<(String, EffectType)> {
        let name = self.name.trim().to_string();
        v.length("name", &name, 1, 50, "Effect name must be between 1 and 50 characters");

        let effect_type = match self.effect_type.as_deref().map(str::parse::<EffectType>) {
            Some(Ok(t)) => Some(t),
            Some(Err(message)) => {
                v.push("type", message);
                None
            }
            None => {
                v.push("type", "Invalid effect type");
                None
            }
        };

        for (field, value) in [
            ("globalSettings", &self.global_settings),
            ("componentSettings", &self.component_settings),
        ] {
            if let Some(value) = value {
                if !value.is_object() {
                    v.push(field, format!("{} must be an object", field));
                }
            }
        }

        Some((name, effect_type?))
    }

    /// Validates the input and builds a new effect
    pub fn into_effect(self) -> DomainResult<UiEffect> {
        let mut v = Validator::default();
        let checked = self.check(&mut v);
        v.finish()?;
        let Some((name, effect_type)) = checked else {
            return Err(DomainError::invalid("type", "Invalid effect type"));
        };

        let mut effect = UiEffect::new(name, effect_type);
        effect.is_active = self.is_active.unwrap_or(true);
        if let Some(settings) = self.global_settings {
            effect.global_settings = settings;
        }
        if let Some(settings) = self.component_settings {
            effect.component_settings = settings;
        }
        Ok(effect)
    }

    /// Validates the input and applies it to an existing effect; omitted
    /// flags and settings keep their stored values
    pub fn apply_to(self, effect: &mut UiEffect) -> DomainResult<()> {
        let mut v = Validator::default();
        let checked = self.check(&mut v);
        v.finish()?;
        let Some((name, effect_type)) = checked else {
            return Err(DomainError::invalid("type", "Invalid effect type"));
        };

        effect.name = name;
        effect.effect_type = effect_type;
        if let Some(is_active) = self.is_active {
            effect.is_active = is_active;
        }
        if let Some(settings) = self.global_settings {
            effect.global_settings = settings;
        }
        if let Some(settings) = self.component_settings {
            effect.component_settings = settings;
        }
        effect.updated_at = Utc::now();
        Ok(())
    }
}

/// Filters for the authenticated effect listing
#[derive(Debug, Clone, Default)]
pub struct UiEffectFilter {
    pub effect_type: Option<EffectType>,
    pub is_active: Option<bool>,
}
