//! # Style settings
//!
//! Two tiers of settings share one shape:
//!
//! - [`GlobalSettings`] live on the root and are always fully populated.
//! - [`LocalSettings`] live on each leaf and hold only the fields that leaf
//!   overrides.
//!
//! Fields are addressed with a [`SettingKey`], written `category.field`
//! (`palette.text`, `styling.fontSize`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;

/// Document color palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    pub brand: String,
    pub accent: String,
    pub text: String,
    pub background: String,
    pub on_brand: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            brand: "#3366ff".to_string(),
            accent: "#ff9f1c".to_string(),
            text: "#000000".to_string(),
            background: "#ffffff".to_string(),
            on_brand: "#ffffff".to_string(),
        }
    }
}

/// Typography and spacing profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Styling {
    pub font_size: String,
    pub weight: String,
    pub spacing: String,
    pub radius: String,
    pub shadow: String,
}

impl Default for Styling {
    fn default() -> Self {
        Self {
            font_size: "16px".to_string(),
            weight: "400".to_string(),
            spacing: "1.5".to_string(),
            radius: "4px".to_string(),
            shadow: "none".to_string(),
        }
    }
}

/// Document-wide defaults held by the root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub palette: Palette,
    pub styling: Styling,
}

/// Settings a leaf actually renders with
pub type EffectiveSettings = GlobalSettings;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_brand: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylingOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
}

/// Per-leaf override fragment. Absent categories fall through entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<PaletteOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<StylingOverride>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaletteField {
    Brand,
    Accent,
    Text,
    Background,
    OnBrand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StylingField {
    FontSize,
    Weight,
    Spacing,
    Radius,
    Shadow,
}

/// Address of one settings field: a category plus a field within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    Palette(PaletteField),
    Styling(StylingField),
}

impl PaletteField {
    pub const ALL: [PaletteField; 5] = [
        PaletteField::Brand,
        PaletteField::Accent,
        PaletteField::Text,
        PaletteField::Background,
        PaletteField::OnBrand,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PaletteField::Brand => "brand",
            PaletteField::Accent => "accent",
            PaletteField::Text => "text",
            PaletteField::Background => "background",
            PaletteField::OnBrand => "onBrand",
        }
    }
}

impl StylingField {
    pub const ALL: [StylingField; 5] = [
        StylingField::FontSize,
        StylingField::Weight,
        StylingField::Spacing,
        StylingField::Radius,
        StylingField::Shadow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StylingField::FontSize => "fontSize",
            StylingField::Weight => "weight",
            StylingField::Spacing => "spacing",
            StylingField::Radius => "radius",
            StylingField::Shadow => "shadow",
        }
    }
}

impl SettingKey {
    pub fn category(self) -> &'static str {
        match self {
            SettingKey::Palette(_) => "palette",
            SettingKey::Styling(_) => "styling",
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            SettingKey::Palette(field) => field.name(),
            SettingKey::Styling(field) => field.name(),
        }
    }

    /// Every addressable key, palette first
    pub fn all() -> impl Iterator<Item = SettingKey> {
        PaletteField::ALL
            .into_iter()
            .map(SettingKey::Palette)
            .chain(StylingField::ALL.into_iter().map(SettingKey::Styling))
    }

    /// Build a key from separate category and field names
    pub fn parse_parts(category: &str, field: &str) -> Result<Self, TreeError> {
        let unknown = || TreeError::UnknownSetting(format!("{}.{}", category, field));

        match category {
            "palette" => PaletteField::ALL
                .into_iter()
                .find(|f| f.name() == field)
                .map(SettingKey::Palette)
                .ok_or_else(unknown),
            "styling" => StylingField::ALL
                .into_iter()
                .find(|f| f.name() == field)
                .map(SettingKey::Styling)
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

impl FromStr for SettingKey {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, field) = s
            .split_once('.')
            .ok_or_else(|| TreeError::UnknownSetting(s.to_string()))?;
        Self::parse_parts(category, field)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category(), self.field())
    }
}

impl Palette {
    pub fn get(&self, field: PaletteField) -> &str {
        match field {
            PaletteField::Brand => &self.brand,
            PaletteField::Accent => &self.accent,
            PaletteField::Text => &self.text,
            PaletteField::Background => &self.background,
            PaletteField::OnBrand => &self.on_brand,
        }
    }

    fn slot_mut(&mut self, field: PaletteField) -> &mut String {
        match field {
            PaletteField::Brand => &mut self.brand,
            PaletteField::Accent => &mut self.accent,
            PaletteField::Text => &mut self.text,
            PaletteField::Background => &mut self.background,
            PaletteField::OnBrand => &mut self.on_brand,
        }
    }

    /// Per-field merge: each overridden field wins, the rest fall through
    pub fn overlay(&self, local: &PaletteOverride) -> Palette {
        let mut merged = self.clone();
        for field in PaletteField::ALL {
            if let Some(value) = local.get(field) {
                *merged.slot_mut(field) = value.to_string();
            }
        }
        merged
    }
}

impl Styling {
    pub fn get(&self, field: StylingField) -> &str {
        match field {
            StylingField::FontSize => &self.font_size,
            StylingField::Weight => &self.weight,
            StylingField::Spacing => &self.spacing,
            StylingField::Radius => &self.radius,
            StylingField::Shadow => &self.shadow,
        }
    }

    fn slot_mut(&mut self, field: StylingField) -> &mut String {
        match field {
            StylingField::FontSize => &mut self.font_size,
            StylingField::Weight => &mut self.weight,
            StylingField::Spacing => &mut self.spacing,
            StylingField::Radius => &mut self.radius,
            StylingField::Shadow => &mut self.shadow,
        }
    }

    pub fn overlay(&self, local: &StylingOverride) -> Styling {
        let mut merged = self.clone();
        for field in StylingField::ALL {
            if let Some(value) = local.get(field) {
                *merged.slot_mut(field) = value.to_string();
            }
        }
        merged
    }
}

impl PaletteOverride {
    pub fn get(&self, field: PaletteField) -> Option<&str> {
        match field {
            PaletteField::Brand => self.brand.as_deref(),
            PaletteField::Accent => self.accent.as_deref(),
            PaletteField::Text => self.text.as_deref(),
            PaletteField::Background => self.background.as_deref(),
            PaletteField::OnBrand => self.on_brand.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: PaletteField) -> &mut Option<String> {
        match field {
            PaletteField::Brand => &mut self.brand,
            PaletteField::Accent => &mut self.accent,
            PaletteField::Text => &mut self.text,
            PaletteField::Background => &mut self.background,
            PaletteField::OnBrand => &mut self.on_brand,
        }
    }

    pub fn is_empty(&self) -> bool {
        PaletteField::ALL.into_iter().all(|f| self.get(f).is_none())
    }
}

impl StylingOverride {
    pub fn get(&self, field: StylingField) -> Option<&str> {
        match field {
            StylingField::FontSize => self.font_size.as_deref(),
            StylingField::Weight => self.weight.as_deref(),
            StylingField::Spacing => self.spacing.as_deref(),
            StylingField::Radius => self.radius.as_deref(),
            StylingField::Shadow => self.shadow.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: StylingField) -> &mut Option<String> {
        match field {
            StylingField::FontSize => &mut self.font_size,
            StylingField::Weight => &mut self.weight,
            StylingField::Spacing => &mut self.spacing,
            StylingField::Radius => &mut self.radius,
            StylingField::Shadow => &mut self.shadow,
        }
    }

    pub fn is_empty(&self) -> bool {
        StylingField::ALL.into_iter().all(|f| self.get(f).is_none())
    }
}

impl GlobalSettings {
    pub fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::Palette(field) => self.palette.get(field),
            SettingKey::Styling(field) => self.styling.get(field),
        }
    }

    pub fn set(&mut self, key: SettingKey, value: impl Into<String>) {
        match key {
            SettingKey::Palette(field) => *self.palette.slot_mut(field) = value.into(),
            SettingKey::Styling(field) => *self.styling.slot_mut(field) = value.into(),
        }
    }

    /// Merge a local override on top of these defaults
    pub fn cascade(&self, local: &LocalSettings) -> EffectiveSettings {
        EffectiveSettings {
            palette: match &local.palette {
                Some(palette) => self.palette.overlay(palette),
                None => self.palette.clone(),
            },
            styling: match &local.styling {
                Some(styling) => self.styling.overlay(styling),
                None => self.styling.clone(),
            },
        }
    }
}

impl LocalSettings {
    pub fn get(&self, key: SettingKey) -> Option<&str> {
        match key {
            SettingKey::Palette(field) => self.palette.as_ref()?.get(field),
            SettingKey::Styling(field) => self.styling.as_ref()?.get(field),
        }
    }

    /// Set one field, creating its category object if absent
    pub fn set(&mut self, key: SettingKey, value: impl Into<String>) {
        match key {
            SettingKey::Palette(field) => {
                let palette = self.palette.get_or_insert_with(PaletteOverride::default);
                *palette.slot_mut(field) = Some(value.into());
            }
            SettingKey::Styling(field) => {
                let styling = self.styling.get_or_insert_with(StylingOverride::default);
                *styling.slot_mut(field) = Some(value.into());
            }
        }
    }

    /// Drop one override. Returns whether a value was present.
    ///
    /// A category left without any field is removed.
    pub fn unset(&mut self, key: SettingKey) -> bool {
        match key {
            SettingKey::Palette(field) => {
                let Some(palette) = self.palette.as_mut() else {
                    return false;
                };
                let had = palette.slot_mut(field).take().is_some();
                if palette.is_empty() {
                    self.palette = None;
                }
                had
            }
            SettingKey::Styling(field) => {
                let Some(styling) = self.styling.as_mut() else {
                    return false;
                };
                let had = styling.slot_mut(field).take().is_some();
                if styling.is_empty() {
                    self.styling = None;
                }
                had
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_none() && self.styling.is_none()
    }
}
