use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// The color mode a theme targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorMode {
    /// Emit true color escape sequences.
    Rgb,

    /// The theme was authored against the ANSI 256 palette.
    Ansi,

    /// Let the rendering layer decide based on terminal capabilities.
    #[default]
    Auto,
}

/// The slots every palette carries, in emission order.
pub(crate) const FIXED_SLOTS: [&str; 15] = [
    "primary",
    "secondary",
    "background",
    "text",
    "border",
    "success",
    "warning",
    "error",
    "info",
    "hover",
    "active",
    "focus",
    "disabled",
    "shadow",
    "shadow_light",
];

/// The slots a theme document must declare.
pub(crate) const REQUIRED_SLOTS: [&str; 4] = ["primary", "background", "text", "border"];

/// A fully resolved color palette.
///
/// Every fixed slot is default-backed so a resolved palette always has a renderable color for
/// it; arbitrary extra slots live in `custom`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub background: Rgb,
    pub text: Rgb,
    pub border: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub error: Rgb,
    pub info: Rgb,
    pub hover: Rgb,
    pub active: Rgb,
    pub focus: Rgb,
    pub disabled: Rgb,
    pub shadow: Rgb,
    pub shadow_light: Rgb,

    /// Slots beyond the fixed set, keyed by their custom name.
    #[serde(flatten)]
    pub custom: BTreeMap<String, Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb::new(0x61, 0xaf, 0xef),
            secondary: Rgb::new(0xc6, 0x78, 0xdd),
            background: Rgb::new(0x28, 0x2c, 0x34),
            text: Rgb::new(0xab, 0xb2, 0xbf),
            border: Rgb::new(0x3e, 0x44, 0x52),
            success: Rgb::new(0x98, 0xc3, 0x79),
            warning: Rgb::new(0xe5, 0xc0, 0x7b),
            error: Rgb::new(0xe0, 0x6c, 0x75),
            info: Rgb::new(0x56, 0xb6, 0xc2),
            hover: Rgb::new(0x2c, 0x31, 0x3c),
            active: Rgb::new(0x3a, 0x3f, 0x4b),
            focus: Rgb::new(0x52, 0x8b, 0xff),
            disabled: Rgb::new(0x5c, 0x63, 0x70),
            shadow: Rgb::new(0x1b, 0x1d, 0x23),
            shadow_light: Rgb::new(0x21, 0x24, 0x2b),
            custom: BTreeMap::new(),
        }
    }
}

impl Palette {
    /// Look up a slot by name, checking fixed slots first and custom slots second.
    pub fn get(&self, slot: &str) -> Option<Rgb> {
        let color = match slot {
            "primary" => self.primary,
            "secondary" => self.secondary,
            "background" => self.background,
            "text" => self.text,
            "border" => self.border,
            "success" => self.success,
            "warning" => self.warning,
            "error" => self.error,
            "info" => self.info,
            "hover" => self.hover,
            "active" => self.active,
            "focus" => self.focus,
            "disabled" => self.disabled,
            "shadow" => self.shadow,
            "shadow_light" => self.shadow_light,
            other => return self.custom.get(other).copied(),
        };
        Some(color)
    }

    /// Set a slot by name; unknown names land in the custom map.
    pub fn set(&mut self, slot: &str, color: Rgb) {
        let target = match slot {
            "primary" => &mut self.primary,
            "secondary" => &mut self.secondary,
            "background" => &mut self.background,
            "text" => &mut self.text,
            "border" => &mut self.border,
            "success" => &mut self.success,
            "warning" => &mut self.warning,
            "error" => &mut self.error,
            "info" => &mut self.info,
            "hover" => &mut self.hover,
            "active" => &mut self.active,
            "focus" => &mut self.focus,
            "disabled" => &mut self.disabled,
            "shadow" => &mut self.shadow,
            "shadow_light" => &mut self.shadow_light,
            other => {
                self.custom.insert(other.to_string(), color);
                return;
            }
        };
        *target = color;
    }

    /// Iterate over every slot, fixed ones first in declaration order, then custom ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> + '_ {
        let fixed = FIXED_SLOTS.iter().map(|slot| (*slot, self.get(slot).expect("fixed slot")));
        let custom = self.custom.iter().map(|(name, color)| (name.as_str(), *color));
        fixed.chain(custom)
    }
}

/// The indirection layer mapping abstract usage roles onto palette slots.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct SemanticMap {
    roles: BTreeMap<String, String>,
}

impl Default for SemanticMap {
    fn default() -> Self {
        let roles = [
            ("panelBackground", "background"),
            ("panelBorder", "border"),
            ("panelTitle", "primary"),
            ("panelContent", "text"),
        ];
        Self { roles: roles.into_iter().map(|(role, slot)| (role.to_string(), slot.to_string())).collect() }
    }
}

impl SemanticMap {
    /// The palette slot the given role maps to.
    pub fn get(&self, role: &str) -> Option<&str> {
        self.roles.get(role).map(String::as_str)
    }

    /// Map a role onto a palette slot, replacing any previous mapping.
    pub fn insert<R: Into<String>, S: Into<String>>(&mut self, role: R, slot: S) {
        self.roles.insert(role.into(), slot.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.roles.iter().map(|(role, slot)| (role.as_str(), slot.as_str()))
    }
}

/// A fully resolved, self contained theme.
///
/// Produced by the resolver and never mutated afterwards; cached instances are cloned out to
/// callers.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ThemeDefinition {
    pub name: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default)]
    pub mode: ColorMode,

    #[serde(default)]
    pub palette: Palette,

    #[serde(default)]
    pub semantic: SemanticMap,
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn fixed_slot_round_trip() {
        let mut palette = Palette::default();
        palette.set("primary", Rgb::new(1, 2, 3));
        assert_eq!(palette.get("primary"), Some(Rgb::new(1, 2, 3)));
        assert_eq!(palette.primary, Rgb::new(1, 2, 3));
    }

    #[test]
    fn custom_slot_round_trip() {
        let mut palette = Palette::default();
        assert_eq!(palette.get("accent"), None);
        palette.set("accent", Rgb::new(9, 9, 9));
        assert_eq!(palette.get("accent"), Some(Rgb::new(9, 9, 9)));
    }

    #[test]
    fn every_fixed_slot_is_gettable() {
        let palette = Palette::default();
        for slot in FIXED_SLOTS {
            assert!(palette.get(slot).is_some(), "slot '{slot}' has no default");
        }
    }

    #[test]
    fn iteration_covers_fixed_and_custom() {
        let mut palette = Palette::default();
        palette.set("accent", Rgb::new(9, 9, 9));
        let slots: Vec<_> = palette.iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(slots.len(), FIXED_SLOTS.len() + 1);
        assert_eq!(slots.last().map(String::as_str), Some("accent"));
    }

    #[test]
    fn default_semantic_roles() {
        let semantic = SemanticMap::default();
        assert_eq!(semantic.get("panelBackground"), Some("background"));
        assert_eq!(semantic.get("panelBorder"), Some("border"));
        assert_eq!(semantic.get("panelTitle"), Some("primary"));
        assert_eq!(semantic.get("panelContent"), Some("text"));
    }

    #[test]
    fn color_mode_strings() {
        assert_eq!(ColorMode::from_str("rgb").unwrap(), ColorMode::Rgb);
        assert_eq!(ColorMode::from_str("auto").unwrap(), ColorMode::Auto);
        ColorMode::from_str("truecolor").unwrap_err();
        assert_eq!(ColorMode::Ansi.to_string(), "ansi");
    }

    #[test]
    fn theme_serialization_round_trip() {
        let mut theme = ThemeDefinition {
            name: "dark".into(),
            description: "a dark theme".into(),
            version: Some("1.0".into()),
            author: None,
            mode: ColorMode::Rgb,
            palette: Palette::default(),
            semantic: SemanticMap::default(),
        };
        theme.palette.set("accent", Rgb::new(1, 2, 3));

        let serialized = serde_yaml::to_string(&theme).expect("serialize failed");
        let deserialized: ThemeDefinition = serde_yaml::from_str(&serialized).expect("deserialize failed");
        assert_eq!(deserialized, theme);
    }
}
