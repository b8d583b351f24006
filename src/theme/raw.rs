use super::clean::ThemeDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A color input as it appears in a theme document.
///
/// Exactly one of the shapes (hex string, rgb sequence, r/g/b channels, ansi index, named
/// reference) must be present; that rule is enforced by the validator rather than by serde so
/// that a document with a malformed color still produces a full validation report.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawColor {
    /// A hex encoded color, with an optional leading `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,

    /// The three channels as a sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<Vec<i64>>,

    /// The red channel of the object form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<i64>,

    /// The green channel of the object form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g: Option<i64>,

    /// The blue channel of the object form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<i64>,

    /// An index into the ANSI 256 color palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansi: Option<i64>,

    /// A reference to a named color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RawColor {
    /// The number of input shapes present in this color.
    pub(crate) fn shape_count(&self) -> usize {
        let object_form = self.r.is_some() || self.g.is_some() || self.b.is_some();
        [self.hex.is_some(), self.rgb.is_some(), object_form, self.ansi.is_some(), self.name.is_some()]
            .into_iter()
            .filter(|present| *present)
            .count()
    }
}

/// A theme definition as decoded from a document, before any validation or resolution.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawTheme {
    /// The theme's name.
    #[serde(default)]
    pub name: Option<String>,

    /// A short description of the theme.
    #[serde(default)]
    pub description: Option<String>,

    /// The theme's version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// The theme's author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// The color mode this theme targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// The color palette, keyed by slot name.
    #[serde(default)]
    pub palette: BTreeMap<String, RawColor>,

    /// The semantic role map, keyed by role name.
    #[serde(default)]
    pub semantic: BTreeMap<String, String>,

    /// The theme this theme extends from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Themes whose palettes are borrowed as named colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<Vec<String>>,
}

impl RawTheme {
    /// Decode a single theme document.
    ///
    /// This is purely syntactic; the decoded value must go through the validator before it's
    /// treated as trusted.
    pub fn from_document(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }
}

/// A collection of themes sharing a named color section.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawThemeCollection {
    /// The collection's version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// The themes in this collection, in declaration order.
    #[serde(default)]
    pub themes: Vec<RawTheme>,

    /// Shared named colors, available to every theme in the collection.
    #[serde(default, rename = "namedColors", alias = "named_colors")]
    pub named_colors: BTreeMap<String, RawColor>,
}

impl RawThemeCollection {
    /// Decode a theme collection document.
    pub fn from_document(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }
}

impl From<&ThemeDefinition> for RawTheme {
    /// Turn a resolved theme back into the document shape, with every slot spelled out as a
    /// hex color. Used when exporting a theme to a file.
    fn from(theme: &ThemeDefinition) -> Self {
        let palette = theme
            .palette
            .iter()
            .map(|(slot, color)| (slot.to_string(), RawColor { hex: Some(color.to_string()), ..Default::default() }))
            .collect();
        let semantic = theme.semantic.iter().map(|(role, slot)| (role.to_string(), slot.to_string())).collect();
        Self {
            name: Some(theme.name.clone()),
            description: Some(theme.description.clone()),
            version: theme.version.clone(),
            author: theme.author.clone(),
            mode: Some(theme.mode.to_string()),
            palette,
            semantic,
            extends: None,
            imports: None,
        }
    }
}
