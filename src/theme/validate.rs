use super::{
    clean::{ColorMode, FIXED_SLOTS, REQUIRED_SLOTS},
    raw::{RawColor, RawTheme, RawThemeCollection},
};
use itertools::Itertools;
use std::{collections::BTreeMap, str::FromStr};

/// Validate a single color input.
///
/// Returns every violation found rather than stopping at the first one; each message is
/// prefixed with `label` so callers can trace it back to the offending field.
pub fn validate_color(color: &RawColor, label: &str) -> Vec<String> {
    let mut errors = Vec::new();
    match color.shape_count() {
        0 => {
            errors.push(format!("{label}: color must specify exactly one of hex, rgb, r/g/b, ansi, or name"));
            return errors;
        }
        1 => (),
        count => errors.push(format!("{label}: color specifies {count} formats, expected exactly one")),
    };
    if let Some(hex) = &color.hex {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            errors.push(format!("{label}: invalid hex color '{hex}'"));
        }
    }
    if let Some(channels) = &color.rgb {
        if channels.len() != 3 {
            errors.push(format!("{label}: rgb must have exactly 3 entries, found {}", channels.len()));
        }
        for &value in channels {
            if !(0..=255).contains(&value) {
                errors.push(format!("{label}: channel value {value} is not in [0, 255]"));
            }
        }
    }
    if color.r.is_some() || color.g.is_some() || color.b.is_some() {
        for (channel, value) in [("r", color.r), ("g", color.g), ("b", color.b)] {
            match value {
                None => errors.push(format!("{label}: missing '{channel}' channel")),
                Some(value) if !(0..=255).contains(&value) => {
                    errors.push(format!("{label}: channel '{channel}' value {value} is not in [0, 255]"))
                }
                Some(_) => (),
            };
        }
    }
    if let Some(index) = color.ansi {
        if !(0..=255).contains(&index) {
            errors.push(format!("{label}: ansi index {index} is not in [0, 255]"));
        }
    }
    if let Some(name) = &color.name {
        if name.is_empty() {
            errors.push(format!("{label}: named color reference must not be empty"));
        }
    }
    errors
}

/// Validate a decoded theme document.
///
/// All violations are accumulated and returned together.
pub fn validate_theme(theme: &RawTheme) -> Vec<String> {
    let mut errors = Vec::new();
    match &theme.name {
        None => errors.push("theme name is required".into()),
        Some(name) if name.is_empty() => errors.push("theme name must not be empty".into()),
        Some(name) if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') => {
            errors.push(format!("theme name '{name}' may only contain alphanumerics, '_', and '-'"))
        }
        Some(_) => (),
    };
    if theme.description.is_none() {
        errors.push("theme description is required".into());
    }
    if let Some(mode) = &theme.mode {
        if ColorMode::from_str(mode).is_err() {
            errors.push(format!("invalid mode '{mode}', expected one of rgb, ansi, auto"));
        }
    }
    for slot in REQUIRED_SLOTS {
        if !theme.palette.contains_key(slot) {
            errors.push(format!("palette is missing required slot '{slot}'"));
        }
    }
    for (slot, color) in &theme.palette {
        errors.extend(validate_color(color, &format!("palette.{slot}")));
    }
    // Semantic targets can legitimately point at inherited slots, so referential integrity for
    // extending themes is re-checked after the merge instead of here.
    if theme.extends.is_none() {
        for (role, slot) in &theme.semantic {
            if !FIXED_SLOTS.contains(&slot.as_str()) && !theme.palette.contains_key(slot) {
                errors.push(format!("semantic role '{role}' references unknown palette slot '{slot}'"));
            }
        }
    }
    if let Some(extends) = &theme.extends {
        if extends.is_empty() {
            errors.push("extends must be a non-empty reference".into());
        }
    }
    if let Some(imports) = &theme.imports {
        for (index, import) in imports.iter().enumerate() {
            if import.is_empty() {
                errors.push(format!("imports[{index}] must be a non-empty reference"));
            }
        }
    }
    errors
}

/// Validate a decoded theme collection.
pub fn validate_collection(collection: &RawThemeCollection) -> Vec<String> {
    let mut errors = Vec::new();
    if collection.themes.is_empty() {
        errors.push("collection must declare at least one theme".into());
    }
    for (index, theme) in collection.themes.iter().enumerate() {
        errors.extend(validate_theme(theme).into_iter().map(|error| format!("themes[{index}]: {error}")));
    }
    let mut name_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for theme in &collection.themes {
        if let Some(name) = &theme.name {
            *name_counts.entry(name.as_str()).or_default() += 1;
        }
    }
    let duplicates: Vec<_> = name_counts.into_iter().filter(|(_, count)| *count > 1).map(|(name, _)| name).collect();
    if !duplicates.is_empty() {
        errors.push(format!("duplicate theme names: {}", duplicates.iter().join(", ")));
    }
    for (alias, color) in &collection.named_colors {
        errors.extend(validate_color(color, &format!("namedColors.{alias}")));
    }
    errors
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn hex(value: &str) -> RawColor {
        RawColor { hex: Some(value.into()), ..Default::default() }
    }

    fn valid_theme() -> RawTheme {
        let palette: BTreeMap<_, _> = REQUIRED_SLOTS
            .into_iter()
            .map(|slot| (slot.to_string(), hex("112233")))
            .collect();
        RawTheme {
            name: Some("dark".into()),
            description: Some("a dark theme".into()),
            palette,
            ..Default::default()
        }
    }

    #[test]
    fn valid_theme_passes() {
        assert_eq!(validate_theme(&valid_theme()), Vec::<String>::new());
    }

    #[test]
    fn missing_required_slots_all_reported() {
        let mut theme = valid_theme();
        theme.palette.remove("primary");
        theme.palette.remove("border");
        let errors = validate_theme(&theme);
        assert!(errors.iter().any(|e| e.contains("required slot 'primary'")), "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("required slot 'border'")), "{errors:?}");
        assert_eq!(errors.len(), 2);
    }

    #[rstest]
    #[case::missing(None, "name is required")]
    #[case::empty(Some(""), "must not be empty")]
    #[case::bad_chars(Some("my theme!"), "may only contain")]
    fn name_rules(#[case] name: Option<&str>, #[case] expected: &str) {
        let mut theme = valid_theme();
        theme.name = name.map(Into::into);
        let errors = validate_theme(&theme);
        assert!(errors.iter().any(|e| e.contains(expected)), "{errors:?}");
    }

    #[test]
    fn invalid_mode_reported() {
        let mut theme = valid_theme();
        theme.mode = Some("truecolor".into());
        let errors = validate_theme(&theme);
        assert!(errors.iter().any(|e| e.contains("invalid mode 'truecolor'")), "{errors:?}");
    }

    #[test]
    fn ambiguous_color_always_fails() {
        // Both shapes are individually valid; mixing them is still an error.
        let color = RawColor { hex: Some("112233".into()), rgb: Some(vec![1, 2, 3]), ..Default::default() };
        let errors = validate_color(&color, "palette.primary");
        assert!(errors.iter().any(|e| e.contains("2 formats")), "{errors:?}");
    }

    #[test]
    fn color_errors_carry_label() {
        let errors = validate_color(&hex("xyz"), "palette.primary");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("palette.primary:"), "{errors:?}");
    }

    #[test]
    fn partial_object_form_reported() {
        let color = RawColor { r: Some(1), b: Some(300), ..Default::default() };
        let errors = validate_color(&color, "c");
        assert!(errors.iter().any(|e| e.contains("missing 'g' channel")), "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("'b' value 300")), "{errors:?}");
    }

    #[test]
    fn dangling_semantic_reference_reported() {
        let mut theme = valid_theme();
        theme.semantic.insert("panelTitle".into(), "nonexistent".into());
        let errors = validate_theme(&theme);
        assert!(errors.iter().any(|e| e.contains("unknown palette slot 'nonexistent'")), "{errors:?}");
    }

    #[test]
    fn semantic_reference_check_deferred_when_extending() {
        let mut theme = valid_theme();
        theme.extends = Some("base".into());
        theme.semantic.insert("panelTitle".into(), "inherited_slot".into());
        assert_eq!(validate_theme(&theme), Vec::<String>::new());
    }

    #[test]
    fn duplicate_collection_names_reported() {
        let mut first = valid_theme();
        first.name = Some("dark".into());
        let mut second = valid_theme();
        second.name = Some("dark".into());
        let collection = RawThemeCollection { themes: vec![first, second], ..Default::default() };
        let errors = validate_collection(&collection);
        assert!(errors.iter().any(|e| e.contains("duplicate theme names: dark")), "{errors:?}");
    }

    #[test]
    fn collection_errors_are_index_prefixed() {
        let mut broken = valid_theme();
        broken.palette.remove("text");
        let collection = RawThemeCollection { themes: vec![valid_theme(), broken], ..Default::default() };
        let errors = validate_collection(&collection);
        assert!(errors.iter().any(|e| e.starts_with("themes[1]:")), "{errors:?}");
    }

    #[test]
    fn empty_collection_reported() {
        let errors = validate_collection(&RawThemeCollection::default());
        assert!(errors.iter().any(|e| e.contains("at least one theme")), "{errors:?}");
    }

    #[test]
    fn named_colors_validated() {
        let mut collection = RawThemeCollection { themes: vec![valid_theme()], ..Default::default() };
        collection.named_colors.insert("brand".into(), hex("not-a-color"));
        let errors = validate_collection(&collection);
        assert!(errors.iter().any(|e| e.starts_with("namedColors.brand:")), "{errors:?}");
    }
}
