use crate::{color::Rgb, theme::ThemeDefinition};
use std::collections::BTreeMap;

/// The escape sequence that terminates any styled span.
pub const RESET: &str = "\x1b[0m";

/// Build the foreground or background escape sequence for a color.
pub fn color_to_ansi(color: Rgb, background: bool) -> String {
    let selector = if background { 48 } else { 38 };
    format!("\x1b[{selector};2;{};{};{}m", color.r, color.g, color.b)
}

/// Build the escape code table for a resolved theme.
///
/// Every palette slot gets a foreground entry under its own name and a background entry under
/// `<slot>_bg`; every semantic role gets the same pair resolved through the slot it references.
/// A `reset` entry is always included. This is pure: it's used for previews and for handing a
/// ready-made lookup table to the rendering layer.
pub fn theme_to_ansi_codes(theme: &ThemeDefinition) -> BTreeMap<String, String> {
    let mut codes = BTreeMap::new();
    for (slot, color) in theme.palette.iter() {
        codes.insert(slot.to_string(), color_to_ansi(color, false));
        codes.insert(format!("{slot}_bg"), color_to_ansi(color, true));
    }
    for (role, slot) in theme.semantic.iter() {
        // The resolver rejects dangling semantic references, so a miss here just means the
        // table was built by hand; skip rather than emit a bogus sequence.
        let Some(color) = theme.palette.get(slot) else {
            continue;
        };
        codes.insert(role.to_string(), color_to_ansi(color, false));
        codes.insert(format!("{role}_bg"), color_to_ansi(color, true));
    }
    codes.insert("reset".into(), RESET.into());
    codes
}
