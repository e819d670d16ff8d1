//! Color strings coming from the control panel.
//!
//! Accepts hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), functional
//! (`rgb(r, g, b)`, `rgba(r, g, b, a)` with `a` in 0..=1) and the CSS basic
//! keywords. Matching is case-insensitive.

use crate::error::{Error, Result};
use crate::types::Rgba;

/// The fifteen swatches the control panel offers, in display order.
pub const PALETTE: [&str; 15] = [
    "#000000", "#FFFFFF", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF",
    "#FFA500", "#800080", "#008000", "#800000", "#008080", "#000080", "#FFC0CB",
];

const NAMED: &[(&str, Rgba)] = &[
    ("black", Rgba::rgb(0, 0, 0)),
    ("white", Rgba::rgb(255, 255, 255)),
    ("red", Rgba::rgb(255, 0, 0)),
    ("lime", Rgba::rgb(0, 255, 0)),
    ("green", Rgba::rgb(0, 128, 0)),
    ("blue", Rgba::rgb(0, 0, 255)),
    ("yellow", Rgba::rgb(255, 255, 0)),
    ("magenta", Rgba::rgb(255, 0, 255)),
    ("fuchsia", Rgba::rgb(255, 0, 255)),
    ("cyan", Rgba::rgb(0, 255, 255)),
    ("aqua", Rgba::rgb(0, 255, 255)),
    ("orange", Rgba::rgb(255, 165, 0)),
    ("purple", Rgba::rgb(128, 0, 128)),
    ("maroon", Rgba::rgb(128, 0, 0)),
    ("teal", Rgba::rgb(0, 128, 128)),
    ("navy", Rgba::rgb(0, 0, 128)),
    ("pink", Rgba::rgb(255, 192, 203)),
    ("gray", Rgba::rgb(128, 128, 128)),
    ("grey", Rgba::rgb(128, 128, 128)),
    ("silver", Rgba::rgb(192, 192, 192)),
    ("olive", Rgba::rgb(128, 128, 0)),
    ("transparent", Rgba::TRANSPARENT),
];

pub fn parse_color(input: &str) -> Result<Rgba> {
    let s = input.trim().to_ascii_lowercase();
    let invalid = || Error::InvalidColor(input.to_string());

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }
    if let Some(body) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        return parse_functional(body, true).ok_or_else(invalid);
    }
    if let Some(body) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        return parse_functional(body, false).ok_or_else(invalid);
    }
    NAMED
        .iter()
        .find(|(name, _)| *name == s)
        .map(|(_, c)| *c)
        .ok_or_else(invalid)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_functional(body: &str, with_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |p: &str| p.parse::<u8>().ok();
    let alpha = if with_alpha {
        let a = parts[3].parse::<f32>().ok()?;
        if !(0.0..=1.0).contains(&a) {
            return None;
        }
        (a * 255.0).round() as u8
    } else {
        255
    };
    Some(Rgba::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_color("#000").unwrap(), Rgba::BLACK);
        assert_eq!(parse_color("#FFA500").unwrap(), Rgba::rgb(255, 165, 0));
        assert_eq!(parse_color("#f008").unwrap(), Rgba::rgba(255, 0, 0, 136));
        assert_eq!(parse_color("  #11223344 ").unwrap(), Rgba::rgba(0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn parses_functional_and_named() {
        assert_eq!(parse_color("rgb(1, 2, 3)").unwrap(), Rgba::rgb(1, 2, 3));
        assert_eq!(parse_color("RGBA(10,20,30,0.5)").unwrap(), Rgba::rgba(10, 20, 30, 128));
        assert_eq!(parse_color("Teal").unwrap(), Rgba::rgb(0, 128, 128));
        assert_eq!(parse_color("transparent").unwrap(), Rgba::TRANSPARENT);
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "#12", "#12345", "#gggggg", "rgb(1,2)", "rgb(256,0,0)", "rgba(0,0,0,2)", "chartreuse"] {
            assert!(
                matches!(parse_color(bad), Err(Error::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn every_palette_entry_parses() {
        for swatch in PALETTE {
            assert_eq!(parse_color(swatch).unwrap().a, 255);
        }
    }
}
