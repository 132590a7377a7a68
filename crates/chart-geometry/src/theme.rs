// File: crates/chart-geometry/src/theme.rs
// Summary: Series palettes, colour resolution and light/dark chrome colours.

/// Palette used when the caller supplies none (or only blank entries).
pub const DEFAULT_PALETTE: [&str; 5] = ["#2563eb", "#16a34a", "#f59e0b", "#db2777", "#7c3aed"];

/// 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn with_alpha(self, a: u8) -> Self { Self { a, ..self } }
}

/// Colour for the series or slice at `index`: a non-blank explicit colour wins,
/// otherwise the palette cycles, otherwise [`DEFAULT_PALETTE`] cycles.
pub fn resolve_color(explicit: Option<&str>, palette: &[String], index: usize) -> String {
    if let Some(color) = explicit.map(str::trim).filter(|c| !c.is_empty()) {
        return color.to_string();
    }
    let usable: Vec<&str> = palette.iter().map(|c| c.trim()).filter(|c| !c.is_empty()).collect();
    if usable.is_empty() {
        DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string()
    } else {
        usable[index % usable.len()].to_string()
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex_color(s: &str) -> Option<Rgba> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(Rgba::rgb(it.next()??, it.next()??, it.next()??))
        }
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)?)),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub grid: Rgba,
    pub axis_line: Rgba,
    pub axis_label: Rgba,
    pub crosshair: Rgba,
    /// Alpha applied to area fills under a series line.
    pub area_fill_alpha: u8,
    /// Alpha applied to pie slices that are not the active one.
    pub dimmed_alpha: u8,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            grid: Rgba::rgb(40, 40, 45),
            axis_line: Rgba::rgb(180, 180, 190),
            axis_label: Rgba::rgb(235, 235, 245),
            crosshair: Rgba::rgb(255, 230, 70),
            area_fill_alpha: 96,
            dimmed_alpha: 90,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(250, 250, 252),
            grid: Rgba::rgb(230, 230, 235),
            axis_line: Rgba::rgb(60, 60, 70),
            axis_label: Rgba::rgb(20, 20, 30),
            crosshair: Rgba::rgb(30, 120, 240),
            area_fill_alpha: 80,
            dimmed_alpha: 70,
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name)).unwrap_or_else(Theme::dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_color_wins_unless_blank() {
        let palette = vec!["#111111".to_string()];
        assert_eq!(resolve_color(Some("tomato"), &palette, 3), "tomato");
        assert_eq!(resolve_color(Some("   "), &palette, 3), "#111111");
    }

    #[test]
    fn palette_cycles_and_falls_back() {
        let palette = vec!["#a".to_string(), "".to_string(), "#b".to_string()];
        assert_eq!(resolve_color(None, &palette, 0), "#a");
        assert_eq!(resolve_color(None, &palette, 1), "#b");
        assert_eq!(resolve_color(None, &palette, 2), "#a");
        assert_eq!(resolve_color(None, &[], 6), DEFAULT_PALETTE[1]);
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_hex_color("#fff"), Some(Rgba::rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("#2563eb"), Some(Rgba::rgb(0x25, 0x63, 0xeb)));
        assert_eq!(parse_hex_color("#2563eb80"), Some(Rgba::rgb(0x25, 0x63, 0xeb).with_alpha(0x80)));
        assert_eq!(parse_hex_color("blue"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("LIGHT").name, "light");
        assert_eq!(find("nope").name, "dark");
    }
}
