//! # Style Resolution
//!
//! Turns the model's style data into inline CSS declarations.
//!
//! Two things live here:
//!
//! - [`resolve`], the text style resolver. It combines a per-element
//!   [`TextStyle`] with the theme's ambient stroke into a declaration list.
//! - [`Palette`], the section colour cascade. Every themable attribute of a
//!   section is resolved once, in one place, in the order
//!   *section override → theme default → constant*. Renderers read the
//!   palette and never re-derive a fallback themselves.

use std::fmt;

use crate::model::{Align, Chrome, ContainerStyle, DividerStyle, Section, SectionKind, TextStyle};

/// An ordered list of CSS declarations, rendered `prop:value;prop:value`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations(Vec<(&'static str, String)>);

impl Declarations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, property: &'static str, value: impl Into<String>) {
        self.0.push((property, value.into()));
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Declarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", property, value)?;
        }
        Ok(())
    }
}

/// The theme's outline settings, applied to any element that asks for a stroke.
#[derive(Debug, Clone, Copy)]
pub struct AmbientStroke<'a> {
    pub width: f64,
    pub color: &'a str,
}

impl<'a> AmbientStroke<'a> {
    pub fn from_chrome(chrome: &'a Chrome) -> Self {
        Self {
            width: chrome.stroke_width,
            color: &chrome.stroke_color,
        }
    }
}

/// Resolve a text style to CSS.
///
/// - font family and size only when the style's custom font is enabled
///   (empty family or zero size are skipped individually);
/// - color always;
/// - outline only when `include_stroke` is set, the style allows it, and
///   the effective thickness (own, else ambient) is positive. The outline
///   colour is always the ambient one.
pub fn resolve(style: &TextStyle, ambient: AmbientStroke<'_>, include_stroke: bool) -> Declarations {
    let mut decls = Declarations::new();

    if style.font.enabled {
        if !style.font.family.is_empty() {
            decls.push("font-family", style.font.family.clone());
        }
        if style.font.size != 0.0 {
            decls.push("font-size", format!("{}px", style.font.size));
        }
    }

    decls.push("color", style.color.clone());

    if include_stroke && !style.no_stroke {
        let thickness = style.stroke_thickness.unwrap_or(ambient.width);
        if thickness > 0.0 {
            decls.push(
                "-webkit-text-stroke",
                format!("{}px {}", thickness, ambient.color),
            );
        }
    }

    decls
}

/// The theme's display type: header name and label, group titles.
pub fn base_declarations(chrome: &Chrome) -> Declarations {
    let mut decls = Declarations::new();
    decls.push("font-family", chrome.font_family.clone());
    decls.push("font-size", format!("{}px", chrome.font_size));
    decls.push("font-weight", "900");
    decls.push("text-shadow", format!("0 0 4px {}", chrome.shadow_color));
    decls
}

/// The flexbox and text spellings of one alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    /// `align-items` / `justify-content` value.
    pub flex: &'static str,
    /// `text-align` value.
    pub text: &'static str,
}

impl From<Align> for Alignment {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Alignment {
                flex: "flex-start",
                text: "left",
            },
            Align::Center => Alignment {
                flex: "center",
                text: "center",
            },
            Align::Right => Alignment {
                flex: "flex-end",
                text: "right",
            },
        }
    }
}

/// An sRGB colour parsed from `#rgb` or `#rrggbb` (trailing alpha digits ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse a hex colour. Unparseable channels read as 0.
    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim().trim_start_matches('#');
        let channel = |s: Option<&str>| s.and_then(|s| u8::from_str_radix(s, 16).ok()).unwrap_or(0);
        if hex.len() == 3 {
            let (r, g, b) = (hex.get(0..1), hex.get(1..2), hex.get(2..3));
            return Self {
                r: channel(r.map(|c| c.repeat(2)).as_deref()),
                g: channel(g.map(|c| c.repeat(2)).as_deref()),
                b: channel(b.map(|c| c.repeat(2)).as_deref()),
            };
        }
        Self {
            r: channel(hex.get(0..2)),
            g: channel(hex.get(2..4)),
            b: channel(hex.get(4..6)),
        }
    }

    /// `rgba(r,g,b,a)` with the given alpha.
    pub fn with_alpha(self, alpha: f64) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }
}

/// The non-empty value of an optional override.
fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Every resolved colour and setting a section handler may need.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette<'a> {
    pub align: Alignment,
    pub bubble: &'a str,
    pub divider: &'a str,
    pub divider_style: DividerStyle,
    pub quote: &'a str,
    pub callout: &'a str,
    pub callout_bg: String,
    pub trait_bg: &'a str,
    pub stats_accent: &'a str,
    pub stats_bg: &'a str,
    pub stats_placeholder: &'a str,
    pub group_border: &'a str,
    pub group_bg: &'a str,
    pub group_header_bg: &'a str,
    pub container: &'a str,
    pub container_bg: String,
    pub container_style: ContainerStyle,
    pub overlay: &'a str,
    /// Overlay opacity as a 0.0-1.0 fraction.
    pub overlay_opacity: f64,
    pub min_height: f64,
    pub grid_columns: usize,
}

pub const DEFAULT_BUBBLE_COLOR: &str = "#007aff";
pub const DEFAULT_STATS_BG: &str = "rgba(0,0,0,0.3)";
pub const DEFAULT_STATS_PLACEHOLDER: &str = "—";
pub const DEFAULT_OVERLAY_COLOR: &str = "#1f1f1f";
pub const DEFAULT_OVERLAY_OPACITY: f64 = 60.0;
pub const DEFAULT_MIN_HEIGHT: f64 = 300.0;
pub const DEFAULT_GRID_COLUMNS: usize = 2;

impl<'a> Palette<'a> {
    /// Resolve a section's attributes against the theme.
    pub fn resolve(section: &'a Section, chrome: &'a Chrome) -> Self {
        let accent = chrome.accent.as_str();
        let accent_tint = format!("{}22", accent);

        let default_align = match section.kind {
            SectionKind::Image | SectionKind::BackgroundImage | SectionKind::ProfileCard => {
                Align::Center
            }
            _ => Align::Left,
        };

        Palette {
            align: section.align.unwrap_or(default_align).into(),
            bubble: set(&section.bubble_color).unwrap_or(DEFAULT_BUBBLE_COLOR),
            divider: set(&section.divider_color).unwrap_or(accent),
            divider_style: section.divider_style.unwrap_or_default(),
            quote: set(&section.quote_color).unwrap_or(accent),
            callout: set(&section.callout_color).unwrap_or(accent),
            callout_bg: set(&section.callout_bg_color)
                .map(str::to_string)
                .unwrap_or_else(|| accent_tint.clone()),
            trait_bg: set(&section.trait_bg_color).unwrap_or(accent),
            stats_accent: set(&section.trait_bg_color).unwrap_or(accent),
            stats_bg: set(&section.stats_bg_color).unwrap_or(DEFAULT_STATS_BG),
            stats_placeholder: section
                .stats_undefined_text
                .as_deref()
                .unwrap_or(DEFAULT_STATS_PLACEHOLDER),
            group_border: set(&section.group_border_color).unwrap_or(chrome.group_color.as_str()),
            group_bg: set(&section.group_bg_color).unwrap_or(chrome.group_background_color.as_str()),
            group_header_bg: set(&section.group_header_bg)
                .unwrap_or(chrome.group_background_color.as_str()),
            container: set(&section.container_color).unwrap_or(accent),
            container_bg: set(&section.container_bg_color)
                .map(str::to_string)
                .unwrap_or(accent_tint),
            container_style: section.container_style.unwrap_or_default(),
            overlay: set(&section.overlay_color).unwrap_or(DEFAULT_OVERLAY_COLOR),
            overlay_opacity: section
                .overlay_opacity
                .filter(|o| o.is_finite())
                .unwrap_or(DEFAULT_OVERLAY_OPACITY)
                .clamp(0.0, 100.0)
                / 100.0,
            min_height: section
                .min_height
                .filter(|h| h.is_finite())
                .unwrap_or(DEFAULT_MIN_HEIGHT),
            grid_columns: section
                .grid_columns
                .filter(|&c| c > 0)
                .map(|c| c as usize)
                .unwrap_or(DEFAULT_GRID_COLUMNS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FontConfig;

    fn ambient() -> AmbientStroke<'static> {
        AmbientStroke {
            width: 0.5,
            color: "#000000",
        }
    }

    fn stroked(thickness: Option<f64>) -> TextStyle {
        TextStyle {
            color: "#ff0000".to_string(),
            no_stroke: false,
            stroke_thickness: thickness,
            font: FontConfig::default(),
        }
    }

    #[test]
    fn test_color_only_by_default() {
        let decls = resolve(&TextStyle::default(), ambient(), true);
        assert_eq!(decls.to_string(), "color:#ffffff");
    }

    #[test]
    fn test_font_only_when_enabled() {
        let style = TextStyle::with_font("#111", "'Inter',sans-serif", 18.0);
        assert_eq!(
            resolve(&style, ambient(), false).to_string(),
            "font-family:'Inter',sans-serif;font-size:18px;color:#111"
        );

        let disabled = TextStyle {
            font: FontConfig {
                enabled: false,
                ..style.font.clone()
            },
            ..style
        };
        assert_eq!(resolve(&disabled, ambient(), false).get("font-family"), None);
    }

    #[test]
    fn test_no_stroke_wins_over_thickness() {
        let style = TextStyle {
            no_stroke: true,
            ..stroked(Some(3.0))
        };
        assert_eq!(resolve(&style, ambient(), true).get("-webkit-text-stroke"), None);
    }

    #[test]
    fn test_stroke_thickness_falls_back_to_ambient() {
        let decls = resolve(&stroked(None), ambient(), true);
        assert_eq!(decls.get("-webkit-text-stroke"), Some("0.5px #000000"));

        let own = resolve(&stroked(Some(2.0)), ambient(), true);
        assert_eq!(own.get("-webkit-text-stroke"), Some("2px #000000"));
    }

    #[test]
    fn test_stroke_suppressed_when_not_requested_or_zero() {
        assert_eq!(resolve(&stroked(Some(2.0)), ambient(), false).get("-webkit-text-stroke"), None);
        assert_eq!(resolve(&stroked(Some(0.0)), ambient(), true).get("-webkit-text-stroke"), None);
    }

    #[test]
    fn test_base_declarations() {
        assert_eq!(
            base_declarations(&Chrome::default()).to_string(),
            "font-family:'Trebuchet MS',sans-serif;font-size:30px;font-weight:900;text-shadow:0 0 4px #000000"
        );
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::hex("#1f1f1f"), Rgb { r: 31, g: 31, b: 31 });
        assert_eq!(Rgb::hex("#fff"), Rgb { r: 255, g: 255, b: 255 });
        assert_eq!(Rgb::hex("#7c3aed22"), Rgb { r: 124, g: 58, b: 237 });
        assert_eq!(Rgb::hex("tomato"), Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(Rgb::hex("#1e1b4b").with_alpha(0.75), "rgba(30,27,75,0.75)");
    }

    #[test]
    fn test_palette_cascade() {
        let chrome = Chrome::default();
        let mut section = Section::new(SectionKind::Callout);
        let palette = Palette::resolve(&section, &chrome);
        assert_eq!(palette.callout, "#FF9A00");
        assert_eq!(palette.callout_bg, "#FF9A0022");
        assert_eq!(palette.align.text, "left");
        assert_eq!(palette.stats_placeholder, "—");

        section.callout_color = Some(String::new());
        section.quote_color = Some("#abcdef".to_string());
        section.stats_undefined_text = Some(String::new());
        let palette = Palette::resolve(&section, &chrome);
        assert_eq!(palette.callout, "#FF9A00", "empty override falls back");
        assert_eq!(palette.quote, "#abcdef");
        assert_eq!(palette.stats_placeholder, "", "empty placeholder is honoured");
    }

    #[test]
    fn test_palette_numeric_defaults() {
        let chrome = Chrome::default();
        let mut section = Section::new(SectionKind::BackgroundImage);
        section.grid_columns = Some(0);
        section.overlay_opacity = Some(140.0);
        let palette = Palette::resolve(&section, &chrome);
        assert_eq!(palette.grid_columns, 2);
        assert_eq!(palette.overlay_opacity, 1.0);
        assert_eq!(palette.min_height, 300.0);
        assert_eq!(palette.align.text, "center");
    }
}
