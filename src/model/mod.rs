//! # Document Model
//!
//! The input representation for the renderer and the unit of persistence.
//! A card document is a header, a global theme ("chrome"), an optional
//! floating decoration, and an ordered list of typed sections.
//!
//! Field names on the wire are the camelCase names the editor has always
//! written (`hdrOn`, `c1`, `statBars`, ...), so records saved by older
//! editors load unchanged. Every struct is lenient: a missing field takes
//! its default rather than failing the whole record.
//!
//! Section order is the only ordering there is. The renderer walks
//! `sections` front to back and nothing else (no z-index, no priority)
//! affects placement.

pub mod edit;
pub mod presets;

use serde::{Deserialize, Serialize};

/// Record format version written by [`crate::serialize::save`].
pub const RECORD_VERSION: &str = "3.0";

/// A complete card document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub header: Header,
    #[serde(default)]
    pub chrome: Chrome,
    #[serde(default)]
    pub floating: Floating,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Informational only; never checked against a compatibility table.
    #[serde(default = "default_version")]
    pub version: String,
    /// ISO-8601 time of the last save, if this document came from a record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

fn default_version() -> String {
    RECORD_VERSION.to_string()
}

impl Document {
    /// Find a section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// Horizontal alignment of header or section content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Per-element font override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// When false, `family` and `size` are ignored and the ambient font applies.
    pub enabled: bool,
    pub family: String,
    pub size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            family: DEFAULT_FONT_FAMILY.to_string(),
            size: 16.0,
        }
    }
}

pub const DEFAULT_FONT_FAMILY: &str = "'Trebuchet MS',sans-serif";

/// Text presentation for one labelled or contented element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    pub color: String,
    /// When true no outline is drawn, whatever `stroke_thickness` says.
    pub no_stroke: bool,
    /// `None` means the ambient width. Written as `null` so it survives a
    /// reload; a missing key takes the default thickness instead.
    pub stroke_thickness: Option<f64>,
    pub font: FontConfig,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            no_stroke: true,
            stroke_thickness: Some(0.5),
            font: FontConfig::default(),
        }
    }
}

impl TextStyle {
    /// A style with a custom font switched on.
    pub fn with_font(color: &str, family: &str, size: f64) -> Self {
        Self {
            color: color.to_string(),
            font: FontConfig {
                enabled: true,
                family: family.to_string(),
                size,
            },
            ..Default::default()
        }
    }
}

/// The card header. Always present; the theme decides whether it shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Header {
    pub emoji: String,
    pub name: String,
    pub name_style: TextStyle,
    pub label: String,
    pub label_style: TextStyle,
    pub align: Align,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            emoji: String::new(),
            name: "Character Card".to_string(),
            name_style: TextStyle::default(),
            label: "Example Card".to_string(),
            label_style: TextStyle::default(),
            align: Align::Center,
        }
    }
}

/// Width of the header or body frame.
///
/// Persisted as the editor's `longHeader` / `longInside` booleans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum WidthMode {
    #[default]
    Narrow,
    Wide,
}

impl WidthMode {
    pub fn max_width(self) -> &'static str {
        match self {
            WidthMode::Narrow => "800px",
            WidthMode::Wide => "1200px",
        }
    }
}

impl From<bool> for WidthMode {
    fn from(wide: bool) -> Self {
        if wide {
            WidthMode::Wide
        } else {
            WidthMode::Narrow
        }
    }
}

impl From<WidthMode> for bool {
    fn from(mode: WidthMode) -> Self {
        mode == WidthMode::Wide
    }
}

/// Dashed rule or a line fading out at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    Dashed,
    #[default]
    Gradient,
}

/// The document-wide theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chrome {
    // ── Toggles ────────────────────────────────────────────────
    /// Paint the header background (otherwise transparent).
    #[serde(rename = "hdrOn")]
    pub header_background: bool,
    /// Show the header. A hidden header is collapsed, not omitted.
    #[serde(rename = "hdrEnabled")]
    pub header_enabled: bool,
    /// Header background is a gradient from `accent` to `accent_alt`.
    #[serde(rename = "gradOn")]
    pub header_gradient: bool,
    /// Accent bar on the left edge of the header.
    #[serde(rename = "barOn")]
    pub side_bar: bool,
    #[serde(rename = "borderOn")]
    pub body_border: bool,
    #[serde(rename = "bgOn")]
    pub body_background: bool,
    #[serde(rename = "groupBorder")]
    pub group_border: bool,
    #[serde(rename = "groupBg")]
    pub group_background: bool,
    /// Emit a divider after each closed group.
    #[serde(rename = "groupDivider")]
    pub group_divider: bool,
    #[serde(rename = "groupDividerStyle")]
    pub group_divider_style: DividerStyle,
    #[serde(rename = "longHeader")]
    pub header_width: WidthMode,
    #[serde(rename = "longInside")]
    pub body_width: WidthMode,

    // ── Colors ─────────────────────────────────────────────────
    #[serde(rename = "c1")]
    pub accent: String,
    #[serde(rename = "c2")]
    pub accent_alt: String,
    #[serde(rename = "cBar")]
    pub bar_color: String,
    #[serde(rename = "cBorder")]
    pub border_color: String,
    #[serde(rename = "cBg")]
    pub background_color: String,
    #[serde(rename = "cTxt")]
    pub text_color: String,
    #[serde(rename = "cGroup")]
    pub group_color: String,
    #[serde(rename = "cGroupBg")]
    pub group_background_color: String,
    #[serde(rename = "cGroupDivider")]
    pub group_divider_color: String,

    // ── Typography ─────────────────────────────────────────────
    #[serde(rename = "font")]
    pub font_family: String,
    /// Base size in px for header text.
    #[serde(rename = "size")]
    pub font_size: f64,
    /// Ambient outline width in px.
    #[serde(rename = "stroke")]
    pub stroke_width: f64,
    #[serde(rename = "strokeCol")]
    pub stroke_color: String,
    #[serde(rename = "shadowCol")]
    pub shadow_color: String,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            header_background: true,
            header_enabled: true,
            header_gradient: true,
            side_bar: true,
            body_border: true,
            body_background: true,
            group_border: true,
            group_background: true,
            group_divider: true,
            group_divider_style: DividerStyle::Gradient,
            header_width: WidthMode::Narrow,
            body_width: WidthMode::Narrow,
            accent: "#FF9A00".to_string(),
            accent_alt: "#FF6600".to_string(),
            bar_color: "#FF3300".to_string(),
            border_color: "#FF9A00".to_string(),
            background_color: "#1A1A1A".to_string(),
            text_color: "#ffffff".to_string(),
            group_color: "#FF9A00".to_string(),
            group_background_color: "#2A2A2A".to_string(),
            group_divider_color: "#FF9A00".to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: 30.0,
            stroke_width: 0.5,
            stroke_color: "#000000".to_string(),
            shadow_color: "#000000".to_string(),
        }
    }
}

/// Which viewport corner the floating image is pinned to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Corner {
    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }
}

/// A decorative image drawn over the card, outside the section flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Floating {
    pub enabled: bool,
    pub url: String,
    /// Height as a percentage of the viewport.
    pub height: f64,
    pub pos: Corner,
}

impl Default for Floating {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            height: 30.0,
            pos: Corner::BottomRight,
        }
    }
}

/// The section variants. Each has its own rendering template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    #[default]
    Normal,
    Heading,
    BubbleLeft,
    BubbleRight,
    Group,
    CloseGroup,
    Html,
    Quote,
    Divider,
    Image,
    Stats,
    Traits,
    Callout,
    Container,
    CloseContainer,
    BackgroundImage,
    StatsBars,
    ProfileCard,
    FeatureGrid,
}

/// Layout template of a container frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStyle {
    #[default]
    Quote,
    Callout,
    Box,
    Panel,
}

/// One image of a section gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl GalleryImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: None,
            caption: None,
        }
    }

    /// The stand-in image the editor appends when the user clicks "add image".
    pub fn placeholder() -> Self {
        Self {
            url: "https://picsum.photos/400/300".to_string(),
            alt: Some("New Image".to_string()),
            caption: Some(String::new()),
        }
    }
}

/// A named bar of a `stats-bars` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBar {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: f64,
    /// Scale of the bar. Absent, zero, negative or non-finite means 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StatBar {
    pub fn new(name: &str, value: f64, max_value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            max_value: Some(max_value),
            color: None,
        }
    }
}

/// One cell of a `feature-grid` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl FeatureItem {
    pub fn new(icon: &str, title: &str, description: &str) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

pub const DEFAULT_STRIPE_COLOR: &str = "#6b32a1";

/// One typed content block.
///
/// Common fields come first; the variant-specific fields that follow are
/// all optional and only read by the variants they belong to. They are
/// kept on the section even when its kind changes, so switching a
/// section back and forth in the editor does not lose settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Assigned once at creation, never reused.
    #[serde(default = "edit::new_section_id")]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: SectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub label_style: TextStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub content_style: TextStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    /// Editor-only marker colour; never rendered.
    #[serde(default = "default_stripe_color")]
    pub stripe_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<GalleryImage>>,

    // ── Bubble / divider / quote / callout ─────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bubble_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divider_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divider_style: Option<DividerStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callout_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callout_bg_color: Option<String>,

    // ── Traits / stats ─────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trait_bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_bg_color: Option<String>,
    /// Shown for a stat line without a value. An empty string is honoured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_undefined_text: Option<String>,

    // ── Group / container frames ───────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_header_bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_style: Option<ContainerStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_bg_color: Option<String>,

    // ── Background image ───────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_color: Option<String>,
    /// Overlay opacity in percent (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_opacity: Option<f64>,
    /// Minimum block height in px.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,

    // ── Stats bars / profile / feature grid ────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_bars: Option<Vec<StatBar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_badges: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<FeatureItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_columns: Option<u32>,
}

fn default_stripe_color() -> String {
    DEFAULT_STRIPE_COLOR.to_string()
}

impl Section {
    /// A bare section of the given kind with a fresh id and default styles.
    pub fn new(kind: SectionKind) -> Self {
        Self {
            id: edit::new_section_id(),
            kind,
            emoji: None,
            label: None,
            label_style: TextStyle::default(),
            content: None,
            content_style: TextStyle::default(),
            align: None,
            stripe_color: default_stripe_color(),
            images: None,
            bubble_color: None,
            divider_color: None,
            divider_style: None,
            quote_color: None,
            callout_color: None,
            callout_bg_color: None,
            trait_bg_color: None,
            stats_bg_color: None,
            stats_undefined_text: None,
            group_border_color: None,
            group_bg_color: None,
            group_header_bg: None,
            container_style: None,
            container_color: None,
            container_bg_color: None,
            background_url: None,
            overlay_color: None,
            overlay_opacity: None,
            min_height: None,
            stat_bars: None,
            profile_image: None,
            profile_badges: None,
            features: None,
            grid_columns: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn with_emoji(mut self, emoji: &str) -> Self {
        self.emoji = Some(emoji.to_string());
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Gallery images, empty when none were added.
    pub fn gallery(&self) -> &[GalleryImage] {
        self.images.as_deref().unwrap_or(&[])
    }
}
