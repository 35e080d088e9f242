//! # Section Renderer
//!
//! Maps one section plus the running [`FrameState`] to an HTML fragment and
//! the next frame state. Dispatch is a single exhaustive match over
//! [`SectionKind`]; each variant has its own handler below.
//!
//! Handlers never fail. When a variant's required data is missing or blank
//! the handler emits nothing at all rather than an empty wrapper.
//!
//! User text is inserted as authored: cards are written in HTML and labels
//! may carry markup. Only `html` sections get the tag denylist. Attribute
//! values (URLs, alt text) are quote-escaped.

use std::fmt::Write as FmtWrite;

use once_cell::sync::Lazy;
use regex::Regex;

use super::frames::{push_rule, FrameState};
use crate::model::{Chrome, ContainerStyle, GalleryImage, Section, SectionKind, StatBar, TextStyle};
use crate::style::{self, AmbientStroke, Declarations, Palette, Rgb};

/// The output of rendering one section.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub html: String,
    pub frames: FrameState,
}

/// Render one section given the frames left open by the sections before it.
pub fn render_section(section: &Section, chrome: &Chrome, frames: FrameState) -> Rendered {
    let mut out = String::new();
    let cx = Cx {
        section,
        chrome,
        palette: Palette::resolve(section, chrome),
        in_container: frames.container_open(),
    };

    let frames = match section.kind {
        SectionKind::Group => open_group(&cx, frames, &mut out),
        SectionKind::CloseGroup => frames.close_group(chrome, &mut out),
        SectionKind::Container => open_container(&cx, frames, &mut out),
        SectionKind::CloseContainer => frames.close_container(&mut out),
        _ => {
            content_block(&cx, &mut out);
            frames
        }
    };

    Rendered { html: out, frames }
}

/// Content variants leave the frame state alone.
fn content_block(cx: &Cx, out: &mut String) {
    match cx.section.kind {
        SectionKind::BackgroundImage => background_image(cx, out),
        SectionKind::StatsBars => stats_bars(cx, out),
        SectionKind::ProfileCard => profile_card(cx, out),
        SectionKind::FeatureGrid => feature_grid(cx, out),
        SectionKind::Html => html(cx, out),
        SectionKind::Divider => push_rule(out, cx.palette.divider_style, cx.palette.divider),
        SectionKind::Image => image(cx, out),
        SectionKind::BubbleLeft => bubble(cx, "flex-start", out),
        SectionKind::BubbleRight => bubble(cx, "flex-end", out),
        SectionKind::Quote => quote(cx, out),
        SectionKind::Callout => callout(cx, out),
        SectionKind::Traits => traits(cx, out),
        SectionKind::Stats => stats(cx, out),
        SectionKind::Normal | SectionKind::Heading => normal(cx, out),
        SectionKind::Group
        | SectionKind::CloseGroup
        | SectionKind::Container
        | SectionKind::CloseContainer => {}
    }
}

/// Per-section rendering context.
struct Cx<'a> {
    section: &'a Section,
    chrome: &'a Chrome,
    palette: Palette<'a>,
    in_container: bool,
}

impl Cx<'_> {
    fn text(&self, style: &TextStyle, stroke: bool) -> Declarations {
        style::resolve(style, AmbientStroke::from_chrome(self.chrome), stroke)
    }

    fn label_css(&self, stroke: bool) -> Declarations {
        self.text(&self.section.label_style, stroke)
    }

    fn content_css(&self, stroke: bool) -> Declarations {
        self.text(&self.section.content_style, stroke)
    }

    /// Content inside an open container sits tighter than at the top level.
    fn margin(&self, in_container: &'static str, top_level: &'static str) -> &'static str {
        if self.in_container {
            in_container
        } else {
            top_level
        }
    }

    /// The label prefixed by the emoji, when there is one.
    fn title(&self) -> String {
        titled(self.section.emoji.as_deref(), self.section.label.as_deref().unwrap_or(""))
    }

    fn label(&self) -> Option<&str> {
        non_empty(self.section.label.as_deref())
    }

    fn content(&self) -> Option<&str> {
        non_empty(self.section.content.as_deref())
    }

    fn has_label(&self) -> bool {
        non_blank(self.section.label.as_deref()).is_some()
    }

    fn has_content(&self) -> bool {
        non_blank(self.section.content.as_deref()).is_some()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

fn titled(emoji: Option<&str>, label: &str) -> String {
    match non_empty(emoji) {
        Some(emoji) => format!("{} {}", emoji, label),
        None => label.to_string(),
    }
}

/// Newlines become `<br>`.
pub fn line_breaks(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// Escape a value for a double-quoted attribute.
pub fn attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

// ─── Frames ─────────────────────────────────────────────────────

fn open_group(cx: &Cx, frames: FrameState, out: &mut String) -> FrameState {
    let frames = frames.close_container(out).close_group(cx.chrome, out);
    let chrome = cx.chrome;
    let p = &cx.palette;

    let border = if chrome.group_border {
        format!("3px solid {}", p.group_border)
    } else {
        "none".to_string()
    };
    let (frame_bg, header_bg) = if chrome.group_background {
        (p.group_bg, p.group_header_bg)
    } else {
        ("transparent", p.group_bg)
    };

    let _ = write!(
        out,
        r#"<div style="border:{border};padding:0;margin:20px auto;max-width:700px;background:{frame_bg};border-radius:15px;box-shadow:0 2px 8px rgba(0,0,0,0.2);">"#
    );
    let _ = write!(
        out,
        r#"<div style="background:{header_bg};padding:20px;border-radius:15px 15px 0 0;"><h2 style="{};{};font-weight:bold;text-align:center;margin:0;">{}</h2></div>"#,
        style::base_declarations(chrome),
        cx.label_css(true),
        cx.title()
    );
    let _ = write!(
        out,
        r#"<div style="padding:20px;background:{frame_bg};border-radius:0 0 15px 15px;">"#
    );

    FrameState {
        group_open: true,
        ..frames
    }
}

fn open_container(cx: &Cx, frames: FrameState, out: &mut String) -> FrameState {
    let frames = frames.close_container(out);
    let p = &cx.palette;
    let align = p.align.text;
    let style = p.container_style;

    match style {
        ContainerStyle::Quote => {
            let _ = write!(
                out,
                r#"<blockquote style="border-left:4px solid {};margin:20px 0;padding:15px 20px;background:rgba(255,255,255,0.05);border-radius:0 8px 8px 0;font-style:italic;">"#,
                p.container
            );
            if cx.label().is_some() {
                let _ = write!(
                    out,
                    r#"<div style="{};font-weight:bold;margin-bottom:10px;font-style:normal;text-align:{align};">{}</div>"#,
                    cx.label_css(false),
                    cx.title()
                );
            }
        }
        ContainerStyle::Callout => {
            let _ = write!(
                out,
                r#"<div style="background:{};border:1px solid {};border-radius:12px;padding:20px;margin:15px 0;box-shadow:0 4px 12px rgba(0,0,0,0.3);">"#,
                p.container_bg, p.container
            );
            container_heading(cx, true, out);
        }
        ContainerStyle::Box => {
            let _ = write!(
                out,
                r#"<div style="border:2px solid {};background:{};border-radius:8px;padding:15px;margin:15px 0;">"#,
                p.container, p.container_bg
            );
            container_heading(cx, false, out);
        }
        ContainerStyle::Panel => {
            let _ = write!(
                out,
                r#"<div style="background:{};border-left:4px solid {};padding:15px 20px;margin:15px 0;border-radius:0 8px 8px 0;">"#,
                p.container_bg, p.container
            );
            container_heading(cx, false, out);
        }
    }

    FrameState {
        container: Some(style),
        ..frames
    }
}

fn container_heading(cx: &Cx, stroke: bool, out: &mut String) {
    if cx.label().is_some() {
        let _ = write!(
            out,
            r#"<h4 style="{};margin:0 0 10px 0;font-weight:bold;text-align:{};">{}</h4>"#,
            cx.label_css(stroke),
            cx.palette.align.text,
            cx.title()
        );
    }
}

// ─── Content variants ───────────────────────────────────────────

/// One block per image, with an optional caption. Nothing for an empty list.
pub fn gallery(images: &[GalleryImage], out: &mut String) {
    if images.is_empty() {
        return;
    }
    out.push_str(r#"<div style="margin:15px 0;">"#);
    for img in images {
        let alt = non_empty(img.alt.as_deref()).unwrap_or("Image");
        let _ = write!(
            out,
            r#"<div style="margin:10px 0;text-align:center;"><img src="{}" alt="{}" style="max-width:100%;height:auto;border-radius:8px;box-shadow:0 4px 12px rgba(0,0,0,0.3);">"#,
            attr(&img.url),
            attr(alt)
        );
        if let Some(caption) = non_empty(img.caption.as_deref()) {
            let _ = write!(
                out,
                r#"<div style="margin-top:8px;font-style:italic;font-size:14px;opacity:0.8;">{}</div>"#,
                caption
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

fn background_image(cx: &Cx, out: &mut String) {
    let Some(url) = non_empty(cx.section.background_url.as_deref()) else {
        return;
    };
    let p = &cx.palette;
    let chrome = cx.chrome;

    let _ = write!(
        out,
        r#"<div style="background-image:url('{}');background-size:cover;background-position:center;background-color:{};border:2px solid {};border-radius:12px;padding:20px;margin-bottom:25px;min-height:{}px;position:relative;">"#,
        attr(url),
        chrome.background_color,
        chrome.border_color,
        p.min_height
    );
    let _ = write!(
        out,
        r#"<div style="position:absolute;top:0;left:0;right:0;bottom:0;background-color:{};border-radius:10px;"></div>"#,
        Rgb::hex(p.overlay).with_alpha(p.overlay_opacity)
    );
    let _ = write!(
        out,
        r#"<div style="position:relative;z-index:1;text-align:{};">"#,
        p.align.text
    );
    if cx.label().is_some() {
        let _ = write!(
            out,
            r#"<h3 style="{};margin-bottom:15px;">{}</h3>"#,
            cx.label_css(true),
            cx.title()
        );
    }
    if let Some(content) = cx.content() {
        let _ = write!(
            out,
            r#"<div style="{};line-height:1.6;">{}</div>"#,
            cx.content_css(false),
            line_breaks(content)
        );
    }
    gallery(cx.section.gallery(), out);
    out.push_str("</div></div>");
}

/// The scale a bar is drawn against. Absent, zero, negative or non-finite
/// maxima fall back to 100 so a degenerate bar never divides by zero.
pub fn bar_max(bar: &StatBar) -> f64 {
    bar.max_value
        .filter(|m| m.is_finite() && *m > 0.0)
        .unwrap_or(100.0)
}

/// Fill width in percent. Not clamped: a value above its maximum overflows.
pub fn bar_fill_percent(bar: &StatBar) -> f64 {
    bar.value * 100.0 / bar_max(bar)
}

fn stats_bars(cx: &Cx, out: &mut String) {
    let bars = cx.section.stat_bars.as_deref().unwrap_or(&[]);
    if bars.is_empty() {
        return;
    }
    let p = &cx.palette;

    let _ = write!(
        out,
        r#"<div style="background:rgba(0,0,0,0.3);border-radius:12px;padding:20px;{}">"#,
        cx.margin("margin:10px 0;", "margin:15px 0;")
    );
    if cx.label().is_some() {
        let _ = write!(
            out,
            r#"<h3 style="{};margin:0 0 20px 0;text-align:{};">{}</h3>"#,
            cx.label_css(true),
            p.align.text,
            cx.title()
        );
    }
    out.push_str(r#"<div style="display:grid;gap:15px;">"#);
    let text = cx.content_css(false);
    for bar in bars {
        let color = non_empty(bar.color.as_deref()).unwrap_or(cx.chrome.accent.as_str());
        let _ = write!(
            out,
            concat!(
                r#"<div style="display:flex;flex-direction:column;gap:5px;">"#,
                r#"<div style="display:flex;justify-content:space-between;align-items:center;">"#,
                r#"<span style="{text};font-weight:bold;">{name}</span>"#,
                r#"<span style="{text};font-size:14px;opacity:0.8;">{value}/{max}</span>"#,
                r#"</div>"#,
                r#"<div style="background:rgba(255,255,255,0.1);border-radius:10px;height:12px;overflow:hidden;">"#,
                r#"<div style="width:{fill}%;height:100%;background:{color};border-radius:10px;transition:width 0.3s ease;"></div>"#,
                r#"</div></div>"#
            ),
            text = text,
            name = bar.name,
            value = bar.value,
            max = bar_max(bar),
            fill = bar_fill_percent(bar),
            color = color,
        );
    }
    out.push_str("</div>");
    gallery(cx.section.gallery(), out);
    out.push_str("</div>");
}

fn profile_card(cx: &Cx, out: &mut String) {
    let p = &cx.palette;
    let accent = &cx.chrome.accent;

    let _ = write!(
        out,
        r#"<div style="background:linear-gradient(135deg,{accent}22,{}22);border:2px solid {accent};border-radius:20px;padding:25px;{}text-align:{};">"#,
        cx.chrome.accent_alt,
        cx.margin("margin:10px 0;", "margin:15px 0;"),
        p.align.text
    );
    if let Some(image) = non_empty(cx.section.profile_image.as_deref()) {
        let _ = write!(
            out,
            r#"<img src="{}" alt="Profile" style="width:120px;height:120px;border-radius:50%;border:4px solid {accent};margin-bottom:15px;object-fit:cover;">"#,
            attr(image)
        );
    }
    if cx.label().is_some() {
        let _ = write!(
            out,
            r#"<h2 style="{};margin:0 0 10px 0;">{}</h2>"#,
            cx.label_css(true),
            cx.title()
        );
    }
    if let Some(content) = cx.content() {
        let _ = write!(
            out,
            r#"<p style="{};margin:0 0 15px 0;line-height:1.5;">{}</p>"#,
            cx.content_css(false),
            line_breaks(content)
        );
    }
    let badges = cx.section.profile_badges.as_deref().unwrap_or(&[]);
    if !badges.is_empty() {
        let _ = write!(
            out,
            r#"<div style="display:flex;flex-wrap:wrap;gap:8px;justify-content:{};margin-top:15px;">"#,
            p.align.flex
        );
        for badge in badges {
            let _ = write!(
                out,
                r#"<span style="background:{accent};color:white;padding:4px 12px;border-radius:20px;font-size:12px;font-weight:bold;">{badge}</span>"#
            );
        }
        out.push_str("</div>");
    }
    gallery(cx.section.gallery(), out);
    out.push_str("</div>");
}

fn feature_grid(cx: &Cx, out: &mut String) {
    let features = cx.section.features.as_deref().unwrap_or(&[]);
    if features.is_empty() {
        return;
    }
    let p = &cx.palette;
    let columns = p.grid_columns;
    let cell_width = 100.0 / columns as f64 - 2.0;

    let _ = write!(
        out,
        r#"<div style="{}">"#,
        cx.margin("margin:10px 0;", "margin:15px 0;")
    );
    if cx.label().is_some() {
        let _ = write!(
            out,
            r#"<h3 style="{};margin:0 0 20px 0;text-align:{};">{}</h3>"#,
            cx.label_css(true),
            p.align.text,
            cx.title()
        );
    }
    out.push_str(r#"<div style="display:block;">"#);
    let title_css = cx.label_css(false);
    let body_css = cx.content_css(false);
    for row in features.chunks(columns) {
        out.push_str(r#"<div style="display:block;margin-bottom:20px;">"#);
        for (j, item) in row.iter().enumerate() {
            let margin_right = if j < columns - 1 { "2%" } else { "0" };
            let _ = write!(
                out,
                concat!(
                    r#"<div style="display:inline-block;width:{width}%;margin-right:{margin};vertical-align:top;background:rgba(255,255,255,0.05);border:1px solid {accent}33;border-radius:12px;padding:20px;text-align:center;box-sizing:border-box;">"#,
                    r#"<div style="font-size:48px;margin-bottom:12px;">{icon}</div>"#,
                    r#"<h4 style="{title_css};margin:0 0 8px 0;font-size:18px;">{title}</h4>"#,
                    r#"<p style="{body_css};margin:0;font-size:14px;opacity:0.8;line-height:1.4;">{description}</p>"#,
                    r#"</div>"#
                ),
                width = cell_width,
                margin = margin_right,
                accent = cx.chrome.accent,
                icon = item.icon,
                title_css = title_css,
                title = item.title,
                body_css = body_css,
                description = item.description,
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
    gallery(cx.section.gallery(), out);
    out.push_str("</div>");
}

static DENYLIST: Lazy<[Regex; 3]> = Lazy::new(|| {
    ["code", "script", "style"].map(|tag| {
        Regex::new(&format!(r"(?is)<{tag}[^>]*>.*?</{tag}>")).expect("BUG: invalid denylist regex literal")
    })
});

/// Remove `code`, `script` and `style` elements, content included.
///
/// A denylist, not a sanitizer: event-handler attributes and other vectors
/// pass through.
pub fn strip_denied_tags(markup: &str) -> String {
    DENYLIST
        .iter()
        .fold(markup.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
}

fn html(cx: &Cx, out: &mut String) {
    if let Some(content) = cx.content() {
        out.push_str(&strip_denied_tags(content));
    }
}

fn image(cx: &Cx, out: &mut String) {
    let url = non_blank(cx.section.content.as_deref());
    let images = cx.section.gallery();
    if url.is_none() && images.is_empty() {
        return;
    }
    let align = cx.palette.align.text;

    let _ = write!(out, r#"<div style="text-align:{align};margin:20px 0;">"#);
    if cx.has_label() {
        let _ = write!(
            out,
            r#"<h4 style="margin:0 0 10px 0;text-align:{align};">{}</h4>"#,
            cx.title()
        );
    }
    if let Some(url) = url {
        let alt = cx.label().unwrap_or("Image");
        let _ = write!(
            out,
            r#"<img src="{}" alt="{}" style="max-width:100%;height:auto;border-radius:8px;box-shadow:0 4px 12px rgba(0,0,0,0.3);">"#,
            attr(url),
            attr(alt)
        );
    }
    gallery(images, out);
    out.push_str("</div>");
}

fn bubble(cx: &Cx, justify: &str, out: &mut String) {
    if !cx.has_content() {
        return;
    }
    let content = cx.section.content.as_deref().unwrap_or_default();

    let _ = write!(
        out,
        r#"<div style="{}display:flex;justify-content:{justify};padding:0 {};">"#,
        cx.margin("margin:10px 0;", "margin-bottom:15px;"),
        cx.margin("10px", "20px")
    );
    let _ = write!(
        out,
        r#"<div style="background:{};padding:12px 18px;border-radius:18px;max-width:70%;word-wrap:break-word;color:white;{}">{}</div></div>"#,
        cx.palette.bubble,
        cx.content_css(false),
        line_breaks(content)
    );

    let images = cx.section.gallery();
    if !images.is_empty() {
        let _ = write!(
            out,
            r#"<div style="display:flex;justify-content:{justify};margin:10px 0;"><div style="max-width:70%;">"#
        );
        gallery(images, out);
        out.push_str("</div></div>");
    }
}

fn quote(cx: &Cx, out: &mut String) {
    if !cx.has_content() {
        return;
    }
    let content = cx.section.content.as_deref().unwrap_or_default();
    let p = &cx.palette;

    let _ = write!(
        out,
        r#"<blockquote style="border-left:4px solid {};{}padding:15px 20px;background:rgba(255,255,255,0.05);border-radius:0 8px 8px 0;font-style:italic;{};text-align:{};">"{}"</blockquote>"#,
        p.quote,
        cx.margin("margin:15px 0;", "margin:20px 0;"),
        cx.content_css(true),
        p.align.text,
        line_breaks(content)
    );
    gallery(cx.section.gallery(), out);
}

fn callout(cx: &Cx, out: &mut String) {
    let images = cx.section.gallery();
    let (has_label, has_content) = (cx.has_label(), cx.has_content());
    if !has_label && !has_content && images.is_empty() {
        return;
    }
    let p = &cx.palette;

    let _ = write!(
        out,
        r#"<div style="background:{};border:1px solid {};border-radius:12px;padding:15px;{}box-shadow:0 2px 8px rgba(0,0,0,0.2);">"#,
        p.callout_bg,
        p.callout,
        cx.margin("margin:10px 0;", "margin:15px 0;")
    );
    if has_label {
        let _ = write!(
            out,
            r#"<h4 style="{};margin:0 0 10px 0;font-weight:bold;text-align:{};">{}</h4>"#,
            cx.label_css(true),
            p.align.text,
            cx.title()
        );
    }
    if has_content {
        let content = cx.section.content.as_deref().unwrap_or_default();
        let _ = write!(
            out,
            r#"<div style="{};text-align:{};">{}</div>"#,
            cx.content_css(false),
            p.align.text,
            line_breaks(content)
        );
    }
    gallery(images, out);
    out.push_str("</div>");
}

/// Comma-separated traits, trimmed, blanks dropped, duplicates kept.
pub fn parse_traits(content: &str) -> Vec<&str> {
    content
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn traits(cx: &Cx, out: &mut String) {
    let list = parse_traits(cx.section.content.as_deref().unwrap_or_default());
    if list.is_empty() {
        return;
    }
    let p = &cx.palette;

    let _ = write!(out, r#"<div style="{}">"#, cx.margin("margin:10px 0;", "margin:15px 0;"));
    if cx.has_label() {
        let _ = write!(
            out,
            r#"<h4 style="margin:0 0 15px 0;text-align:{};">{}</h4>"#,
            p.align.text,
            cx.title()
        );
    }
    let _ = write!(
        out,
        r#"<div style="display:flex;flex-wrap:wrap;gap:8px;justify-content:{};">"#,
        p.align.flex
    );
    for t in list {
        let _ = write!(
            out,
            r#"<span style="background:{};color:white;padding:4px 12px;border-radius:20px;font-size:14px;font-weight:500;">{t}</span>"#,
            p.trait_bg
        );
    }
    out.push_str("</div></div>");
    gallery(cx.section.gallery(), out);
}

/// One `name: value` line of a stats block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Parse newline-separated `name: value` lines. Blank lines are skipped; a
/// line without a colon or with an empty value shows `placeholder`.
pub fn parse_stats<'a>(content: &'a str, placeholder: &'a str) -> Vec<StatLine<'a>> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| match line.split_once(':') {
            Some((name, value)) => {
                let value = value.trim();
                StatLine {
                    name: name.trim(),
                    value: if value.is_empty() { placeholder } else { value },
                }
            }
            None => StatLine {
                name: line,
                value: placeholder,
            },
        })
        .collect()
}

fn stats(cx: &Cx, out: &mut String) {
    let p = &cx.palette;
    let lines = parse_stats(cx.section.content.as_deref().unwrap_or_default(), p.stats_placeholder);
    if lines.is_empty() {
        return;
    }

    let _ = write!(
        out,
        r#"<div style="background:{};border-radius:8px;padding:15px;{}">"#,
        p.stats_bg,
        cx.margin("margin:10px 0;", "margin:15px 0;")
    );
    if cx.has_label() {
        let _ = write!(
            out,
            r#"<h4 style="margin:0 0 15px 0;text-align:{};">{}</h4>"#,
            p.align.text,
            cx.title()
        );
    }
    out.push_str(r#"<div style="display:grid;gap:8px;">"#);
    for line in lines {
        let _ = write!(
            out,
            r#"<div style="display:flex;justify-content:space-between;align-items:center;"><span>{}</span><span style="font-weight:bold;color:{};">{}</span></div>"#,
            line.name, p.stats_accent, line.value
        );
    }
    out.push_str("</div></div>");
    gallery(cx.section.gallery(), out);
}

fn normal(cx: &Cx, out: &mut String) {
    let align = cx.palette.align.text;
    if cx.has_label() {
        let _ = write!(
            out,
            r#"<h3 style="text-align:{align};{};{}font-weight:bold;">{}</h3>"#,
            cx.label_css(true),
            cx.margin("margin:15px 0 10px 0;", "margin:20px 0 10px 0;"),
            cx.title()
        );
    }
    if cx.has_content() {
        let content = cx.section.content.as_deref().unwrap_or_default();
        let _ = write!(
            out,
            r#"<p style="{};text-align:{align};{}line-height:1.6;">{}</p>"#,
            cx.content_css(false),
            cx.margin("margin:5px 0;", "margin:10px 0;"),
            line_breaks(content)
        );
    }
    gallery(cx.section.gallery(), out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeatureItem;

    fn render(section: &Section) -> String {
        render_section(section, &Chrome::default(), FrameState::default()).html
    }

    fn in_container(section: &Section) -> String {
        let frames = FrameState {
            group_open: false,
            container: Some(ContainerStyle::Box),
        };
        render_section(section, &Chrome::default(), frames).html
    }

    #[test]
    fn test_traits_split() {
        assert_eq!(
            parse_traits("Brave, , Clever,Brave"),
            vec!["Brave", "Clever", "Brave"]
        );
        assert!(parse_traits(" , ,").is_empty());
    }

    #[test]
    fn test_stats_parse() {
        let lines = parse_stats("HP: 42\nHP\nHP:\n\n  MP: 3:4 ", "—");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], StatLine { name: "HP", value: "42" });
        assert_eq!(lines[1].value, "—");
        assert_eq!(lines[2].value, "—");
        assert_eq!(lines[3], StatLine { name: "MP", value: "3:4" });
    }

    #[test]
    fn test_stat_bar_percentages() {
        assert_eq!(bar_fill_percent(&StatBar::new("a", 85.0, 100.0)), 85.0);
        assert_eq!(bar_fill_percent(&StatBar::new("a", 50.0, 0.0)), 50.0);
        assert_eq!(bar_fill_percent(&StatBar::new("a", 150.0, 100.0)), 150.0);
        assert_eq!(bar_fill_percent(&StatBar::new("a", 5.0, 10.0)), 50.0);
        let unscaled = StatBar {
            max_value: None,
            ..StatBar::new("a", 30.0, 1.0)
        };
        assert_eq!(bar_max(&unscaled), 100.0);
    }

    #[test]
    fn test_stats_bars_markup() {
        let mut section = Section::new(SectionKind::StatsBars);
        section.stat_bars = Some(vec![StatBar::new("Str", 85.0, 100.0), StatBar::new("Dex", 50.0, 0.0)]);
        let html = render(&section);
        assert!(html.contains("width:85%;"));
        assert!(html.contains("width:50%;"));
        assert!(html.contains("50/100"), "degenerate max is shown as 100");
    }

    #[test]
    fn test_blank_sections_emit_nothing() {
        for kind in [
            SectionKind::Callout,
            SectionKind::Image,
            SectionKind::StatsBars,
            SectionKind::FeatureGrid,
            SectionKind::Traits,
            SectionKind::Stats,
            SectionKind::Quote,
            SectionKind::BubbleLeft,
            SectionKind::BackgroundImage,
            SectionKind::Html,
            SectionKind::Normal,
        ] {
            let section = Section::new(kind).with_label("  ").with_content(" \n ");
            let html = if kind == SectionKind::Html {
                render(&Section::new(kind))
            } else {
                render(&section)
            };
            assert_eq!(html, "", "{:?} should render nothing when blank", kind);
        }
    }

    #[test]
    fn test_html_denylist() {
        let section = Section::new(SectionKind::Html).with_content(
            "<b>keep</b><SCRIPT type=\"x\">alert(1)</script><code>x</code><style>\np{}\n</style><i>me</i>",
        );
        assert_eq!(render(&section), "<b>keep</b><i>me</i>");
    }

    #[test]
    fn test_denylist_is_non_greedy() {
        let stripped = strip_denied_tags("<code>a</code>mid<code>b</code>");
        assert_eq!(stripped, "mid");
    }

    #[test]
    fn test_normal_heading_and_paragraph() {
        let section = Section::new(SectionKind::Normal)
            .with_emoji("⭐")
            .with_label("Title")
            .with_content("one\ntwo");
        let html = render(&section);
        assert!(html.contains("⭐ Title</h3>"));
        assert!(html.contains("one<br>two</p>"));
        assert!(html.contains("margin:20px 0 10px 0;"));
        assert!(in_container(&section).contains("margin:15px 0 10px 0;"));
    }

    #[test]
    fn test_heading_renders_like_normal() {
        let normal = Section::new(SectionKind::Normal).with_label("X");
        let heading = Section {
            kind: SectionKind::Heading,
            ..normal.clone()
        };
        assert_eq!(render(&normal), render(&heading));
    }

    #[test]
    fn test_quote_wraps_in_quotation_marks() {
        let section = Section::new(SectionKind::Quote).with_content("to be\nor not");
        let html = render(&section);
        assert!(html.starts_with("<blockquote"));
        assert!(html.contains(r#">"to be<br>or not"</blockquote>"#));
    }

    #[test]
    fn test_bubble_sides() {
        let left = Section::new(SectionKind::BubbleLeft).with_content("hi");
        let right = Section {
            kind: SectionKind::BubbleRight,
            ..left.clone()
        };
        assert!(render(&left).contains("justify-content:flex-start"));
        assert!(render(&right).contains("justify-content:flex-end"));
        assert!(render(&left).contains("background:#007aff"));
        assert!(in_container(&left).contains("padding:0 10px;"));
    }

    #[test]
    fn test_traits_chips() {
        let mut section = Section::new(SectionKind::Traits).with_content("Brave, , Clever,Brave");
        section.trait_bg_color = Some("#222".to_string());
        let html = render(&section);
        assert_eq!(html.matches("<span").count(), 3);
        assert!(html.contains("background:#222"));
    }

    #[test]
    fn test_stats_placeholder() {
        let mut section = Section::new(SectionKind::Stats).with_content("HP: 42\nMP");
        section.stats_undefined_text = Some("n/a".to_string());
        let html = render(&section);
        assert!(html.contains(">42</span>"));
        assert!(html.contains(">n/a</span>"));
    }

    #[test]
    fn test_feature_grid_rows() {
        let mut section = Section::new(SectionKind::FeatureGrid);
        section.grid_columns = Some(3);
        section.features = Some(
            (0..4)
                .map(|i| FeatureItem::new("★", &format!("F{}", i), "d"))
                .collect(),
        );
        let html = render(&section);
        assert_eq!(html.matches("margin-bottom:20px;").count(), 2, "4 items in rows of 3");
        assert!(html.contains("width:31.33"));
    }

    #[test]
    fn test_image_needs_url_or_gallery() {
        let mut section = Section::new(SectionKind::Image).with_label("Pic");
        assert_eq!(render(&section), "");
        section.images = Some(vec![GalleryImage::new("a.png")]);
        let html = render(&section);
        assert!(html.contains(r#"<img src="a.png" alt="Image""#));
        assert!(html.contains("text-align:center"));
    }

    #[test]
    fn test_background_image_overlay() {
        let mut section = Section::new(SectionKind::BackgroundImage).with_label("Bg");
        assert_eq!(render(&section), "");
        section.background_url = Some("bg.jpg".to_string());
        section.overlay_color = Some("#1e1b4b".to_string());
        section.overlay_opacity = Some(75.0);
        let html = render(&section);
        assert!(html.contains("background-image:url('bg.jpg')"));
        assert!(html.contains("rgba(30,27,75,0.75)"));
        assert!(html.contains("min-height:300px"));
    }

    #[test]
    fn test_profile_card_parts_are_independent() {
        let mut section = Section::new(SectionKind::ProfileCard);
        let bare = render(&section);
        assert!(!bare.contains("<img"));
        assert!(!bare.contains("<h2"));

        section.profile_badges = Some(vec!["A".to_string(), "B".to_string()]);
        section.profile_image = Some("me.png".to_string());
        let html = render(&section);
        assert!(html.contains(r#"<img src="me.png" alt="Profile""#));
        assert_eq!(html.matches("border-radius:20px;font-size:12px").count(), 2);
    }

    #[test]
    fn test_divider_styles() {
        let mut section = Section::new(SectionKind::Divider);
        assert!(render(&section).contains("linear-gradient(90deg,transparent,#FF9A00,transparent)"));
        section.divider_style = Some(crate::model::DividerStyle::Dashed);
        section.divider_color = Some("#0f0".to_string());
        assert!(render(&section).contains("1px dashed #0f0"));
    }

    #[test]
    fn test_gallery_captions() {
        let mut out = String::new();
        gallery(
            &[GalleryImage {
                url: "x.png".to_string(),
                alt: None,
                caption: Some("Look".to_string()),
            }],
            &mut out,
        );
        assert!(out.contains(">Look</div>"));
        let mut empty = String::new();
        gallery(&[], &mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let section = Section::new(SectionKind::Image).with_content(r#"a.png" onerror="x"#);
        assert!(render(&section).contains(r#"src="a.png&quot; onerror=&quot;x""#));
    }

    #[test]
    fn test_group_opens_and_closes_container() {
        let chrome = Chrome::default();
        let open = FrameState {
            group_open: false,
            container: Some(ContainerStyle::Quote),
        };
        let out = render_section(&Section::new(SectionKind::Group).with_label("G"), &chrome, open);
        assert!(out.html.starts_with("</blockquote><div"));
        assert!(out.frames.group_open);
        assert!(!out.frames.container_open());
    }

    #[test]
    fn test_container_styles() {
        let chrome = Chrome::default();
        for (style, opener) in [
            (ContainerStyle::Quote, "<blockquote"),
            (ContainerStyle::Callout, "<div style=\"background:#FF9A0022;border:1px solid"),
            (ContainerStyle::Box, "<div style=\"border:2px solid"),
            (ContainerStyle::Panel, "<div style=\"background:#FF9A0022;border-left:4px"),
        ] {
            let mut section = Section::new(SectionKind::Container).with_label("C");
            section.container_style = Some(style);
            let out = render_section(&section, &chrome, FrameState::default());
            assert!(out.html.starts_with(opener), "{:?}: {}", style, out.html);
            assert_eq!(out.frames.container, Some(style));
        }
    }
}
