//! # Document Renderer
//!
//! Assembles a whole card: header, body, floating overlay.
//!
//! ```text
//! Document
//!     ↓
//!   header     — always emitted; collapsed to zero height when hidden
//!     ↓
//!   body       — sections folded through the section renderer,
//!                frame state threaded from one section to the next,
//!                leftover frames closed at the end
//!     ↓
//!   floating   — fixed-position overlay, only when enabled with a URL
//! ```
//!
//! Rendering is a pure function of the document. The fragment contains no
//! time-dependent output; only [`render_standalone`] stamps the time.

pub mod frames;
pub mod sections;

use std::fmt::Write as FmtWrite;

use crate::model::{Chrome, Document, Floating, Header, WidthMode};
use crate::style::{self, Alignment, AmbientStroke};
use frames::FrameState;
use sections::{attr, render_section, Rendered};

/// Render a document to an embeddable HTML fragment.
pub fn render(document: &Document) -> String {
    log::debug!("rendering card with {} sections", document.sections.len());
    let chrome = &document.chrome;

    let mut out = header(&document.header, chrome);
    out.push_str(&body(document));
    out.push_str(&floating(&document.floating));
    out
}

/// Render a document wrapped in a minimal standalone HTML page.
pub fn render_standalone(document: &Document) -> String {
    let generated = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    render_standalone_at(document, &generated)
}

/// [`render_standalone`] with an explicit generation timestamp.
pub fn render_standalone_at(document: &Document, generated: &str) -> String {
    let chrome = &document.chrome;
    let page_bg = if chrome.body_background {
        chrome.background_color.as_str()
    } else {
        "transparent"
    };

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generated" content="{generated}">
    <title>{title} - Character Card</title>
    <style>
        body {{
            margin: 0;
            padding: 20px;
            background: {page_bg};
            color: {text};
            font-family: system-ui, -apple-system, sans-serif;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
        }}
        .card-container {{
            max-width: 800px;
            width: 100%;
        }}
        img {{
            max-width: 100%;
            height: auto;
        }}
        * {{
            box-sizing: border-box;
        }}
    </style>
</head>
<body>
    <div class="card-container">
        {card}
    </div>
</body>
</html>"#,
        generated = attr(generated),
        title = document.header.name,
        page_bg = page_bg,
        text = chrome.text_color,
        card = render(document),
    );
    out
}

fn header(header: &Header, chrome: &Chrome) -> String {
    let align = Alignment::from(header.align);
    let max_width = chrome.header_width.max_width();
    let width = match chrome.header_width {
        WidthMode::Wide => "100%",
        WidthMode::Narrow => "auto",
    };

    // A hidden header keeps its frame so toggling it never shifts layout.
    if !chrome.header_enabled {
        return format!(
            r#"<div style="background:transparent;padding:0;margin:0 auto;height:0;overflow:hidden;opacity:0;max-width:{max_width};width:{width};"><div style="display:none;"><div style="display:flex;gap:6px;align-items:center;justify-content:{};"></div></div></div>"#,
            align.flex
        );
    }

    let background = match (chrome.header_background, chrome.header_gradient) {
        (true, true) => format!(
            "linear-gradient(120deg,{},{})",
            chrome.accent, chrome.accent_alt
        ),
        (true, false) => chrome.accent.clone(),
        (false, _) => "transparent".to_string(),
    };
    let bar = if chrome.side_bar {
        format!("border-left:4px solid {};", chrome.bar_color)
    } else {
        String::new()
    };
    let bar_offset = if chrome.side_bar { "margin-left:-4px;" } else { "" };
    let base = style::base_declarations(chrome);
    let ambient = AmbientStroke::from_chrome(chrome);

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div style="background:{background};padding:18px;border-radius:8px 8px 0 0;max-width:{max_width};width:{width};margin:0 auto;{bar}">"#
    );
    let _ = write!(
        out,
        r#"<div style="display:flex;flex-direction:column;gap:4px;align-items:{};text-align:{};{bar_offset}">"#,
        align.flex, align.text
    );
    let _ = write!(
        out,
        r#"<div style="display:flex;gap:6px;align-items:center;justify-content:{};">"#,
        align.flex
    );
    if !header.emoji.is_empty() {
        let _ = write!(
            out,
            r#"<span style="font-size:{}px;">{}</span>"#,
            chrome.font_size, header.emoji
        );
    }
    let _ = write!(
        out,
        r#"<span style="{base};{}">{}</span></div>"#,
        style::resolve(&header.name_style, ambient, true),
        header.name
    );
    if !header.label.is_empty() {
        let _ = write!(
            out,
            r#"<span style="{base};{};font-weight:700;">{}</span>"#,
            style::resolve(&header.label_style, ambient, true),
            header.label
        );
    }
    out.push_str("</div></div>");
    out
}

/// Inline style of the body frame, from the theme toggles.
fn body_style(chrome: &Chrome) -> String {
    let mut decls = Vec::new();
    if chrome.body_background {
        decls.push(format!("background:{}", chrome.background_color));
    }
    decls.push(format!("color:{}", chrome.text_color));
    decls.push(format!("max-width:{}", chrome.body_width.max_width()));
    decls.push("margin:0 auto".to_string());
    decls.push("padding:20px".to_string());
    if chrome.body_border {
        decls.push(format!("border:4px solid {}", chrome.border_color));
        if chrome.header_enabled {
            decls.push("border-top:none".to_string());
        }
    }
    // Square top corners when the header sits on top of the body.
    if chrome.header_enabled {
        decls.push("border-radius:0 0 8px 8px".to_string());
    } else {
        decls.push("border-radius:8px".to_string());
    }
    decls.join(";")
}

fn body(document: &Document) -> String {
    let chrome = &document.chrome;
    let mut out = format!(r#"<div style="{};">"#, body_style(chrome));

    let frames = document
        .sections
        .iter()
        .fold(FrameState::default(), |frames, section| {
            let Rendered { html, frames } = render_section(section, chrome, frames);
            out.push_str(&html);
            frames
        });
    frames.close_all(chrome, &mut out);

    out.push_str("</div>");
    out
}

fn floating(floating: &Floating) -> String {
    if !floating.enabled || floating.url.is_empty() {
        return String::new();
    }
    let vertical = if floating.pos.is_top() { "top:0;" } else { "bottom:0;" };
    let horizontal = if floating.pos.is_left() { "left:5px;" } else { "right:5px;" };
    format!(
        r#"<img src="{}" style="position:fixed;{vertical}{horizontal}height:{}%;pointer-events:none;z-index:99;">"#,
        attr(&floating.url),
        floating.height
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{presets, Corner, Section, SectionKind};

    fn doc(sections: Vec<Section>) -> Document {
        let mut doc = presets::blank();
        doc.sections = sections;
        doc
    }

    #[test]
    fn test_hidden_header_is_collapsed_not_removed() {
        let mut d = doc(vec![]);
        d.chrome.header_enabled = false;
        let html = render(&d);
        assert!(html.starts_with(r#"<div style="background:transparent;padding:0;margin:0 auto;height:0;overflow:hidden;opacity:0;"#));
        assert!(!html.contains(&d.header.name));
        assert!(html.contains("border-radius:8px;"));
    }

    #[test]
    fn test_header_background_modes() {
        let mut d = doc(vec![]);
        assert!(render(&d).contains("linear-gradient(120deg,#FF9A00,#FF6600)"));
        d.chrome.header_gradient = false;
        assert!(render(&d).starts_with(r#"<div style="background:#FF9A00;"#));
        d.chrome.header_background = false;
        assert!(render(&d).starts_with(r#"<div style="background:transparent;padding:18px"#));
    }

    #[test]
    fn test_body_style_follows_toggles() {
        let mut chrome = Chrome::default();
        assert_eq!(
            body_style(&chrome),
            "background:#1A1A1A;color:#ffffff;max-width:800px;margin:0 auto;padding:20px;border:4px solid #FF9A00;border-top:none;border-radius:0 0 8px 8px"
        );
        chrome.body_background = false;
        chrome.body_border = false;
        chrome.header_enabled = false;
        chrome.body_width = WidthMode::Wide;
        assert_eq!(
            body_style(&chrome),
            "color:#ffffff;max-width:1200px;margin:0 auto;padding:20px;border-radius:8px"
        );
    }

    #[test]
    fn test_wide_header() {
        let mut d = doc(vec![]);
        d.chrome.header_width = WidthMode::Wide;
        assert!(render(&d).contains("max-width:1200px;width:100%;"));
    }

    #[test]
    fn test_floating_overlay() {
        let mut d = doc(vec![]);
        d.floating.url = "float.png".to_string();
        assert!(!render(&d).contains("float.png"), "disabled floating is omitted");

        d.floating.enabled = true;
        d.floating.pos = Corner::TopLeft;
        let html = render(&d);
        assert!(html.ends_with(
            r#"<img src="float.png" style="position:fixed;top:0;left:5px;height:30%;pointer-events:none;z-index:99;">"#
        ));

        d.floating.url.clear();
        assert!(!render(&d).contains("position:fixed"));
    }

    #[test]
    fn test_unterminated_group_is_closed_after_content() {
        let d = doc(vec![
            Section::new(SectionKind::Group).with_label("G"),
            Section::new(SectionKind::Normal).with_content("inside"),
        ]);
        let html = render(&d);
        let content = html.find("inside</p>").unwrap();
        let close = html.rfind("</div></div><hr").unwrap();
        assert!(close > content);
        assert_eq!(html.matches("<hr").count(), 1);
    }

    #[test]
    fn test_standalone_shell() {
        let d = doc(vec![]);
        let html = render_standalone_at(&d, "2026-01-01T00:00:00.000Z");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Character Card - Character Card</title>"));
        assert!(html.contains(r#"<meta name="generated" content="2026-01-01T00:00:00.000Z">"#));
        assert!(html.contains("background: #1A1A1A;"));
        assert!(html.contains(&render(&d)));
        assert!(html.ends_with("</html>"));
    }
}
