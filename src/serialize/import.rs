//! Best-effort import of pasted or uploaded text.
//!
//! JSON records go through [`load`](super::load). Anything that looks like
//! markup is reduced to its plain text and becomes a single section. The
//! markup path is deliberately lossy: structure, styles and images are
//! dropped, only the words survive.

use once_cell::sync::Lazy;
use regex::Regex;

use super::load;
use crate::error::CardError;
use crate::model::{Document, Section, SectionKind, DEFAULT_STRIPE_COLOR};

const IMPORTED_LABEL: &str = "Imported Content";

static ANY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("BUG: invalid ANY_TAG regex literal"));

static DOCUMENT_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(<!DOCTYPE|<html)").expect("BUG: invalid DOCUMENT_START regex literal")
});

static ELEMENT_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)\b([^>]*)>")
        .expect("BUG: invalid ELEMENT_TAG regex literal")
});

static CARD_CONTAINER_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bclass\s*=\s*(?:"[^"]*\bcard-container\b[^"]*"|'[^']*\bcard-container\b[^']*')"#)
        .expect("BUG: invalid CARD_CONTAINER_CLASS regex literal")
});

static BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<body\b[^>]*>(.*)</body\s*>").expect("BUG: invalid BODY regex literal")
});

/// Import text that is either a saved record or markup.
///
/// Blank text is a [`CardError::ParseError`]. Text that starts like an
/// HTML document or contains any tag takes the markup path. Everything
/// else must be a JSON record.
pub fn import_markup(text: &str, current: &Document) -> Result<Document, CardError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CardError::parse("nothing to import", ""));
    }

    if DOCUMENT_START.is_match(trimmed) || ANY_TAG.is_match(trimmed) {
        return Ok(import_html(trimmed, current));
    }

    let record: serde_json::Value = serde_json::from_str(trimmed)?;
    let document = load(&record, current)?;
    log::info!(
        "imported card '{}' from JSON ({} sections)",
        document.header.name,
        document.sections.len()
    );
    Ok(document)
}

/// Replace the sections of `current` with one plain-text section holding
/// the text of `html`. Header, theme and floating image are kept.
pub fn import_html(html: &str, current: &Document) -> Document {
    let markup = html.trim();
    let markup = if DOCUMENT_START.is_match(markup) {
        document_content(markup)
    } else {
        markup
    };
    let text = ANY_TAG.replace_all(markup, "").trim().to_string();

    let mut section = Section::new(SectionKind::Normal).with_label(IMPORTED_LABEL);
    section.content = Some(text);
    section.stripe_color = DEFAULT_STRIPE_COLOR.to_string();

    log::info!(
        "imported markup as plain text ({} characters)",
        section.content.as_deref().map_or(0, str::len)
    );

    Document {
        sections: vec![section],
        ..current.clone()
    }
}

/// The part of a full HTML page worth importing: the card container if
/// the page has one, else the body, else the page itself.
fn document_content(page: &str) -> &str {
    if let Some(inner) = card_container_inner(page).map(str::trim) {
        if !inner.is_empty() {
            return inner;
        }
    }
    match BODY.captures(page).and_then(|c| c.get(1)) {
        Some(body) if !body.as_str().is_empty() => body.as_str(),
        _ => page,
    }
}

/// Inner markup of the first element whose class list holds `card-container`.
///
/// Tags are matched by name and nesting depth; an unclosed element runs to
/// the end of the page.
fn card_container_inner(page: &str) -> Option<&str> {
    let mut tags = ELEMENT_TAG.captures_iter(page);

    let (name, start) = tags.by_ref().find_map(|tag| {
        let is_open = tag[1].is_empty();
        (is_open && CARD_CONTAINER_CLASS.is_match(&tag[3]))
            .then(|| (tag[2].to_ascii_lowercase(), tag.get(0).map_or(0, |m| m.end())))
    })?;

    let mut depth = 1usize;
    for tag in tags {
        if !tag[2].eq_ignore_ascii_case(&name) {
            continue;
        }
        let self_closing = tag[3].trim_end().ends_with('/');
        if tag[1].is_empty() {
            if !self_closing {
                depth += 1;
            }
        } else {
            depth -= 1;
            if depth == 0 {
                let end = tag.get(0).map_or(page.len(), |m| m.start());
                return Some(&page[start..end]);
            }
        }
    }
    Some(&page[start..])
}
