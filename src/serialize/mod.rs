//! # Serializer
//!
//! Converts a document to a persistable record and back.
//!
//! A record is always a full snapshot: header, theme, floating image,
//! sections, a format version and the save time. Loading is lenient in two
//! ways. Inside each object every missing field takes its default. At the
//! top level only `header` and `sections` are required; a record without
//! `chrome` or `floating` keeps the values of the document currently being
//! edited, so old records pick up the user's present theme instead of a
//! hardcoded one.
//!
//! Loading never mutates anything. It returns a new document or an error,
//! and the caller decides whether to replace what it has.

mod import;

pub use import::{import_html, import_markup};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CardError;
use crate::model::{Chrome, Document, Floating, Header, Section, RECORD_VERSION};

/// File name offered when exporting the standalone page.
pub const EXPORT_FILE_NAME: &str = "character-card.html";

/// The persisted form of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub header: Header,
    pub chrome: Chrome,
    pub floating: Floating,
    pub sections: Vec<Section>,
    pub version: String,
    pub timestamp: String,
}

impl CardRecord {
    /// The record as a JSON value, the input shape of [`load`].
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Two-space indented JSON, the format of saved card files.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Snapshot a document, stamped with the current time.
pub fn save(document: &Document) -> CardRecord {
    let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    save_at(document, &now)
}

/// [`save`] with an explicit timestamp.
pub fn save_at(document: &Document, timestamp: &str) -> CardRecord {
    log::debug!(
        "saving card '{}' with {} sections",
        document.header.name,
        document.sections.len()
    );
    CardRecord {
        header: document.header.clone(),
        chrome: document.chrome.clone(),
        floating: document.floating.clone(),
        sections: document.sections.clone(),
        version: RECORD_VERSION.to_string(),
        timestamp: timestamp.to_string(),
    }
}

/// Build a document from a record.
///
/// `current` supplies the theme and floating image when the record has
/// none. Fails with [`CardError::InvalidFormat`] when the record is not an
/// object, lacks `header` or `sections`, or has a field of the wrong shape.
pub fn load(record: &Value, current: &Document) -> Result<Document, CardError> {
    let obj = record
        .as_object()
        .ok_or_else(|| CardError::InvalidFormat("record must be a JSON object".to_string()))?;

    let header = present(obj.get("header"))
        .ok_or_else(|| CardError::InvalidFormat("record has no header".to_string()))?;
    let sections = present(obj.get("sections"))
        .ok_or_else(|| CardError::InvalidFormat("record has no sections".to_string()))?;

    let header = Header::deserialize(header).map_err(|e| invalid("header", e))?;
    let sections = Vec::<Section>::deserialize(sections).map_err(|e| invalid("sections", e))?;

    let chrome = match present(obj.get("chrome")) {
        Some(value) => Chrome::deserialize(value).map_err(|e| invalid("chrome", e))?,
        None => {
            log::warn!("record has no chrome, keeping the current theme");
            current.chrome.clone()
        }
    };
    let floating = match present(obj.get("floating")) {
        Some(value) => Floating::deserialize(value).map_err(|e| invalid("floating", e))?,
        None => {
            log::warn!("record has no floating image, keeping the current one");
            current.floating.clone()
        }
    };

    let version = obj
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or(RECORD_VERSION)
        .to_string();
    let timestamp = obj
        .get("timestamp")
        .and_then(Value::as_str)
        .map(str::to_string);

    log::debug!(
        "loaded card '{}' with {} sections (version {})",
        header.name,
        sections.len(),
        version
    );

    Ok(Document {
        header,
        chrome,
        floating,
        sections,
        version,
        timestamp,
    })
}

/// Absent and `null` both count as missing.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn invalid(part: &str, e: serde_json::Error) -> CardError {
    CardError::InvalidFormat(format!("{}: {}", part, e))
}

/// Download name for a saved record: the card name with everything but
/// ASCII letters and digits replaced by `_`.
pub fn suggested_file_name(document: &Document) -> String {
    let stem: String = document
        .header
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}-card.json", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{presets, SectionKind, StatBar};
    use serde_json::json;

    fn current() -> Document {
        let mut doc = presets::blank();
        doc.chrome.accent = "#123456".to_string();
        doc.floating.url = "current.png".to_string();
        doc
    }

    #[test]
    fn test_save_snapshot() {
        let doc = presets::demo();
        let record = save_at(&doc, "2026-03-01T12:00:00.000Z");
        assert_eq!(record.version, "3.0");
        assert_eq!(record.timestamp, "2026-03-01T12:00:00.000Z");
        assert_eq!(record.sections, doc.sections);

        let json = record.to_value().unwrap();
        assert_eq!(json["chrome"]["c1"], "#7c3aed");
        assert_eq!(json["sections"][0]["type"], "background-image");
    }

    #[test]
    fn test_save_timestamp_is_utc_millis() {
        let record = save(&presets::blank());
        assert!(record.timestamp.ends_with('Z'), "got {}", record.timestamp);
        assert_eq!(record.timestamp.len(), "2026-03-01T12:00:00.000Z".len());
    }

    #[test]
    fn test_pretty_json_uses_two_spaces() {
        let text = save_at(&presets::blank(), "t").to_json_pretty().unwrap();
        assert!(text.starts_with("{\n  \"header\": {"));
    }

    #[test]
    fn test_load_requires_header_and_sections() {
        let cur = current();
        for record in [
            json!({ "sections": [] }),
            json!({ "header": {} }),
            json!({ "header": null, "sections": [] }),
            json!([1, 2, 3]),
        ] {
            let err = load(&record, &cur).unwrap_err();
            assert!(matches!(err, CardError::InvalidFormat(_)), "record {}", record);
        }
    }

    #[test]
    fn test_load_falls_back_to_current_theme() {
        let cur = current();
        let doc = load(&json!({ "header": { "name": "Old" }, "sections": [] }), &cur).unwrap();
        assert_eq!(doc.header.name, "Old");
        assert_eq!(doc.chrome.accent, "#123456");
        assert_eq!(doc.floating.url, "current.png");
        assert!(doc.sections.is_empty());
        assert_eq!(doc.version, "3.0");
        assert_eq!(doc.timestamp, None);
    }

    #[test]
    fn test_load_partial_objects_take_defaults() {
        let record = json!({
            "header": { "name": "N" },
            "chrome": { "c1": "#000000" },
            "sections": [{ "label": "only a label" }],
            "version": "2.1",
            "timestamp": "2025-01-01T00:00:00.000Z"
        });
        let doc = load(&record, &current()).unwrap();
        assert_eq!(doc.chrome.accent, "#000000");
        assert_eq!(doc.chrome.accent_alt, "#FF6600");
        assert_eq!(doc.header.label, "Example Card");
        assert_eq!(doc.sections[0].kind, SectionKind::Normal);
        assert!(!doc.sections[0].id.is_empty());
        assert_eq!(doc.version, "2.1");
        assert_eq!(doc.timestamp.as_deref(), Some("2025-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_load_rejects_mistyped_fields() {
        let record = json!({ "header": { "name": 5 }, "sections": [] });
        match load(&record, &current()) {
            Err(CardError::InvalidFormat(msg)) => assert!(msg.starts_with("header:")),
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
        let record = json!({ "header": {}, "sections": [{ "type": "carousel" }] });
        assert!(matches!(load(&record, &current()), Err(CardError::InvalidFormat(_))));
    }

    #[test]
    fn test_round_trip() {
        let doc = presets::demo();
        let record = save(&doc).to_value().unwrap();
        let back = load(&record, &presets::blank()).unwrap();
        assert_eq!(back.header, doc.header);
        assert_eq!(back.sections, doc.sections);
        assert_eq!(back.chrome, doc.chrome);
        assert_eq!(back.floating, doc.floating);
    }

    #[test]
    fn test_round_trip_with_absent_optionals() {
        let mut doc = presets::blank();
        doc.chrome.stroke_width = 2.0;
        let mut bars = Section::new(SectionKind::StatsBars);
        bars.stat_bars = Some(vec![StatBar {
            name: "Luck".to_string(),
            value: 7.0,
            max_value: None,
            color: None,
        }]);
        bars.label_style.no_stroke = false;
        bars.label_style.stroke_thickness = None;
        doc.sections = vec![bars, Section::new(SectionKind::Normal).with_content("plain")];

        let record = save(&doc).to_value().unwrap();
        let back = load(&record, &presets::blank()).unwrap();
        assert_eq!(back.header, doc.header);
        assert_eq!(back.sections, doc.sections);
        assert_eq!(crate::render(&back), crate::render(&doc));
    }

    #[test]
    fn test_load_bar_without_value_and_image_without_url() {
        let record = json!({
            "header": {},
            "sections": [
                { "type": "stats-bars", "statBars": [{ "name": "S" }] },
                { "type": "image", "images": [{ "alt": "no url" }] }
            ]
        });
        let doc = load(&record, &current()).unwrap();
        let bar = &doc.sections[0].stat_bars.as_deref().unwrap()[0];
        assert_eq!(bar.name, "S");
        assert_eq!(bar.value, 0.0);
        assert_eq!(doc.sections[1].gallery()[0].url, "");
    }

    #[test]
    fn test_suggested_file_name() {
        let mut doc = presets::blank();
        doc.header.name = "Seraphina Quillheart!".to_string();
        assert_eq!(suggested_file_name(&doc), "Seraphina_Quillheart_-card.json");
        doc.header.name = "Zoë".to_string();
        assert_eq!(suggested_file_name(&doc), "Zo_-card.json");
    }
}
