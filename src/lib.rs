//! # Cardforge
//!
//! A deterministic renderer for themed character cards.
//!
//! A card is a header, a document-wide theme, an optional floating image and
//! an ordered list of typed sections. Cardforge turns that document into one
//! self-contained HTML fragment with every style inlined, so the result can
//! be pasted anywhere that accepts raw HTML.
//!
//! Some sections are not content but frame markers: `group` and `container`
//! open a visual frame that wraps the sections after them, up to the
//! matching close marker. The renderer walks the sections in order and
//! threads the open frames through explicitly; whatever is still open at
//! the end of the document is closed there, innermost first.
//!
//! ## Architecture
//!
//! ```text
//! Input (record JSON / API)
//!       ↓
//!   [serialize] — Record ⇄ Document, lenient load, markup import
//!       ↓
//!   [model]     — Header, theme, floating image, sections
//!       ↓
//!   [style]     — Text style resolution, section colour cascade
//!       ↓
//!   [render]    — Frame state machine, per-variant templates, page shell
//! ```

pub mod error;
pub mod model;
pub mod render;
pub mod serialize;
pub mod style;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::CardError;
pub use render::{render, render_standalone};
pub use serialize::{import_markup, load, save};

use model::Document;

/// Render a saved card record, given as JSON, to an HTML fragment.
///
/// A record without a theme or floating image renders with the defaults.
pub fn render_json(json: &str) -> Result<String, CardError> {
    let record: serde_json::Value = serde_json::from_str(json)?;
    let document = load(&record, &Document::default())?;
    Ok(render(&document))
}
