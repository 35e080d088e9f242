//! Section editing operations.
//!
//! These are the calls the editing surface makes on every field edit.
//! Each one touches exactly one section (or the order of two) and leaves
//! the rest of the document alone.

use serde_json::Value;

use super::{
    ContainerStyle, DividerStyle, Document, GalleryImage, Section, SectionKind,
};
use crate::error::CardError;

/// Stripe colours handed out to new sections, by current section count.
const STRIPE_CYCLE: [&str; 3] = ["#6b32a1", "#274b8e", "#8e2733"];

/// Generate a fresh section id.
pub fn new_section_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Direction for [`Document::move_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Document {
    /// Append a `normal` section pre-filled with theme-derived defaults for
    /// every variant, and return its id.
    pub fn add_section(&mut self) -> String {
        let accent = &self.chrome.accent;
        let mut section = Section::new(SectionKind::Normal).with_content("New content...");
        section.stripe_color = STRIPE_CYCLE[self.sections.len() % STRIPE_CYCLE.len()].to_string();
        section.divider_color = Some(accent.clone());
        section.divider_style = Some(DividerStyle::Gradient);
        section.quote_color = Some(accent.clone());
        section.callout_color = Some(accent.clone());
        section.callout_bg_color = Some(format!("{}22", accent));
        section.trait_bg_color = Some(accent.clone());
        section.stats_bg_color = Some("rgba(0,0,0,0.3)".to_string());
        section.stats_undefined_text = Some(String::new());
        section.group_border_color = Some(self.chrome.group_color.clone());
        section.group_bg_color = Some(self.chrome.group_background_color.clone());
        section.group_header_bg = Some(self.chrome.group_background_color.clone());
        section.container_style = Some(ContainerStyle::Quote);
        section.container_color = Some(accent.clone());
        section.container_bg_color = Some(format!("{}22", accent));
        section.overlay_color = Some("#1f1f1f".to_string());
        section.overlay_opacity = Some(60.0);
        section.min_height = Some(300.0);
        section.stat_bars = Some(vec![]);
        section.features = Some(vec![]);
        section.grid_columns = Some(2);
        section.profile_badges = Some(vec![]);
        section.profile_image = Some(String::new());

        let id = section.id.clone();
        self.sections.push(section);
        id
    }

    /// Append a caller-built section.
    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Merge a JSON object patch into the section with the given id.
    ///
    /// The merge is shallow: each key of the patch replaces the section's
    /// value for that key. An `id` key is ignored. Returns `Ok(false)` when
    /// no section has the id. On error the section is left untouched.
    pub fn update_section(&mut self, id: &str, patch: &Value) -> Result<bool, CardError> {
        let patch = patch.as_object().ok_or_else(|| {
            CardError::InvalidFormat("section patch must be a JSON object".to_string())
        })?;
        let Some(section) = self.sections.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };

        let mut merged = serde_json::to_value(&*section)
            .map_err(|e| CardError::InvalidFormat(e.to_string()))?;
        if let Value::Object(fields) = &mut merged {
            for (key, value) in patch {
                if key == "id" {
                    continue;
                }
                if value.is_null() {
                    fields.remove(key);
                } else {
                    fields.insert(key.clone(), value.clone());
                }
            }
        }

        let updated: Section = serde_json::from_value(merged)
            .map_err(|e| CardError::InvalidFormat(format!("section patch rejected: {}", e)))?;
        *section = updated;
        Ok(true)
    }

    /// Remove the section with the given id.
    pub fn remove_section(&mut self, id: &str) -> Option<Section> {
        let idx = self.sections.iter().position(|s| s.id == id)?;
        Some(self.sections.remove(idx))
    }

    /// Swap a section with its neighbour. Moving past either end does nothing.
    pub fn move_section(&mut self, id: &str, direction: Direction) -> bool {
        let Some(idx) = self.sections.iter().position(|s| s.id == id) else {
            return false;
        };
        let target = match direction {
            Direction::Up => idx.checked_sub(1),
            Direction::Down => Some(idx + 1).filter(|&t| t < self.sections.len()),
        };
        match target {
            Some(t) => {
                self.sections.swap(idx, t);
                true
            }
            None => false,
        }
    }

    /// Append an image to a section's gallery.
    pub fn add_image(&mut self, id: &str, image: GalleryImage) -> bool {
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.images.get_or_insert_with(Vec::new).push(image);
                true
            }
            None => false,
        }
    }
}
