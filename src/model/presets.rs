//! Built-in documents: the editor's initial card, the blank template and
//! the showcase demo.

use super::{
    Align, Chrome, Corner, Document, FeatureItem, Floating, Header, Section, SectionKind,
    StatBar, TextStyle, RECORD_VERSION,
};

const CINZEL: &str = "'Cinzel',serif";
const INTER: &str = "'Inter',sans-serif";

impl Default for Document {
    /// The card the editor opens with.
    fn default() -> Self {
        let mut group = Section::new(SectionKind::Group)
            .with_emoji("🎭")
            .with_label("CHARACTER SHOWCASE");
        group.group_border_color = Some("#FF9A00".to_string());
        group.group_bg_color = Some("#2A2A2A".to_string());
        group.group_header_bg = Some("#1A1A1A".to_string());

        let mut portrait = Section::new(SectionKind::BackgroundImage)
            .with_label("Character Portrait")
            .with_content("An atmospheric character showcase with overlay text.");
        portrait.background_url = Some("https://picsum.photos/800/500?random=1001".to_string());
        portrait.overlay_color = Some("#1f1f1f".to_string());
        portrait.overlay_opacity = Some(60.0);
        portrait.min_height = Some(500.0);
        portrait.label_style = TextStyle::with_font("#ffffff", CINZEL, 24.0);
        portrait.content_style = TextStyle::with_font("#ffffff", INTER, 16.0);
        portrait.stripe_color = "#274b8e".to_string();

        let mut close = Section::new(SectionKind::CloseGroup);
        close.stripe_color = "#8e2733".to_string();

        let mut scores = Section::new(SectionKind::StatsBars)
            .with_emoji("📊")
            .with_label("Ability Scores")
            .with_content("Strength,Intelligence,Charisma,Wisdom");
        scores.stat_bars = Some(vec![
            colored_bar("Strength", 85.0, "#e74c3c"),
            colored_bar("Intelligence", 92.0, "#3498db"),
            colored_bar("Charisma", 78.0, "#9b59b6"),
            colored_bar("Wisdom", 65.0, "#2ecc71"),
        ]);
        scores.label_style = TextStyle::with_font("#FF9A00", INTER, 20.0);

        Document {
            header: Header {
                emoji: "🎭".to_string(),
                ..Header::default()
            },
            chrome: Chrome::default(),
            floating: Floating::default(),
            sections: vec![group, portrait, close, scores],
            version: RECORD_VERSION.to_string(),
            timestamp: None,
        }
    }
}

/// The blank template: default theme, one welcome section.
pub fn blank() -> Document {
    let welcome = Section::new(SectionKind::Normal)
        .with_label("Welcome")
        .with_content("This is a blank character card template. Add sections below!");

    Document {
        header: Header::default(),
        chrome: Chrome::default(),
        floating: Floating::default(),
        sections: vec![welcome],
        version: RECORD_VERSION.to_string(),
        timestamp: None,
    }
}

/// The showcase card exercising most section variants.
pub fn demo() -> Document {
    let stripes = ["#6b32a1", "#274b8e", "#8e2733", "#2d7d32", "#d32f2f"];
    let body_text = |color: &str, size: f64| TextStyle {
        stroke_thickness: None,
        ..TextStyle::with_font(color, INTER, size)
    };

    let chrome = Chrome {
        accent: "#7c3aed".to_string(),
        accent_alt: "#1e1b4b".to_string(),
        bar_color: "#a855f7".to_string(),
        border_color: "#7c3aed".to_string(),
        background_color: "#0f0a1a".to_string(),
        text_color: "#FFFFFF".to_string(),
        group_color: "#7c3aed".to_string(),
        group_background_color: "#1e1b4b".to_string(),
        group_divider_color: "#a855f7".to_string(),
        font_family: CINZEL.to_string(),
        font_size: 32.0,
        shadow_color: "#7c3aed".to_string(),
        ..Chrome::default()
    };

    let header = Header {
        emoji: "📚".to_string(),
        name: "Seraphina Quillheart".to_string(),
        name_style: TextStyle {
            stroke_thickness: Some(1.0),
            ..TextStyle::with_font("#FFFFFF", CINZEL, 36.0)
        },
        label: "Keeper of Living Tomes".to_string(),
        label_style: TextStyle {
            stroke_thickness: Some(1.0),
            ..TextStyle::with_font("#c4b5fd", INTER, 18.0)
        },
        align: Align::Center,
    };

    let floating = Floating {
        enabled: true,
        url: "https://picsum.photos/300/400?random=777".to_string(),
        height: 35.0,
        pos: Corner::BottomRight,
    };

    let mut library = Section::new(SectionKind::BackgroundImage)
        .with_label("The Infinite Library")
        .with_content(
            "Guardian of books that contain entire worlds within their pages.\n\n\
             \"Every story ever written lives and breathes in my care. Would you like to step inside one?\"",
        )
        .with_align(Align::Center);
    library.background_url = Some("https://picsum.photos/800/500?random=3001".to_string());
    library.overlay_color = Some("#1e1b4b".to_string());
    library.overlay_opacity = Some(75.0);
    library.min_height = Some(400.0);
    library.label_style = TextStyle::with_font("#c4b5fd", CINZEL, 28.0);
    library.content_style = body_text("#ffffff", 16.0);
    library.stripe_color = stripes[0].to_string();

    let mut profile = Section::new(SectionKind::ProfileCard)
        .with_emoji("📖")
        .with_label("Seraphina Quillheart")
        .with_content(
            "Age: Timeless (appears 28)\nSpecialty: Interdimensional Library Science\n\
             Rare Ability: Can enter book worlds\n\nOnce a mortal scholar, she made a pact with \
             ancient spirits to become the eternal guardian of stories that refuse to stay on the page.",
        );
    profile.profile_image = Some("https://picsum.photos/200/200?random=3002".to_string());
    profile.profile_badges = Some(
        ["Master Librarian", "World Walker", "Story Keeper", "Reality Bender"]
            .iter()
            .map(|b| b.to_string())
            .collect(),
    );
    profile.label_style = TextStyle::with_font("#c4b5fd", CINZEL, 24.0);
    profile.content_style = body_text("#e5e7eb", 14.0);
    profile.stripe_color = stripes[1].to_string();

    let mut abilities = Section::new(SectionKind::StatsBars)
        .with_emoji("⚡")
        .with_label("Mystical Abilities");
    abilities.stat_bars = Some(vec![
        colored_bar("Book Realm Navigation", 95.0, "#7c3aed"),
        colored_bar("Story Manipulation", 88.0, "#a855f7"),
        colored_bar("Reality Anchoring", 82.0, "#c084fc"),
        colored_bar("Forbidden Knowledge", 76.0, "#ddd6fe"),
        colored_bar("Character Empathy", 92.0, "#8b5cf6"),
    ]);
    abilities.label_style = TextStyle::with_font("#c4b5fd", CINZEL, 20.0);
    abilities.content_style = body_text("#ffffff", 14.0);
    abilities.stripe_color = stripes[2].to_string();

    let mut services = Section::new(SectionKind::FeatureGrid)
        .with_emoji("✨")
        .with_label("Mystical Services");
    services.features = Some(vec![
        FeatureItem::new("🌍", "World Walking", "Guides visitors safely through book realms and alternate realities"),
        FeatureItem::new("📝", "Story Weaving", "Can alter plot threads and character fates within living narratives"),
        FeatureItem::new("🔮", "Future Reading", "Glimpses possible endings by consulting prophetic manuscripts"),
        FeatureItem::new("⏰", "Time Anchoring", "Prevents paradoxes when stories bleed into reality"),
    ]);
    services.grid_columns = Some(2);
    services.label_style = TextStyle::with_font("#c4b5fd", CINZEL, 20.0);
    services.content_style = body_text("#e5e7eb", 13.0);
    services.stripe_color = stripes[3].to_string();

    let mut catalog = Section::new(SectionKind::Callout)
        .with_emoji("📜")
        .with_label("Ancient Catalog System")
        .with_content(
            "AKASHIC_LIBRARY_OS v∞.∞.∞ - Etheric Interface\n\
             ========================================\n\
             > query_living_stories\nRetrieving active narratives...\n\
             > access_restricted_section\nWarning: Reality fluctuation detected\n\
             > authorize_world_entry [USER_ID]\nPortal stabilized. Safe passage granted.\n\
             ========================================\nMay your story find its true ending.",
        );
    catalog.callout_color = Some("#7c3aed".to_string());
    catalog.callout_bg_color = Some("#7c3aed22".to_string());
    catalog.label_style = TextStyle::with_font("#c4b5fd", CINZEL, 18.0);
    catalog.content_style = TextStyle {
        stroke_thickness: None,
        ..TextStyle::with_font("#a855f7", "'Courier New',monospace", 12.0)
    };
    catalog.stripe_color = stripes[4].to_string();

    let mut encounters = Section::new(SectionKind::Group)
        .with_emoji("📚")
        .with_label("Story Encounters");
    encounters.label_style = TextStyle::with_font("#ffffff", CINZEL, 22.0);
    encounters.group_border_color = Some("#7c3aed".to_string());
    encounters.group_bg_color = Some("#1e1b4b".to_string());
    encounters.group_header_bg = Some("#312e81".to_string());
    encounters.stripe_color = stripes[0].to_string();

    let mut glowing_book = Section::new(SectionKind::BubbleLeft).with_content(
        "*Looks up from a book that's glowing with inner light, pages fluttering without wind* \
         \"Oh my! You've wandered quite far from the main reading area. This particular tome \
         contains a rather... active romance novel. The characters have been asking about you specifically.\"",
    );
    glowing_book.bubble_color = Some("#7c3aed".to_string());
    glowing_book.content_style = body_text("#ffffff", 14.0);
    glowing_book.stripe_color = stripes[1].to_string();

    let mut portal = Section::new(SectionKind::BubbleLeft).with_content(
        "*Standing before a massive portal formed by floating book pages* \"I sense you've been \
         having the same recurring dreams... That's because your story is calling to you from \
         beyond the veil. Would you like me to help you find which book you truly belong in?\"",
    );
    portal.bubble_color = Some("#a855f7".to_string());
    portal.content_style = body_text("#ffffff", 14.0);
    portal.stripe_color = stripes[2].to_string();

    let mut close = Section::new(SectionKind::CloseGroup);
    close.stripe_color = stripes[3].to_string();

    Document {
        header,
        chrome,
        floating,
        sections: vec![
            library,
            profile,
            abilities,
            services,
            catalog,
            encounters,
            glowing_book,
            portal,
            close,
        ],
        version: RECORD_VERSION.to_string(),
        timestamp: None,
    }
}

fn colored_bar(name: &str, value: f64, color: &str) -> StatBar {
    StatBar {
        color: Some(color.to_string()),
        ..StatBar::new(name, value, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_shape() {
        let doc = Document::default();
        let kinds: Vec<SectionKind> = doc.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Group,
                SectionKind::BackgroundImage,
                SectionKind::CloseGroup,
                SectionKind::StatsBars
            ]
        );
        assert_eq!(doc.header.emoji, "🎭");
    }

    #[test]
    fn test_blank_has_single_welcome() {
        let doc = blank();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].label.as_deref(), Some("Welcome"));
        assert!(doc.header.emoji.is_empty());
    }

    #[test]
    fn test_demo_ids_are_unique() {
        let doc = demo();
        let mut ids: Vec<&str> = doc.sections.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), doc.sections.len());
        assert!(doc.floating.enabled);
    }
}
