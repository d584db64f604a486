//! Built-in landing page variants
//!
//! The variants share one engine and differ only in phrases, timing, and how
//! much content they reveal.

use crate::config::{
    ContentBlock, DownloadLink, EngineConfig, Highlight, LandingConfig, PageContent, Section,
};
use crate::error::{ConfigError, Result};

const APK_LINK: &str = "https://github.com/jayco12/birdeye/releases/download/v1.0/app-release.apk";
const IOS_LINK: &str = "https://testflight.apple.com/join/1UVvq4Xv";

/// Names accepted by [`get_preset`]
pub fn preset_names() -> &'static [&'static str] {
    &["birdeye", "birdeye-compact", "minimal"]
}

pub fn get_preset(name: &str) -> Option<LandingConfig> {
    match name {
        "birdeye" => Some(birdeye()),
        "birdeye-compact" => Some(birdeye_compact()),
        "minimal" => Some(minimal()),
        _ => None,
    }
}

/// Like [`get_preset`], but unknown names are an error
pub fn preset(name: &str) -> Result<LandingConfig> {
    get_preset(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()).into())
}

fn birdeye_blocks() -> Vec<ContentBlock> {
    vec![
        ContentBlock {
            icon: "📚".to_string(),
            text: "Study with Depth: original Greek & Hebrew texts with Strong's numbers and lexicon meanings.".to_string(),
        },
        ContentBlock {
            icon: "🔍".to_string(),
            text: "Search & Discover: find verses by keyword, topic, or theme.".to_string(),
        },
        ContentBlock {
            icon: "🌐".to_string(),
            text: "Offline & Anywhere: download your favorite verses and study offline.".to_string(),
        },
    ]
}

fn birdeye_downloads() -> Vec<DownloadLink> {
    vec![
        DownloadLink {
            label: "📱 Download for Android".to_string(),
            url: APK_LINK.to_string(),
            enabled: true,
            note: None,
        },
        DownloadLink {
            label: "🍏 Download for iOS".to_string(),
            url: IOS_LINK.to_string(),
            enabled: false,
            note: Some("iOS version coming soon".to_string()),
        },
    ]
}

fn birdeye_page() -> PageContent {
    PageContent {
        title: "Birdeye Bible App".to_string(),
        tagline: "Dive deep into Scripture like never before. Explore original Greek & Hebrew \
                  texts, Strong's numbers, lexicons, and rich theological insights, all in one app."
            .to_string(),
        highlight: Some(Highlight {
            text: "In the beginning God created the heaven and the earth. (Genesis 1:1)".to_string(),
            note: Some("Tap any highlighted word to explore Strong's definitions and lexicons.".to_string()),
        }),
        blocks: birdeye_blocks(),
        sections: vec![
            Section {
                id: "strongs".to_string(),
                title: "What are Strong's numbers?".to_string(),
                body: "Every original-language word is tagged with its Strong's number, linking \
                       it to a lexicon entry with its root meaning and usage."
                    .to_string(),
            },
            Section {
                id: "offline".to_string(),
                title: "Does it work offline?".to_string(),
                body: "Yes. Saved verses and chapters stay on your device.".to_string(),
            },
            Section {
                id: "ios".to_string(),
                title: "When is the iOS version coming?".to_string(),
                body: "The iOS build is in TestFlight and will open to everyone soon.".to_string(),
            },
        ],
        downloads: birdeye_downloads(),
        footer: Some("📜 Made with faith and code".to_string()),
    }
}

fn birdeye() -> LandingConfig {
    let page = birdeye_page();
    LandingConfig {
        engine: EngineConfig::new([
            "Study with Depth",
            "Search & Discover",
            "Offline & Anywhere",
        ]),
        page,
    }
}

fn birdeye_compact() -> LandingConfig {
    let mut page = birdeye_page();
    page.blocks.truncate(2);
    page.sections.clear();
    page.highlight = None;

    let mut engine = EngineConfig::new(["Read", "Search", "Study"]);
    engine.typing_delay_ms = 90;
    engine.deleting_delay_ms = 60;
    engine.pause_after_typed_ms = 900;
    engine.reveal_step_delay_ms = 400;

    LandingConfig { engine, page }
}

fn minimal() -> LandingConfig {
    LandingConfig {
        engine: EngineConfig::new(["Birdeye"]),
        page: PageContent {
            title: "Birdeye".to_string(),
            downloads: birdeye_downloads(),
            ..PageContent::default()
        },
    }
}
