//! Configuration management for Marquee
//!
//! A landing page is an `[engine]` table (phrases and timing) plus a `[page]`
//! table (the content the reveal sequence and accordion operate on).
//!
//! ```toml
//! [engine]
//! phrases = ["Study with depth", "Search and discover"]
//! typing_delay_ms = 120
//!
//! [page]
//! title = "Birdeye Bible App"
//!
//! [[page.blocks]]
//! icon = "📚"
//! text = "Original Greek and Hebrew texts"
//!
//! [[page.sections]]
//! id = "features"
//! title = "Features"
//! body = "..."
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::engine::phrase::{
    PhraseList, PhraseTiming, DEFAULT_DELETING_DELAY_MS, DEFAULT_PAUSE_AFTER_TYPED_MS,
    DEFAULT_TYPING_DELAY_MS,
};
use crate::engine::reveal::DEFAULT_REVEAL_STEP_DELAY_MS;
use crate::error::{ConfigError, MarqueeError, Result};

/// Engine options. Everything but `phrases` has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub phrases: Vec<String>,

    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    #[serde(default = "default_deleting_delay_ms")]
    pub deleting_delay_ms: u64,

    #[serde(default = "default_pause_after_typed_ms")]
    pub pause_after_typed_ms: u64,

    #[serde(default = "default_reveal_step_delay_ms")]
    pub reveal_step_delay_ms: u64,

    /// Unset means "as many as the page has"; `Some(0)` turns reveal off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_count: Option<usize>,

    /// Unset means "the page's sections"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_ids: Option<Vec<String>>,
}

fn default_typing_delay_ms() -> u64 {
    DEFAULT_TYPING_DELAY_MS
}

fn default_deleting_delay_ms() -> u64 {
    DEFAULT_DELETING_DELAY_MS
}

fn default_pause_after_typed_ms() -> u64 {
    DEFAULT_PAUSE_AFTER_TYPED_MS
}

fn default_reveal_step_delay_ms() -> u64 {
    DEFAULT_REVEAL_STEP_DELAY_MS
}

impl EngineConfig {
    /// Default timing, no blocks, no sections
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
            deleting_delay_ms: DEFAULT_DELETING_DELAY_MS,
            pause_after_typed_ms: DEFAULT_PAUSE_AFTER_TYPED_MS,
            reveal_step_delay_ms: DEFAULT_REVEAL_STEP_DELAY_MS,
            block_count: None,
            section_ids: None,
        }
    }

    pub fn with_block_count(mut self, block_count: usize) -> Self {
        self.block_count = Some(block_count);
        self
    }

    pub fn with_sections<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Blocks to reveal, zero when unset
    pub fn block_count(&self) -> usize {
        self.block_count.unwrap_or(0)
    }

    /// Sections to register, none when unset
    pub fn section_ids(&self) -> &[String] {
        self.section_ids.as_deref().unwrap_or(&[])
    }

    pub fn timing(&self) -> PhraseTiming {
        PhraseTiming {
            typing_delay_ms: self.typing_delay_ms,
            deleting_delay_ms: self.deleting_delay_ms,
            pause_after_typed_ms: self.pause_after_typed_ms,
        }
    }

    pub fn phrase_list(&self) -> Result<PhraseList> {
        PhraseList::new(self.phrases.iter().cloned())
    }

    /// Check everything the orchestrator would reject, without starting anything
    pub fn validate(&self) -> Result<()> {
        self.phrase_list()?;
        self.timing().validate()?;

        if self.reveal_step_delay_ms == 0 {
            return Err(MarqueeError::InvalidConfig(
                "reveal_step_delay_ms must be greater than zero".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for id in self.section_ids() {
            if !seen.insert(id.as_str()) {
                return Err(MarqueeError::DuplicateSection(id.clone()));
            }
        }

        Ok(())
    }
}

/// Static content of a landing page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub tagline: String,

    #[serde(default)]
    pub highlight: Option<Highlight>,

    /// Revealed one by one, in order
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,

    /// Collapsible sections driven by the accordion
    #[serde(default)]
    pub sections: Vec<Section>,

    #[serde(default)]
    pub downloads: Vec<DownloadLink>,

    #[serde(default)]
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub label: String,
    pub url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Shown instead of the link when disabled, e.g. "coming soon"
    #[serde(default)]
    pub note: Option<String>,
}

fn default_enabled() -> bool {
    true
}

/// Engine options plus page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingConfig {
    pub engine: EngineConfig,
    #[serde(default)]
    pub page: PageContent,
}

impl LandingConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "loaded landing config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: LandingConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            MarqueeError::InvalidConfig(format!("Failed to serialize config: {}", e))
        })
    }

    /// Engine options with blocks and sections filled in from the page
    ///
    /// Any `block_count` or `section_ids` set in the engine table wins over
    /// the page, including zero and an empty list.
    pub fn engine_config(&self) -> EngineConfig {
        let mut engine = self.engine.clone();
        engine.block_count.get_or_insert(self.page.blocks.len());
        engine
            .section_ids
            .get_or_insert_with(|| self.page.sections.iter().map(|s| s.id.clone()).collect());
        engine
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("MARQUEE_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("marquee").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_engine_defaults_from_minimal_toml() {
        let config = LandingConfig::from_toml("[engine]\nphrases = [\"Hi\"]\n").unwrap();

        assert_eq!(config.engine.phrases, vec!["Hi"]);
        assert_eq!(config.engine.typing_delay_ms, 150);
        assert_eq!(config.engine.deleting_delay_ms, 120);
        assert_eq!(config.engine.pause_after_typed_ms, 1200);
        assert_eq!(config.engine.reveal_step_delay_ms, 700);
        assert_eq!(config.engine.block_count, None);
        assert_eq!(config.engine.section_ids, None);
        assert_eq!(config.page, PageContent::default());
    }

    #[test]
    fn test_missing_phrases_is_parse_error() {
        let result = LandingConfig::from_toml("[engine]\ntyping_delay_ms = 100\n");
        assert!(matches!(
            result,
            Err(MarqueeError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_engine_config_derives_from_page() {
        let toml = r#"
            [engine]
            phrases = ["Read", "Search"]

            [page]
            title = "Test"

            [[page.blocks]]
            text = "one"

            [[page.blocks]]
            text = "two"

            [[page.sections]]
            id = "faq"
            title = "FAQ"
        "#;
        let config = LandingConfig::from_toml(toml).unwrap();
        let engine = config.engine_config();

        assert_eq!(engine.block_count(), 2);
        assert_eq!(engine.section_ids(), ["faq"]);
    }

    #[test]
    fn test_explicit_engine_values_win() {
        let toml = r#"
            [engine]
            phrases = ["Read"]
            block_count = 5
            section_ids = ["custom"]

            [[page.blocks]]
            text = "one"
        "#;
        let engine = LandingConfig::from_toml(toml).unwrap().engine_config();

        assert_eq!(engine.block_count(), 5);
        assert_eq!(engine.section_ids(), ["custom"]);
    }

    #[test]
    fn test_explicit_zero_blocks_and_no_sections_are_kept() {
        let toml = r#"
            [engine]
            phrases = ["Read"]
            block_count = 0
            section_ids = []

            [[page.blocks]]
            text = "one"

            [[page.blocks]]
            text = "two"

            [[page.sections]]
            id = "faq"
            title = "FAQ"
        "#;
        let engine = LandingConfig::from_toml(toml).unwrap().engine_config();

        assert_eq!(engine.block_count, Some(0));
        assert_eq!(engine.section_ids, Some(Vec::new()));

        let orchestrator = crate::Orchestrator::start(engine).unwrap();
        assert_eq!(orchestrator.snapshot().reveal.block_count, 0);
        assert!(orchestrator.snapshot().accordion.sections.is_empty());
    }

    #[test]
    fn test_download_enabled_by_default() {
        let toml = r#"
            [engine]
            phrases = ["Read"]

            [[page.downloads]]
            label = "Android"
            url = "https://example.com/app.apk"
        "#;
        let config = LandingConfig::from_toml(toml).unwrap();
        assert!(config.page.downloads[0].enabled);
        assert!(config.page.downloads[0].note.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_engine_configs() {
        assert!(matches!(
            EngineConfig::new(Vec::<String>::new()).validate(),
            Err(MarqueeError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::new(["ok", ""]).validate(),
            Err(MarqueeError::InvalidConfig(_))
        ));

        let mut zero_pause = EngineConfig::new(["ok"]);
        zero_pause.pause_after_typed_ms = 0;
        assert!(matches!(zero_pause.validate(), Err(MarqueeError::InvalidConfig(_))));

        let mut zero_step = EngineConfig::new(["ok"]);
        zero_step.reveal_step_delay_ms = 0;
        assert!(matches!(zero_step.validate(), Err(MarqueeError::InvalidConfig(_))));

        let duplicate = EngineConfig::new(["ok"]).with_sections(["a", "a"]);
        assert!(matches!(duplicate.validate(), Err(MarqueeError::DuplicateSection(_))));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = EngineConfig::new(["Hi"]).with_block_count(3).with_sections(["features"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nphrases = [\"Hello\", \"World\"]\ntyping_delay_ms = 80").unwrap();

        let config = LandingConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.engine.phrases.len(), 2);
        assert_eq!(config.engine.typing_delay_ms, 80);
    }

    #[test]
    fn test_load_from_missing_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = LandingConfig::load_from_path(&dir.path().join("absent.toml"));
        assert!(matches!(
            result,
            Err(MarqueeError::Config(ConfigError::ReadError(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_from_env() {
        std::env::set_var("MARQUEE_CONFIG", "/tmp/marquee-test.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("MARQUEE_CONFIG");

        assert_eq!(path, PathBuf::from("/tmp/marquee-test.toml"));
    }

    #[test]
    #[serial]
    fn test_load_uses_env_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nphrases = [\"Env\"]").unwrap();

        std::env::set_var("MARQUEE_CONFIG", file.path());
        let config = LandingConfig::load();
        std::env::remove_var("MARQUEE_CONFIG");

        assert_eq!(config.unwrap().engine.phrases, vec!["Env"]);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LandingConfig {
            engine: EngineConfig::new(["Hi"]).with_block_count(1),
            page: PageContent {
                title: "T".to_string(),
                footer: Some("F".to_string()),
                ..PageContent::default()
            },
        };
        let toml = config.to_toml().unwrap();
        assert_eq!(LandingConfig::from_toml(&toml).unwrap(), config);
    }
}
