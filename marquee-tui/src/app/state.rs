//! Application state
//!
//! All state transitions happen through the reducer (see `reducer.rs`).
//! Animated content is never computed here: it is copied from the latest
//! engine snapshot.

use libmarquee::{PageContent, Snapshot};

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Static page content
    pub page: PageContent,

    /// Latest engine snapshot, `None` until the engine publishes one
    pub snapshot: Option<Snapshot>,

    /// Index into `page.sections` under the cursor
    pub selected_section: usize,

    /// Status bar message
    pub status: Option<String>,

    /// Error overlay state
    pub error: Option<String>,

    /// UI configuration
    pub config: UiConfig,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// How often the engine clock is advanced, in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PageContent::default())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("MARQUEE_TUI_NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("MARQUEE_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(50);

        Self {
            colors_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    pub fn new(page: PageContent) -> Self {
        Self {
            should_quit: false,
            help_visible: false,
            page,
            snapshot: None,
            selected_section: 0,
            status: None,
            error: None,
            config: UiConfig::default(),
        }
    }

    /// Id of the section under the cursor
    pub fn selected_section_id(&self) -> Option<&str> {
        self.page
            .sections
            .get(self.selected_section)
            .map(|section| section.id.as_str())
    }

    /// Whether the engine reports `id` as open. Unknown ids and a missing
    /// snapshot both read as closed.
    pub fn is_section_open(&self, id: &str) -> bool {
        self.snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.accordion.is_open(id))
            .unwrap_or(false)
    }

    /// Number of content blocks currently visible
    pub fn revealed_blocks(&self) -> usize {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.reveal.revealed_count.min(self.page.blocks.len()))
            .unwrap_or(0)
    }

    /// Headline text as currently typed
    pub fn headline(&self) -> &str {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.typing.rendered_text.as_str())
            .unwrap_or("")
    }
}
