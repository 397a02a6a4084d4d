//! Landing page view state.
//!
//! All mutable UI state lives in one [`ViewState`] value and changes only
//! through its named handlers. The scroll helpers are pure functions of the
//! page geometry.

use dringo_storage::StorageBackend;
use tracing::warn;

/// Key holding the user's theme choice.
pub const THEME_KEY: &str = "dringo-theme";

/// Scroll offset (px) past which the back-to-top button is shown.
pub const BACK_TO_TOP_THRESHOLD: f64 = 400.0;

/// Offset (px) added to the scroll position when picking the active section,
/// so a section counts as current slightly before its top reaches the viewport.
pub const ACTIVE_SECTION_OFFSET: f64 = 120.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored theme name. Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// A page section with its vertical extent in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub theme: Theme,
    pub nav_expanded: bool,
    /// Expanded flag per FAQ accordion item, in page order.
    pub accordion: Vec<bool>,
}

impl ViewState {
    /// Build the initial state, restoring the saved theme if there is one.
    pub async fn restore(storage: &dyn StorageBackend, accordion_items: usize) -> Self {
        let theme = match storage.get(THEME_KEY).await {
            Ok(Some(raw)) => std::str::from_utf8(&raw)
                .ok()
                .and_then(Theme::parse)
                .unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "could not read saved theme");
                Theme::default()
            }
        };

        Self {
            theme,
            nav_expanded: false,
            accordion: vec![false; accordion_items],
        }
    }

    /// Flip the theme and remember the choice.
    pub async fn toggle_theme(&mut self, storage: &dyn StorageBackend) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = storage.put(THEME_KEY, self.theme.as_str().as_bytes()).await {
            warn!(error = %e, "could not save theme");
        }
        self.theme
    }

    /// Value for the theme button's `aria-pressed`.
    pub fn theme_pressed(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn toggle_nav(&mut self) -> bool {
        self.nav_expanded = !self.nav_expanded;
        self.nav_expanded
    }

    /// Flip one accordion item. Returns the new expanded flag, or `None` if
    /// there is no item at `index`.
    pub fn toggle_accordion(&mut self, index: usize) -> Option<bool> {
        let item = self.accordion.get_mut(index)?;
        *item = !*item;
        Some(*item)
    }
}

/// How far the page has been scrolled, as a percentage in `[0, 100]`.
pub fn scroll_progress_percent(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD
}

/// The id of the section under the reading line, if any.
pub fn active_section(sections: &[Section], scroll_y: f64) -> Option<&str> {
    let line = scroll_y + ACTIVE_SECTION_OFFSET;
    sections
        .iter()
        .find(|s| line >= s.top && line < s.top + s.height)
        .map(|s| s.id.as_str())
}
