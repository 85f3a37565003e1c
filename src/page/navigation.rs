//! Navbar, smooth scrolling, marquee and keyboard helpers.

/// Scroll distance after which the navbar switches to its solid style.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 100.0;

/// Height of the fixed navbar, kept clear when scrolling to a section.
pub const NAVBAR_OFFSET: f64 = 80.0;

/// Class toggled on the navbar while scrolled.
pub const NAVBAR_SCROLLED_CLASS: &str = "scrolled";

/// Elements revealed when they scroll into view.
pub const REVEAL_SELECTOR: &str = ".project-card, .skill-category, .stat-item";

/// Class added to revealed elements.
pub const REVEAL_CLASS: &str = "animate-in";

/// Visible fraction that triggers a reveal.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Root margin for the reveal observer; triggers a little before the bottom edge.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Whether the navbar should use its scrolled style.
#[inline]
pub fn navbar_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLL_THRESHOLD
}

/// Window scroll position that brings a section to just below the navbar.
#[inline]
pub fn scroll_target(offset_top: f64) -> f64 {
    (offset_top - NAVBAR_OFFSET).max(0.0)
}

/// In-page anchor target (`#about` -> `about`), or `None` for other links.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Keys that activate a focused service item.
#[inline]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// `Tab` (without shift) pressed while nothing on the page has focus.
#[inline]
pub fn is_skip_to_content(key: &str, shift: bool, body_focused: bool) -> bool {
    key == "Tab" && !shift && body_focused
}

/// CSS `animation-play-state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Animation is moving.
    Running,
    /// Animation is frozen.
    Paused,
}

impl PlayState {
    /// CSS keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            PlayState::Running => "running",
            PlayState::Paused => "paused",
        }
    }
}

/// Pause state of the services marquee.
///
/// The marquee stops while a service item is under the pointer or has keyboard
/// focus, and runs again only once neither holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarqueeState {
    hovered: bool,
    focused: bool,
}

impl MarqueeState {
    /// Pointer entered a service item.
    pub fn pointer_enter(&mut self) -> PlayState {
        self.hovered = true;
        self.play_state()
    }

    /// Pointer left a service item.
    pub fn pointer_leave(&mut self) -> PlayState {
        self.hovered = false;
        self.play_state()
    }

    /// A service item gained focus.
    pub fn focus(&mut self) -> PlayState {
        self.focused = true;
        self.play_state()
    }

    /// A service item lost focus.
    pub fn blur(&mut self) -> PlayState {
        self.focused = false;
        self.play_state()
    }

    /// Current play state.
    pub fn play_state(&self) -> PlayState {
        if self.hovered || self.focused {
            PlayState::Paused
        } else {
            PlayState::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navbar_threshold() {
        assert!(!navbar_is_scrolled(0.0));
        assert!(!navbar_is_scrolled(100.0));
        assert!(navbar_is_scrolled(100.5));
    }

    #[test]
    fn test_scroll_target_clears_navbar() {
        assert_eq!(scroll_target(500.0), 420.0);
        assert_eq!(scroll_target(20.0), 0.0);
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#projects"), Some("projects"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/blog"), None);
    }

    #[test]
    fn test_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("a"));
        assert!(is_skip_to_content("Tab", false, true));
        assert!(!is_skip_to_content("Tab", true, true));
        assert!(!is_skip_to_content("Tab", false, false));
    }

    #[test]
    fn test_marquee_pauses_on_hover_or_focus() {
        let mut marquee = MarqueeState::default();
        assert_eq!(marquee.play_state(), PlayState::Running);
        assert_eq!(marquee.pointer_enter(), PlayState::Paused);
        assert_eq!(marquee.focus(), PlayState::Paused);
        // Still focused after the pointer leaves.
        assert_eq!(marquee.pointer_leave(), PlayState::Paused);
        assert_eq!(marquee.blur().as_css(), "running");
    }
}
