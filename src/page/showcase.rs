//! Project cards, the demo launcher and the styles the page effects rely on.

use std::time::Duration;

/// Project cards that lift on hover and highlight on touch.
pub const PROJECT_CARD_SELECTOR: &str = ".project-card";

/// Card transform while the pointer is over it.
pub const CARD_HOVER_TRANSFORM: &str = "translateY(-10px) scale(1.02)";

/// Card transform at rest.
pub const CARD_REST_TRANSFORM: &str = "translateY(0) scale(1)";

/// Class shown while a card is being touched.
pub const TOUCH_ACTIVE_CLASS: &str = "touch-active";

/// How long the touch highlight outlives the finger.
pub const TOUCH_RELEASE_DELAY: Duration = Duration::from_millis(300);

/// Modal holding the particle demo.
pub const DEMO_MODAL_ID: &str = "pixelhackModal";

/// Canvas inside the demo modal.
pub const DEMO_CANVAS_ID: &str = "demoCanvas";

/// Wait between opening the demo modal and attaching to its canvas, so the
/// canvas has its laid-out size.
pub const DEMO_OPEN_DELAY: Duration = Duration::from_millis(300);

/// Id of the injected `<style>` element.
pub const PAGE_STYLE_ID: &str = "pixelhack-page-styles";

/// Styles for the reveal, touch and navbar classes toggled by the page script.
pub const PAGE_STYLES: &str = "\
.project-card,
.skill-category,
.stat-item {
    opacity: 0;
    transform: translateY(30px);
    transition: all 0.6s ease;
}

.animate-in {
    opacity: 1 !important;
    transform: translateY(0) !important;
}

.touch-active .project-overlay {
    opacity: 1;
}

.navbar.scrolled {
    background: rgba(15, 23, 42, 0.98) !important;
    box-shadow: 0 2px 20px rgba(0, 0, 0, 0.1);
}
";

/// Card transform for the hover state.
#[inline]
pub fn card_transform(hovered: bool) -> &'static str {
    if hovered {
        CARD_HOVER_TRANSFORM
    } else {
        CARD_REST_TRANSFORM
    }
}

/// A delayed highlight removal, issued when a touch ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchRelease {
    touch: u32,
    /// Time to wait before applying it.
    pub delay: Duration,
}

/// Touch highlight of one project card.
///
/// Every touch end schedules a release after [`TOUCH_RELEASE_DELAY`]. A
/// release only clears the highlight if no newer touch started in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardTouch {
    touches: u32,
    active: bool,
}

impl CardTouch {
    /// A finger went down on the card.
    pub fn touch_start(&mut self) {
        self.touches = self.touches.wrapping_add(1);
        self.active = true;
    }

    /// The finger lifted. Apply the returned release once its delay is over.
    pub fn touch_end(&self) -> TouchRelease {
        TouchRelease {
            touch: self.touches,
            delay: TOUCH_RELEASE_DELAY,
        }
    }

    /// Apply a release. Returns `true` when the highlight class must be removed.
    pub fn release(&mut self, release: TouchRelease) -> bool {
        if self.active && release.touch == self.touches {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Whether the highlight is showing.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_transform() {
        assert_eq!(card_transform(true), "translateY(-10px) scale(1.02)");
        assert_eq!(card_transform(false), "translateY(0) scale(1)");
    }

    #[test]
    fn test_touch_highlight_lasts_until_release() {
        let mut card = CardTouch::default();
        card.touch_start();
        assert!(card.is_active());

        let release = card.touch_end();
        assert_eq!(release.delay, Duration::from_millis(300));
        assert!(card.is_active());

        assert!(card.release(release));
        assert!(!card.is_active());
        // A second delivery of the same release is a no-op.
        assert!(!card.release(release));
    }

    #[test]
    fn test_new_touch_outlives_earlier_release() {
        let mut card = CardTouch::default();
        card.touch_start();
        let first = card.touch_end();

        // Second tap lands before the first release fires.
        card.touch_start();
        assert!(!card.release(first));
        assert!(card.is_active());

        let second = card.touch_end();
        assert!(card.release(second));
        assert!(!card.is_active());
    }

    #[test]
    fn test_page_styles_cover_toggled_classes() {
        for class in [".animate-in", ".touch-active", ".navbar.scrolled"] {
            assert!(PAGE_STYLES.contains(class), "missing {}", class);
        }
    }
}
