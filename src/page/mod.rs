//! Page behaviours around the demo: typewriter, contact form, navigation,
//! project cards.

pub mod contact;
pub mod navigation;
pub mod showcase;
mod typewriter;

pub use contact::{
    ContactConfig, ContactError, ContactForm, ContactMessage, ContactResponse, SubmissionOutcome,
};
pub use navigation::{MarqueeState, PlayState};
pub use showcase::{CardTouch, TouchRelease};
pub use typewriter::{Typewriter, TypewriterConfig, TypewriterStep};
