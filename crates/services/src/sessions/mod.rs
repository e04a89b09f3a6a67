mod progress;
mod starter;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionStartError;
pub use progress::SessionProgress;
pub use starter::SessionStarter;
pub use view::SessionView;
pub use workflow::{Intent, apply_intent};
