pub mod progression;
pub mod run_events;
pub mod session;

// Re-export main components
pub use progression::*;
pub use run_events::*;
pub use session::*;
