//! Document state and analysis (UI-agnostic).

mod analyze;
mod state;

pub use analyze::{Analysis, DefinitionsOutcome, RecursionFinding};
pub use state::Document;
