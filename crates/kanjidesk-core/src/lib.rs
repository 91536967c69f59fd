pub mod query;
pub mod state;

pub use query::KanjiQuery;
pub use state::{Effect, ShellState, apply_message};
