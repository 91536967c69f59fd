use kanjidesk_types::{DatabaseState, DatabaseVersions, KanjiResult, Notification, UpdateState};

/// Everything the UI knows about the worker, rebuilt from notifications only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShellState {
    pub database_state: DatabaseState,
    pub database_versions: DatabaseVersions,
    pub update_state: UpdateState,
    pub entries: Vec<KanjiResult>,
}

/// Side effect requested by a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The database just became usable; results may be stale, so the last
    /// query should be sent again.
    RerunQuery,
}

/// Fold one worker notification into the state.
///
/// `dbstateupdated` and `dbversionsupdated` are separate messages, so the
/// returned state can have a ready database with no versions yet.
pub fn apply_message(
    mut state: ShellState,
    message: Notification,
) -> (ShellState, Option<Effect>) {
    let mut effect = None;

    match message {
        Notification::DbStateUpdated { state: next } => {
            let prev = state.database_state;
            if prev != DatabaseState::Ok && next == DatabaseState::Ok {
                effect = Some(Effect::RerunQuery);
            } else if next != DatabaseState::Ok && !state.entries.is_empty() {
                tracing::debug!(
                    ?prev,
                    ?next,
                    "database left ok, dropping {} entries",
                    state.entries.len()
                );
                state.entries.clear();
            }
            state.database_state = next;
        }
        Notification::DbVersionsUpdated { versions } => {
            state.database_versions = versions;
        }
        Notification::UpdateStateUpdated { state: update_state } => {
            state.update_state = update_state;
        }
        Notification::QueryResult { results } => {
            state.entries = results;
        }
    }

    (state, effect)
}
