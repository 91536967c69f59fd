use kanjidesk_core::ShellState;
use kanjidesk_types::KanjiResult;

use crate::search::SearchBox;
use crate::status::{DatabaseStatus, StatusCallbacks};
use crate::view::{Node, TextCallback};

#[derive(Clone, Default)]
pub struct AppHandlers {
    pub status: StatusCallbacks,
    pub on_update_search: Option<TextCallback>,
}

/// Whole-screen view, recomputed from scratch on every change
pub fn app_view(state: &ShellState, search: Option<&str>, handlers: &AppHandlers) -> Node {
    let search_box = SearchBox::new(search.map(str::to_string), handlers.on_update_search.clone());

    let mut children = vec![search_box.view()];
    if !state.entries.is_empty() {
        children.push(Node::block(
            "entries",
            state.entries.iter().map(entry_view).collect(),
        ));
    }
    children.push(
        DatabaseStatus {
            database_state: state.database_state,
            database_versions: &state.database_versions,
            update_state: &state.update_state,
            callbacks: handlers.status.clone(),
        }
        .view(),
    );

    Node::block("app", children)
}

fn entry_view(entry: &KanjiResult) -> Node {
    let mut children = vec![Node::Heading(entry.c.clone())];

    let mut readings = Vec::new();
    if !entry.r.on.is_empty() {
        readings.push(format!("on: {}", entry.r.on.join("、")));
    }
    if !entry.r.kun.is_empty() {
        readings.push(format!("kun: {}", entry.r.kun.join("、")));
    }
    if !readings.is_empty() {
        children.push(Node::text(readings.join("  ")));
    }
    if !entry.m.is_empty() {
        children.push(Node::text(entry.m.join("; ")));
    }

    Node::block("entry", children)
}
