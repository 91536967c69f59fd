use std::rc::Rc;

use crate::view::{Node, TextCallback};

/// Raw events from the search field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Input { value: String, is_composing: bool },
    CompositionEnd { value: String },
}

/// Search field that reports committed text.
///
/// Input during an IME composition is not committed. Some platforms never
/// report `is_composing == false` when a composition finishes, so
/// `CompositionEnd` commits as well; the callback may see the same value
/// twice in a row and must tolerate it.
#[derive(Clone, Default)]
pub struct SearchBox {
    pub search: Option<String>,
    pub on_update_search: Option<TextCallback>,
}

impl SearchBox {
    pub fn new(search: Option<String>, on_update_search: Option<TextCallback>) -> Self {
        Self {
            search,
            on_update_search,
        }
    }

    pub fn handle(&self, event: &InputEvent) {
        commit(self.on_update_search.as_ref(), event);
    }

    pub fn view(&self) -> Node {
        let on_update = self.on_update_search.clone();
        let value = self.search.clone().unwrap_or_default();

        Node::Input {
            name: "q",
            autofocus: value.is_empty(),
            value,
            placeholder: "Search".to_string(),
            on_event: Some(Rc::new(move |event: &InputEvent| commit(on_update.as_ref(), event))),
        }
    }
}

fn commit(on_update: Option<&TextCallback>, event: &InputEvent) {
    let Some(on_update) = on_update else {
        return;
    };

    match event {
        InputEvent::Input {
            value,
            is_composing: false,
        } => on_update(value),
        InputEvent::Input {
            is_composing: true, ..
        } => {
            tracing::trace!("input during composition, not committed");
        }
        InputEvent::CompositionEnd { value } => on_update(value),
    }
}
