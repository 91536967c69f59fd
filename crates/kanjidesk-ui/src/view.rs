use std::fmt;
use std::rc::Rc;

use crate::search::InputEvent;

pub type Callback = Rc<dyn Fn()>;
pub type TextCallback = Rc<dyn Fn(&str)>;
pub type InputCallback = Rc<dyn Fn(&InputEvent)>;

/// Rendered view. Interactive nodes carry the callbacks they fire.
#[derive(Clone)]
pub enum Node {
    Heading(String),
    Text(String),
    Link {
        text: String,
        href: String,
    },
    /// Children flow on one line
    Line(Vec<Node>),
    /// Children stacked vertically
    Block {
        class: &'static str,
        children: Vec<Node>,
    },
    Button {
        label: String,
        on_click: Option<Callback>,
        disabled: bool,
    },
    /// `value: None` is an indeterminate bar
    Progress {
        value: Option<f64>,
        max: f64,
        label: String,
    },
    Select {
        name: &'static str,
        options: Vec<SelectOption>,
        on_change: Option<TextCallback>,
    },
    Input {
        name: &'static str,
        value: String,
        placeholder: String,
        autofocus: bool,
        on_event: Option<InputCallback>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn block(class: &'static str, children: Vec<Node>) -> Self {
        Node::Block { class, children }
    }

    pub fn button(label: impl Into<String>, on_click: Option<Callback>) -> Self {
        Node::Button {
            label: label.into(),
            on_click,
            disabled: false,
        }
    }

    pub fn disabled_button(label: impl Into<String>) -> Self {
        Node::Button {
            label: label.into(),
            on_click: None,
            disabled: true,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Line(children) | Node::Block { children, .. } => children,
            _ => &[],
        }
    }

    pub fn class(&self) -> Option<&'static str> {
        match self {
            Node::Block { class, .. } => Some(class),
            _ => None,
        }
    }

    /// Depth-first walk, parents before children
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// All visible text, blocks separated by newlines
    pub fn text_content(&self) -> String {
        match self {
            Node::Heading(text) | Node::Text(text) => text.clone(),
            Node::Link { text, .. } => text.clone(),
            Node::Line(children) => children.iter().map(Node::text_content).collect(),
            Node::Block { children, .. } => children
                .iter()
                .map(Node::text_content)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            Node::Button { label, .. } => label.clone(),
            Node::Progress { label, .. } => label.clone(),
            Node::Select { options, .. } => options
                .iter()
                .find(|o| o.selected)
                .map(|o| o.label.clone())
                .unwrap_or_default(),
            Node::Input { value, .. } => value.clone(),
        }
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_content().contains(needle)
    }

    /// Buttons in document order
    pub fn buttons(&self) -> Vec<&Node> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if matches!(node, Node::Button { .. }) {
                found.push(node);
            }
        });
        found
    }

    pub fn find_button(&self, label: &str) -> Option<&Node> {
        self.buttons()
            .into_iter()
            .find(|node| matches!(node, Node::Button { label: l, .. } if l == label))
    }

    pub fn find_block(&self, class: &str) -> Option<&Node> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() && node.class() == Some(class) {
                found = Some(node);
            }
        });
        found
    }

    pub fn find_select(&self) -> Option<&Node> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() && matches!(node, Node::Select { .. }) {
                found = Some(node);
            }
        });
        found
    }

    pub fn find_input(&self) -> Option<&Node> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() && matches!(node, Node::Input { .. }) {
                found = Some(node);
            }
        });
        found
    }

    /// Activate a button. Returns false when there is nothing to fire.
    pub fn click(&self) -> bool {
        match self {
            Node::Button {
                on_click: Some(on_click),
                disabled: false,
                ..
            } => {
                on_click();
                true
            }
            _ => false,
        }
    }

    /// Change a select to `value`. Returns false when there is nothing to fire.
    pub fn change(&self, value: &str) -> bool {
        match self {
            Node::Select {
                on_change: Some(on_change),
                ..
            } => {
                on_change(value);
                true
            }
            _ => false,
        }
    }

    /// Deliver an input event. Returns false when nobody listens.
    pub fn dispatch(&self, event: &InputEvent) -> bool {
        match self {
            Node::Input {
                on_event: Some(on_event),
                ..
            } => {
                on_event(event);
                true
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Heading(text) => f.debug_tuple("Heading").field(text).finish(),
            Node::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Node::Link { text, href } => f
                .debug_struct("Link")
                .field("text", text)
                .field("href", href)
                .finish(),
            Node::Line(children) => f.debug_tuple("Line").field(children).finish(),
            Node::Block { class, children } => f
                .debug_struct("Block")
                .field("class", class)
                .field("children", children)
                .finish(),
            Node::Button {
                label,
                on_click,
                disabled,
            } => f
                .debug_struct("Button")
                .field("label", label)
                .field("on_click", &on_click.is_some())
                .field("disabled", disabled)
                .finish(),
            Node::Progress { value, max, label } => f
                .debug_struct("Progress")
                .field("value", value)
                .field("max", max)
                .field("label", label)
                .finish(),
            Node::Select {
                name,
                options,
                on_change,
            } => f
                .debug_struct("Select")
                .field("name", name)
                .field("options", options)
                .field("on_change", &on_change.is_some())
                .finish(),
            Node::Input {
                name,
                value,
                placeholder,
                autofocus,
                on_event,
            } => f
                .debug_struct("Input")
                .field("name", name)
                .field("value", value)
                .field("placeholder", placeholder)
                .field("autofocus", autofocus)
                .field("on_event", &on_event.is_some())
                .finish(),
        }
    }
}
