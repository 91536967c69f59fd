use crate::view::Node;

const BAR_WIDTH: usize = 20;

/// Render a view tree as plain text, one block child per line.
///
/// Buttons are numbered in document order, the same order as
/// [`Node::buttons`], so `[2]` refers to `node.buttons()[1]`.
pub fn render_text(node: &Node) -> String {
    let mut renderer = TextRenderer::default();
    renderer.block(node);
    renderer.lines.join("\n")
}

#[derive(Default)]
struct TextRenderer {
    lines: Vec<String>,
    buttons: usize,
}

impl TextRenderer {
    fn block(&mut self, node: &Node) {
        match node {
            Node::Heading(text) => self.lines.push(format!("== {text} ==")),
            Node::Block { children, .. } => {
                for child in children {
                    self.block(child);
                }
            }
            other => {
                let line = self.inline(other);
                if !line.is_empty() {
                    self.lines.push(line);
                }
            }
        }
    }

    fn inline(&mut self, node: &Node) -> String {
        match node {
            Node::Heading(text) | Node::Text(text) => text.clone(),
            Node::Link { text, .. } => text.clone(),
            Node::Line(children) | Node::Block { children, .. } => {
                children.iter().map(|child| self.inline(child)).collect()
            }
            Node::Button {
                label, disabled, ..
            } => {
                self.buttons += 1;
                if *disabled {
                    format!("[{}] {label} (disabled)", self.buttons)
                } else {
                    format!("[{}] {label}", self.buttons)
                }
            }
            Node::Progress { value, max, label } => {
                let bar = match value {
                    Some(value) => {
                        let ratio = if *max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
                        let filled = (ratio * BAR_WIDTH as f64).round() as usize;
                        format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
                    }
                    None => "~".repeat(BAR_WIDTH),
                };
                format!("[{bar}] {label}")
            }
            Node::Select { name, options, .. } => {
                let options: Vec<String> = options
                    .iter()
                    .map(|o| {
                        if o.selected {
                            format!("*{} {}*", o.value, o.label)
                        } else {
                            format!("{} {}", o.value, o.label)
                        }
                    })
                    .collect();
                format!("{name}: {}", options.join(" | "))
            }
            Node::Input {
                value, placeholder, ..
            } => {
                if value.is_empty() {
                    format!("> ({placeholder})")
                } else {
                    format!("> {value}")
                }
            }
        }
    }
}
