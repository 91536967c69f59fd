/// One line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// `/N`: activate the N-th button on screen (1-based)
    Press(usize),
    /// `/lang CODE`
    SetLang(String),
    /// `/quit` or `/q`
    Quit,
    /// Anything else is typed into the search box
    Search(String),
    Unknown(String),
}

impl UserInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix('/') else {
            return UserInput::Search(line.to_string());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("quit" | "q"), None) => UserInput::Quit,
            (Some("lang"), Some(code)) => UserInput::SetLang(code.to_string()),
            (Some(n), None) => match n.parse::<usize>() {
                Ok(n) if n > 0 => UserInput::Press(n),
                _ => UserInput::Unknown(line.to_string()),
            },
            _ => UserInput::Unknown(line.to_string()),
        }
    }
}
