use serde::{Deserialize, Serialize};

fn default_clear_screen() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Clear the terminal before each frame (only when stdout is a TTY)
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            clear_screen: default_clear_screen(),
        }
    }
}
