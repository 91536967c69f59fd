use serde::{Deserialize, Serialize};

fn default_command() -> String {
    "kanjidesk-worker".to_string()
}

/// How to launch the data worker process
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorkerConfig {
    /// Executable speaking the worker protocol on stdin/stdout
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: vec![],
        }
    }
}
