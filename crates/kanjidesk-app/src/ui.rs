use std::io::{self, Write};

use kanjidesk_config::ui::UiConfig;

/// Where rendered frames go
pub trait Surface {
    fn present(&mut self, frame: &str);
}

/// Writes frames to stdout, clearing the screen first on a terminal
pub struct TerminalSurface {
    clear: bool,
}

impl TerminalSurface {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            clear: config.clear_screen && atty::is(atty::Stream::Stdout),
        }
    }

    fn write_frame(&self, frame: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        if self.clear {
            out.write_all(b"\x1b[2J\x1b[H")?;
        } else {
            writeln!(out)?;
        }
        writeln!(out, "{frame}")?;
        out.flush()
    }
}

impl Surface for TerminalSurface {
    fn present(&mut self, frame: &str) {
        if let Err(e) = self.write_frame(frame) {
            tracing::warn!("failed to draw frame: {e}");
        }
    }
}
