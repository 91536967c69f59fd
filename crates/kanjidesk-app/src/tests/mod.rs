mod bridge_tests;
mod input_tests;

use std::cell::RefCell;
use std::rc::Rc;

use kanal::AsyncReceiver;
use kanjidesk_types::Command;

use crate::ui::Surface;

/// Keeps every frame for inspection
#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub frames: Rc<RefCell<Vec<String>>>,
}

impl RecordingSurface {
    pub fn last(&self) -> String {
        self.frames.borrow().last().cloned().unwrap_or_default()
    }
}

impl Surface for RecordingSurface {
    fn present(&mut self, frame: &str) {
        self.frames.borrow_mut().push(frame.to_string());
    }
}

/// Everything queued so far
pub fn drain(rx: &AsyncReceiver<Command>) -> Vec<Command> {
    let mut commands = Vec::new();
    while let Ok(Some(command)) = rx.try_recv() {
        commands.push(command);
    }
    commands
}
