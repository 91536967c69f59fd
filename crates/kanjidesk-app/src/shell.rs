use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use kanal::{AsyncReceiver, AsyncSender};
use kanjidesk_core::{Effect, KanjiQuery, ShellState, apply_message};
use kanjidesk_types::{Command, Notification, WorkerMessage};
use kanjidesk_ui::{
    AppHandlers, Callback, InputEvent, Node, StatusCallbacks, TextCallback, app_view, render_text,
};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::idle::IdleScheduler;
use crate::input::UserInput;
use crate::ui::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives the UI: folds worker notifications into [`ShellState`], turns
/// user actions into commands and redraws the whole view after each change.
pub struct Shell<S: Surface> {
    state: ShellState,
    search: Option<String>,
    query: KanjiQuery,
    commands_tx: AsyncSender<Command>,
    handlers: AppHandlers,
    /// Search commits queued by the search box callback
    commits: Rc<RefCell<VecDeque<String>>>,
    view: Node,
    surface: S,
    startup_check: Option<IdleScheduler>,
}

fn post(commands_tx: &AsyncSender<Command>, command: Command) {
    let kind = command.kind();
    match commands_tx.try_send(command) {
        Ok(true) => tracing::debug!(kind, "command queued"),
        Ok(false) => tracing::warn!(kind, "command channel full, dropped"),
        Err(e) => tracing::error!(kind, "failed to queue command: {e}"),
    }
}

impl<S: Surface> Shell<S> {
    /// `kanji` is the startup lookup; it runs once the database is ready.
    pub fn new(commands_tx: AsyncSender<Command>, surface: S, kanji: Option<&str>) -> Self {
        let commits = Rc::new(RefCell::new(VecDeque::new()));
        let handlers = Self::handlers(&commands_tx, &commits);
        let query = kanji.map(KanjiQuery::from_text).unwrap_or_default();

        Self {
            state: ShellState::default(),
            search: kanji.map(str::to_string),
            query,
            commands_tx,
            handlers,
            commits,
            view: Node::block("app", vec![]),
            surface,
            startup_check: None,
        }
    }

    /// Send an update check once the worker has been quiet for a while
    pub fn with_startup_check(mut self, scheduler: IdleScheduler) -> Self {
        self.startup_check = Some(scheduler);
        self
    }

    fn handlers(
        commands_tx: &AsyncSender<Command>,
        commits: &Rc<RefCell<VecDeque<String>>>,
    ) -> AppHandlers {
        let on_update: Callback = {
            let tx = commands_tx.clone();
            Rc::new(move || post(&tx, Command::update()))
        };
        let on_cancel: Callback = {
            let tx = commands_tx.clone();
            Rc::new(move || post(&tx, Command::cancel_update()))
        };
        let on_destroy: Callback = {
            let tx = commands_tx.clone();
            Rc::new(move || post(&tx, Command::destroy()))
        };
        let on_set_lang: TextCallback = {
            let tx = commands_tx.clone();
            Rc::new(move |lang: &str| post(&tx, Command::update_with_lang(lang)))
        };
        let on_update_search: TextCallback = {
            let commits = commits.clone();
            Rc::new(move |value: &str| commits.borrow_mut().push_back(value.to_string()))
        };

        AppHandlers {
            status: StatusCallbacks {
                on_update: Some(on_update),
                on_cancel: Some(on_cancel),
                on_destroy: Some(on_destroy),
                on_set_lang: Some(on_set_lang),
            },
            on_update_search: Some(on_update_search),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn view(&self) -> &Node {
        &self.view
    }

    pub fn query(&self) -> &KanjiQuery {
        &self.query
    }

    /// Decode and apply one line from the worker. Anything that is not a
    /// valid notification is logged and dropped.
    pub fn handle_worker_line(&mut self, raw: &str) {
        match WorkerMessage::decode(raw) {
            Ok(WorkerMessage::Notification(notification)) => self.apply(notification),
            Ok(WorkerMessage::Command(command)) => {
                tracing::warn!(kind = command.kind(), "worker sent a command, ignoring");
            }
            Err(e) => {
                tracing::warn!("dropping worker message: {e}");
            }
        }
    }

    pub fn apply(&mut self, notification: Notification) {
        tracing::debug!(kind = notification.kind(), "notification");

        let state = std::mem::take(&mut self.state);
        let (state, effect) = apply_message(state, notification);
        self.state = state;

        match effect {
            Some(Effect::RerunQuery) => self.run_query(),
            None => {}
        }

        self.render();
    }

    pub fn handle_user_line(&mut self, line: &str) -> Flow {
        match UserInput::parse(line) {
            UserInput::Quit => return Flow::Quit,
            UserInput::Press(n) => {
                let pressed = self.view.buttons().get(n - 1).is_some_and(|b| b.click());
                if !pressed {
                    tracing::warn!("no active button [{n}]");
                }
            }
            UserInput::SetLang(code) => {
                if !self.view.find_select().is_some_and(|s| s.change(&code)) {
                    tracing::warn!("no language selector on screen");
                }
            }
            UserInput::Search(value) => {
                let event = InputEvent::Input {
                    value,
                    is_composing: false,
                };
                if let Some(input) = self.view.find_input() {
                    input.dispatch(&event);
                }
            }
            UserInput::Unknown(line) => {
                tracing::warn!("unknown command `{line}`");
            }
        }

        self.drain_commits();
        self.render();
        Flow::Continue
    }

    fn drain_commits(&mut self) {
        loop {
            let next = self.commits.borrow_mut().pop_front();
            match next {
                Some(value) => self.commit_search(value),
                None => break,
            }
        }
    }

    /// Commits can repeat (composition end plus the trailing input event);
    /// a repeat of the current search is ignored.
    fn commit_search(&mut self, value: String) {
        if self.search.as_deref() == Some(value.as_str()) {
            tracing::trace!("search unchanged");
            return;
        }

        self.query = KanjiQuery::from_text(&value);
        self.search = Some(value);
        post(&self.commands_tx, self.query.to_command());
    }

    fn run_query(&self) {
        if self.query.is_empty() {
            return;
        }
        tracing::info!(query = %self.query, "running query");
        post(&self.commands_tx, self.query.to_command());
    }

    pub fn check_for_updates(&self) {
        post(&self.commands_tx, Command::update());
    }

    pub fn render(&mut self) {
        self.view = app_view(&self.state, self.search.as_deref(), &self.handlers);
        self.surface.present(&render_text(&self.view));
    }

    pub async fn run(
        mut self,
        notifications_rx: AsyncReceiver<String>,
        input_rx: AsyncReceiver<String>,
        cancel: CancellationToken,
    ) -> anyhow::Result<()> {
        self.render();
        let mut input_open = true;

        loop {
            let wake = self
                .startup_check
                .as_ref()
                .filter(|scheduler| !scheduler.fired())
                .map(IdleScheduler::next_wake);

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("shell stopping");
                    self.drain_notifications(&notifications_rx);
                    break;
                }
                message = notifications_rx.recv() => match message {
                    Ok(raw) => {
                        if let Some(scheduler) = self.startup_check.as_mut() {
                            scheduler.touch(Instant::now());
                        }
                        self.handle_worker_line(&raw);
                    }
                    Err(_) => {
                        tracing::warn!("worker channel closed");
                        break;
                    }
                },
                line = input_rx.recv(), if input_open => match line {
                    Ok(line) => {
                        if self.handle_user_line(&line) == Flow::Quit {
                            cancel.cancel();
                            break;
                        }
                    }
                    Err(_) => input_open = false,
                },
                _ = sleep_until(wake.unwrap_or_else(Instant::now)), if wake.is_some() => {
                    let due = self
                        .startup_check
                        .as_mut()
                        .is_some_and(|scheduler| scheduler.poll(Instant::now()));
                    if due {
                        tracing::info!("idle, checking for database updates");
                        self.check_for_updates();
                    }
                }
            }
        }

        Ok(())
    }

    /// Apply whatever the worker sent before the session ended
    fn drain_notifications(&mut self, notifications_rx: &AsyncReceiver<String>) {
        while let Ok(Some(raw)) = notifications_rx.try_recv() {
            self.handle_worker_line(&raw);
        }
    }
}
