use std::collections::VecDeque;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use summarizer_core::{present, update, AppState, Effect, InputSource, Msg};
use summarizer_engine::{AtomicFileWriter, EngineHandle, ReqwestClient};
use summarizer_logging::{log_info, log_warn};

use super::clipboard::Osc52Clipboard;
use super::config::Settings;
use super::effects::EffectRunner;
use super::input::{read_document, InputReader, HELP};
use super::ui::terminal::TerminalView;

/// Everything the app loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Redraw,
    Help,
    Unknown(String),
    Quit,
    InputClosed,
}

pub fn run_app(settings: Settings, files: Vec<PathBuf>, batch: bool) -> anyhow::Result<ExitCode> {
    log_info!(
        "starting: endpoint={} max_upload_bytes={} download_dir={}",
        settings.client.endpoint,
        settings.limits.max_bytes,
        settings.download_dir.display()
    );

    let client = ReqwestClient::new(settings.client.clone()).context("creating HTTP client")?;
    let (engine, events) = EngineHandle::new(
        Arc::new(client),
        AtomicFileWriter::new(settings.download_dir.clone()),
    );

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let input = if batch {
        None
    } else {
        Some(InputReader::spawn(BufReader::new(io::stdin()), tx.clone()))
    };
    let runner = EffectRunner::new(
        engine,
        events,
        Box::new(Osc52Clipboard::stdout()),
        input,
        tx,
    );

    let mut app = App::new(
        AppState::with_settings(settings.limits, settings.notification_timeout),
        TerminalView::new(io::stdout(), true),
        runner,
        files,
        batch,
    );
    if !batch {
        app.view
            .message("Legal document summarizer. Type `browse` or drop a file here; `help` lists commands.");
    }

    let failures = app.run(&rx);
    if failures > 0 {
        log_warn!("exiting with {} failed document(s)", failures);
        Ok(ExitCode::FAILURE)
    } else {
        log_info!("exiting");
        Ok(ExitCode::SUCCESS)
    }
}

struct App<W: Write> {
    state: AppState,
    view: TerminalView<W>,
    runner: EffectRunner,
    /// Files from the command line still waiting for their turn.
    queue: VecDeque<PathBuf>,
    /// Failures only decide the exit status in batch mode.
    batch: bool,
    exit_when_idle: bool,
    failures: usize,
}

impl<W: Write> App<W> {
    fn new(
        state: AppState,
        view: TerminalView<W>,
        runner: EffectRunner,
        files: Vec<PathBuf>,
        batch: bool,
    ) -> Self {
        Self {
            state,
            view,
            runner,
            queue: files.into(),
            batch,
            exit_when_idle: batch,
            failures: 0,
        }
    }

    /// Runs until quit, or until idle once input is exhausted. Returns the
    /// number of failed documents.
    fn run(&mut self, rx: &mpsc::Receiver<AppEvent>) -> usize {
        self.pump_queue();
        while !self.finished() {
            let Ok(event) = rx.recv() else { break };
            match event {
                AppEvent::Msg(msg) => self.dispatch(msg),
                AppEvent::Redraw => {
                    self.view.reveal();
                    present(&mut self.view, &self.state.view());
                }
                AppEvent::Help => self.view.message(HELP),
                AppEvent::Unknown(line) => self
                    .view
                    .message(&format!("Unknown command `{line}`; type `help` for a list.")),
                // Finish outstanding work, then exit as in batch mode.
                AppEvent::InputClosed => self.exit_when_idle = true,
                AppEvent::Quit => break,
            }
            self.pump_queue();
        }
        self.failures
    }

    fn dispatch(&mut self, msg: Msg) {
        let failed = matches!(
            msg,
            Msg::FileUnreadable { .. }
                | Msg::SummarizeFinished {
                    result: Err(_),
                    ..
                }
        );
        let chosen = matches!(msg, Msg::FileChosen { .. });

        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let submitted = effects
            .iter()
            .any(|effect| matches!(effect, Effect::Submit { .. }));
        if self.batch && (failed || (chosen && !submitted)) {
            self.failures += 1;
        }

        self.runner.run(effects, &mut self.view);
        if self.state.consume_dirty() {
            present(&mut self.view, &self.state.view());
        }
    }

    /// Feeds queued files in one at a time, whenever no request is in flight.
    fn pump_queue(&mut self) {
        while !self.state.is_submitting() {
            let Some(path) = self.queue.pop_front() else {
                return;
            };
            log_info!("queued file {}", path.display());
            self.dispatch(read_document(&path, InputSource::Picker));
        }
    }

    fn finished(&self) -> bool {
        self.exit_when_idle && self.queue.is_empty() && !self.state.is_submitting()
    }
}
