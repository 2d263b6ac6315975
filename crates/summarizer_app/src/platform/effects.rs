use std::io::Write;
use std::sync::mpsc;
use std::thread;

use summarizer_core::{Effect, Msg};
use summarizer_engine::{EngineEvent, EngineEvents, EngineHandle};
use summarizer_logging::{log_info, log_warn};

use super::app::AppEvent;
use super::clipboard::Clipboard;
use super::input::InputReader;
use super::ui::terminal::TerminalView;

pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn Clipboard>,
    input: Option<InputReader>,
    tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        events: EngineEvents,
        clipboard: Box<dyn Clipboard>,
        input: Option<InputReader>,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        spawn_event_loop(events, tx.clone());
        Self {
            engine,
            clipboard,
            input,
            tx,
        }
    }

    pub fn run<W: Write>(&mut self, effects: Vec<Effect>, view: &mut TerminalView<W>) {
        for effect in effects {
            match effect {
                Effect::OpenFilePicker => match &self.input {
                    Some(input) => {
                        input.await_path();
                        view.prompt_for_path();
                    }
                    None => log_warn!("file picker requested without interactive input"),
                },
                Effect::Submit {
                    submission_id,
                    source,
                    request,
                } => {
                    log_info!(
                        "Submit submission_id={} source={:?} file={} bytes={}",
                        submission_id,
                        source,
                        request.file_name,
                        request.size()
                    );
                    self.engine.submit(submission_id, request);
                }
                Effect::RevealResults => view.reveal(),
                Effect::CopyToClipboard { text } => {
                    let result = self.clipboard.set_text(&text);
                    if let Err(reason) = &result {
                        log_warn!("clipboard write failed: {}", reason);
                    }
                    let _ = self.tx.send(AppEvent::Msg(Msg::ClipboardFinished(result)));
                }
                Effect::DownloadReport { url } => {
                    log_info!("DownloadReport url={}", url);
                    self.engine.download_report(url);
                }
                Effect::ScheduleDismiss { id, after } => {
                    let tx = self.tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = tx.send(AppEvent::Msg(Msg::NotificationExpired(id)));
                    });
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if tx.send(AppEvent::Msg(map_event(event))).is_err() {
                return;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SummarizeCompleted {
            submission_id,
            result,
        } => Msg::SummarizeFinished {
            submission_id,
            result: result.map_err(|err| err.message),
        },
        EngineEvent::ReportCompleted { result, .. } => {
            Msg::ReportSaved(result.map(|path| path.display().to_string()))
        }
    }
}
