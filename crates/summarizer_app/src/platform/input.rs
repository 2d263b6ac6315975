use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use summarizer_core::{InputSource, Msg, Tier, UploadRequest};
use summarizer_logging::log_debug;

use super::app::AppEvent;

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Browse,
    /// A path typed at the file prompt or passed with `open <path>`.
    Picked(PathBuf),
    /// A path the terminal pasted because a file was dropped onto it.
    Dropped(PathBuf),
    Tab(Tier),
    Copy,
    Download,
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  browse              choose a document (PDF, DOCX or TXT)
  open <path>         submit a document directly
  <path>              drop a file onto the terminal to submit it
  tab high|medium|low switch importance tab (also 1, 2, 3)
  copy                copy the summary to the clipboard
  download            save the generated report
  show                print the current results again
  help                this text
  quit                exit";

/// Interprets a line. `awaiting_path` is set right after `browse`.
pub fn parse_line(line: &str, awaiting_path: bool) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if awaiting_path {
        return Some(Command::Picked(dequote_path(line)));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match (word.to_ascii_lowercase().as_str(), rest) {
        ("browse" | "upload", "") => Command::Browse,
        ("open", "") => Command::Browse,
        ("open", path) => Command::Picked(dequote_path(path)),
        ("tab", tier) => match tier.parse::<Tier>() {
            Ok(tier) => Command::Tab(tier),
            Err(_) => Command::Unknown(line.to_string()),
        },
        ("1" | "2" | "3", "") => match word.parse::<Tier>() {
            Ok(tier) => Command::Tab(tier),
            Err(_) => Command::Unknown(line.to_string()),
        },
        ("copy", "") => Command::Copy,
        ("download", "") => Command::Download,
        ("show", "") => Command::Show,
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit" | "q", "") => Command::Quit,
        _ if looks_like_path(line) => Command::Dropped(dequote_path(line)),
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

fn looks_like_path(line: &str) -> bool {
    let path = dequote_path(line);
    path.extension().is_some() || path.components().count() > 1 || line.starts_with("file://")
}

/// Undoes the quoting terminals apply to dropped paths.
pub fn dequote_path(raw: &str) -> PathBuf {
    let raw = raw.trim();
    let raw = raw.strip_prefix("file://").unwrap_or(raw);
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|&q| {
            raw.strip_prefix(q)
                .and_then(|inner| inner.strip_suffix(q))
        })
        .map(ToOwned::to_owned);
    match unquoted {
        Some(inner) => PathBuf::from(inner),
        None => PathBuf::from(unescape_spaces(raw)),
    }
}

fn unescape_spaces(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && matches!(chars.peek(), Some(' ' | '(' | ')' | '\'' | '&')) {
            continue;
        }
        out.push(c);
    }
    out
}

/// Reads a document from disk into the message that submits it.
pub fn read_document(path: &Path, source: InputSource) -> Msg {
    let display = path.display().to_string();
    match fs::read(path) {
        Ok(bytes) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| display.clone());
            Msg::FileChosen {
                source,
                request: UploadRequest::from_file_name(file_name, bytes),
            }
        }
        Err(err) => Msg::FileUnreadable {
            path: display,
            reason: err.to_string(),
        },
    }
}

/// Maps a command onto the event the app loop consumes.
pub fn command_event(command: Command) -> AppEvent {
    match command {
        Command::Browse => AppEvent::Msg(Msg::BrowseClicked),
        Command::Picked(path) => AppEvent::Msg(read_document(&path, InputSource::Picker)),
        Command::Dropped(path) => AppEvent::Msg(read_document(&path, InputSource::DragDrop)),
        Command::Tab(tier) => AppEvent::Msg(Msg::TierSelected(tier)),
        Command::Copy => AppEvent::Msg(Msg::CopySummaryClicked),
        Command::Download => AppEvent::Msg(Msg::DownloadClicked),
        Command::Show => AppEvent::Redraw,
        Command::Help => AppEvent::Help,
        Command::Quit => AppEvent::Quit,
        Command::Unknown(line) => AppEvent::Unknown(line),
    }
}

/// Reads stdin on its own thread and forwards commands to the app loop.
pub struct InputReader {
    awaiting_path: Arc<AtomicBool>,
}

impl InputReader {
    pub fn spawn<R>(reader: R, tx: mpsc::Sender<AppEvent>) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let awaiting_path = Arc::new(AtomicBool::new(false));
        let flag = awaiting_path.clone();
        thread::spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else { break };
                let awaiting = flag.swap(false, Ordering::SeqCst);
                let Some(command) = parse_line(&line, awaiting) else {
                    continue;
                };
                log_debug!("input command {:?}", command);
                if tx.send(command_event(command)).is_err() {
                    return;
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        });
        Self { awaiting_path }
    }

    /// Treat the next line as the answer to the file prompt.
    pub fn await_path(&self) {
        self.awaiting_path.store(true, Ordering::SeqCst);
    }
}
