//! System clipboard access through the terminal.
//!
//! Uses the OSC 52 escape sequence, which most terminal emulators (and
//! tmux/ssh sessions) forward to the host clipboard.

use std::io::{self, IsTerminal, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub trait Clipboard: Send {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

pub struct Osc52Clipboard<W: Write + Send> {
    out: W,
    require_terminal: bool,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            require_terminal: true,
        }
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    #[cfg(test)]
    fn with_writer(out: W) -> Self {
        Self {
            out,
            require_terminal: false,
        }
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        if self.require_terminal && !io::stdout().is_terminal() {
            return Err("stdout is not a terminal".to_string());
        }
        let sequence = osc52_sequence(text);
        self.out
            .write_all(sequence.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|err| err.to_string())
    }
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_text_as_osc52() {
        let mut clipboard = Osc52Clipboard::with_writer(Vec::new());
        clipboard.set_text("Rent is due").unwrap();
        assert_eq!(clipboard.out, b"\x1b]52;c;UmVudCBpcyBkdWU=\x07");
    }
}
