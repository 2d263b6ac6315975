use std::io::Write;

use summarizer_core::{
    ArticleRow, DownloadControl, ListRow, NotificationId, NotificationKind, NotificationView,
    TierTab, View,
};

/// Plain-text marker for each icon name used by the view model.
pub fn icon_marker(icon: &str) -> &'static str {
    match icon {
        "exclamation-circle" => "[!]",
        "info-circle" => "[i]",
        "comment" => "[-]",
        "calendar" => "[*]",
        "check-circle" => "[ok]",
        _ => "[ ]",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Sections {
    summary: String,
    dates: Vec<String>,
    importance: Vec<String>,
    articles: Option<Vec<String>>,
    download: Vec<String>,
}

/// Draws the view model as scrolling terminal output.
///
/// The terminal cannot repaint, so each section is printed only when its
/// text differs from what was printed last, and the whole results block is
/// printed when results are revealed.
pub struct TerminalView<W: Write> {
    out: W,
    timestamps: bool,
    pending: Sections,
    printed: Option<Sections>,
    reveal: bool,
    loading: Option<String>,
    last_notification: Option<NotificationId>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, timestamps: bool) -> Self {
        Self {
            out,
            timestamps,
            pending: Sections::default(),
            printed: None,
            reveal: false,
            loading: None,
            last_notification: None,
        }
    }

    /// Prints the full results block on the next pass.
    pub fn reveal(&mut self) {
        self.reveal = true;
    }

    pub fn prompt_for_path(&mut self) {
        self.line("Path to document (PDF, DOCX or TXT):");
    }

    pub fn message(&mut self, text: &str) {
        self.line(text);
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // Nowhere else to report a failed terminal write.
        let _ = writeln!(self.out, "{text}");
    }

    fn flush_results(&mut self) {
        let pending = self.pending.clone();
        let previous = if std::mem::take(&mut self.reveal) {
            None
        } else {
            self.printed.take()
        };
        let show_all = previous.is_none();
        let old = previous.unwrap_or_default();

        if show_all {
            self.line("");
            self.line("==================== Results ====================");
        }
        if show_all || old.summary != pending.summary {
            self.line("-- Summary --");
            self.line(&pending.summary);
        }
        if show_all || old.dates != pending.dates {
            self.line("-- Key dates --");
            for row in &pending.dates {
                self.line(&format!("  {row}"));
            }
        }
        if show_all || old.importance != pending.importance {
            for row in &pending.importance {
                self.line(row);
            }
        }
        if show_all || old.articles != pending.articles {
            if let Some(articles) = &pending.articles {
                self.line("-- Suggested law articles --");
                for row in articles {
                    self.line(row);
                }
            }
        }
        if show_all || old.download != pending.download {
            for row in &pending.download {
                self.line(row);
            }
        }
        self.printed = Some(pending);
    }
}

impl<W: Write> View for TerminalView<W> {
    fn set_loading(&mut self, loading: Option<&str>) {
        if self.loading.as_deref() == loading {
            return;
        }
        self.loading = loading.map(ToOwned::to_owned);
        if let Some(file_name) = loading {
            self.line(&format!("Processing {file_name}... please wait."));
        }
    }

    // The controller refuses uploads while busy; nothing to draw here.
    fn set_upload_enabled(&mut self, _enabled: bool) {}

    fn render_summary(&mut self, text: &str) {
        self.pending.summary = text.to_string();
    }

    fn render_dates(&mut self, rows: &[ListRow]) {
        self.pending.dates = rows
            .iter()
            .map(|row| format!("{} {}", icon_marker(row.icon), row.text))
            .collect();
    }

    fn render_importance(&mut self, tabs: &[TierTab], rows: &[ListRow]) {
        let header = tabs
            .iter()
            .map(|tab| {
                if tab.active {
                    format!("[{} ({})]", tab.label, tab.count)
                } else {
                    format!(" {} ({}) ", tab.label, tab.count)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let mut lines = vec![format!("-- Importance -- {header}")];
        lines.extend(
            rows.iter()
                .map(|row| format!("  {} {}", icon_marker(row.icon), row.text)),
        );
        self.pending.importance = lines;
    }

    fn render_articles(&mut self, rows: Option<&[ArticleRow]>) {
        self.pending.articles = rows.map(|rows| {
            rows.iter()
                .flat_map(|row| {
                    let mut lines = vec![format!("  {}", row.title)];
                    if let Some(description) = &row.description {
                        lines.push(format!("      {description}"));
                    }
                    lines
                })
                .collect()
        });
    }

    fn render_download(&mut self, control: &DownloadControl) {
        self.pending.download = match (&control.url, control.enabled) {
            (Some(url), true) => vec![
                "-- Report --".to_string(),
                format!("  {url}  (type `download` to save)"),
            ],
            _ => vec!["-- Report --".to_string(), "  not available".to_string()],
        };
    }

    fn set_results_visible(&mut self, visible: bool) {
        if visible {
            self.flush_results();
        }
    }

    fn show_notification(&mut self, notification: Option<&NotificationView>) {
        let Some(notification) = notification else {
            self.last_notification = None;
            return;
        };
        if self.last_notification == Some(notification.id) {
            return;
        }
        self.last_notification = Some(notification.id);
        let label = match notification.kind {
            NotificationKind::Error => "ERROR",
            NotificationKind::Success => "OK",
        };
        let stamp = if self.timestamps {
            format!("{} ", chrono::Local::now().format("%H:%M:%S"))
        } else {
            String::new()
        };
        self.line(&format!(
            "{stamp}{label} {} {}",
            icon_marker(notification.icon),
            notification.message
        ));
    }
}
