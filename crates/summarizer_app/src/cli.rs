use std::path::PathBuf;

use clap::Parser;
use summarizer_logging::LogDestination;

/// Upload legal documents for summarization and browse the results.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "summarizer", version, about)]
pub struct Cli {
    /// Documents to submit, one after another (PDF, DOCX or TXT).
    pub files: Vec<PathBuf>,

    /// RON configuration file. Defaults to ./summarizer.ron when present.
    #[arg(long, env = "SUMMARIZER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend origin, e.g. http://127.0.0.1:5001.
    #[arg(long, env = "SUMMARIZER_BASE_URL")]
    pub base_url: Option<String>,

    /// Summarize endpoint: a path relative to the base URL or an absolute URL.
    #[arg(long, env = "SUMMARIZER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Largest accepted upload, in MiB.
    #[arg(long, env = "SUMMARIZER_MAX_UPLOAD_MB")]
    pub max_upload_mb: Option<u64>,

    /// Directory downloaded reports are written to.
    #[arg(long, env = "SUMMARIZER_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,

    /// Where logs go: file, terminal, both or off.
    #[arg(long, env = "SUMMARIZER_LOG")]
    pub log: Option<LogDestination>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Exit after the given files are processed instead of reading commands.
    #[arg(long)]
    pub batch: bool,
}
