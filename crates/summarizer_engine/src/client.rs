use std::time::Duration;

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use summarizer_core::{AnalysisResult, SummarizeResponse, UploadRequest, MIB};
use summarizer_logging::{log_debug, log_info, log_warn};
use url::Url;

use crate::{
    FailureKind, ReportFile, RequestError, MSG_MALFORMED, MSG_NO_DATA, MSG_REJECTED, MSG_TRANSPORT,
};

/// Multipart field the backend reads the document from.
pub const DOCUMENT_FIELD: &str = "document";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_ENDPOINT: &str = "/summarize";
const FALLBACK_REPORT_NAME: &str = "report.pdf";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// Path joined onto `base_url`, or an absolute URL used as is.
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
    pub max_report_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_report_bytes: 50 * MIB,
        }
    }
}

impl ClientSettings {
    /// An absolute endpoint is used as is; a relative one is appended to
    /// the base URL's path, so `http://host/legal` + `/summarize` gives
    /// `http://host/legal/summarize`.
    pub fn summarize_url(&self) -> Result<Url, RequestError> {
        let endpoint = self.endpoint.trim();
        if let Ok(url) = Url::parse(endpoint) {
            return Ok(url);
        }
        let mut url = self.base()?;
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        url.set_path(&path);
        Ok(url)
    }

    /// Resolves a link (relative or absolute) against the base URL, the way
    /// a browser resolves an `href`.
    pub fn resolve(&self, link: &str) -> Result<Url, RequestError> {
        self.base()?
            .join(link.trim())
            .map_err(|err| invalid_url(link, err))
    }

    fn base(&self) -> Result<Url, RequestError> {
        Url::parse(&self.base_url).map_err(|err| invalid_url(&self.base_url, err))
    }
}

fn invalid_url(link: &str, err: url::ParseError) -> RequestError {
    RequestError::new(FailureKind::InvalidUrl, format!("Invalid URL: {link}"))
        .with_detail(err.to_string())
}

#[async_trait::async_trait]
pub trait SummarizeClient: Send + Sync {
    async fn summarize(&self, request: &UploadRequest) -> Result<AnalysisResult, RequestError>;

    async fn fetch_report(&self, report_url: &str) -> Result<ReportFile, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| {
            RequestError::new(FailureKind::Network, MSG_TRANSPORT).with_detail(err.to_string())
        })?;
        Ok(Self { settings, client })
    }

    fn build_form(request: &UploadRequest) -> Result<Form, RequestError> {
        let part = Part::bytes(request.bytes.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.media_type)
            .map_err(|err| {
                RequestError::new(FailureKind::InvalidRequest, MSG_TRANSPORT)
                    .with_detail(format!("bad media type {}: {err}", request.media_type))
            })?;
        Ok(Form::new().part(DOCUMENT_FIELD, part))
    }
}

#[async_trait::async_trait]
impl SummarizeClient for ReqwestClient {
    async fn summarize(&self, request: &UploadRequest) -> Result<AnalysisResult, RequestError> {
        let url = self.settings.summarize_url()?;
        log_info!(
            "POST {} file={} media_type={} bytes={}",
            url,
            request.file_name,
            request.media_type,
            request.size()
        );

        let response = self
            .client
            .post(url)
            .multipart(Self::build_form(request)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        log_debug!("summarize responded {} with {} bytes", status, body.len());
        interpret_response(status.as_u16(), status.is_success(), &body)
    }

    async fn fetch_report(&self, report_url: &str) -> Result<ReportFile, RequestError> {
        let url = self.settings.resolve(report_url)?;
        log_info!("GET report {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("server returned {status}"),
            ));
        }

        let max_bytes = self.settings.max_report_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(ReportFile {
            file_name: report_file_name(&url),
            bytes,
        })
    }
}

/// Maps status and body of a summarize response onto a result.
///
/// Non-2xx bodies are parsed only to recover the server's `error` message.
pub fn interpret_response(
    status: u16,
    is_success: bool,
    body: &[u8],
) -> Result<AnalysisResult, RequestError> {
    let parsed = serde_json::from_slice::<SummarizeResponse>(body);

    if !is_success {
        let server_message = parsed.ok().and_then(|envelope| non_blank(envelope.error));
        log_warn!(
            "summarize failed with HTTP {} ({})",
            status,
            server_message.as_deref().unwrap_or("no server message")
        );
        let message = server_message
            .unwrap_or_else(|| format!("{MSG_REJECTED} (HTTP {status})"));
        return Err(RequestError::new(FailureKind::HttpStatus(status), message));
    }

    let envelope = parsed.map_err(|err| {
        RequestError::new(FailureKind::MalformedResponse, MSG_MALFORMED)
            .with_detail(err.to_string())
    })?;

    if !envelope.success {
        let message = non_blank(envelope.error).unwrap_or_else(|| MSG_REJECTED.to_string());
        return Err(RequestError::new(FailureKind::Rejected, message));
    }

    envelope
        .data
        .ok_or_else(|| RequestError::new(FailureKind::MissingData, MSG_NO_DATA))
}

fn non_blank(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

/// Last path segment of the report URL, reduced to a safe file name.
pub fn report_file_name(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    let cleaned: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_REPORT_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> RequestError {
    RequestError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "report is too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    };
    RequestError::new(kind, MSG_TRANSPORT).with_detail(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_may_be_relative_or_absolute() {
        let mut settings = ClientSettings::default();
        assert_eq!(
            settings.summarize_url().unwrap().as_str(),
            "http://127.0.0.1:5001/summarize"
        );

        settings.endpoint = "https://api.example.com/v2/summarize".to_string();
        assert_eq!(
            settings.summarize_url().unwrap().as_str(),
            "https://api.example.com/v2/summarize"
        );
    }

    #[test]
    fn relative_endpoint_keeps_base_path() {
        let mut settings = ClientSettings {
            base_url: "http://host/legal".to_string(),
            ..ClientSettings::default()
        };
        assert_eq!(
            settings.summarize_url().unwrap().as_str(),
            "http://host/legal/summarize"
        );

        settings.base_url = "http://host/legal/".to_string();
        settings.endpoint = "api/summarize".to_string();
        assert_eq!(
            settings.summarize_url().unwrap().as_str(),
            "http://host/legal/api/summarize"
        );
    }

    #[test]
    fn report_links_resolve_against_the_origin() {
        let settings = ClientSettings {
            base_url: "http://host/legal".to_string(),
            ..ClientSettings::default()
        };
        assert_eq!(
            settings.resolve("/reports/r.pdf").unwrap().as_str(),
            "http://host/reports/r.pdf"
        );
    }

    #[test]
    fn report_names_are_sanitized() {
        let url = Url::parse("http://h/reports/legal_summary_report_1.pdf").unwrap();
        assert_eq!(report_file_name(&url), "legal_summary_report_1.pdf");

        let url = Url::parse("http://h/reports/..%2Fetc%2Fpasswd").unwrap();
        assert_eq!(report_file_name(&url), "_2Fetc_2Fpasswd");

        let url = Url::parse("http://h/").unwrap();
        assert_eq!(report_file_name(&url), FALLBACK_REPORT_NAME);
    }

    #[test]
    fn error_status_without_body_uses_fallback() {
        let err = interpret_response(502, false, b"<html>Bad gateway</html>").unwrap_err();
        assert_eq!(err.kind, FailureKind::HttpStatus(502));
        assert_eq!(err.message, "Failed to process document (HTTP 502)");
    }

    #[test]
    fn success_without_data_is_an_error() {
        let err = interpret_response(200, true, br#"{"success": true, "data": null}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MissingData);
        assert_eq!(err.message, MSG_NO_DATA);
    }
}
