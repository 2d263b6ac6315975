use crate::{
    AnalysisResult, AppState, ControllerStage, DateEntry, Importance, NotificationId,
    NotificationKind, SubmissionPhase, SuggestedArticle, Tier,
};

pub const NO_SUMMARY: &str = "No summary available";
pub const NO_DATES: &str = "No important dates found";
pub const NO_IMPORTANCE_DATA: &str = "No importance data available";
pub const NO_TIER_ITEMS: &str = "No items in this category";
pub const NO_ARTICLES: &str = "No relevant law articles found";

pub const ICON_CALENDAR: &str = "calendar";
pub const ICON_INFO: &str = "info-circle";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub stage: ControllerStage,
    /// File name of the in-flight submission; the loading indicator is up while set.
    pub loading: Option<String>,
    pub upload_enabled: bool,
    pub results: Option<ResultsView>,
    pub results_visible: bool,
    pub notification: Option<NotificationView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub summary: String,
    pub dates: Vec<ListRow>,
    pub tabs: Vec<TierTab>,
    pub importance: Vec<ListRow>,
    /// `None` when the response carried no article suggestions at all.
    pub articles: Option<Vec<ArticleRow>>,
    pub download: DownloadControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub icon: &'static str,
    pub text: String,
}

impl ListRow {
    fn new(icon: &'static str, text: impl Into<String>) -> Self {
        Self {
            icon,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTab {
    pub tier: Tier,
    pub label: &'static str,
    pub active: bool,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadControl {
    pub enabled: bool,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub icon: &'static str,
    pub message: String,
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let loading = match state.phase() {
        SubmissionPhase::Submitting { file_name, .. } => Some(file_name.clone()),
        SubmissionPhase::Idle => None,
    };
    let results = state
        .current()
        .map(|result| build_results(result, state.selected_tier()));
    AppViewModel {
        stage: state.stage(),
        upload_enabled: loading.is_none(),
        results_visible: results.is_some() && loading.is_none(),
        loading,
        results,
        notification: state.notification().map(|n| NotificationView {
            id: n.id,
            kind: n.kind,
            icon: n.kind.icon(),
            message: n.message.clone(),
        }),
    }
}

pub fn build_results(result: &AnalysisResult, selected: Tier) -> ResultsView {
    ResultsView {
        summary: render_summary(result),
        dates: render_dates(&result.dates),
        tabs: render_tabs(result.importance.as_ref(), selected),
        importance: render_importance(result.importance.as_ref(), selected),
        articles: result.suggested_articles.as_deref().map(render_articles),
        download: render_download(result.report_url.as_deref()),
    }
}

pub fn render_summary(result: &AnalysisResult) -> String {
    match result.summary.as_deref() {
        Some(summary) if !summary.trim().is_empty() => summary.to_string(),
        _ => NO_SUMMARY.to_string(),
    }
}

/// One row per date, or exactly one placeholder row.
pub fn render_dates(dates: &[DateEntry]) -> Vec<ListRow> {
    if dates.is_empty() {
        return vec![ListRow::new(ICON_INFO, NO_DATES)];
    }
    dates
        .iter()
        .map(|entry| ListRow::new(ICON_CALENDAR, entry.display_text()))
        .collect()
}

pub fn render_tabs(importance: Option<&Importance>, selected: Tier) -> Vec<TierTab> {
    Tier::ALL
        .iter()
        .map(|&tier| TierTab {
            tier,
            label: tier.label(),
            active: tier == selected,
            count: importance.map_or(0, |imp| imp.items(tier).len()),
        })
        .collect()
}

pub fn render_importance(importance: Option<&Importance>, selected: Tier) -> Vec<ListRow> {
    let Some(importance) = importance else {
        return vec![ListRow::new(ICON_INFO, NO_IMPORTANCE_DATA)];
    };
    let items = importance.items(selected);
    if items.is_empty() {
        return vec![ListRow::new(ICON_INFO, NO_TIER_ITEMS)];
    }
    items
        .iter()
        .map(|item| ListRow::new(selected.icon(), item.clone()))
        .collect()
}

pub fn render_articles(articles: &[SuggestedArticle]) -> Vec<ArticleRow> {
    if articles.is_empty() {
        return vec![ArticleRow {
            title: NO_ARTICLES.to_string(),
            description: None,
        }];
    }
    articles
        .iter()
        .map(|article| {
            let title = match (article.article.trim(), article.title.trim()) {
                ("", title) => title.to_string(),
                (id, "") => id.to_string(),
                (id, title) => format!("{id} - {title}"),
            };
            let description = Some(article.description.trim())
                .filter(|d| !d.is_empty())
                .map(ToOwned::to_owned);
            ArticleRow { title, description }
        })
        .collect()
}

pub fn render_download(report_url: Option<&str>) -> DownloadControl {
    match report_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(_) => DownloadControl {
            enabled: true,
            url: report_url.map(ToOwned::to_owned),
        },
        None => DownloadControl::default(),
    }
}
