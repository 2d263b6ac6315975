use crate::view_model::{ArticleRow, DownloadControl, ListRow, NotificationView, TierTab};
use crate::AppViewModel;

/// Display surface driven by [`present`].
///
/// Implementations only draw what they are handed; all decisions about
/// placeholders, tiers and visibility are already made in the view model.
pub trait View {
    /// `Some(file_name)` shows the loading indicator, `None` hides it.
    fn set_loading(&mut self, loading: Option<&str>);
    fn set_upload_enabled(&mut self, enabled: bool);
    fn render_summary(&mut self, text: &str);
    fn render_dates(&mut self, rows: &[ListRow]);
    fn render_importance(&mut self, tabs: &[TierTab], rows: &[ListRow]);
    /// `None` when the result carries no article suggestions.
    fn render_articles(&mut self, rows: Option<&[ArticleRow]>);
    fn render_download(&mut self, control: &DownloadControl);
    fn set_results_visible(&mut self, visible: bool);
    fn show_notification(&mut self, notification: Option<&NotificationView>);
}

/// Pushes a whole view model through a [`View`].
pub fn present(view: &mut dyn View, model: &AppViewModel) {
    view.set_loading(model.loading.as_deref());
    view.set_upload_enabled(model.upload_enabled);
    match &model.results {
        Some(results) => {
            view.render_summary(&results.summary);
            view.render_dates(&results.dates);
            view.render_importance(&results.tabs, &results.importance);
            view.render_articles(results.articles.as_deref());
            view.render_download(&results.download);
            view.set_results_visible(model.results_visible);
        }
        None => {
            view.render_download(&DownloadControl::default());
            view.set_results_visible(false);
        }
    }
    view.show_notification(model.notification.as_ref());
}
