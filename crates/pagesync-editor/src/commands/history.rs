use std::fmt::Write;

use pagesync_confluence::{ContentApi, HistoryUser, Page};

use crate::error::CommandError;
use crate::host::EditorHost;

/// Show who created and who last updated the attached page.
pub(crate) fn history(
    api: &dyn ContentApi,
    page: &Page,
    host: &mut dyn EditorHost,
) -> Result<(), CommandError> {
    let history = api
        .get_content_history(&page.id)
        .map_err(CommandError::http("get history"))?;

    let created_by = history.created_by.as_ref().map_or("unknown", HistoryUser::name);
    let created = history.created_date.as_deref().unwrap_or("unknown date");
    let mut summary = format!("\"{}\" created by {created_by} on {created}", page.title);
    if let Some(last) = &history.last_updated {
        let by = last.by.as_ref().map_or("unknown", HistoryUser::name);
        let when = last.when.as_deref().unwrap_or("unknown date");
        let _ = write!(summary, ", version {} by {by} on {when}", last.number);
    }
    host.status_message(&summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;
    use pagesync_confluence::MockContentApi;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_history_summary() {
        let api = MockContentApi::new().with_page("5", "TST", "Notes", "<p>x</p>", 3);
        let page = api.page("5").unwrap();
        let mut host = RecordingHost::default();

        history(&api, &page, &mut host).unwrap();

        assert_eq!(
            host.statuses(),
            vec![
                "\"Notes\" created by Mock User on 2024-01-01T00:00:00.000Z, \
                 version 3 by Mock User on 2024-01-02T00:00:00.000Z"
            ]
        );
    }
}
