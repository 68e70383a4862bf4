use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::model::{Report, ReportDraft, ReportFormat, ReportPatch};

pub async fn fetch_reports(client: &ApiClient) -> ClientResult<Vec<Report>> {
    client.get_json("/reports").await
}

pub async fn fetch_report(client: &ApiClient, id: &str) -> ClientResult<Report> {
    client.get_json(&format!("/reports/{id}")).await
}

pub async fn create_report(client: &ApiClient, draft: &ReportDraft) -> ClientResult<Report> {
    client.post_json("/reports", draft).await
}

pub async fn update_report(
    client: &ApiClient,
    id: &str,
    patch: &ReportPatch,
) -> ClientResult<Report> {
    client.put_json(&format!("/reports/{id}"), patch).await
}

pub async fn delete_report(client: &ApiClient, id: &str) -> ClientResult<()> {
    client.delete(&format!("/reports/{id}")).await
}

/// Returns the exported document bytes; writing them somewhere useful is the
/// caller's concern.
pub async fn export_report(
    client: &ApiClient,
    id: &str,
    format: ReportFormat,
) -> ClientResult<Vec<u8>> {
    client
        .get_bytes(
            &format!("/reports/{id}/export"),
            &[("format", format.as_str())],
        )
        .await
}
