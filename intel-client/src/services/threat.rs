use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::model::{SearchFilters, ThreatFeed, ThreatIndicator, VisualizationData};

pub async fn fetch_feeds(client: &ApiClient) -> ClientResult<Vec<ThreatFeed>> {
    client.get_json("/feeds").await
}

pub async fn fetch_feed(client: &ApiClient, id: &str) -> ClientResult<ThreatFeed> {
    client.get_json(&format!("/feeds/{id}")).await
}

/// Posts the filter set exactly as given; merging a search term into the
/// filters is the caller's concern.
pub async fn search_indicators(
    client: &ApiClient,
    filters: &SearchFilters,
) -> ClientResult<Vec<ThreatIndicator>> {
    client.post_json("/indicators/search", filters).await
}

pub async fn fetch_indicator(client: &ApiClient, id: &str) -> ClientResult<ThreatIndicator> {
    client.get_json(&format!("/indicators/{id}")).await
}

pub async fn fetch_related(client: &ApiClient, id: &str) -> ClientResult<Vec<ThreatIndicator>> {
    client.get_json(&format!("/indicators/{id}/related")).await
}

pub async fn fetch_visualization_data(
    client: &ApiClient,
    filters: &SearchFilters,
) -> ClientResult<VisualizationData> {
    client.post_json("/visualization", filters).await
}
