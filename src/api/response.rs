use log::debug;

use crate::api::models::{Package, SearchResponse};
use crate::api::query::SearchRequest;
use crate::error::{NixSearchError, Result};

/// Error tag the backend uses when a channel's index does not exist.
const INDEX_NOT_FOUND: &str = "index_not_found_exception";

/// Classify a raw backend response into packages or a typed failure.
///
/// The body is parsed before the status code is inspected, so a failure
/// body carrying a structured error yields that error instead of a generic
/// status complaint. On success the hits are returned in response order;
/// the query payload already fixed the sort, so no reordering happens here.
pub fn interpret(status: u16, body: &str, request: &SearchRequest) -> Result<Vec<Package>> {
    let envelope: SearchResponse = serde_json::from_str(body).map_err(|e| {
        debug!("Failed to parse search response: {e}");
        NixSearchError::MalformedResponse(format!(
            "response is not the expected JSON envelope: {e}"
        ))
    })?;

    if status != 200 {
        let Some(error) = envelope.error else {
            return Err(NixSearchError::BackendUnexpected {
                status,
                body: body.to_string(),
            });
        };

        if error.kind == INDEX_NOT_FOUND {
            return Err(NixSearchError::ChannelNotFound {
                channel: request.channel.clone(),
                index: error.resource_id.unwrap_or_default(),
                status,
            });
        }

        return Err(NixSearchError::BackendReported(error.reason));
    }

    debug!("Search returned {} hits", envelope.hits.hits.len());
    Ok(envelope
        .hits
        .hits
        .into_iter()
        .map(|hit| hit.package)
        .collect())
}
