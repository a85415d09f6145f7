//! Guide generation request.

use serde_json::Value;
use tracing::{info, warn};

use super::{BusyGuard, GuideClient};
use crate::error::GuideError;
use crate::transport::{HttpResponse, Transport};
use crate::types::{ErrorResponse, GuideResponse, GuideResult};

impl<T: Transport> GuideClient<T> {
    /// Request a generated guide for `table_name`.
    ///
    /// Issues exactly one request and never retries. The name is trimmed; an
    /// empty name fails with [`GuideError::EmptyTableName`] before any request.
    pub async fn fetch_guide(&self, table_name: &str) -> Result<GuideResult, GuideError> {
        let table = table_name.trim();
        if table.is_empty() {
            return Err(GuideError::EmptyTableName);
        }

        let url = self.guide_url(table);
        info!("Requesting guide for {}", table);

        let response = {
            let _busy = BusyGuard::new(&self.in_flight);
            self.transport.get(&url).await
        };
        let response = response.map_err(|e| {
            warn!("Guide request for {} failed: {}", table, e);
            GuideError::Unreachable(e)
        })?;

        if !response.is_success() {
            let err = status_error(&response);
            warn!(
                "Guide request for {} returned {}: {}",
                table, response.status, err
            );
            return Err(err);
        }

        let result = parse_guide(table, &response.body)?;
        info!(
            "Received guide for {} ({} bytes)",
            result.table,
            result.guide.len()
        );
        Ok(result)
    }
}

/// Build the error for a non-success response.
///
/// Uses the body's `detail` string when there is one. An unparseable body
/// falls back to the status line.
fn status_error(response: &HttpResponse) -> GuideError {
    let detail = serde_json::from_slice::<ErrorResponse>(&response.body)
        .ok()
        .and_then(|body| body.detail)
        .and_then(non_empty_string);

    let message = detail.unwrap_or_else(|| {
        if response.reason.is_empty() {
            format!("HTTP {}", response.status)
        } else {
            format!("HTTP {}: {}", response.status, response.reason)
        }
    });

    GuideError::Http {
        status: response.status,
        message,
    }
}

/// Validate a success body into a [`GuideResult`].
fn parse_guide(requested: &str, body: &[u8]) -> Result<GuideResult, GuideError> {
    let payload: GuideResponse = serde_json::from_slice(body).map_err(|e| {
        warn!("Guide response for {} is not valid JSON: {}", requested, e);
        GuideError::InvalidResponse
    })?;

    let Some(guide) = payload.guide.and_then(non_empty_string) else {
        warn!("Guide response for {} has no guide content", requested);
        return Err(GuideError::InvalidResponse);
    };

    let table = payload
        .table
        .and_then(non_empty_string)
        .unwrap_or_else(|| requested.to_owned());

    Ok(GuideResult { table, guide })
}

fn non_empty_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}
