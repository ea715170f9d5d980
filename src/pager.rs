//! Paged list fetching.
//!
//! List endpoints (cells, charts, workbooks, sheets) return at most one
//! page of records per request. [`fetch_paged`] assembles the complete
//! listing, advancing a 1-based page cursor until the configured
//! [`Pagination`] strategy signals completion. A fetch either completes
//! fully or fails; partial results are never returned.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::config::{Endpoints, Pagination};
use crate::error::{Error, Result};
use crate::grid::{Cell, RawCell};
use crate::transport::Transport;

static CONTENT_RANGE: OnceLock<Regex> = OnceLock::new();

/// Parse a `pages <current>-<reported>/<max>` header into
/// `(reported, max)`.
pub(crate) fn parse_content_range(header: &str) -> Option<(u64, u64)> {
    let re = CONTENT_RANGE
        .get_or_init(|| Regex::new(r"pages \d+-(\d+)/(\d+)").expect("pagination pattern"));
    let caps = re.captures(header)?;
    let reported = caps.get(1)?.as_str().parse().ok()?;
    let max = caps.get(2)?.as_str().parse().ok()?;
    Some((reported, max))
}

/// Fetch every page of a list endpoint and concatenate the records in the
/// order received.
///
/// An empty first page terminates immediately with an empty result. A body
/// that fails to decode aborts the whole fetch with [`Error::Decode`]
/// carrying the raw body and the request path.
pub(crate) fn fetch_paged<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
    pagination: Pagination,
    page_size: usize,
) -> Result<Vec<T>> {
    let mut records = Vec::new();
    let mut page: u64 = 1;

    loop {
        let response = transport.get(path, &[("page", page.to_string())])?;
        if !response.is_success() {
            return Err(Error::Remote {
                status: response.status,
                path: path.to_string(),
                body: response.body,
            });
        }

        let batch: Vec<T> = serde_json::from_str(&response.body).map_err(|e| Error::Decode {
            path: path.to_string(),
            body: response.body.clone(),
            detail: e.to_string(),
        })?;
        let count = batch.len();
        records.extend(batch);

        let done = match pagination {
            Pagination::PageLength => count < page_size,
            Pagination::ContentRange => {
                match response
                    .content_range
                    .as_deref()
                    .and_then(parse_content_range)
                {
                    Some((reported, max)) => {
                        // The cursor jumps to the page the service says it
                        // served; requests for pages past the end would
                        // otherwise loop.
                        page = reported;
                        reported >= max
                    }
                    None => count < page_size,
                }
            }
        };
        if done {
            return Ok(records);
        }
        page += 1;
    }
}

/// Fetch the complete cell list for a grid, validating each record's
/// indices at the decode boundary.
pub fn fetch_cells(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    grid_id: u64,
    pagination: Pagination,
    page_size: usize,
) -> Result<Vec<Cell>> {
    let path = endpoints.tabular_cells(grid_id);
    let raw: Vec<RawCell> = fetch_paged(transport, &path, pagination, page_size)?;
    raw.into_iter().map(Cell::from_raw).collect()
}
