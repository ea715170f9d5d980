//! The Swivel API client.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::{Config, Pagination};
use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};
use crate::models::{Chart, ChartAttrs, GridInfo, Sheet, Workbook};
use crate::pager::{fetch_cells, fetch_paged};
use crate::save_list::{edit_list, encode_save_list, SaveOp};
use crate::transport::{HttpTransport, Transport, TransportResponse};
use crate::xml::encode_xml;

const XML: &str = "text/xml";
const JSON: &str = "application/json";

/// Caller-owned cache mapping chart ids to grid ids.
///
/// A chart's grid id never changes, so callers keep one of these alive for
/// as long as they keep re-using chart handles; the client itself holds no
/// cross-call state.
#[derive(Debug, Clone, Default)]
pub struct GridIdCache {
    ids: HashMap<u64, u64>,
}

impl GridIdCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached grid id for a chart, if any.
    pub fn get(&self, chart_id: u64) -> Option<u64> {
        self.ids.get(&chart_id).copied()
    }

    /// Record a chart-to-grid mapping.
    pub fn insert(&mut self, chart_id: u64, grid_id: u64) {
        self.ids.insert(chart_id, grid_id);
    }
}

/// Builder for [`Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    user: Option<String>,
    password: Option<String>,
    group: Option<u64>,
    base_url: Option<String>,
    page_size: Option<usize>,
    pagination: Option<Pagination>,
    timeout_secs: Option<u64>,
}

impl ClientBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Basic auth user (account email).
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Basic auth password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Group (account) number.
    #[must_use]
    pub fn group(mut self, group: u64) -> Self {
        self.group = Some(group);
        self
    }

    /// Override the API root URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the full-page size.
    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Choose the pagination completion strategy.
    #[must_use]
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Request timeout in seconds.
    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let user = self
            .user
            .ok_or_else(|| Error::InvalidConfig("user is required".to_string()))?;
        let password = self
            .password
            .ok_or_else(|| Error::InvalidConfig("password is required".to_string()))?;
        let group = self
            .group
            .ok_or_else(|| Error::InvalidConfig("group is required".to_string()))?;

        let mut config = Config::new(user, password, group);
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(pagination) = self.pagination {
            config.pagination = pagination;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        Client::new(config)
    }
}

/// Client for the Swivel charting API.
///
/// All calls are synchronous and blocking; each operation completes fully
/// before the next begins. The transport is injected, never ambient, so a
/// test or an embedding application can supply its own.
///
/// # Example
///
/// ```no_run
/// use swivel_client::{Client, ChartAttrs, GridIdCache};
///
/// fn main() -> swivel_client::Result<()> {
///     let client = Client::builder()
///         .user("email@address.com")
///         .password("secret")
///         .group(1000000)
///         .build()?;
///
///     let chart = client.create_chart(&ChartAttrs::named("API Chart"))?;
///     let mut cache = GridIdCache::new();
///     let grid = client.read_grid(&chart, &mut cache)?;
///     println!("{} x {}", grid.rows(), grid.columns());
///     Ok(())
/// }
/// ```
pub struct Client {
    pub(crate) config: Config,
    pub(crate) transport: Box<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Start a [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Build a client with the default HTTP transport.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            config,
            transport: Box::new(transport),
        })
    }

    /// Build a client around a caller-supplied transport.
    pub fn with_transport(config: Config, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ------------------------------------------------------------------
    // Charts, workbooks, sheets
    // ------------------------------------------------------------------

    /// List every chart in the configured group.
    pub fn charts(&self) -> Result<Vec<Chart>> {
        self.list(&self.config.endpoints.charts(self.config.group))
    }

    /// Create a chart with the given attributes.
    pub fn create_chart(&self, attrs: &ChartAttrs) -> Result<Chart> {
        let path = self.config.endpoints.charts(self.config.group);
        let body = encode_xml("chart", &attrs.xml_fields());
        let response = self.transport.post(&path, body, XML)?;
        self.decode(&path, response)
    }

    /// Update a chart's attributes.
    ///
    /// The service may answer with an acknowledgment document or with an
    /// empty body; an empty body is success with no value.
    pub fn update_chart(&self, chart_id: u64, attrs: &ChartAttrs) -> Result<Option<Value>> {
        let path = self.config.endpoints.chart(self.config.group, chart_id);
        let body = encode_xml("chart", &attrs.xml_fields());
        let response = self.transport.put(&path, body, XML)?;
        ack(&path, response)
    }

    /// List every workbook in the configured group.
    pub fn workbooks(&self) -> Result<Vec<Workbook>> {
        self.list(&self.config.endpoints.workbooks(self.config.group))
    }

    /// List the sheets of a workbook.
    pub fn workbook_sheets(&self, workbook_id: u64) -> Result<Vec<Sheet>> {
        self.list(&self.config.endpoints.workbook_sheets(workbook_id))
    }

    // ------------------------------------------------------------------
    // Grid synchronization
    // ------------------------------------------------------------------

    /// Resolve the grid id backing a chart.
    ///
    /// Consults, in order: the chart's own back-reference, the supplied
    /// cache, and finally the chart-grid lookup endpoint. The result is
    /// recorded in the cache either way.
    pub fn resolve_grid_id(&self, chart: &Chart, cache: &mut GridIdCache) -> Result<u64> {
        if let Some(grid_id) = chart.grid_id {
            cache.insert(chart.id, grid_id);
            return Ok(grid_id);
        }
        if let Some(grid_id) = cache.get(chart.id) {
            return Ok(grid_id);
        }
        let path = self.config.endpoints.chart_grid(self.config.group, chart.id);
        let response = self.transport.get(&path, &[])?;
        let info: GridInfo = self.decode(&path, response)?;
        cache.insert(chart.id, info.id);
        Ok(info.id)
    }

    /// Fetch the complete cell list for a grid, across pages.
    pub fn cells(&self, grid_id: u64) -> Result<Vec<Cell>> {
        fetch_cells(
            self.transport.as_ref(),
            &self.config.endpoints,
            grid_id,
            self.config.pagination,
            self.config.page_size,
        )
    }

    /// Fetch a chart's grid as a dense rectangular snapshot.
    pub fn read_grid(&self, chart: &Chart, cache: &mut GridIdCache) -> Result<Grid> {
        let grid_id = self.resolve_grid_id(chart, cache)?;
        let cells = self.cells(grid_id)?;
        Ok(Grid::from_cells(&cells))
    }

    /// Submit a save list against a grid.
    ///
    /// Operations are applied by the service in the order given. An empty
    /// operation list is a local no-op: nothing is sent.
    pub fn submit_save_list(&self, grid_id: u64, operations: &[SaveOp]) -> Result<Option<Value>> {
        if operations.is_empty() {
            return Ok(None);
        }
        let path = self.config.endpoints.grid(grid_id);
        let body = json!({ "tabular": { "save_list": encode_save_list(operations) } }).to_string();
        let response = self.transport.put(&path, body, JSON)?;
        ack(&path, response)
    }

    /// Push every present cell of a local grid to the remote grid.
    pub fn write_grid(&self, grid_id: u64, grid: &Grid) -> Result<Option<Value>> {
        self.submit_save_list(grid_id, &edit_list(grid))
    }

    // ------------------------------------------------------------------
    // Shared plumbing
    // ------------------------------------------------------------------

    fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        fetch_paged(
            self.transport.as_ref(),
            path,
            self.config.pagination,
            self.config.page_size,
        )
    }

    pub(crate) fn decode<T: DeserializeOwned>(
        &self,
        path: &str,
        response: TransportResponse,
    ) -> Result<T> {
        if !response.is_success() {
            return Err(Error::Remote {
                status: response.status,
                path: path.to_string(),
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| Error::Decode {
            path: path.to_string(),
            body: response.body,
            detail: e.to_string(),
        })
    }
}

/// Interpret a write acknowledgment: empty body means success with no
/// value; a non-empty body must decode as JSON or the whole response is
/// treated as a remote failure.
fn ack(path: &str, response: TransportResponse) -> Result<Option<Value>> {
    if !response.is_success() {
        return Err(Error::Remote {
            status: response.status,
            path: path.to_string(),
            body: response.body,
        });
    }
    if response.body.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(Error::Remote {
            status: response.status,
            path: path.to_string(),
            body: response.body,
        }),
    }
}
