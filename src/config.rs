//! Client configuration and resource path layout.

/// Default API root for the hosted service.
pub const DEFAULT_BASE_URL: &str = "https://api.swivel.com/v1";

/// Default full-page size for paged list endpoints.
///
/// The service has shipped with two page sizes over its lifetime: current
/// deployments return up to 1000 records per page, older ones returned 30
/// ([`LEGACY_PAGE_SIZE`]). The threshold is configuration, not a constant
/// baked into the fetch loop.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Full-page size used by older service versions.
pub const LEGACY_PAGE_SIZE: usize = 30;

fn default_user_agent() -> String {
    format!("swivel-client/{}", env!("CARGO_PKG_VERSION"))
}

/// How the fetch loop decides that a paged listing is complete.
///
/// Both signals have been observed in the wild; which one a deployment
/// emits depends on its version, so the strategy is chosen up front rather
/// than guessed per response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Trust a `Content-Range: pages <current>-<reported>/<max>` response
    /// header; the page cursor jumps to the reported page and the fetch
    /// stops once it reaches the reported max. Pages without the header
    /// fall back to page-length inference.
    ContentRange,
    /// A page is the last one iff it holds fewer records than the
    /// configured page size.
    PageLength,
}

/// Configuration for a [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct Config {
    /// API root URL.
    pub base_url: String,
    /// Group (account) number the credentials belong to.
    pub group: u64,
    /// Basic auth user (the account email).
    pub user: String,
    /// Basic auth password.
    pub password: String,
    /// Full-page record count for paged endpoints.
    pub page_size: usize,
    /// Pagination completion strategy.
    pub pagination: Pagination,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent string.
    pub user_agent: String,
    /// Resource path layout.
    pub endpoints: Endpoints,
}

impl Config {
    /// Create a configuration with defaults for everything but the
    /// credentials and group.
    pub fn new(user: impl Into<String>, password: impl Into<String>, group: u64) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            group,
            user: user.into(),
            password: password.into(),
            page_size: DEFAULT_PAGE_SIZE,
            pagination: Pagination::ContentRange,
            timeout_secs: 30,
            user_agent: default_user_agent(),
            endpoints: Endpoints::default(),
        }
    }
}

/// Resource paths for the remote API, relative to the base URL.
///
/// The exact path set is a property of the remote API version, not of the
/// sync logic, so every path the client touches is built here and nowhere
/// else. A future API revision changes this type only.
#[derive(Debug, Clone, Default)]
pub struct Endpoints {}

impl Endpoints {
    /// Chart listing for a group.
    pub fn charts(&self, group: u64) -> String {
        format!("groups/{group}/charts.json")
    }

    /// A single chart within a group.
    pub fn chart(&self, group: u64, chart_id: u64) -> String {
        format!("groups/{group}/charts/{chart_id}.json")
    }

    /// The grid resource owned by a chart.
    pub fn chart_grid(&self, group: u64, chart_id: u64) -> String {
        format!("groups/{group}/charts/{chart_id}/grid.json")
    }

    /// Paged cell listing for a grid.
    pub fn tabular_cells(&self, grid_id: u64) -> String {
        format!("tabulars/{grid_id}/cells.json")
    }

    /// Grid mutation endpoint (save-list PUT target).
    pub fn grid(&self, grid_id: u64) -> String {
        format!("grids/{grid_id}")
    }

    /// Workbook listing for a group.
    pub fn workbooks(&self, group: u64) -> String {
        format!("groups/{group}/workbooks.json")
    }

    /// Sheet listing for a workbook.
    pub fn workbook_sheets(&self, workbook_id: u64) -> String {
        format!("workbooks/{workbook_id}/sheets.json")
    }

    /// Legacy whole-grid chart update endpoint.
    pub fn chart_legacy(&self, chart_id: u64) -> String {
        format!("charts/{chart_id}.json")
    }

    /// Legacy CSV dump of a chart's data.
    pub fn chart_csv(&self, chart_id: u64) -> String {
        format!("charts/{chart_id}.csv")
    }

    /// Legacy CSV dump of a sheet's data.
    pub fn sheet_csv(&self, sheet_id: u64) -> String {
        format!("sheets/{sheet_id}.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("user@example.com", "secret", 1000000);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.pagination, Pagination::ContentRange);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("swivel-client/"));
    }

    #[test]
    fn test_endpoint_paths() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.charts(7), "groups/7/charts.json");
        assert_eq!(endpoints.chart(7, 42), "groups/7/charts/42.json");
        assert_eq!(endpoints.chart_grid(7, 42), "groups/7/charts/42/grid.json");
        assert_eq!(endpoints.tabular_cells(9), "tabulars/9/cells.json");
        assert_eq!(endpoints.grid(9), "grids/9");
        assert_eq!(endpoints.workbooks(7), "groups/7/workbooks.json");
        assert_eq!(endpoints.workbook_sheets(3), "workbooks/3/sheets.json");
        assert_eq!(endpoints.chart_csv(42), "charts/42.csv");
        assert_eq!(endpoints.sheet_csv(5), "sheets/5.csv");
    }
}
