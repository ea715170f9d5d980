//! # swivel-client
//!
//! Rust client for the Swivel charting API: chart and workbook management
//! plus grid synchronization between the service's sparse cell listings and
//! dense local grids.
//!
//! ## Features
//!
//! - **Charts and workbooks**: list, create, and update charts; list
//!   workbooks and their sheets
//! - **Grid reads**: transparent pagination of the cell endpoint and
//!   sparse-to-dense conversion into a rectangular [`Grid`]
//! - **Grid writes**: cell-level diffs submitted as an ordered save list
//!   ([`SaveOp`]) - edits, row insertion, row removal
//! - **Legacy CSV protocol**: whole-grid reads and replaces for older
//!   deployments
//! - **Authentication**: HTTP Basic credentials attached by the transport
//!
//! ## Example
//!
//! ```no_run
//! use swivel_client::{edit_list, Client, Grid, GridIdCache};
//!
//! fn main() -> swivel_client::Result<()> {
//!     let client = Client::builder()
//!         .user("email@address.com")
//!         .password("secret")
//!         .group(1000000)
//!         .build()?;
//!
//!     let mut cache = GridIdCache::new();
//!     for chart in client.charts()? {
//!         let grid = client.read_grid(&chart, &mut cache)?;
//!         println!("{}: {} x {}", chart.name, grid.rows(), grid.columns());
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod grid;
mod legacy;
mod models;
mod pager;
mod save_list;
mod transport;
mod xml;

pub use client::{Client, ClientBuilder, GridIdCache};
pub use config::{
    Config, Endpoints, Pagination, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, LEGACY_PAGE_SIZE,
};
pub use error::{Error, Result};
pub use grid::{Cell, CellValue, Grid};
pub use models::{Chart, ChartAttrs, GridInfo, Sheet, Workbook};
pub use pager::fetch_cells;
pub use save_list::{edit_list, encode_save_list, insert_rows, remove_rows, SaveOp};
pub use transport::{HttpTransport, Transport, TransportResponse};
