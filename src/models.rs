//! Typed response models for the JSON read side of the API.
//!
//! Everything the service returns is decoded into one of these structs at
//! the response boundary; a shape mismatch is a decode failure, never a
//! half-populated value.

use serde::Deserialize;

/// A chart resource.
///
/// A chart owns at most one grid; `grid_id` is a back-reference the listing
/// endpoint may or may not populate. When absent it is resolved lazily via
/// [`Client::resolve_grid_id`](crate::Client::resolve_grid_id).
#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    /// Chart identifier.
    pub id: u64,
    /// Short name.
    #[serde(default)]
    pub name: String,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Identifier of the backing grid, when the service included it.
    #[serde(default)]
    pub grid_id: Option<u64>,
}

/// A workbook resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Workbook {
    /// Workbook identifier.
    pub id: u64,
    /// Workbook name.
    #[serde(default)]
    pub name: String,
}

/// A sheet within a workbook.
#[derive(Debug, Clone, Deserialize)]
pub struct Sheet {
    /// Sheet identifier.
    pub id: u64,
    /// Sheet name.
    #[serde(default)]
    pub name: String,
}

/// The grid resource behind a chart, as returned by the chart-grid lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct GridInfo {
    /// Grid (tabular) identifier, distinct from the owning chart's id.
    pub id: u64,
    /// Row count, when reported.
    #[serde(default)]
    pub rows: Option<u64>,
    /// Column count, when reported.
    #[serde(default)]
    pub columns: Option<u64>,
}

/// Writable chart attributes for create and update calls.
///
/// Unset fields are omitted from the XML body entirely.
#[derive(Debug, Clone, Default)]
pub struct ChartAttrs {
    /// Short name.
    pub name: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

impl ChartAttrs {
    /// Attributes with just a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The set fields as `(tag, value)` pairs for the XML body.
    pub(crate) fn xml_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(title) = &self.title {
            fields.push(("title", title.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        fields
    }
}
