//! Legacy whole-grid CSV protocol (API v1).
//!
//! Before the cell-level save list existed, chart data moved as one CSV
//! blob: reads fetched `charts/{id}.csv`, writes replaced the entire data
//! set via a `<chart><data>...</data></chart>` PUT. Rows here are plain
//! dense `Vec<String>` with no hole concept. This path never mixes with the
//! save-list path; it exists for deployments still on the old protocol.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::xml::encode_xml;

const XML: &str = "text/xml";

/// Serialize rows as CSV the way the service expects (no header row).
pub(crate) fn rows_to_csv(rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| Error::Io(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Io(e.to_string()))
}

/// Parse a CSV response body into rows.
pub(crate) fn csv_to_rows(path: &str, data: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Decode {
            path: path.to_string(),
            body: data.to_string(),
            detail: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

impl Client {
    /// Fetch a chart's data as CSV rows.
    pub fn chart_rows(&self, chart_id: u64) -> Result<Vec<Vec<String>>> {
        let path = self.config.endpoints.chart_csv(chart_id);
        let response = self.transport.get(&path, &[])?;
        if !response.is_success() {
            return Err(Error::Remote {
                status: response.status,
                path,
                body: response.body,
            });
        }
        csv_to_rows(&path, &response.body)
    }

    /// Fetch a sheet's data as CSV rows.
    pub fn sheet_rows(&self, sheet_id: u64) -> Result<Vec<Vec<String>>> {
        let path = self.config.endpoints.sheet_csv(sheet_id);
        let response = self.transport.get(&path, &[])?;
        if !response.is_success() {
            return Err(Error::Remote {
                status: response.status,
                path,
                body: response.body,
            });
        }
        csv_to_rows(&path, &response.body)
    }

    /// Replace a chart's entire data set.
    pub fn set_chart_rows(&self, chart_id: u64, rows: &[Vec<String>]) -> Result<()> {
        self.put_chart_data(chart_id, rows_to_csv(rows)?, false)
    }

    /// Append rows to a chart's data set.
    pub fn append_chart_rows(&self, chart_id: u64, rows: &[Vec<String>]) -> Result<()> {
        self.put_chart_data(chart_id, rows_to_csv(rows)?, true)
    }

    /// Clear a chart's data set.
    pub fn clear_chart_rows(&self, chart_id: u64) -> Result<()> {
        self.put_chart_data(chart_id, String::new(), false)
    }

    fn put_chart_data(&self, chart_id: u64, csv: String, append: bool) -> Result<()> {
        let path = self.config.endpoints.chart_legacy(chart_id);
        let mut fields = vec![("data", csv)];
        if append {
            fields.push(("mode", "append".to_string()));
        }
        let body = encode_xml("chart", &fields);
        let response = self.transport.put(&path, body, XML)?;
        if !response.is_success() {
            return Err(Error::Remote {
                status: response.status,
                path,
                body: response.body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_to_csv() {
        let rows = vec![
            vec!["Monthly Summary".to_string(), "New Posts".to_string()],
            vec!["March 2009".to_string(), "12133".to_string()],
        ];
        let csv = rows_to_csv(&rows).unwrap();
        assert_eq!(csv, "Monthly Summary,New Posts\nMarch 2009,12133\n");
    }

    #[test]
    fn test_rows_to_csv_quotes_embedded_commas() {
        let rows = vec![vec!["a,b".to_string(), "c".to_string()]];
        assert_eq!(rows_to_csv(&rows).unwrap(), "\"a,b\",c\n");
    }

    #[test]
    fn test_csv_to_rows() {
        let rows = csv_to_rows("charts/5.csv", "a,b\n1,2\n").unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["1".to_string(), "2".to_string()],
            ]
        );
    }

    #[test]
    fn test_csv_to_rows_allows_ragged_rows() {
        let rows = csv_to_rows("charts/5.csv", "a,b,c\nd\n").unwrap();
        assert_eq!(rows[1], vec!["d".to_string()]);
    }

    #[test]
    fn test_csv_round_trip() {
        let rows = vec![
            vec!["x".to_string(), "1".to_string()],
            vec!["y".to_string(), "2".to_string()],
        ];
        let csv = rows_to_csv(&rows).unwrap();
        assert_eq!(csv_to_rows("charts/1.csv", &csv).unwrap(), rows);
    }
}
