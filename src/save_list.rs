//! Save-list construction: the cell-level diff payload that mutates a
//! remote grid.
//!
//! A save list is an ordered sequence of operations; the service applies
//! them in order, so builders here return `Vec<SaveOp>` fragments the
//! caller concatenates in the order it wants them applied.

use serde_json::{json, Map, Value};

use crate::grid::{CellValue, Grid};

/// One mutation within a save list.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOp {
    /// Set individual cells, keyed by `"<column>,<row>"` position.
    Edit {
        /// Position-keyed cell values, in the order they were collected.
        cells: Vec<(String, Option<CellValue>)>,
    },
    /// Remove the inclusive row-index range `start..=end`.
    RemoveRows {
        /// First row to remove.
        start: u32,
        /// Last row to remove (inclusive).
        end: u32,
    },
    /// Insert `count` blank rows before `position`.
    InsertRows {
        /// Row index to insert at.
        position: u32,
        /// Number of rows to insert.
        count: u32,
    },
}

impl SaveOp {
    /// Wire form: a `{"action": ..., ...}` JSON object.
    pub(crate) fn to_wire(&self) -> Value {
        match self {
            Self::Edit { cells } => {
                let mut map = Map::new();
                for (key, value) in cells {
                    map.insert(key.clone(), json!({ "v": value }));
                }
                json!({ "action": "edit", "cells": Value::Object(map) })
            }
            Self::RemoveRows { start, end } => {
                json!({ "action": "remove_rows", "start": start, "end": end })
            }
            Self::InsertRows { position, count } => {
                json!({ "action": "insert_rows", "position": position, "count": count })
            }
        }
    }
}

/// The position key the service uses for cell edits: `"<column>,<row>"`.
pub fn position_key(column: u32, row: u32) -> String {
    format!("{column},{row}")
}

/// Build the edit operations that reproduce every present cell of `grid`.
///
/// Holes are skipped, not sent as explicit nulls. Returns a single `Edit`
/// op covering all present cells in row-major order, or nothing for a grid
/// with no present cells.
pub fn edit_list(grid: &Grid) -> Vec<SaveOp> {
    let mut cells = Vec::new();
    for (r, row) in grid.iter_rows().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if let Some(v) = value {
                cells.push((position_key(c as u32, r as u32), Some(v.clone())));
            }
        }
    }
    if cells.is_empty() {
        Vec::new()
    } else {
        vec![SaveOp::Edit { cells }]
    }
}

/// Build the operation removing the first `row_count` rows.
///
/// Zero rows is a no-op and produces no operation at all; the service must
/// never see a degenerate range.
pub fn remove_rows(row_count: u32) -> Vec<SaveOp> {
    if row_count == 0 {
        Vec::new()
    } else {
        vec![SaveOp::RemoveRows {
            start: 0,
            end: row_count - 1,
        }]
    }
}

/// Build the operation inserting `count` rows before `position`.
pub fn insert_rows(position: u32, count: u32) -> Vec<SaveOp> {
    vec![SaveOp::InsertRows { position, count }]
}

/// Encode a save list as its wire JSON array.
pub fn encode_save_list(operations: &[SaveOp]) -> Value {
    Value::Array(operations.iter().map(SaveOp::to_wire).collect())
}
