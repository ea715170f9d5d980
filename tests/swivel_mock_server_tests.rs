//! Integration tests against a mock HTTP server.
//!
//! These exercise the full request path (auth header, paths, pagination,
//! wire bodies) without touching the real service.
//!
//! Run with: cargo test --test swivel_mock_server_tests

#![allow(clippy::unwrap_used)]

use mockito::Matcher;
use serde_json::json;
use swivel_client::{
    edit_list, insert_rows, Cell, ChartAttrs, Client, Error, Grid, GridIdCache, Pagination,
};

/// Basic credentials `user:pass`, as the service sees them.
const BASIC_AUTH: &str = "Basic dXNlcjpwYXNz";

fn client_for(server: &mockito::Server) -> Client {
    Client::builder()
        .user("user")
        .password("pass")
        .group(7)
        .base_url(server.url())
        .build()
        .unwrap()
}

#[test]
fn charts_listing_follows_content_range_pages() {
    let mut server = mockito::Server::new();

    let page1 = server
        .mock("GET", "/groups/7/charts.json")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_header("content-range", "pages 1-1/2")
        .with_body(r#"[{"id": 1, "name": "First"}]"#)
        .create();
    let page2 = server
        .mock("GET", "/groups/7/charts.json")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_header("content-range", "pages 2-2/2")
        .with_body(r#"[{"id": 2, "name": "Second"}]"#)
        .create();

    let charts = client_for(&server).charts().unwrap();

    page1.assert();
    page2.assert();
    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0].id, 1);
    assert_eq!(charts[1].name, "Second");
}

#[test]
fn create_chart_posts_xml_and_reads_json() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("POST", "/groups/7/charts.json")
        .match_header("content-type", "text/xml")
        .match_body("<chart><name>API Chart</name><description>made by a test</description></chart>")
        .with_status(200)
        .with_body(r#"{"id": 42, "name": "API Chart", "grid_id": 9}"#)
        .create();

    let chart = client_for(&server)
        .create_chart(&ChartAttrs::named("API Chart").with_description("made by a test"))
        .unwrap();

    mock.assert();
    assert_eq!(chart.id, 42);
    assert_eq!(chart.grid_id, Some(9));
}

#[test]
fn update_chart_accepts_empty_acknowledgment() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("PUT", "/groups/7/charts/42.json")
        .match_body("<chart><title>Renamed</title></chart>")
        .with_status(200)
        .with_body("")
        .create();

    let ack = client_for(&server)
        .update_chart(42, &ChartAttrs::default().with_title("Renamed"))
        .unwrap();

    mock.assert();
    assert_eq!(ack, None);
}

#[test]
fn read_grid_resolves_grid_id_then_densifies_cells() {
    let mut server = mockito::Server::new();

    let grid_lookup = server
        .mock("GET", "/groups/7/charts/42/grid.json")
        .with_status(200)
        .with_body(r#"{"id": 9, "rows": 3, "columns": 2}"#)
        .create();
    let cells = server
        .mock("GET", "/tabulars/9/cells.json")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(
            r#"[
                {"row": 0, "column": 0, "value": "A", "formatted": "A"},
                {"row": 0, "column": 1, "value": "B", "formatted": "B"},
                {"row": 2, "column": 0, "value": "C", "formatted": "C"}
            ]"#,
        )
        .create();

    let client = client_for(&server);
    let chart: swivel_client::Chart =
        serde_json::from_str(r#"{"id": 42, "name": "Posts"}"#).unwrap();
    let mut cache = GridIdCache::new();

    let grid = client.read_grid(&chart, &mut cache).unwrap();

    grid_lookup.assert();
    cells.assert();
    assert_eq!(grid.rows(), 3);
    assert_eq!(grid.columns(), 2);
    assert_eq!(grid.get(0, 0).and_then(|v| v.as_str()), Some("A"));
    assert_eq!(grid.get(1, 0), None);
    assert_eq!(cache.get(42), Some(9));

    // The resolution is cached: a second read skips the lookup endpoint.
    let cells_again = server
        .mock("GET", "/tabulars/9/cells.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();
    let empty = client.read_grid(&chart, &mut cache).unwrap();
    cells_again.assert();
    assert!(empty.is_empty());
}

#[test]
fn submit_save_list_puts_ordered_operations() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("PUT", "/grids/9")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "tabular": {
                "save_list": [
                    {"action": "insert_rows", "position": 1, "count": 1},
                    {"action": "edit", "cells": {"0,1": {"v": "new row"}}}
                ]
            }
        })))
        .with_status(200)
        .with_body(r#"{"ok": true}"#)
        .create();

    let grid = Grid::from_cells(&[Cell::new(1, 0, "new row")]);
    let mut ops = insert_rows(1, 1);
    ops.extend(edit_list(&grid));

    let ack = client_for(&server).submit_save_list(9, &ops).unwrap();

    mock.assert();
    assert_eq!(ack.unwrap()["ok"], true);
}

#[test]
fn empty_save_list_sends_nothing() {
    let server = mockito::Server::new();
    // No mocks registered: any request would fail the test with a connect
    // or 501 response.
    let ack = client_for(&server).submit_save_list(9, &[]).unwrap();
    assert_eq!(ack, None);
}

#[test]
fn failed_request_surfaces_remote_error() {
    let mut server = mockito::Server::new();

    server
        .mock("GET", "/tabulars/9/cells.json")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create();

    let err = client_for(&server).cells(9).unwrap_err();
    match err {
        Error::Remote { status, path, body } => {
            assert_eq!(status, 500);
            assert_eq!(path, "tabulars/9/cells.json");
            assert_eq!(body, "boom");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[test]
fn undecodable_page_surfaces_decode_error_with_raw_body() {
    let mut server = mockito::Server::new();

    server
        .mock("GET", "/tabulars/9/cells.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create();

    let err = client_for(&server).cells(9).unwrap_err();
    match err {
        Error::Decode { path, body, .. } => {
            assert_eq!(path, "tabulars/9/cells.json");
            assert_eq!(body, "<html>not json</html>");
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn page_length_strategy_ignores_content_range() {
    let mut server = mockito::Server::new();

    // Header claims more pages, but with the page-length strategy a short
    // page ends the fetch.
    let mock = server
        .mock("GET", "/tabulars/9/cells.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-range", "pages 1-1/5")
        .with_body(r#"[{"row": 0, "column": 0, "value": "x", "formatted": "x"}]"#)
        .expect(1)
        .create();

    let client = Client::builder()
        .user("user")
        .password("pass")
        .group(7)
        .base_url(server.url())
        .pagination(Pagination::PageLength)
        .page_size(30)
        .build()
        .unwrap();

    let cells = client.cells(9).unwrap();
    mock.assert();
    assert_eq!(cells.len(), 1);
}

#[test]
fn legacy_csv_read_and_replace() {
    let mut server = mockito::Server::new();

    let read = server
        .mock("GET", "/charts/5.csv")
        .with_status(200)
        .with_body("Monthly Summary,New Posts\nMarch 2009,12133\n")
        .create();
    let write = server
        .mock("PUT", "/charts/5.json")
        .match_header("content-type", "text/xml")
        .match_body("<chart><data>April 2009,3372\n</data></chart>")
        .with_status(200)
        .with_body("")
        .create();
    let append = server
        .mock("PUT", "/charts/5.json")
        .match_body("<chart><data>May 2009,100\n</data><mode>append</mode></chart>")
        .with_status(200)
        .with_body("")
        .create();

    let client = client_for(&server);

    let rows = client.chart_rows(5).unwrap();
    read.assert();
    assert_eq!(rows[1], vec!["March 2009".to_string(), "12133".to_string()]);

    client
        .set_chart_rows(5, &[vec!["April 2009".to_string(), "3372".to_string()]])
        .unwrap();
    write.assert();

    client
        .append_chart_rows(5, &[vec!["May 2009".to_string(), "100".to_string()]])
        .unwrap();
    append.assert();
}
