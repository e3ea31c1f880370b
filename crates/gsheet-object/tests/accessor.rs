//! Accessor behaviour against the in-memory spreadsheet service.

use gsheet_object::prelude::*;
use gsheet_object::{Call, RawTable};
use pretty_assertions::assert_eq;

const BOOK: &str = "book";

fn cities() -> MemoryClient {
    let client = MemoryClient::new();
    client.add_sheet(
        BOOK,
        "Cities",
        vec![
            vec!["City", "Country", "Population"],
            vec!["Paris", "France", "2100000"],
            vec!["Oslo", "", "700000"],
            vec!["Rome", "Italy"],
        ],
    );
    client.add_sheet(BOOK, "Rivers", vec![vec!["Name"], vec!["Seine"]]);
    client
}

async fn open(client: &MemoryClient) -> GoogleSheet<MemoryClient> {
    let sheet = GoogleSheet::load(SheetConfig::new(BOOK), client.clone())
        .await
        .unwrap();
    client.clear_calls();
    sheet
}

fn table(rows: &[&[&str]]) -> RawTable {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[derive(Debug, Default, Clone, PartialEq)]
struct City {
    name: String,
    country: Option<String>,
}

fn city_schema() -> Schema<City> {
    Schema::builder()
        .field("City", |c: &City| c.name.as_str(), |c, v| c.name = v)
        .optional("Country", |c: &City| c.country.as_deref(), |c, v| c.country = Some(v))
        .build()
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_init_derives_ranges_from_grid() {
    let client = cities();
    let sheet = open(&client).await;

    assert!(sheet.is_ready());
    assert_eq!(sheet.sheet_title(), Some("Cities"));
    assert_eq!(sheet.data_range(), Some("Cities!A1:Z1000"));
    assert_eq!(sheet.header_range(), Some("Cities!A1:Z1"));
}

#[tokio::test]
async fn test_sheet_name_is_case_insensitive() {
    let client = cities();
    let config = SheetConfig::new(BOOK).with_sheet_name("rivers");
    let sheet = GoogleSheet::load(config, client).await.unwrap();

    assert_eq!(sheet.sheet_title(), Some("Rivers"));
    assert_eq!(sheet.data_range(), Some("Rivers!A1:Z1000"));
}

#[tokio::test]
async fn test_quoted_sheet_title() {
    let client = MemoryClient::new();
    client.add_sheet(BOOK, "My Cities", vec![vec!["City", "Country"], vec!["Lyon", ""]]);
    let sheet = open(&client).await;

    assert_eq!(sheet.data_range(), Some("'My Cities'!A1:Z1000"));
    sheet.update(1usize, "country", "France").await.unwrap();
    assert_eq!(
        client.contents(BOOK, "My Cities").unwrap(),
        table(&[&["City", "Country"], &["Lyon", "France"]])
    );
}

#[tokio::test]
async fn test_unknown_sheet_is_not_found() {
    let client = cities();
    let config = SheetConfig::new(BOOK).with_sheet_name("Mountains");
    let err = GoogleSheet::load(config, client).await.unwrap_err();

    assert!(matches!(err, SheetError::NotFound(ref name) if name == "Mountains"));
    assert_eq!(err.to_string(), "Sheet Mountains not found");
}

#[tokio::test]
async fn test_blank_spreadsheet_id() {
    let err = GoogleSheet::new(SheetConfig::default(), cities()).unwrap_err();
    assert!(matches!(err, SheetError::Configuration(_)));
}

#[tokio::test]
async fn test_authentication_failure_stops_init() {
    let client = cities();
    client.reject_credentials("token expired");

    let err = GoogleSheet::load(SheetConfig::new(BOOK), client.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, SheetError::Authentication(ref reason) if reason == "token expired"));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_spreadsheet_is_transport_error() {
    let err = GoogleSheet::load(SheetConfig::new("missing"), cities())
        .await
        .unwrap_err();
    assert!(matches!(err, SheetError::Transport(_)));
}

#[tokio::test]
async fn test_operations_require_init() {
    let client = cities();
    let sheet = GoogleSheet::new(SheetConfig::new(BOOK), client.clone()).unwrap();

    assert!(matches!(
        sheet.get_indexed(|r| r.row_number).await,
        Err(SheetError::Uninitialized("get_indexed"))
    ));
    assert!(matches!(
        sheet.append([("city", "Bern")]).await,
        Err(SheetError::Uninitialized("append"))
    ));
    assert!(matches!(
        sheet.update(1usize, "city", "Bern").await,
        Err(SheetError::Uninitialized("update"))
    ));
    assert!(matches!(
        sheet.get_typed(&city_schema()).await,
        Err(SheetError::Uninitialized("get_data"))
    ));
    assert_eq!(sheet.data_range(), None);
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_explicit_ranges_win() {
    let client = cities();
    let config = SheetConfig::new(BOOK)
        .with_range("Cities!A1:B3")
        .with_header_range("Cities!A1:B1");
    let sheet = GoogleSheet::load(config, client).await.unwrap();

    assert_eq!(sheet.data_range(), Some("Cities!A1:B3"));
    let rows = sheet.get_data().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(!rows[0].contains("population"));
}

#[tokio::test]
async fn test_sheet_taken_from_explicit_range() {
    let client = cities();
    let config = SheetConfig::new(BOOK).with_range("Rivers!A1:A5");
    let sheet = GoogleSheet::load(config, client).await.unwrap();

    assert_eq!(sheet.sheet_title(), Some("Rivers"));
    assert_eq!(sheet.data_range(), Some("Rivers!A1:A5"));
    assert_eq!(sheet.header_range(), Some("Rivers!A1:Z1"));
}

#[tokio::test]
async fn test_unqualified_range_uses_sheet_name() {
    let client = cities();
    let config = SheetConfig::new(BOOK)
        .with_sheet_name("rivers")
        .with_range("A1:B3");
    let sheet = GoogleSheet::load(config, client).await.unwrap();

    assert_eq!(sheet.data_range(), Some("Rivers!A1:B3"));
}

#[tokio::test]
async fn test_range_on_other_sheet_is_rejected() {
    let client = cities();
    let config = SheetConfig::new(BOOK)
        .with_sheet_name("Cities")
        .with_range("Rivers!A1:A5");
    let err = GoogleSheet::load(config, client.clone()).await.unwrap_err();
    assert!(matches!(err, SheetError::Configuration(_)));

    let config = SheetConfig::new(BOOK)
        .with_sheet_name("Cities")
        .with_header_range("Rivers!A1:A1");
    let err = GoogleSheet::load(config, client).await.unwrap_err();
    assert!(matches!(err, SheetError::Configuration(_)));
}

#[tokio::test]
async fn test_reinit_picks_up_resized_grid() {
    let client = cities();
    let mut sheet = open(&client).await;

    client
        .write_cell(BOOK, "Cities!AB1", vec![vec!["Mayor".into()]])
        .await
        .unwrap();
    sheet.init().await.unwrap();
    assert_eq!(sheet.data_range(), Some("Cities!A1:AB1000"));
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_get_data() {
    let client = cities();
    let sheet = open(&client).await;
    let rows = sheet.get_data().await.unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].row_number, 1);
    assert_eq!(rows[0].get("city"), Some("Paris"));
    assert_eq!(rows[1].get("country"), Some(""));
    assert_eq!(rows[2].get("population"), None);
    assert_eq!(client.calls(), vec![Call::Read("Cities!A1:Z1000".into())]);
}

#[tokio::test]
async fn test_get_data_is_idempotent() {
    let client = cities();
    let sheet = open(&client).await;

    let first = sheet.get_data().await.unwrap();
    let second = sheet.get_data().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_indexed_and_pairs() {
    let client = cities();
    let sheet = open(&client).await;

    let by_city = sheet
        .get_indexed(|r| r.get("city").unwrap_or_default().to_string())
        .await
        .unwrap();
    assert_eq!(by_city.len(), 3);
    assert_eq!(by_city["Rome"].row_number, 3);

    let countries = sheet
        .get_pairs(
            |r| r.get("city").unwrap_or_default().to_string(),
            |r, _| r.get("country").map(str::to_string),
        )
        .await
        .unwrap();
    assert_eq!(countries["Paris"].as_deref(), Some("France"));
    assert_eq!(countries["Oslo"].as_deref(), Some(""));
}

#[tokio::test]
async fn test_typed_reads() {
    let client = cities();
    let sheet = open(&client).await;
    let schema = city_schema();

    let all = sheet.get_typed(&schema).await.unwrap();
    assert_eq!(all[0].name, "Paris");
    assert_eq!(all[0].country.as_deref(), Some("France"));
    assert_eq!(all[2].row_number, 3);

    let by_name = sheet
        .get_indexed_typed(&schema, |c| c.name.clone())
        .await
        .unwrap();
    assert_eq!(by_name["Oslo"].row_number, 2);
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_append_orders_by_header() {
    let client = cities();
    let sheet = open(&client).await;

    sheet
        .append([
            ("population", "1400000"),
            ("mayor", "x"),
            ("City", "Munich"),
            ("elevation", "519"),
            ("country", "Germany"),
        ])
        .await
        .unwrap();

    assert_eq!(
        client.calls(),
        vec![
            Call::Read("Cities!A1:Z1".into()),
            Call::Append(
                "Cities!A1:Z1000".into(),
                vec![
                    "Munich".into(),
                    "Germany".into(),
                    "1400000".into(),
                    "x".into(),
                    "519".into(),
                ]
            ),
        ]
    );
}

#[tokio::test]
async fn test_append_then_read() {
    let client = cities();
    let sheet = open(&client).await;

    sheet
        .append_typed(
            &city_schema(),
            &City {
                name: "Bern".into(),
                country: Some("Switzerland".into()),
            },
        )
        .await
        .unwrap();

    let rows = sheet.get_data().await.unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3].row_number, 4);
    assert_eq!(rows[3].get("city"), Some("Bern"));
    assert_eq!(rows[3].get("country"), Some("Switzerland"));
}

#[tokio::test]
async fn test_update_targets_single_cell() {
    let client = cities();
    let sheet = open(&client).await;

    sheet.update(2usize, "Country", "Norway").await.unwrap();

    assert_eq!(
        client.calls(),
        vec![
            Call::Read("Cities!A1:Z1".into()),
            Call::Write("Cities!B3".into(), vec![vec!["Norway".into()]]),
        ]
    );
    let rows = sheet.get_data().await.unwrap();
    assert_eq!(rows[1].get("country"), Some("Norway"));
}

#[tokio::test]
async fn test_update_from_row_object() {
    let client = cities();
    let sheet = open(&client).await;

    let rows = sheet.get_data().await.unwrap();
    sheet.update(&rows[2], "population", "2800000").await.unwrap();

    let typed = sheet.get_typed(&city_schema()).await.unwrap();
    sheet.update(&typed[0], "city", "Paris, FR").await.unwrap();

    assert_eq!(
        client.contents(BOOK, "Cities").unwrap(),
        table(&[
            &["City", "Country", "Population"],
            &["Paris, FR", "France", "2100000"],
            &["Oslo", "", "700000"],
            &["Rome", "Italy", "2800000"],
        ])
    );
}

#[tokio::test]
async fn test_update_unknown_field() {
    let client = cities();
    let sheet = open(&client).await;

    let err = sheet.update(1usize, "mayor", "x").await.unwrap_err();
    assert!(matches!(err, SheetError::FieldNotFound(ref name) if name == "mayor"));
    assert!(!client.calls().iter().any(|c| matches!(c, Call::Write(..))));
}

#[tokio::test]
async fn test_delete_clears_row_and_keeps_numbering() {
    let client = cities();
    let sheet = open(&client).await;

    sheet.delete(RowRef(2)).await.unwrap();
    assert_eq!(client.calls().last(), Some(&Call::Clear("Cities!A3:C3".into())));

    let rows = sheet.get_data().await.unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].is_empty());
    assert_eq!(rows[2].row_number, 3);
    assert_eq!(rows[2].get("city"), Some("Rome"));
}

#[tokio::test]
async fn test_delete_last_row_shrinks_read() {
    let client = cities();
    let sheet = open(&client).await;

    let rows = sheet.get_data().await.unwrap();
    sheet.delete(&rows[2]).await.unwrap();

    let rows = sheet.get_data().await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_writes_follow_offset_header() {
    let client = MemoryClient::new();
    client.add_sheet(
        BOOK,
        "Cities",
        vec![vec!["note", "City", "Country"], vec!["x", "Paris", "France"]],
    );
    let config = SheetConfig::new(BOOK)
        .with_range("Cities!B1:C10")
        .with_header_range("Cities!B1:C1");
    let sheet = GoogleSheet::load(config, client.clone()).await.unwrap();

    let rows = sheet.get_data().await.unwrap();
    assert_eq!(rows[0].get("city"), Some("Paris"));

    client.clear_calls();
    sheet.update(&rows[0], "country", "FR").await.unwrap();
    assert_eq!(
        client.calls().last(),
        Some(&Call::Write("Cities!C2".into(), vec![vec!["FR".into()]]))
    );
    assert_eq!(
        client.contents(BOOK, "Cities").unwrap(),
        table(&[&["note", "City", "Country"], &["x", "Paris", "FR"]])
    );

    sheet.delete(&rows[0]).await.unwrap();
    assert_eq!(client.calls().last(), Some(&Call::Clear("Cities!B2:C2".into())));
    let contents = client.contents(BOOK, "Cities").unwrap();
    assert_eq!(contents[1][0], "x");
    assert!(sheet.get_data().await.unwrap().is_empty());
}
