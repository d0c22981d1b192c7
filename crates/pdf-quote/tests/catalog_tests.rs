use pdf_quote::catalog::{Cell, RawSheet, resolve_columns};
use pdf_quote::*;
use std::collections::BTreeSet;
use std::sync::Arc;

const PREAMBLE_ROWS: usize = 8;

/// Sheet with the usual preamble, the column header row and `data` below it
fn catalog_sheet(header: &[&str], data: &[&[&str]]) -> RawSheet {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    rows.push(vec![Cell::from("מחירון 2024")]);
    rows.extend((1..PREAMBLE_ROWS).map(|_| Vec::new()));
    rows.push(header.iter().map(|s| Cell::from(*s)).collect());
    for row in data {
        rows.push(row.iter().map(|s| Cell::from(*s)).collect());
    }
    RawSheet::new(rows)
}

const HEADER: &[&str] = &["מס'", "שם הפריט", " מחיר יחידה ", "הערות", "סה\"כ"];

fn kitchen_sheet() -> RawSheet {
    catalog_sheet(
        HEADER,
        &[
            &["", "ארונות מטבח", "", "", ""],
            &["1", "ארון עליון", "1,200", "", ""],
            &["2", "ארון תחתון", "0", "לפי מידה", ""],
            &["", "", "", "", ""],
            &["", "משטחים", "", "", ""],
            &["3", "משטח שיש", "850.5", "כולל התקנה", ""],
            &["4", "משטח שיש", "850.5", "", ""],
        ],
    )
}

#[test]
fn test_category_inheritance() {
    let rows = normalize(&kitchen_sheet(), &CatalogOptions::default()).unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].category, "ארונות מטבח");
    assert_eq!(rows[1].category, "ארונות מטבח");
    // A blank row does not end the category, the next header does
    assert_eq!(rows[2].category, "משטחים");
    assert_eq!(rows[3].category, "משטחים");
}

#[test]
fn test_header_rows_are_dropped() {
    let rows = normalize(&kitchen_sheet(), &CatalogOptions::default()).unwrap();

    assert!(rows.iter().all(|r| r.name != "ארונות מטבח" && r.name != "משטחים"));
    assert_eq!(rows[0].name, "ארון עליון");
    assert_eq!(rows[0].unit_price, 1200.0);
    assert_eq!(rows[2].unit_price, 850.5);
    assert_eq!(rows[2].note, "כולל התקנה");
}

#[test]
fn test_zero_price_is_by_measurement() {
    let rows = normalize(&kitchen_sheet(), &CatalogOptions::default()).unwrap();

    assert!(rows[1].is_priced_by_measurement());
    assert_eq!(rows[1].price_label(CurrencyMode::Precise), BY_MEASUREMENT);
    assert_eq!(rows[0].price_label(CurrencyMode::Compact), "₪1,200");
}

#[test]
fn test_row_index_counts_from_header() {
    let rows = normalize(&kitchen_sheet(), &CatalogOptions::default()).unwrap();
    let indices: Vec<usize> = rows.iter().map(|r| r.row_index).collect();
    assert_eq!(indices, vec![1, 2, 5, 6]);
}

#[test]
fn test_duplicate_names_are_preserved() {
    let rows = normalize(&kitchen_sheet(), &CatalogOptions::default()).unwrap();
    let duplicates = rows.iter().filter(|r| r.name == "משטח שיש").count();
    assert_eq!(duplicates, 2);
}

#[test]
fn test_empty_sheet_yields_no_rows() {
    let rows = normalize(&RawSheet::default(), &CatalogOptions::default()).unwrap();
    assert!(rows.is_empty());

    let blank = RawSheet::new(vec![vec![Cell::Empty, Cell::from("   ")]; 12]);
    assert!(normalize(&blank, &CatalogOptions::default()).unwrap().is_empty());
}

#[test]
fn test_missing_header_row_is_format_error() {
    let short = RawSheet::new(vec![vec![Cell::from("only a title")]]);
    match normalize(&short, &CatalogOptions::default()) {
        Err(QuoteError::CatalogFormat(msg)) => assert!(msg.contains("header row")),
        other => panic!("Expected CatalogFormat error, got {:?}", other),
    }
}

#[test]
fn test_missing_price_column_is_format_error() {
    let sheet = catalog_sheet(&["מס'", "שם הפריט", "מחיר"], &[&["1", "ארון", "100"]]);
    let result = normalize(&sheet, &CatalogOptions::default());
    assert!(matches!(result, Err(QuoteError::CatalogFormat(_))));
}

#[test]
fn test_missing_item_column_is_format_error() {
    let sheet = catalog_sheet(&["מס'", "תיאור", "מחיר יחידה"], &[&["1", "ארון", "100"]]);
    let result = normalize(&sheet, &CatalogOptions::default());
    assert!(matches!(result, Err(QuoteError::CatalogFormat(_))));
}

#[test]
fn test_priced_row_before_any_header_has_empty_category() {
    let sheet = catalog_sheet(
        HEADER,
        &[
            &["1", "ידית", "25", "", ""],
            &["", "אביזרים", "", "", ""],
            &["2", "ציר", "12", "", ""],
        ],
    );
    let rows = normalize(&sheet, &CatalogOptions::default()).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "");
    assert_eq!(rows[1].category, "אביזרים");
}

#[test]
fn test_category_count_matches_headers_with_items() {
    let sheet = catalog_sheet(
        HEADER,
        &[
            &["", "דלתות", "", "", ""],
            &["1", "דלת פנים", "900", "", ""],
            // Header immediately followed by another header has no items
            &["", "חלונות", "", "", ""],
            &["", "ארונות", "", "", ""],
            &["2", "ארון קיר", "2500", "", ""],
            &["3", "ארון פינתי", "3100", "", ""],
            &["", "ריהוט גן", "", "", ""],
        ],
    );
    let rows = normalize(&sheet, &CatalogOptions::default()).unwrap();

    let categories: BTreeSet<&str> = rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories.len(), 2);
    assert!(categories.contains("דלתות"));
    assert!(categories.contains("ארונות"));
}

#[test]
fn test_unparseable_price_becomes_zero() {
    let sheet = catalog_sheet(
        HEADER,
        &[
            &["", "שונות", "", "", ""],
            &["1", "פריט מיוחד", "בהתאם", "", ""],
            &["2", "זיכוי", "-50", "", ""],
        ],
    );
    let rows = normalize(&sheet, &CatalogOptions::default()).unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.unit_price == 0.0));
}

#[test]
fn test_resolve_columns_trims_and_renames() {
    let header: Vec<Cell> = HEADER.iter().map(|s| Cell::from(*s)).collect();
    let columns = resolve_columns(&header, &CatalogOptions::default()).unwrap();

    assert_eq!(columns.names[0], "מספר");
    assert_eq!(columns.names[1], "הפריט");
    assert_eq!(columns.names[4], "סהכ");
    assert_eq!(columns.item, 1);
    assert_eq!(columns.price, 2);
    assert_eq!(columns.notes, Some(3));
}

#[test]
fn test_exact_item_column_is_preferred() {
    let header: Vec<Cell> = ["קוד פריט", "הפריט", "מחיר יחידה"]
        .iter()
        .map(|s| Cell::from(*s))
        .collect();
    let columns = resolve_columns(&header, &CatalogOptions::default()).unwrap();
    assert_eq!(columns.item, 1);
    assert_eq!(columns.notes, None);
}

#[test]
fn test_numeric_cells() {
    let mut rows: Vec<Vec<Cell>> = (0..PREAMBLE_ROWS).map(|_| Vec::new()).collect();
    rows.push(HEADER.iter().map(|s| Cell::from(*s)).collect());
    rows.push(vec![Cell::Empty, Cell::from("מדפים")]);
    rows.push(vec![
        Cell::Number(1.0),
        Cell::from("מדף"),
        Cell::Number(75.0),
    ]);
    let rows = normalize(&RawSheet::new(rows), &CatalogOptions::default()).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].unit_price, 75.0);
    assert_eq!(rows[0].note, "");
}

const CSV_CATALOG: &str = "\u{feff}מחירון\n,,,\n,,,\n,,,\n,,,\n,,,\n,,,\n,,,\nמס',הפריט,מחיר יחידה,הערות\n,ארונות,,\n1,ארון,\"1,200\",\n2,מדף,80,לבן\n";

#[test]
fn test_normalize_csv_bytes() {
    let rows = normalize_bytes(
        CSV_CATALOG.as_bytes(),
        CatalogSource::Csv,
        &CatalogOptions::default(),
    )
    .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "ארונות");
    assert_eq!(rows[0].unit_price, 1200.0);
    assert_eq!(rows[1].note, "לבן");
}

#[test]
fn test_catalog_source_from_path() {
    assert_eq!(
        CatalogSource::from_path("catalog.XLSX").unwrap(),
        CatalogSource::Workbook
    );
    assert_eq!(
        CatalogSource::from_path("export.csv").unwrap(),
        CatalogSource::Csv
    );
    assert!(matches!(
        CatalogSource::from_path("catalog.pdf"),
        Err(QuoteError::CatalogFormat(_))
    ));
}

/// Workbook whose used range starts at the header row in column B
fn catalog_workbook() -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("גיליון1").unwrap();

    let header_row = PREAMBLE_ROWS as u32;
    for (col, title) in ["מס'", "שם הפריט", "מחיר יחידה", "הערות"].iter().enumerate() {
        sheet.write_string(header_row, col as u16 + 1, *title).unwrap();
    }
    sheet.write_string(header_row + 1, 2, "ארונות").unwrap();
    sheet.write_number(header_row + 2, 1, 1).unwrap();
    sheet.write_string(header_row + 2, 2, "ארון").unwrap();
    sheet.write_number(header_row + 2, 3, 1200).unwrap();
    sheet.write_string(header_row + 2, 4, "לבן").unwrap();
    sheet.write_number(header_row + 3, 1, 2).unwrap();
    sheet.write_string(header_row + 3, 2, "מדף").unwrap();
    sheet.write_string(header_row + 3, 3, "abc").unwrap();

    workbook.save_to_buffer().unwrap()
}

#[test]
fn test_normalize_workbook_bytes() {
    let rows = normalize_bytes(
        &catalog_workbook(),
        CatalogSource::Workbook,
        &CatalogOptions::default(),
    )
    .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "ארון");
    assert_eq!(rows[0].category, "ארונות");
    assert_eq!(rows[0].unit_price, 1200.0);
    assert_eq!(rows[0].note, "לבן");
    assert_eq!(rows[0].row_index, 1);
    assert_eq!(rows[1].category, "ארונות");
    assert!(rows[1].is_priced_by_measurement());
}

#[test]
fn test_wrong_sheet_name_is_format_error() {
    let options = CatalogOptions {
        sheet_name: "Sheet9".to_string(),
        ..CatalogOptions::default()
    };
    match normalize_bytes(&catalog_workbook(), CatalogSource::Workbook, &options) {
        Err(QuoteError::CatalogFormat(msg)) => assert!(msg.contains("Sheet9")),
        other => panic!("Expected CatalogFormat error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_catalog_from_workbook_file() {
    use std::io::Write;

    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(&catalog_workbook()).unwrap();

    let rows = load_catalog(file.path(), &CatalogOptions::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "ארונות");
}

#[test]
fn test_malformed_workbook_is_format_error() {
    let result = normalize_bytes(
        b"definitely not a spreadsheet",
        CatalogSource::Workbook,
        &CatalogOptions::default(),
    );
    assert!(matches!(result, Err(QuoteError::CatalogFormat(_))));
}

#[test]
fn test_cache_reuses_rows_for_identical_bytes() {
    let mut cache = CatalogCache::new();
    let options = CatalogOptions::default();

    let first = cache
        .get_or_load(CSV_CATALOG.as_bytes(), CatalogSource::Csv, &options)
        .unwrap();
    let second = cache
        .get_or_load(CSV_CATALOG.as_bytes(), CatalogSource::Csv, &options)
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    // Different conventions are a different file identity and replace the entry
    let mut other = options.clone();
    other.notes_column = "הערה".to_string();
    cache
        .get_or_load(CSV_CATALOG.as_bytes(), CatalogSource::Csv, &other)
        .unwrap();
    assert_eq!(cache.len(), 1);

    let reloaded = cache
        .get_or_load(CSV_CATALOG.as_bytes(), CatalogSource::Csv, &options)
        .unwrap();
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(first, reloaded);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_cache_does_not_store_failures() {
    let mut cache = CatalogCache::new();
    let options = CatalogOptions::default();
    let result = cache.get_or_load(b"garbage", CatalogSource::Workbook, &options);
    assert!(result.is_err());
    assert!(cache.is_empty());

    // A failed load keeps the current catalog
    let rows = cache
        .get_or_load(CSV_CATALOG.as_bytes(), CatalogSource::Csv, &options)
        .unwrap();
    assert!(cache.get_or_load(b"garbage", CatalogSource::Workbook, &options).is_err());
    let again = cache
        .get_or_load(CSV_CATALOG.as_bytes(), CatalogSource::Csv, &options)
        .unwrap();
    assert!(Arc::ptr_eq(&rows, &again));
}

#[tokio::test]
async fn test_load_catalog_from_file() {
    use std::io::Write;

    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(CSV_CATALOG.as_bytes()).unwrap();

    let rows = load_catalog(file.path(), &CatalogOptions::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].name, "מדף");
}
