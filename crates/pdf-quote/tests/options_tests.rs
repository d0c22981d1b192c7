use pdf_quote::*;

#[test]
fn test_default_options_are_valid() {
    let options = QuoteOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.catalog.header_row, 8);
    assert_eq!(options.image_layout, ImageLayout::SharedPage);
    assert_eq!(options.theme, ThemePreset::Classic.theme());
}

#[test]
fn test_validation_empty_price_column() {
    let mut options = QuoteOptions::default();
    options.catalog.price_column = "  ".to_string();
    match options.validate() {
        Err(QuoteError::Config(msg)) => assert!(msg.contains("Price column")),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_validation_theme() {
    let mut options = QuoteOptions::default();

    options.theme.row_height_mm = 0.0;
    assert!(options.validate().is_err());

    options.theme = ThemePreset::Compact.theme();
    options.theme.body_font_size = -1.0;
    assert!(options.validate().is_err());

    options.theme = ThemePreset::Compact.theme();
    assert!(options.validate().is_ok());
}

#[test]
fn test_currency_modes() {
    assert_eq!(CurrencyMode::Precise.decimals(), 2);
    assert_eq!(CurrencyMode::Compact.decimals(), 0);
}

#[test]
fn test_asset_paths() {
    let paths = AssetPaths::in_dir("/srv/quotes");
    assert_eq!(
        paths.path(&paths.font_regular),
        std::path::PathBuf::from("/srv/quotes/Heebo-Regular.ttf")
    );
}

#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let mut options = QuoteOptions::default();
    options.theme = ThemePreset::Compact.theme();
    options.table_currency = CurrencyMode::Compact;
    options.image_layout = ImageLayout::SeparatePages;
    options.company.terms = vec!["תנאי בדיקה".to_string()];

    let temp_file = NamedTempFile::new().unwrap();
    options.save(temp_file.path()).await.unwrap();

    let loaded = QuoteOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, r#"{{"catalog": {{"header_row": 3}}}}"#).unwrap();

    let loaded = QuoteOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.catalog.header_row, 3);
    assert_eq!(loaded.catalog.price_column, "מחיר יחידה");
    assert_eq!(loaded.company, CompanyInfo::default());
}

#[tokio::test]
async fn test_load_rejects_bad_json() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "not json").unwrap();

    assert!(matches!(
        QuoteOptions::load(temp_file.path()).await,
        Err(QuoteError::Config(_))
    ));
}
