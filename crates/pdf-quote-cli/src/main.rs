mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_quote::{
    CatalogSource, CurrencyMode, CustomerData, ImageLayout, QuoteOptions, QuoteSession,
    ThemePreset, format_currency, format_deduction,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfq", about = "Hebrew sales quote generator", version)]
struct Cli {
    /// Show debug output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a catalog sheet and list its priced rows
    Catalog {
        /// Catalog workbook (xlsx/xls/ods) or CSV export
        #[arg(short, long)]
        input: PathBuf,

        /// JSON options file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print rows as JSON instead of a grouped listing
        #[arg(long)]
        json: bool,
    },

    /// Generate a quote PDF
    Quote {
        /// Catalog workbook (xlsx/xls/ods) or CSV export
        #[arg(long)]
        catalog: PathBuf,

        /// CSV of chosen rows (columns: row_index, quantity)
        #[arg(long)]
        selection: PathBuf,

        /// Customer record as JSON
        #[arg(long)]
        customer: PathBuf,

        /// Directory the PDF is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Design rendering image
        #[arg(long)]
        image_a: Option<PathBuf>,

        /// Water and electric points image
        #[arg(long)]
        image_b: Option<PathBuf>,

        /// JSON options file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Table theme, overrides the config file
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,

        /// Illustration placement, overrides the config file
        #[arg(long, value_enum)]
        image_layout: Option<ImageLayoutArg>,
    },

    /// Write the default options to a JSON file
    InitConfig {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Classic,
    Compact,
}

#[derive(Clone, Copy, ValueEnum)]
enum ImageLayoutArg {
    Shared,
    Separate,
}

impl From<ThemeArg> for ThemePreset {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Classic => Self::Classic,
            ThemeArg::Compact => Self::Compact,
        }
    }
}

impl From<ImageLayoutArg> for ImageLayout {
    fn from(arg: ImageLayoutArg) -> Self {
        match arg {
            ImageLayoutArg::Shared => Self::SharedPage,
            ImageLayoutArg::Separate => Self::SeparatePages,
        }
    }
}

async fn load_options(config: Option<&Path>) -> Result<QuoteOptions> {
    match config {
        Some(path) => QuoteOptions::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(QuoteOptions::default()),
    }
}

/// Parse `row_index,quantity` lines; a non-numeric first line is taken as a header
fn parse_selection(bytes: &[u8]) -> Result<Vec<(usize, u32)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut selection = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() < 2 {
            bail!("Selection line {}: expected row_index,quantity", line + 1);
        }
        let parsed = (record[0].parse::<usize>(), record[1].parse::<u32>());
        let (Ok(row_index), Ok(quantity)) = parsed else {
            if line == 0 {
                continue;
            }
            bail!(
                "Selection line {}: '{}' is not row_index,quantity",
                line + 1,
                record.iter().collect::<Vec<_>>().join(",")
            );
        };
        selection.push((row_index, quantity));
    }
    Ok(selection)
}

async fn read_optional(path: Option<&Path>) -> Result<Option<Vec<u8>>> {
    match path {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Some(bytes))
        }
        None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let logger = logger::CliLogger::new(cli.verbose);
    logger.clone().init()?;

    match cli.command {
        Commands::Catalog {
            input,
            config,
            json,
        } => {
            let options = load_options(config.as_deref()).await?;
            let rows = pdf_quote::load_catalog(&input, &options.catalog)
                .await
                .with_context(|| format!("Failed to load file {}", input.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            let mut current_category: Option<&str> = None;
            for row in &rows {
                if current_category != Some(row.category.as_str()) {
                    println!("{}", row.category);
                    current_category = Some(row.category.as_str());
                }
                print!(
                    "  [{}] {} - {}",
                    row.row_index,
                    row.name,
                    row.price_label(CurrencyMode::Compact)
                );
                if !row.note.is_empty() {
                    print!(" ({})", row.note);
                }
                println!();
            }
            println!("{} priced rows", rows.len());
        }

        Commands::Quote {
            catalog,
            selection,
            customer,
            output_dir,
            image_a,
            image_b,
            config,
            theme,
            image_layout,
        } => {
            let mut options = load_options(config.as_deref()).await?;
            if let Some(theme) = theme {
                options.theme = ThemePreset::from(theme).theme();
            }
            if let Some(layout) = image_layout {
                options.image_layout = layout.into();
            }

            let customer_bytes = tokio::fs::read(&customer)
                .await
                .with_context(|| format!("Failed to read {}", customer.display()))?;
            let customer: CustomerData = serde_json::from_slice(&customer_bytes)
                .context("Customer file is not a valid customer record")?;

            let selection = parse_selection(&tokio::fs::read(&selection).await?)?;
            let source = CatalogSource::from_path(&catalog)?;
            let catalog_bytes = tokio::fs::read(&catalog)
                .await
                .with_context(|| format!("Failed to read {}", catalog.display()))?;

            let mut session = QuoteSession::new(customer);
            session.set_image_a(read_optional(image_a.as_deref()).await?);
            session.set_image_b(read_optional(image_b.as_deref()).await?);

            // Spreadsheet parsing is CPU-bound, spawn blocking
            let catalog_options = options.catalog.clone();
            let session = tokio::task::spawn_blocking(move || {
                session.load_catalog_bytes(&catalog_bytes, source, &catalog_options)?;
                for (row_index, quantity) in selection {
                    session.set_quantity(row_index, quantity)?;
                }
                Ok::<_, pdf_quote::QuoteError>(session)
            })
            .await??;

            let request = session.build_request()?;
            let summary = session.summary();

            tokio::fs::create_dir_all(&output_dir).await?;
            let path = pdf_quote::generate_quote_pdf(request, &options, &output_dir).await?;

            let mode = CurrencyMode::Precise;
            println!("Quote Summary:");
            println!("  Items: {}", session.selected_items().len());
            println!("  Subtotal: {}", format_currency(summary.subtotal, mode));
            if summary.contractor_discount != 0.0 {
                println!(
                    "  Contractor discount: {}",
                    format_deduction(summary.contractor_discount, mode)
                );
            }
            println!("  VAT: {}", format_currency(summary.vat_amount, mode));
            println!(
                "  Discount: {}",
                format_deduction(summary.discount_amount, mode)
            );
            println!("  Grand total: {}", format_currency(summary.grand_total, mode));
            if logger.warning_count() > 0 {
                println!("  Warnings: {} (see stderr)", logger.warning_count());
            }
            println!("Quote → {}", path.display());
        }

        Commands::InitConfig { output } => {
            QuoteOptions::default().save(&output).await?;
            println!("Default options → {}", output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_skips_header() {
        let parsed = parse_selection(b"row_index,quantity\n3,2\n 7 , 1 \n").unwrap();
        assert_eq!(parsed, vec![(3, 2), (7, 1)]);
    }

    #[test]
    fn test_parse_selection_rejects_garbage() {
        assert!(parse_selection(b"1,2\nx,y\n").is_err());
        assert!(parse_selection(b"5\n").is_err());
    }
}
