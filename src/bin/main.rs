use clap::Parser;

use sales_report::SalesAnalyzer;

/// A cli interface to the sales analyzer
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The path to the sales CSV file
    filename: std::path::PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(args.filename)?;
    let mut analyzer = SalesAnalyzer::new();
    let mut skipped: u64 = 0;

    // data rows are independent, so a bad row is skipped instead of
    // aborting the whole run
    for (index, sale) in reader.deserialize().enumerate() {
        let row = index + 2; // the header is row 1
        let sale = match sale {
            Ok(sale) => sale,
            Err(err) => {
                tracing::warn!(row, %err, "skipping malformed row");
                skipped += 1;
                continue;
            }
        };
        if let Err(err) = analyzer.handle_sale(sale) {
            tracing::warn!(row, %err, "skipping malformed record");
            skipped += 1;
        }
    }
    if skipped > 0 {
        tracing::info!(skipped, "some rows were excluded from the report");
    }

    let report = analyzer.into_report();

    println!("Total Sales Revenue: {}", report.formatted_revenue());
    println!();
    println!("Month-wise totals:");
    println!("{}", serde_json::to_string_pretty(&report.monthly)?);
    println!();
    println!("Most popular items:");
    println!("{}", serde_json::to_string_pretty(&report.popular_items())?);
    println!();
    println!("Most revenue items:");
    println!("{}", serde_json::to_string_pretty(&report.revenue_items())?);
    println!();
    println!("Popularity stats:");
    println!("{}", serde_json::to_string_pretty(&report.popularity)?);

    Ok(())
}
