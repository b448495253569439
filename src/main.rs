use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use ckexport::cli::{handle_export, ExportOptions};
use ckexport::device;

#[derive(Parser)]
#[command(
    name = "ckexport",
    version,
    about = "CoinKeeper database export tool",
    long_about = "Exports transaction records from a CoinKeeper SQLite database \
                  to CSV or JSON files, optionally grouping rows into date \
                  sections. The database can be a local file or read from a \
                  device mounted over ifuse."
)]
struct Cli {
    /// Database path
    #[arg(short, long, default_value = "CoinKeeper2.db3")]
    db: PathBuf,

    /// Fields from the database to be extracted
    #[arg(short, long, num_args = 1..)]
    fields: Option<Vec<String>>,

    /// Target file(s); the format follows each file's extension
    #[arg(short, long, num_args = 1..)]
    target: Option<Vec<PathBuf>>,

    /// Order-by key for the query
    #[arg(long, default_value = "Date")]
    order_by: String,

    /// Insert a date section header before each run of same-day rows
    #[arg(long)]
    group_by_date: bool,

    /// Read the database from a device mounted over ifuse
    #[arg(long)]
    device: bool,

    /// Mount point used with --device
    #[arg(long, default_value = "/tmp/ios", requires = "device")]
    mount_point: PathBuf,

    /// App identifier used with --device
    #[arg(long, default_value = device::DEFAULT_APP_ID, requires = "device")]
    app_id: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = ExportOptions {
        fields: cli.fields,
        order_by: cli.order_by,
        group_by_date: cli.group_by_date,
        targets: cli.target.unwrap_or_default(),
    };

    if cli.device {
        let db_path = device::mount(&cli.mount_point, &cli.app_id)?;
        // Unmount even when the export fails; the export error takes
        // precedence over an unmount failure.
        let result = handle_export(&db_path, &options);
        let unmounted = device::unmount(&cli.mount_point);
        device::resolve_outcome(result, unmounted)?;
    } else {
        handle_export(&cli.db, &options)?;
    }

    Ok(())
}
