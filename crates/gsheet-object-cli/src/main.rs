//! gsheet CLI - read and edit the rows of a Google sheet

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gsheet_object::prelude::*;
use gsheet_object::{field_name, SheetsClient};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "gsheet")]
#[command(author, version, about = "Read and edit the rows of a Google sheet")]
struct Cli {
    /// Spreadsheet id (the long token in the spreadsheet URL)
    #[arg(long, global = true, env = "SPREADSHEET_ID")]
    spreadsheet_id: Option<String>,

    /// Sheet title (default: the first sheet)
    #[arg(long, global = true, env = "SHEET_NAME")]
    sheet: Option<String>,

    /// Data range override, e.g. 'Cities!A1:D200'
    #[arg(long, global = true, env = "SHEET_RANGE")]
    range: Option<String>,

    /// Header range override, e.g. 'Cities!A1:D1'
    #[arg(long, global = true, env = "SHEET_HEADER_RANGE")]
    header_range: Option<String>,

    /// OAuth access token
    #[arg(long, global = true, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every row as a JSON array
    Get,

    /// Print rows as a JSON object keyed by a field
    Index {
        /// Field to key by (header text or camelCase name)
        field: String,
    },

    /// List the sheets of the spreadsheet
    Sheets,

    /// Append a row
    Append {
        /// Values as field=value
        #[arg(required = true, value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },

    /// Overwrite one field of a row
    Update {
        /// Row number (first row under the header is 1)
        row: usize,
        /// Field to write
        field: String,
        /// New cell text
        value: String,
    },

    /// Clear a row, leaving later row numbers unchanged
    Delete {
        /// Row number (first row under the header is 1)
        row: usize,
    },
}

fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected field=value, got '{}'", s)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(spreadsheet_id) = cli.spreadsheet_id.clone() else {
        bail!("No spreadsheet id: pass --spreadsheet-id or set SPREADSHEET_ID");
    };
    let client = RestClient::new(cli.token.clone().unwrap_or_default());

    if let Commands::Sheets = cli.command {
        return list_sheets(&client, &spreadsheet_id).await;
    }

    let mut config = SheetConfig::new(spreadsheet_id);
    config.sheet_name = cli.sheet;
    config.range = cli.range;
    config.header_range = cli.header_range;

    let sheet = GoogleSheet::load(config, client)
        .await
        .context("Failed to open sheet")?;

    match cli.command {
        Commands::Get => print_rows(&sheet).await,
        Commands::Index { field } => print_indexed(&sheet, &field).await,
        Commands::Append { values } => {
            sheet.append(values).await.context("Failed to append row")?;
            eprintln!("Appended 1 row to {}", sheet.data_range().unwrap_or_default());
            Ok(())
        }
        Commands::Update { row, field, value } => {
            sheet
                .update(row, &field, value)
                .await
                .with_context(|| format!("Failed to update row {}", row))?;
            eprintln!("Updated {} of row {}", field_name(&field), row);
            Ok(())
        }
        Commands::Delete { row } => {
            sheet
                .delete(row)
                .await
                .with_context(|| format!("Failed to delete row {}", row))?;
            eprintln!("Cleared row {}", row);
            Ok(())
        }
        Commands::Sheets => Ok(()),
    }
}

async fn list_sheets(client: &RestClient, spreadsheet_id: &str) -> Result<()> {
    client.authorize().await?;
    let metadata = client
        .get_sheet_metadata(spreadsheet_id)
        .await
        .with_context(|| format!("Failed to read spreadsheet '{}'", spreadsheet_id))?;

    for (i, sheet) in metadata.sheets.iter().enumerate() {
        println!(
            "{}\t{}\t{} rows x {} columns",
            i, sheet.title, sheet.row_count, sheet.column_count
        );
    }
    Ok(())
}

async fn print_rows(sheet: &GoogleSheet<RestClient>) -> Result<()> {
    let rows = sheet.get_data().await.context("Failed to read rows")?;
    write_json(&rows)
}

async fn print_indexed(sheet: &GoogleSheet<RestClient>, field: &str) -> Result<()> {
    let key = field_name(field);
    let indexed = sheet
        .get_indexed(|row| row.get(&key).unwrap_or_default().to_string())
        .await
        .context("Failed to read rows")?;

    // Sorted output
    let sorted: BTreeMap<_, _> = indexed.into_iter().collect();
    write_json(&sorted)
}

fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("Failed to write JSON")?;
    writeln!(out).context("Failed to write to stdout")?;
    Ok(())
}
