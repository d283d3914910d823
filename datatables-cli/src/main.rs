mod definition;
mod request;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::ArgAction;
use clap::Parser;
use datatables_lib::adapter::Adapter;
use datatables_lib::adapter::ArrayAdapter;
use datatables_lib::model::Record;
use datatables_lib::table::DataTableState;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::definition::TableFile;

/// Query a JSON record file as a paginated table.
#[derive(Debug, Parser)]
#[command(name = "datatables", version)]
struct Cli {
    /// JSON array of records
    #[arg(long)]
    records: PathBuf,

    /// JSON table definition
    #[arg(long)]
    table: PathBuf,

    /// Offset of the first row
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Rows per page (defaults to the table's page length)
    #[arg(long, conflicts_with = "all")]
    length: Option<usize>,

    /// Return every matching row
    #[arg(long)]
    all: bool,

    /// Global search term
    #[arg(long)]
    search: Option<String>,

    /// Sort directive, repeatable
    #[arg(long = "order", value_name = "COLUMN[:asc|desc]")]
    orders: Vec<String>,

    /// Per-column search, repeatable
    #[arg(long = "filter", value_name = "COLUMN=TEXT")]
    filters: Vec<String>,

    /// Draw counter echoed in the response
    #[arg(long, default_value_t = 1)]
    draw: u64,

    /// Log to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn load_records(path: &Path) -> anyhow::Result<Vec<Record>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open records {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Records in {} must be a JSON array of objects", path.display()))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let definition = TableFile::load(&cli.table)?;
    let identifier = definition.identifier.clone();
    let table = definition.build()?;
    let records = load_records(&cli.records)?;
    log::info!("loaded {} records for table '{}'", records.len(), table.name());

    let mut adapter = ArrayAdapter::new(records);
    if let Some(identifier) = identifier {
        adapter = adapter.with_identifier(identifier);
    }

    let mut state = DataTableState::new(&table)
        .with_draw(cli.draw)
        .with_start(cli.start);
    if cli.all {
        state = state.with_length(None);
    } else if cli.length.is_some() {
        state = state.with_length(cli.length);
    }
    if let Some(search) = cli.search {
        state = state.with_search(search);
    }
    let state = request::apply(state, &cli.orders, &cli.filters)?;

    let result = adapter.get_data(&state).await?;
    let response = result.into_response(state.draw());
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    WriteLogger::init(level, Config::default(), std::io::stderr())
        .context("Failed to initialize logger")?;

    run(cli).await
}
