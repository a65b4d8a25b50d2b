use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nba_stats_scraper::data::{load_from_cache, save_to_cache, save_to_csv, save_to_sql};
use nba_stats_scraper::sql::insert_statement;
use nba_stats_scraper::{
    parse_table, FantocciniNavigator, NbaDataCollector, ScrapeConfig, Season, StatTable,
    StatsError, TableShape,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "cli", about = "Scrape and parse NBA stats tables from stats.nba.com")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Drive the browser to a stats table and parse it
    Scrape(ScrapeArgs),
    /// Parse table text that was already saved to a file
    Parse(ParseArgs),
    /// Render a cached table as an INSERT statement
    Sql(SqlArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Table {
    PlayerBoxScores,
    PlayerSeasonStats,
    TeamBoxScores,
    TeamSeasonStats,
}

impl From<Table> for TableShape {
    fn from(table: Table) -> Self {
        match table {
            Table::PlayerBoxScores => TableShape::PlayerBoxScore,
            Table::PlayerSeasonStats => TableShape::PlayerSeasonStats,
            Table::TeamBoxScores => TableShape::TeamBoxScore,
            Table::TeamSeasonStats => TableShape::TeamSeasonStats,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
    Sql,
}

#[derive(Debug, Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value = "json")]
    format: Format,
    /// Output file; defaults to `<cache dir>/<table>_<season>.<ext>`
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ScrapeArgs {
    #[arg(value_enum)]
    table: Table,
    /// Season label, 2010-2011 through 2018-2019
    #[arg(long)]
    season: String,
    /// Only read this page of the team box-score table
    #[arg(long)]
    page: Option<usize>,
    /// Reuse the JSON cache for this table and season if it exists
    #[arg(long)]
    use_cache: bool,
    #[arg(long)]
    headless: bool,
    #[arg(long)]
    webdriver_url: Option<String>,
    /// Seconds to wait before each element lookup
    #[arg(long)]
    page_wait: Option<u64>,
    #[arg(long)]
    max_pages: Option<usize>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[arg(value_enum)]
    table: Table,
    #[arg(long)]
    season: String,
    /// File holding the rendered table text
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct SqlArgs {
    /// JSON cache file written by `scrape` or `parse`
    #[arg(long)]
    input: PathBuf,
    /// Target table name; defaults to the table kind's name
    #[arg(long)]
    table_name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ScrapeConfig::from_env();

    match cli.command {
        Command::Scrape(args) => {
            if args.headless {
                config.headless = true;
            }
            if let Some(url) = args.webdriver_url.clone() {
                config.webdriver_url = url;
            }
            if let Some(secs) = args.page_wait {
                config.page_wait = Duration::from_secs(secs);
            }
            if let Some(max_pages) = args.max_pages {
                config.max_pages = max_pages;
            }
            scrape(&config, &args).await
        }
        Command::Parse(args) => {
            let season: Season = args.season.parse()?;
            let shape = TableShape::from(args.table);
            let raw = std::fs::read_to_string(&args.input)
                .with_context(|| format!("Failed to read {}", args.input.display()))?;
            let records = parse_table(&raw, season, shape).context("Failed to parse table")?;
            let table = StatTable {
                shape,
                season,
                records,
            };
            write_output(&table, &args.output, &config.cache_dir)
        }
        Command::Sql(args) => {
            let table = load_from_cache(&args.input)?;
            let table_name = args
                .table_name
                .as_deref()
                .unwrap_or_else(|| table.shape.table_name());
            match insert_statement(table_name, &table.records)? {
                Some(sql) => println!("{}", sql),
                None => println!("-- {} is empty", args.input.display()),
            }
            Ok(())
        }
    }
}

async fn scrape(config: &ScrapeConfig, args: &ScrapeArgs) -> Result<()> {
    let shape = TableShape::from(args.table);
    // Reject bad input before a browser is started
    let season: Season = args.season.parse()?;
    validate_page(shape, args.page)?;
    let cache_file = default_output(&config.cache_dir, shape, season, Format::Json);

    if args.use_cache && cache_file.exists() && args.page.is_none() {
        println!("Loading {} from cache file: {}\n", shape, cache_file.display());
        let table = load_from_cache(&cache_file)?;
        return write_output(&table, &args.output, &config.cache_dir);
    }

    let navigator = FantocciniNavigator::connect(config)
        .await
        .context("Failed to start browser session")?;
    let mut collector = NbaDataCollector::new(navigator).with_max_pages(config.max_pages);

    let result = match (shape, args.page) {
        (TableShape::TeamBoxScore, Some(page)) => {
            collector
                .collect_team_box_score_page(&args.season, page)
                .await
        }
        (TableShape::PlayerBoxScore, _) => collector.collect_player_box_scores(&args.season).await,
        (TableShape::PlayerSeasonStats, _) => {
            collector.collect_player_season_stats(&args.season).await
        }
        (TableShape::TeamBoxScore, None) => collector.collect_team_box_scores(&args.season).await,
        (TableShape::TeamSeasonStats, _) => collector.collect_team_season_stats(&args.season).await,
    };

    // Close the session even when collection failed
    let closed = collector.into_navigator().close().await;
    let table = settle_collection(result, closed)
        .with_context(|| format!("Failed to collect {} for {}", shape, season))?;

    println!("Collected {} {} rows for {}\n", table.len(), shape, season);
    if args.page.is_none() {
        save_to_cache(&table, &cache_file)?;
        info!(path = %cache_file.display(), "saved cache");
    }

    write_output(&table, &args.output, &config.cache_dir)
}

/// `--page` only applies to team box scores and counts from 1
fn validate_page(shape: TableShape, page: Option<usize>) -> Result<()> {
    match (shape, page) {
        (_, None) => Ok(()),
        (TableShape::TeamBoxScore, Some(0)) => {
            bail!("--page counts from 1; omit it to read every page")
        }
        (TableShape::TeamBoxScore, Some(_)) => Ok(()),
        (shape, Some(_)) => bail!("--page is only supported for team box scores, not {}", shape),
    }
}

/// A failed session close is logged so it never hides the collection result
fn settle_collection(
    collected: std::result::Result<StatTable, StatsError>,
    closed: std::result::Result<(), StatsError>,
) -> std::result::Result<StatTable, StatsError> {
    if let Err(e) = closed {
        warn!(error = %e, "failed to close browser session");
    }
    collected
}

fn default_output(cache_dir: &Path, shape: TableShape, season: Season, format: Format) -> PathBuf {
    let ext = match format {
        Format::Json => "json",
        Format::Csv => "csv",
        Format::Sql => "sql",
    };
    cache_dir.join(format!("{}_{}.{}", shape.table_name(), season, ext))
}

fn write_output(table: &StatTable, output: &OutputArgs, cache_dir: &Path) -> Result<()> {
    let path = output
        .output
        .clone()
        .unwrap_or_else(|| default_output(cache_dir, table.shape, table.season, output.format));

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).context("Failed to create output directory")?;
    }

    match output.format {
        Format::Json => save_to_cache(table, &path)?,
        Format::Csv => save_to_csv(table, &path)?,
        Format::Sql => save_to_sql(table, table.shape.table_name(), &path)?,
    }

    println!("Saved {} rows to {}", table.len(), path.display());
    Ok(())
}
