//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report::CsvReport;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::table_report::TableReport;
use crate::domain::condition::{Condition, Operator};
use crate::domain::config_validation::validate_screen_config;
use crate::domain::error::ScreenerError;
use crate::domain::field_registry;
use crate::domain::pagination::{clamp_page, DEFAULT_PAGE_SIZE};
use crate::domain::query_parser::{normalize_query, parse_query_with_diagnostics, ParsedQuery};
use crate::domain::screen::{screen, ScreenRequest};
use crate::domain::sort::{SortDirection, SortState};
use crate::domain::stock::{SortKey, Stock};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::StockDataPort;
use crate::ports::report_port::ReportPort;

/// Separator between query lines in the single-line `[screen] query` config value.
pub const CONFIG_QUERY_SEPARATOR: char = '|';

#[derive(Parser, Debug)]
#[command(name = "screener", about = "Stock fundamentals screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter, sort and page a dataset with a query
    Screen(ScreenArgs),
    /// Parse a query and report problems without screening
    Check {
        /// One query line; repeat for more lines
        #[arg(short, long)]
        query: Vec<String>,
        #[arg(long, conflicts_with = "query")]
        query_file: Option<PathBuf>,
    },
    /// List the field labels a query can use and the sortable columns
    Fields,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ScreenArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short, long)]
    pub data: Option<PathBuf>,
    /// One query line; repeat for more lines
    #[arg(short, long)]
    pub query: Vec<String>,
    /// Read the query from a file (`-` for stdin)
    #[arg(long, conflicts_with = "query")]
    pub query_file: Option<PathBuf>,
    /// Column id (`market_cap`) or field label (`P/E Ratio`)
    #[arg(long)]
    pub sort: Option<SortKey>,
    #[arg(long)]
    pub desc: bool,
    #[arg(short, long)]
    pub page: Option<usize>,
    #[arg(long)]
    pub page_size: Option<usize>,
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Refuse to screen when the query has problems
    #[arg(long)]
    pub strict: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Screen(args) => run_screen(&args),
        Command::Check { query, query_file } => run_check(&query, query_file.as_deref()),
        Command::Fields => run_fields(),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn read_query_file(path: &Path) -> Result<String, ScreenerError> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|e| ScreenerError::ConfigInvalid {
        section: "screen".into(),
        key: "query_file".into(),
        reason: format!("failed to read {}: {}", path.display(), e),
    })
}

/// Query text from, in order of precedence: `--query` lines, `--query-file`, config
/// `query_file`, config `query`. No source at all means an empty query.
pub fn resolve_query(
    lines: &[String],
    query_file: Option<&Path>,
    config: Option<&dyn ConfigPort>,
) -> Result<String, ScreenerError> {
    if !lines.is_empty() {
        return Ok(lines.join("\n"));
    }
    if let Some(path) = query_file {
        return read_query_file(path);
    }
    let Some(config) = config else {
        return Ok(String::new());
    };
    if let Some(path) = config.get_string("screen", "query_file") {
        return read_query_file(Path::new(path.trim()));
    }
    Ok(config
        .get_string("screen", "query")
        .map(|q| {
            q.split(CONFIG_QUERY_SEPARATOR)
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default())
}

pub fn resolve_data_path(
    args: &ScreenArgs,
    config: Option<&dyn ConfigPort>,
) -> Result<PathBuf, ScreenerError> {
    if let Some(path) = &args.data {
        return Ok(path.clone());
    }
    config
        .and_then(|c| c.get_string("data", "path"))
        .map(|p| PathBuf::from(p.trim()))
        .ok_or_else(|| ScreenerError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })
}

pub fn resolve_format(
    args: &ScreenArgs,
    config: Option<&dyn ConfigPort>,
) -> Result<OutputFormat, ScreenerError> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    match config.and_then(|c| c.get_string("output", "format")) {
        Some(s) => OutputFormat::from_str(s.trim(), true).map_err(|reason| {
            ScreenerError::ConfigInvalid {
                section: "output".into(),
                key: "format".into(),
                reason,
            }
        }),
        None => Ok(OutputFormat::default()),
    }
}

/// Build the screen request from CLI flags, falling back to config values.
pub fn build_screen_request(
    args: &ScreenArgs,
    config: Option<&dyn ConfigPort>,
) -> Result<ScreenRequest, ScreenerError> {
    let query = resolve_query(&args.query, args.query_file.as_deref(), config)?;

    let key = match args.sort {
        Some(key) => key,
        None => match config.and_then(|c| c.get_string("screen", "sort")) {
            Some(s) => s.parse::<SortKey>().map_err(|e| ScreenerError::ConfigInvalid {
                section: "screen".into(),
                key: "sort".into(),
                reason: e.to_string(),
            })?,
            None => SortKey::Id,
        },
    };

    let direction = if args.desc {
        SortDirection::Descending
    } else {
        match config.and_then(|c| c.get_string("screen", "direction")) {
            Some(s) => s.parse::<SortDirection>().map_err(|e| ScreenerError::ConfigInvalid {
                section: "screen".into(),
                key: "direction".into(),
                reason: e.to_string(),
            })?,
            None => SortDirection::Ascending,
        }
    };

    let page_size = match args.page_size {
        Some(size) => size,
        None => config
            .map(|c| c.get_int("screen", "page_size", DEFAULT_PAGE_SIZE as i64))
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .max(0) as usize,
    };
    if page_size == 0 {
        return Err(ScreenerError::ConfigInvalid {
            section: "screen".into(),
            key: "page_size".into(),
            reason: "page_size must be a positive integer".into(),
        });
    }

    Ok(ScreenRequest {
        query,
        sort: SortState::new(key, direction),
        page: args.page.unwrap_or(1),
        page_size,
    })
}

fn report_for(format: OutputFormat) -> Box<dyn ReportPort> {
    match format {
        OutputFormat::Table => Box::new(TableReport::new()),
        OutputFormat::Csv => Box::new(CsvReport::new()),
    }
}

fn print_diagnostics(parsed: &ParsedQuery, query: &str, level: &str) {
    for diagnostic in &parsed.diagnostics {
        eprintln!("{level}: {}", diagnostic.display_with_context(query));
    }
}

fn run_screen(args: &ScreenArgs) -> ExitCode {
    // Stage 1: Load config
    let config = match &args.config {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(c) => Some(c),
                Err(code) => return code,
            }
        }
        None => None,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    if let Some(c) = config_port {
        if let Err(e) = validate_screen_config(c) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    // Stage 2: Build request
    let request = match build_screen_request(args, config_port) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let format = match resolve_format(args, config_port) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let strict = args.strict
        || config_port
            .map(|c| c.get_bool("screen", "strict", false))
            .unwrap_or(false);

    // Stage 3: Load dataset
    let data_path = match resolve_data_path(args, config_port) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loading data from {}", data_path.display());
    let stocks = match CsvAdapter::new(data_path).load_stocks() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded {} stocks", stocks.len());

    // Stage 4: Screen and write
    let output_path = args.output.clone().or_else(|| {
        config_port
            .and_then(|c| c.get_string("output", "path"))
            .map(|p| PathBuf::from(p.trim()))
    });
    match run_screen_pipeline(&stocks, request, format, strict, output_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_screen_pipeline(
    stocks: &[Stock],
    mut request: ScreenRequest,
    format: OutputFormat,
    strict: bool,
    output_path: Option<&Path>,
) -> Result<(), ScreenerError> {
    let mut result = screen(stocks, &request);

    if !result.parsed.is_clean() {
        if strict {
            print_diagnostics(&result.parsed, &request.query, "error");
            return Err(ScreenerError::QueryInvalid {
                count: result.parsed.diagnostics.len(),
            });
        }
        print_diagnostics(&result.parsed, &request.query, "warning");
    }

    let page_count = result.page.page_count();
    let clamped = clamp_page(request.page, page_count);
    if clamped != request.page && page_count > 0 {
        eprintln!(
            "warning: page {} out of range, showing page {} of {}",
            request.page, clamped, page_count
        );
        request.page = clamped;
        result = screen(stocks, &request);
    }

    let report = report_for(format);
    match output_path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            report.write(&result, &mut file)?;
            eprintln!("Results written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            report.write(&result, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Human-readable explanation of how one condition will be applied.
pub fn describe_condition(condition: &Condition) -> String {
    let note = match (&condition.operator, field_registry::lookup(&condition.field)) {
        (Operator::Missing, _) => "malformed, never matches".to_string(),
        (_, None) => "unknown field, always matches".to_string(),
        (Operator::Unrecognized(_), Some(_)) => "unrecognized operator, always matches".to_string(),
        (_, Some(_)) if condition.value.is_nan() => "invalid number, never matches".to_string(),
        (_, Some(field)) => return format!("{}  -> {}", condition, field.column_id()),
    };
    format!("{}  ({})", condition, note)
}

fn run_check(lines: &[String], query_file: Option<&Path>) -> ExitCode {
    let query = match resolve_query(lines, query_file, None) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let parsed = parse_query_with_diagnostics(&query);

    if parsed.conditions.is_empty() {
        println!("Empty query: every stock matches.");
    } else {
        println!("Conditions (all must match):");
        for (i, condition) in parsed.conditions.iter().enumerate() {
            println!("  {}. {}", i + 1, describe_condition(condition));
        }
        println!("\nNormalized query:");
        for line in normalize_query(&query).lines().filter(|l| !l.trim().is_empty()) {
            println!("  {}", line);
        }
    }

    if parsed.is_clean() {
        eprintln!("\nQuery is valid.");
        ExitCode::SUCCESS
    } else {
        eprintln!();
        print_diagnostics(&parsed, &query, "error");
        let err = ScreenerError::QueryInvalid {
            count: parsed.diagnostics.len(),
        };
        eprintln!("error: {err}");
        (&err).into()
    }
}

fn run_fields() -> ExitCode {
    println!("Query fields:");
    for (label, field) in field_registry::FIELDS {
        println!("  {:<24}{}", label, field.column_id());
    }
    println!("\nSort keys:");
    let keys: Vec<String> = SortKey::all().iter().map(|k| k.to_string()).collect();
    println!("  {}", keys.join(", "));
    ExitCode::SUCCESS
}
