use anyhow::{Context, Result};
use clap::Parser;
use odata_dsl::{QueryAssembler, RawParsedQuery, TranslatorConfig, MAX_DECODABLE_FILTER_DEPTH};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "odata-dsl")]
#[command(about = "Translate parsed OData query options into a search query document", long_about = None)]
struct Args {
    /// Parsed query options as JSON ("-" reads stdin)
    #[arg(long, env = "ODATA_DSL_INPUT", default_value = "-")]
    input: PathBuf,

    /// Page size used when $top is missing or unusable
    #[arg(long, env = "ODATA_DSL_DEFAULT_SIZE", default_value = "0")]
    default_size: u64,

    /// Maximum operator nesting accepted in $filter
    #[arg(long, env = "ODATA_DSL_MAX_DEPTH", default_value = "64")]
    max_depth: usize,

    /// Honor a $select list holding a single field
    #[arg(long, env = "ODATA_DSL_PROJECT_SINGLE_FIELD")]
    project_single_field: bool,

    /// Pretty-print the query document
    #[arg(long)]
    pretty: bool,
}

fn read_input(path: &Path) -> Result<String> {
    let mut input = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read query options from stdin")?;
    } else {
        input = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read query options from {}", path.display()))?;
    }
    Ok(input)
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the document
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = TranslatorConfig::default()
        .with_default_page_size(args.default_size)
        .with_max_filter_depth(args.max_depth)
        .with_project_single_field(args.project_single_field);
    debug!(?config, "translator configuration");
    if args.max_depth > MAX_DECODABLE_FILTER_DEPTH {
        warn!(
            max_depth = args.max_depth,
            ceiling = MAX_DECODABLE_FILTER_DEPTH,
            "JSON input cannot nest filters past the decoding ceiling"
        );
    }

    let input = read_input(&args.input)?;
    let raw = RawParsedQuery::from_json_str(&input)?;

    let document = QueryAssembler::new(config).build_from_raw(raw)?;
    info!(
        from = document.from,
        size = document.size,
        query_type = document.query.query_type().unwrap_or("match_all"),
        "query document built"
    );

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", document.to_json_string(args.pretty)?)?;

    Ok(())
}
