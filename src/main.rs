use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use zxml::{
    error::Result,
    formatter::FormatConfig,
    parse_file_with_config,
    parser::config::{ParserConfig, DEFAULT_MAX_DEPTH},
    utils::{format_xml_with_config, write_file},
};

/// Parse an XML document and print it in canonical form
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file path
    file: String,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Print attributes sorted by name
    #[arg(long)]
    sort_attributes: bool,

    /// Maximum number of nested grammar rules
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() {
    // Logs go to stderr so stdout only carries the document
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let parser_config = ParserConfig::default().with_max_depth(args.max_depth);
    let document = parse_file_with_config(&args.file, parser_config)?;

    let format_config = FormatConfig::default()
        .with_indent_spaces(args.indent)
        .with_sort_attributes(args.sort_attributes);
    let formatted = format_xml_with_config(&document, &format_config)?;

    if let Some(output_path) = args.output {
        info!("Writing formatted document to {}", output_path);
        write_file(&output_path, &formatted)?;
    } else {
        print!("{}", formatted);
    }

    Ok(())
}
