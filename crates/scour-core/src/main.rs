use anyhow::{anyhow, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use scour_core::{CleaningPipeline, PipelineConfig};
use scour_table::{default_parsers, DsvParser, Table, TableParser};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Command::new("scour")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Profile and clean string-typed tabular data")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("profile")
                .about("Infer a semantic type per column and print the profiles")
                .arg(input_arg())
                .arg(delimiter_arg())
                .arg(max_cells_arg())
                .arg(no_parallel_arg())
                .arg(pretty_arg()),
        )
        .subcommand(
            Command::new("clean")
                .about("Clean a table and write the result")
                .arg(input_arg())
                .arg(delimiter_arg())
                .arg(max_cells_arg())
                .arg(no_parallel_arg())
                .arg(pretty_arg())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the cleaned table here (CSV); stdout when omitted"),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the run report here (JSON)"),
                ),
        );

    match cli.get_matches().subcommand() {
        Some(("profile", args)) => run_profile(args),
        Some(("clean", args)) => run_clean(args),
        _ => unreachable!("arg_required_else_help"),
    }
}

fn input_arg() -> Arg {
    Arg::new("input")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Input table (.csv, .tsv, .dsv or .json)")
}

fn delimiter_arg() -> Arg {
    Arg::new("delimiter")
        .long("delimiter")
        .short('d')
        .help("Field delimiter, overriding extension-based dispatch")
}

fn max_cells_arg() -> Arg {
    Arg::new("max-cells")
        .long("max-cells")
        .value_parser(value_parser!(usize))
        .help("Cell budget (rows * columns) before the run is refused")
}

fn no_parallel_arg() -> Arg {
    Arg::new("no-parallel")
        .long("no-parallel")
        .action(ArgAction::SetTrue)
        .help("Profile columns sequentially")
}

fn pretty_arg() -> Arg {
    Arg::new("pretty")
        .long("pretty")
        .action(ArgAction::SetTrue)
        .help("Pretty-print JSON output")
}

fn run_profile(args: &ArgMatches) -> Result<()> {
    let table = ingest(args)?;
    let pipeline = CleaningPipeline::new(config_from(args));
    let profiles = pipeline.profile(&table)?;
    print_json(&*profiles, args.get_flag("pretty"))
}

fn run_clean(args: &ArgMatches) -> Result<()> {
    let table = ingest(args)?;
    let pipeline = CleaningPipeline::new(config_from(args));
    let (cleaned, report) = pipeline.clean(table)?;

    match args.get_one::<PathBuf>("out") {
        Some(path) => {
            fs::write(path, cleaned.to_dsv(','))
                .with_context(|| format!("writing cleaned table to {}", path.display()))?;
        }
        None => print!("{}", cleaned.to_dsv(',')),
    }

    match args.get_one::<PathBuf>("report") {
        Some(path) => {
            let json = serde_json::to_string_pretty(&report)?;
            fs::write(path, json)
                .with_context(|| format!("writing report to {}", path.display()))?;
        }
        None => {
            eprintln!(
                "run {}: {} edits across {} columns, {} failures, {} ms",
                report.run_id,
                report.total_edits(),
                report.changed_columns(),
                report.failures.total(),
                report.elapsed_ms
            );
        }
    }
    Ok(())
}

fn config_from(args: &ArgMatches) -> PipelineConfig {
    let mut config = PipelineConfig::new().with_parallel(!args.get_flag("no-parallel"));
    if let Some(max_cells) = args.get_one::<usize>("max-cells") {
        config = config.with_max_cells(*max_cells);
    }
    config
}

fn ingest(args: &ArgMatches) -> Result<Table> {
    let path = args
        .get_one::<PathBuf>("input")
        .ok_or_else(|| anyhow!("input path is required"))?;
    match args.get_one::<String>("delimiter") {
        Some(delimiter) => {
            let mut chars = delimiter.chars();
            let (delim, rest) = (chars.next(), chars.next());
            let delim = match (delim, rest) {
                (Some(c), None) => c,
                _ => return Err(anyhow!("delimiter must be a single character")),
            };
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(DsvParser::new(delim).parse(&content)?)
        }
        None => Ok(default_parsers().parse_path(path)?),
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
