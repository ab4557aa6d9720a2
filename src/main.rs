use anyhow::Context;
use chrono::Utc;
use clap::{Args as ClapArgs, Parser, Subcommand};
use qos_check::check::{load_config, report_writer};
use qos_check::report::{ExpandedListReport, FileListReport, ReportHeader};
use qos_check::{
    create_fixture, expand, load_golden_list, run_check, scan_directory, CheckOptions,
    FixtureOptions, ReportFormat, ScanOptions,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// QoS Check - reconcile verification artifacts against a golden list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true, env = "QOS_CHECK_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand the golden list, scan the directory and report matched/missing/extra names
    Check(CheckArgs),
    /// Write the list of files found under a directory
    Scan(ScanArgs),
    /// Write the golden list with every placeholder expanded
    Expand(ExpandArgs),
    /// Create a synthetic directory tree and golden list to try the tool on
    Fixture(FixtureArgs),
}

#[derive(ClapArgs, Debug)]
struct OutputArgs {
    /// Directory reports are written to
    #[arg(short, long, env = "QOS_CHECK_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Append a timestamp to report file names
    #[arg(long, env = "QOS_CHECK_TIMESTAMP")]
    timestamp: bool,

    /// Report format
    #[arg(long, env = "QOS_CHECK_FORMAT", value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(ClapArgs, Debug)]
struct AxisArgs {
    /// Additional modes, unioned with the configured mode set.
    /// Example: --modes=IDDQ,BIST
    #[arg(long, env = "QOS_CHECK_MODES", value_delimiter = ',')]
    modes: Vec<String>,

    /// JSON file overriding the default axis sets
    #[arg(short, long, env = "QOS_CHECK_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct CheckArgs {
    /// SoC block name substituted for <block>
    #[arg(short, long, env = "QOS_CHECK_BLOCK")]
    block: String,

    /// Directory to scan
    #[arg(short, long, env = "QOS_CHECK_DIR")]
    dir: PathBuf,

    /// Golden list template file
    #[arg(short, long, env = "QOS_CHECK_GOLDEN_LIST")]
    golden_list: PathBuf,

    #[command(flatten)]
    axes: AxisArgs,

    /// List the resolved file paths under matched and extra entries
    #[arg(long, env = "QOS_CHECK_ANNOTATE_PATHS")]
    annotate_paths: bool,

    /// Handlebars template replacing the built-in reconciliation report layout
    #[arg(long, env = "QOS_CHECK_REPORT_TEMPLATE")]
    report_template: Option<PathBuf>,

    /// Exit with status 1 when any name is missing or extra
    #[arg(long)]
    fail_on_diff: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
struct ScanArgs {
    /// Directory to scan
    dir: PathBuf,

    /// JSON file overriding the excluded directory names
    #[arg(short, long, env = "QOS_CHECK_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
struct ExpandArgs {
    /// Golden list template file
    golden_list: PathBuf,

    /// SoC block name substituted for <block>
    #[arg(short, long, env = "QOS_CHECK_BLOCK")]
    block: String,

    #[command(flatten)]
    axes: AxisArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
struct FixtureArgs {
    /// Directory to create
    dir: PathBuf,

    /// Where to write the golden list naming the fixture files
    #[arg(short, long, default_value = "golden_list.txt")]
    golden_list: PathBuf,

    /// Golden file names (defaults to a small built-in list)
    #[arg(long, value_delimiter = ',')]
    names: Vec<String>,

    /// Number of extra files not mentioned in the golden list
    #[arg(long, default_value_t = 5)]
    extra: usize,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging; QOS_CHECK_LOG overrides the level
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("QOS_CHECK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Check(args) => check(args),
        Command::Scan(args) => scan(args),
        Command::Expand(args) => expand_golden_list(args),
        Command::Fixture(args) => fixture(args),
    }
}

fn check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let options = CheckOptions {
        block_name: args.block,
        target_dir: args.dir,
        golden_list: args.golden_list,
        extra_modes: args.axes.modes,
        config_path: args.axes.config,
        annotate_paths: args.annotate_paths,
        output_dir: args.output.output_dir,
        timestamp: args.output.timestamp,
        format: args.output.format,
        report_template: args.report_template,
    };

    let outcome = run_check(&options).context("Check failed")?;
    let result = &outcome.reconciliation;

    println!(
        "Matched: {}  Missing: {}  Extra: {}",
        result.matched.len(),
        result.missing.len(),
        result.extra.len()
    );
    println!("Report: {}", outcome.reports.reconciliation.display());

    if result.is_clean() {
        info!("All file names match the expanded golden list");
        Ok(ExitCode::SUCCESS)
    } else if args.fail_on_diff {
        warn!("Directory does not match the golden list");
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn scan(args: ScanArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let options = ScanOptions {
        excluded_dirs: config.excluded_dirs(),
        ..Default::default()
    }
    .with_report_dir(&args.output.output_dir);
    let actual = scan_directory(&args.dir, &options)
        .with_context(|| format!("Failed to scan {}", args.dir.display()))?;

    let writer = report_writer(
        &args.output.output_dir,
        args.output.format,
        args.output.timestamp,
        None,
    )?;
    let path = writer.write_file_list(&FileListReport::build(Utc::now(), &actual))?;

    println!("Directory file list saved to: {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn expand_golden_list(args: ExpandArgs) -> anyhow::Result<ExitCode> {
    let golden = load_golden_list(&args.golden_list)?;
    let axes = load_config(args.axes.config.as_deref())?
        .axis_sets()?
        .with_extra_modes(&args.axes.modes)?;

    let expected = expand(&golden.lines, &args.block, &axes)?;

    let header = ReportHeader {
        generated_at: Utc::now(),
        block_name: args.block,
        target_dir: String::new(),
        golden_list: golden.path.to_string_lossy().into_owned(),
        golden_fingerprint: golden.fingerprint,
    };
    let writer = report_writer(
        &args.output.output_dir,
        args.output.format,
        args.output.timestamp,
        None,
    )?;
    let path = writer.write_expanded_list(&ExpandedListReport::build(&header, &expected))?;

    println!("Updated golden list saved to: {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn fixture(args: FixtureArgs) -> anyhow::Result<ExitCode> {
    let mut options = FixtureOptions::new(args.dir, args.golden_list);
    if !args.names.is_empty() {
        options.names = args.names;
    }
    options.extra_files = args.extra;

    let result = create_fixture(&options)?;

    println!(
        "Test environment created at '{}' ({} golden, {} extra files).",
        options.base_dir.display(),
        result.golden_files.len(),
        result.extra_files.len()
    );
    println!("Golden list file written to '{}'.", result.golden_list_file.display());
    Ok(ExitCode::SUCCESS)
}
