//! gcdiff - Compare two cloud resources or configuration documents.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, Level};

use gcdiff::config::{Config, RuleSet};
use gcdiff::diff::{record, Differ};
use gcdiff::render::{self, AnsiPalette, Palette, PlainPalette, Style};
use gcdiff::source::{DocumentSource, FileSource, GcloudSource, Location, ResourceType};

/// Fields that always differ between two resources of the same project.
const SAME_PROJECT_IGNORE_FIELDS: &[&str] = &["name", "selfLink", "self_link"];

#[derive(Debug, Parser)]
#[command(name = "gcdiff", version, about = "Compare two cloud resources or configuration documents")]
struct Cli {
    /// Path to the ignore-rule config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Inline)]
    format: Format,

    /// Report every difference, ignoring the configured rules
    #[arg(long, global = true)]
    show_all: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Nested report following the document structure
    Inline,
    /// Changes grouped into added, removed and modified sections
    Grouped,
    /// The difference tree as JSON
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare two local JSON or YAML files
    Files {
        /// Left-hand file
        lhs: PathBuf,
        /// Right-hand file
        rhs: PathBuf,
    },

    /// Compare two resources described by gcloud
    Resource(ResourceArgs),
}

#[derive(Debug, Args)]
struct ResourceArgs {
    /// Resource type: a shortcut such as `compute` or a gcloud command group
    #[arg(value_name = "TYPE")]
    resource_type: String,

    /// First resource name
    name1: String,

    /// Second resource name
    name2: String,

    /// Project of the first resource
    #[arg(long)]
    project1: String,

    /// Project of the second resource (defaults to --project1)
    #[arg(long)]
    project2: Option<String>,

    #[arg(long)]
    zone1: Option<String>,

    /// Defaults to --zone1
    #[arg(long)]
    zone2: Option<String>,

    #[arg(long)]
    region1: Option<String>,

    /// Defaults to --region1
    #[arg(long)]
    region2: Option<String>,

    #[arg(long)]
    location1: Option<String>,

    /// Defaults to --location1
    #[arg(long)]
    location2: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let rules = load_rules(cli.config.as_deref())?;

    match &cli.command {
        Command::Files { lhs, rhs } => {
            let source = FileSource::new();
            let name1 = lhs.display().to_string();
            let name2 = rhs.display().to_string();
            compare(cli, &rules, &source, &name1, &source, &name2)
        }
        Command::Resource(args) => {
            let resource = ResourceType::resolve(&args.resource_type);
            let project2 = args.project2.as_deref().unwrap_or(&args.project1);

            let location1 = Location {
                zone: args.zone1.clone(),
                region: args.region1.clone(),
                location: args.location1.clone(),
            };
            let location2 = Location {
                zone: args.zone2.clone(),
                region: args.region2.clone(),
                location: args.location2.clone(),
            }
            .or(&location1);

            let rules = if args.project1 == project2 {
                debug!(project = %args.project1, "same project, ignoring resource identity");
                rules.with_fields(SAME_PROJECT_IGNORE_FIELDS.iter().copied())
            } else {
                rules
            };

            let source1 = GcloudSource::new(resource.clone(), &args.project1, location1);
            let source2 = GcloudSource::new(resource, project2, location2);
            compare(cli, &rules, &source1, &args.name1, &source2, &args.name2)
        }
    }
}

fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    let path = match path {
        Some(path) => {
            if !path.is_file() {
                bail!("config file {} does not exist", path.display());
            }
            Some(path.to_path_buf())
        }
        None => Config::discover(),
    };

    let config = Config::load(path.as_deref()).context("failed to load config")?;
    let rules = config.rules().context("failed to load config")?;
    debug!(
        fields = ?rules.fields(),
        patterns = ?rules.patterns().collect::<Vec<_>>(),
        "loaded ignore rules"
    );
    Ok(rules)
}

fn compare(
    cli: &Cli,
    rules: &RuleSet,
    source1: &dyn DocumentSource,
    name1: &str,
    source2: &dyn DocumentSource,
    name2: &str,
) -> Result<()> {
    let lhs = source1
        .fetch(name1)
        .with_context(|| format!("failed to fetch {}", name1))?;
    let rhs = source2
        .fetch(name2)
        .with_context(|| format!("failed to fetch {}", name2))?;

    let tree = Differ::new(rules, cli.show_all).compare(&lhs, &rhs);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Json => {
            let json = record::to_json(&tree).context("failed to encode differences")?;
            writeln!(out, "{}", json)?;
        }
        Format::Inline | Format::Grouped => {
            let style = if cli.format == Format::Grouped {
                Style::Grouped
            } else {
                Style::Hierarchical
            };
            let palette: &dyn Palette = if cli.no_color || !io::stdout().is_terminal() {
                &PlainPalette
            } else {
                &AnsiPalette
            };
            render::render(style, palette, &tree, name1, name2, &mut out)
                .context("failed to write report")?;
        }
    }
    out.flush()?;
    Ok(())
}
