//! scenegen command line
//!
//! `scenegen generate model.glb` prints the component source;
//! `scenegen inspect model.glb` lists the editable properties.

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use scenegen_graph::PropertyValue;
use scenegen_props::{ControlInput, ControlSchema, SyntheticBatch, SyntheticKey};
use scenegen_session::{ModelFile, Reconciler, RegenerationPath, StudioConfig};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Generation switches that map one to one onto config fields
const SWITCHES: [(&str, &str); 8] = [
    ("types", "Add TypeScript definitions"),
    ("instance", "Instance recurring geometry"),
    ("instanceall", "Instance every geometry (for cheaper re-use)"),
    ("verbose", "Verbose output w/ names and empty groups"),
    ("keepnames", "Keep names"),
    ("keepgroups", "Keep (empty) groups, disable pruning"),
    ("aggressive", "Aggressive pruning (flatten plain groups)"),
    ("meta", "Include metadata (as userData)"),
];

fn cli() -> Command {
    let file = Arg::new("file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("glTF or GLB model");

    let mut generate = Command::new("generate")
        .about("Generate a react-three-fiber component from a model")
        .arg(file.clone())
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("Studio config (TOML)"),
        )
        .arg(
            Arg::new("precision")
                .long("precision")
                .value_parser(value_parser!(u8))
                .help("Number of fractional digits (1 to 8)"),
        )
        .arg(
            Arg::new("printwidth")
                .long("printwidth")
                .value_parser(value_parser!(usize))
                .help("Target line width"),
        )
        .arg(
            Arg::new("reparse")
                .long("reparse")
                .action(ArgAction::SetTrue)
                .help("Generate from a fresh parse instead of the edited scene"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .action(ArgAction::Append)
                .value_name("PROPERTY:NODE=VALUE")
                .help("Edit a property before generating, e.g. visible:Wheel=false"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_parser(value_parser!(PathBuf))
                .help("Write source to a file instead of stdout"),
        )
        .arg(
            Arg::new("zip")
                .long("zip")
                .value_parser(value_parser!(PathBuf))
                .help("Also write the sandbox project archive"),
        );
    for (name, help) in SWITCHES {
        generate = generate.arg(
            Arg::new(name)
                .long(name)
                .action(ArgAction::SetTrue)
                .help(help),
        );
    }

    Command::new("scenegen")
        .version(scenegen_session::VERSION)
        .about("Turn glTF models into declarative JSX components")
        .subcommand_required(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log as JSON lines"),
        )
        .subcommand(generate)
        .subcommand(
            Command::new("inspect")
                .about("List the editable properties of a model")
                .arg(file)
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn init_logging(debug: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

/// Studio config from `--config`, with command line flags on top
async fn studio_config(args: &ArgMatches) -> Result<StudioConfig> {
    let mut studio = match args.get_one::<PathBuf>("config") {
        Some(path) => StudioConfig::load(path).await?,
        None => StudioConfig::default(),
    };
    let generation = &mut studio.generation;
    for (name, _) in SWITCHES {
        if !args.get_flag(name) {
            continue;
        }
        match name {
            "types" => generation.types = true,
            "instance" => generation.instance = true,
            "instanceall" => generation.instanceall = true,
            "verbose" => generation.verbose = true,
            "keepnames" => generation.keepnames = true,
            "keepgroups" => generation.keepgroups = true,
            "aggressive" => generation.aggressive = true,
            "meta" => generation.meta = true,
            _ => {}
        }
    }
    if let Some(precision) = args.get_one::<u8>("precision") {
        generation.precision = *precision;
    }
    if let Some(width) = args.get_one::<usize>("printwidth") {
        generation.printwidth = *width;
    }
    if args.get_flag("reparse") {
        studio.regeneration = RegenerationPath::Reparse;
    }
    studio.validate()?;
    Ok(studio)
}

/// Split `property:node=value`; the last `=` separates the value
fn parse_assignment(raw: &str) -> Result<(String, PropertyValue)> {
    let Some((key, value)) = raw.rsplit_once('=') else {
        bail!("expected PROPERTY:NODE=VALUE, got '{raw}'");
    };
    if key.is_empty() {
        bail!("missing key in '{raw}'");
    }
    key.parse::<SyntheticKey>()
        .with_context(|| format!("invalid key in '{raw}'"))?;
    let value = value
        .parse::<PropertyValue>()
        .with_context(|| format!("invalid value in '{raw}'"))?;
    Ok((key.to_string(), value))
}

async fn load(path: &Path, studio: StudioConfig) -> Result<Reconciler> {
    let file = ModelFile::read(path).await?;
    let mut reconciler = Reconciler::default().with_studio_config(studio);
    reconciler
        .load(file)
        .await
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(reconciler)
}

async fn generate(args: &ArgMatches) -> Result<()> {
    let path = args
        .get_one::<PathBuf>("file")
        .context("missing model file")?;
    let studio = studio_config(args).await?;
    let mut reconciler = load(path, studio).await?;

    let batch = args
        .get_many::<String>("set")
        .into_iter()
        .flatten()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<SyntheticBatch>>()?;
    if !batch.is_empty() {
        let report = reconciler.apply_synthetic(&batch).await?;
        info!(applied = report.applied, skipped = report.skipped, "applied edits");
    }

    let code = reconciler.code().context("no code generated")?;
    match args.get_one::<PathBuf>("output") {
        Some(output) => {
            tokio::fs::write(output, code)
                .await
                .with_context(|| format!("cannot write {}", output.display()))?;
            info!(path = %output.display(), "wrote component");
        }
        None => print!("{code}"),
    }

    if let Some(zip) = args.get_one::<PathBuf>("zip") {
        let bytes = reconciler.export_archive().await?;
        tokio::fs::write(zip, bytes)
            .await
            .with_context(|| format!("cannot write {}", zip.display()))?;
        info!(path = %zip.display(), "wrote sandbox archive");
    }
    Ok(())
}

fn describe(schema: &ControlSchema) -> String {
    let mut out = String::new();
    for group in schema.groups() {
        out.push_str(&group.name);
        out.push('\n');
        for control in &group.controls {
            let value = match &control.input {
                ControlInput::Toggle { value } => value.to_string(),
                ControlInput::Slider { value, .. } => value.to_string(),
            };
            out.push_str(&format!("  {} = {value}\n", control.hint));
        }
    }
    out
}

async fn inspect(args: &ArgMatches) -> Result<()> {
    let path = args
        .get_one::<PathBuf>("file")
        .context("missing model file")?;
    let mut reconciler = load(path, StudioConfig::default()).await?;
    let Some(schema) = reconciler.schema() else {
        bail!("{} has no scene", path.display());
    };
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&*schema)?);
    } else {
        print!("{}", describe(&schema));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("debug"), matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("generate", args)) => generate(args).await,
        Some(("inspect", args)) => inspect(args).await,
        _ => Ok(()),
    }
}
