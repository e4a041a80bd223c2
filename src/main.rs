use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use stitchkit::{init_logging, Config, MeasurementSystem, PatternDocument, PatternEngine};
use tracing::{info, warn};

const USAGE: &str = "Usage: stitchkit <pattern.json> [--config <file>] [--units metric|imperial]";

#[derive(Debug, PartialEq)]
struct CliArgs {
    pattern: PathBuf,
    config: Option<PathBuf>,
    units: Option<MeasurementSystem>,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut pattern = None;
        let mut config = None;
        let mut units = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args.next().context("--config needs a file")?;
                    config = Some(PathBuf::from(value));
                }
                "--units" => {
                    let value = args.next().context("--units needs a value")?;
                    units = Some(value.parse::<MeasurementSystem>().map_err(anyhow::Error::msg)?);
                }
                flag if flag.starts_with("--") => bail!("Unknown option {}\n{}", flag, USAGE),
                _ if pattern.is_none() => pattern = Some(PathBuf::from(&arg)),
                _ => bail!("Unexpected argument {}\n{}", arg, USAGE),
            }
        }

        Ok(Self {
            pattern: pattern.context(USAGE)?,
            config,
            units,
        })
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    match Config::default_path() {
        Ok(path) => Ok(Config::load_or_default(&path)?),
        Err(e) => {
            warn!("No default config location ({}), using defaults", e);
            Ok(Config::default())
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let args = CliArgs::parse(std::env::args().skip(1))?;
    let config = load_config(args.config.as_deref())?;
    let document = PatternDocument::load_from_file(&args.pattern)
        .with_context(|| format!("Failed to load pattern {}", args.pattern.display()))?;

    info!(
        "StitchKit {} (built {}): {}",
        stitchkit::VERSION,
        stitchkit::BUILD_DATE,
        document.name
    );

    let engine = PatternEngine::new(document, config.pattern.clone());
    let units = args.units.unwrap_or(config.display.measurement_system);
    let report = engine.stitch_report().in_units(units);

    for mismatch in &report.mismatches {
        warn!(
            "Range {} has {} stitches but joined range {} has {}",
            mismatch.range, mismatch.count, mismatch.joined_with, mismatch.joined_count
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
