//! Command line front end: analyse a JSON sweep and print the bandwidth.
//!
//! ```bash
//! echo '{"x":[0,1,2,3,4,5,6],"y":[0,1,3,5,3,1,0]}' | sweep_analyse
//! sweep_analyse sweep.json --target 1550.2 --depth 4 --level -6
//! sweep_analyse dip.json --comparator less --remove-zero=false
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing::debug;

use sweep_analysis::analysis::{analyze, Comparator, SweepParams, Target};
use sweep_analysis::config::{AnalysisConfig, DEFAULT_CONFIG_PATH};
use sweep_analysis::logging;

#[derive(Parser, Debug)]
#[command(name = "sweep_analyse", version, about = "Peak and level-crossing bandwidth of a sweep")]
struct Args {
    /// JSON file with {"x": [...], "y": [...]}; reads stdin when omitted
    input: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// x value near which to search (global extremum when omitted)
    #[arg(short, long, allow_negative_numbers = true)]
    target: Option<f64>,

    /// Level offset from the extremum, e.g. -3
    #[arg(short, long, allow_negative_numbers = true)]
    level: Option<f64>,

    /// Number of window orders tried by the locator
    #[arg(short, long)]
    depth: Option<usize>,

    /// Search for a peak (greater) or a dip (less)
    #[arg(long, value_enum)]
    comparator: Option<ComparatorArg>,

    /// Drop zero-valued samples before analysis (`--remove-zero=false` disables)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    remove_zero: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ComparatorArg {
    Greater,
    Less,
}

impl From<ComparatorArg> for Comparator {
    fn from(arg: ComparatorArg) -> Self {
        match arg {
            ComparatorArg::Greater => Comparator::Greater,
            ComparatorArg::Less => Comparator::Less,
        }
    }
}

/// Configured parameters with command line overrides applied.
fn resolve_params(args: &Args, config: &AnalysisConfig) -> SweepParams {
    let mut params = config.bandwidth.to_params();
    if let Some(target) = args.target {
        params.target = Target::from_legacy(target);
    }
    if let Some(level) = args.level {
        params.level = level;
    }
    if let Some(depth) = args.depth {
        params.depth = depth;
    }
    if let Some(comparator) = args.comparator {
        params.comparator = comparator.into();
    }
    if let Some(remove_zero) = args.remove_zero {
        params.remove_zero = remove_zero;
    }
    params
}

#[derive(Deserialize)]
struct SeriesDocument {
    x: Vec<f64>,
    y: Vec<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = AnalysisConfig::load_from(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    logging::init_from_config(&config)?;

    let params = resolve_params(&args, &config);
    debug!(?params, "analysis parameters");

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading series from stdin")?;
            buf
        }
    };
    let series: SeriesDocument = serde_json::from_str(&raw).context("decoding series JSON")?;

    let result = analyze(&series.x, &series.y, &params)?;

    let report = serde_json::json!({
        "left": result.left,
        "extremum": result.extremum,
        "right": result.right,
        "width": result.width(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn config_with_dip_and_zero_removal() -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        config.bandwidth.comparator = Comparator::Less;
        config.bandwidth.remove_zero = true;
        config
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_config_values_apply_without_flags() {
        let args = Args::try_parse_from(["sweep_analyse"]).unwrap();
        let params = resolve_params(&args, &config_with_dip_and_zero_removal());
        assert_eq!(params.comparator, Comparator::Less);
        assert!(params.remove_zero);
    }

    #[test]
    fn test_flags_switch_config_values_off() {
        let args = Args::try_parse_from([
            "sweep_analyse",
            "--comparator",
            "greater",
            "--remove-zero=false",
        ])
        .unwrap();
        let params = resolve_params(&args, &config_with_dip_and_zero_removal());
        assert_eq!(params.comparator, Comparator::Greater);
        assert!(!params.remove_zero);
    }

    #[test]
    fn test_bare_remove_zero_flag_enables_it() {
        let args = Args::try_parse_from(["sweep_analyse", "--remove-zero", "sweep.json"]).unwrap();
        assert_eq!(args.remove_zero, Some(true));
        assert_eq!(args.input, Some(PathBuf::from("sweep.json")));
        assert!(resolve_params(&args, &AnalysisConfig::default()).remove_zero);
    }

    #[test]
    fn test_negative_target_and_level() {
        let args =
            Args::try_parse_from(["sweep_analyse", "--target", "-1", "--level", "-6"]).unwrap();
        let params = resolve_params(&args, &AnalysisConfig::default());
        assert_eq!(params.target, Target::Global);
        assert_eq!(params.level, -6.0);
    }
}
