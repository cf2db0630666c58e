//! Interlattice CLI - analyse two-cube interference lattices
//!
//! Prints analysis records as JSON on stdout; logs go to stderr.
//!
//! Usage:
//!     interlattice run --side 1 --angle 45 --axis z
//!     interlattice run --config analysis.json --pretty
//!     interlattice sweep --axis 1,1,1 --from 0 --to 90 --step 5
//!
//! Set `RUST_LOG=interlattice_core=debug` to see per-stage counts.

use clap::{Args, Parser, Subcommand};
use interlattice_core::{run_config, AnalysisConfig, LatticeError, RotationAxis};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "interlattice")]
#[command(about = "Interference lattices of two superimposed cubes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse a single configuration
    Run {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Pretty-print the JSON record
        #[arg(long)]
        pretty: bool,

        /// Print only the summary instead of the full record
        #[arg(long)]
        summary: bool,
    },

    /// Analyse a range of rotation angles, one JSON line per angle
    Sweep {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// First angle (degrees)
        #[arg(long, default_value_t = 0.0)]
        from: f64,

        /// Last angle (degrees, inclusive)
        #[arg(long, default_value_t = 90.0)]
        to: f64,

        /// Angle increment (degrees)
        #[arg(long, default_value_t = 5.0)]
        step: f64,

        /// Print full records instead of summaries
        #[arg(long)]
        full: bool,
    },
}

/// Analysis parameters; flags override values loaded from `--config`
#[derive(Args, Debug, Default)]
struct AnalysisArgs {
    /// JSON file with an analysis configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cube edge length
    #[arg(long)]
    side: Option<f64>,

    /// Rotation of the second cube (degrees)
    #[arg(long, allow_hyphen_values = true)]
    angle: Option<f64>,

    /// Rotation axis: x, y, z or three comma-separated components
    #[arg(long, allow_hyphen_values = true)]
    axis: Option<RotationAxis>,

    /// Pair cap for the distance spectrum
    #[arg(long)]
    max_distance_pairs: Option<usize>,

    /// Pair cap for the direction spectrum
    #[arg(long)]
    max_direction_pairs: Option<usize>,

    /// Acceptance for |a/b - phi|
    #[arg(long)]
    phi_tolerance: Option<f64>,

    /// Acceptance for the other notable ratios (sqrt2, sqrt3, double, phi_squared)
    #[arg(long)]
    ratio_tolerance: Option<f64>,

    /// Largest gap between two edges counted as a crossing, in units of side
    #[arg(long)]
    edge_tolerance: Option<f64>,
}

impl AnalysisArgs {
    /// Merge file and flags into a validated configuration
    fn resolve(&self) -> Result<AnalysisConfig, LatticeError> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                AnalysisConfig::from_json_file(path)?
            }
            None => AnalysisConfig::default(),
        };

        if let Some(side) = self.side {
            config.side = side;
        }
        if let Some(angle) = self.angle {
            config.angle_deg = angle;
        }
        if let Some(axis) = self.axis {
            config.axis = axis;
        }
        if let Some(cap) = self.max_distance_pairs {
            config.max_distance_pairs = cap;
        }
        if let Some(cap) = self.max_direction_pairs {
            config.max_direction_pairs = cap;
        }
        if let Some(tol) = self.phi_tolerance {
            config.phi_tolerance = tol;
        }
        if let Some(tol) = self.ratio_tolerance {
            config.ratio_tolerance = tol;
        }
        if let Some(tol) = self.edge_tolerance {
            config.edge_tolerance = tol;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Angles `from, from + step, …` up to and including `to`
fn sweep_angles(from: f64, to: f64, step: f64) -> Result<Vec<f64>, LatticeError> {
    if !(from.is_finite() && to.is_finite()) || from > to {
        return Err(LatticeError::InvalidParameter {
            name: "from/to",
            reason: format!("need finite from <= to, got {}..{}", from, to),
        });
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(LatticeError::InvalidParameter {
            name: "step",
            reason: format!("must be finite and positive, got {}", step),
        });
    }

    let count = ((to - from) / step + 1e-9).floor() as usize + 1;
    Ok((0..count).map(|i| from + step * i as f64).collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interlattice=info,interlattice_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            analysis,
            pretty,
            summary,
        } => {
            let config = analysis.resolve()?;
            tracing::info!(
                "Analysing side={} angle={}° axis={}",
                config.side,
                config.angle_deg,
                config.axis
            );

            let result = run_config(&config);
            let output = match (summary, pretty) {
                (true, true) => serde_json::to_string_pretty(&result.summary())?,
                (true, false) => serde_json::to_string(&result.summary())?,
                (false, true) => serde_json::to_string_pretty(&result)?,
                (false, false) => serde_json::to_string(&result)?,
            };
            println!("{}", output);
        }
        Command::Sweep {
            analysis,
            from,
            to,
            step,
            full,
        } => {
            let config = analysis.resolve()?;
            let angles = sweep_angles(from, to, step)?;
            tracing::info!("Sweeping {} angles about axis {}", angles.len(), config.axis);

            for result in interlattice_core::sweep(&config, &angles) {
                let line = if full {
                    serde_json::to_string(&result)?
                } else {
                    serde_json::to_string(&result.summary())?
                };
                println!("{}", line);
            }
        }
    }

    Ok(())
}
