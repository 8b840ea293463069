use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trajgen_cli::{report, write_csv, RunOptions};
use trajgen_core::{Point, RankingWeights};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate, rank and export candidate flight paths", long_about = None)]
struct Args {
    /// Start point
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true,
          default_values_t = [0.0, 0.0, 100.0])]
    start: Vec<f64>,

    /// End point
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true,
          default_values_t = [800.0, 600.0, 200.0])]
    end: Vec<f64>,

    /// Points per generated path
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(2..=200))]
    waypoints: u16,

    /// Number of candidates to generate
    #[arg(long, default_value_t = 10)]
    candidates: usize,

    /// Number of best candidates to report and export
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Latent dimension expected by the model
    #[arg(long, default_value_t = 64)]
    latent_dim: usize,

    /// Normalization JSON (`{"mean": [..], "std": [..]}`)
    #[arg(long)]
    norm: Option<String>,

    /// Remote inference endpoint; the built-in interpolating model is used when omitted
    #[arg(long)]
    model_url: Option<String>,

    /// Remote inference timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    model_timeout_ms: u64,

    /// Seed for reproducible latent sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Write `<PREFIX>_<n>.csv` for each selected path
    #[arg(long, value_name = "PREFIX")]
    csv: Option<String>,

    /// Print the full result as JSON instead of tables
    #[arg(long)]
    json: bool,

    #[arg(long)]
    w_efficiency: Option<f64>,

    #[arg(long)]
    w_smoothness: Option<f64>,

    #[arg(long)]
    w_endpoint: Option<f64>,

    /// Divisor applied to endpoint error before weighting
    #[arg(long)]
    endpoint_scale: Option<f64>,
}

impl Args {
    fn weights(&self) -> RankingWeights {
        let defaults = RankingWeights::default();
        RankingWeights {
            efficiency: self.w_efficiency.unwrap_or(defaults.efficiency),
            smoothness: self.w_smoothness.unwrap_or(defaults.smoothness),
            endpoint_error: self.w_endpoint.unwrap_or(defaults.endpoint_error),
            endpoint_error_scale: self.endpoint_scale.unwrap_or(defaults.endpoint_error_scale),
        }
    }

    fn options(&self) -> RunOptions {
        RunOptions {
            start: point(&self.start),
            end: point(&self.end),
            waypoints: usize::from(self.waypoints),
            latent_dim: self.latent_dim,
            candidates: self.candidates,
            top: self.top,
            norm_path: self.norm.clone(),
            model_url: self.model_url.clone(),
            model_timeout: Duration::from_millis(self.model_timeout_ms),
            seed: self.seed,
            weights: self.weights(),
        }
    }
}

// clap guarantees exactly three values.
fn point(values: &[f64]) -> Point {
    Point::new(values[0], values[1], values[2])
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("trajgen_cli=info".parse()?))
        .init();

    let options = args.options();
    let output = trajgen_cli::run(&options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({
            "selection": output.selection,
            "summary": output.summary,
            "elapsed_ms": output.elapsed.as_secs_f64() * 1000.0,
        }))?);
    } else {
        println!(
            "Generated {} trajectories in {:.1} ms",
            output.paths.len(),
            output.elapsed.as_secs_f64() * 1000.0
        );
        println!();
        print!("{}", report::ranking_table(&output.selection));
        println!();
        print!("{}", report::path_details(&output.selection));
        println!();
        print!("{}", report::summary(&output.summary));
    }

    if let Some(prefix) = &args.csv {
        let files = write_csv(&output.selection, prefix)?;
        println!("Exported {} trajectories to CSV", files.len());
    }

    Ok(())
}
