use anyhow::Result;
use clap::Parser;
use trajgen_core::Point;
use trajgen_sdk::{GenerateRequest, TrajgenClient};

#[derive(Parser, Debug)]
#[command(author, version, about = "Request ranked flight paths from a trajgen server", long_about = None)]
struct Args {
    /// Trajgen server URL
    #[arg(long, default_value = "http://localhost:8000")]
    url: String,

    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true,
          default_values_t = [0.0, 0.0, 100.0])]
    start: Vec<f64>,

    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true,
          default_values_t = [800.0, 600.0, 200.0])]
    end: Vec<f64>,

    /// Number of candidates to generate
    #[arg(long, default_value_t = 10)]
    samples: usize,

    /// Number of ranked candidates to return
    #[arg(long)]
    top: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = TrajgenClient::new(args.url);

    let health = client.health().await?;
    println!("Server {} (model loaded: {})", health.status, health.model_loaded);

    let mut request = GenerateRequest::new(
        Point::new(args.start[0], args.start[1], args.start[2]),
        Point::new(args.end[0], args.end[1], args.end[2]),
        args.samples,
    );
    request.top_k = args.top;

    let response = client.generate(&request).await?;
    println!(
        "Generated {} trajectories in {:.1} ms (diversity {:.2})",
        response.n_samples, response.inference_time_ms, response.summary.diversity
    );
    for candidate in &response.candidates {
        println!(
            "  {}  length {:.1}m  efficiency {:.3}  endpoint error {:.2}",
            candidate.label,
            candidate.metrics.path_length,
            candidate.metrics.path_efficiency,
            candidate.metrics.endpoint_error
        );
    }

    Ok(())
}
