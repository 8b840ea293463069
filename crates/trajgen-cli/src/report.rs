//! Plain-text rendering of a run for the terminal.

use std::fmt::Write;
use trajgen_core::{evaluate, BatchSummary, Point, RankedSelection};

fn fmt_point(point: &Point) -> String {
    format!("[{:.1}, {:.1}, {:.1}]", point.x, point.y, point.z)
}

/// Ranked table with one metrics line per selected path.
pub fn ranking_table(selection: &RankedSelection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Start: {}", fmt_point(&selection.start));
    let _ = writeln!(out, "End:   {}", fmt_point(&selection.end));
    let _ = writeln!(
        out,
        "{:<5} {:>9} {:>11} {:>10} {:>10} {:>11} {:>10}",
        "Rank", "Score", "Length", "Effic.", "Smooth", "Curv(avg)", "EndErr"
    );
    for (idx, path) in selection.paths.iter().enumerate() {
        let metrics = evaluate(path.points(), &selection.end);
        let score = selection.scores.get(idx).copied().unwrap_or(f64::NAN);
        let _ = writeln!(
            out,
            "{:<5} {:>9.3} {:>11.2} {:>10.3} {:>10.3} {:>11.4} {:>10.2}",
            idx + 1,
            score,
            metrics.path_length,
            metrics.path_efficiency,
            metrics.smoothness_score,
            metrics.avg_curvature,
            metrics.endpoint_error,
        );
    }
    out
}

/// Per-path detail block for each selected path.
pub fn path_details(selection: &RankedSelection) -> String {
    let mut out = String::new();
    for (path, label) in selection.paths.iter().zip(&selection.labels) {
        let metrics = evaluate(path.points(), &selection.end);
        let _ = writeln!(out, "{}", label);
        let _ = writeln!(out, "  Waypoints: {}", path.len());
        let _ = writeln!(
            out,
            "  Length: {:.2} (straight line {:.2}, efficiency {:.3})",
            metrics.path_length, metrics.straight_line_distance, metrics.path_efficiency
        );
        let _ = writeln!(
            out,
            "  Curvature: avg {:.4}, max {:.4} over {} vertices",
            metrics.avg_curvature, metrics.max_curvature, metrics.curvature_samples
        );
        let _ = writeln!(
            out,
            "  Altitude: min {:.1}, max {:.1}, avg {:.1}",
            metrics.min_altitude, metrics.max_altitude, metrics.avg_altitude
        );
        let _ = writeln!(out, "  Endpoint error: {:.2}", metrics.endpoint_error);
    }
    out
}

pub fn summary(summary: &BatchSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Batch of {} candidates", summary.n_samples);
    let _ = writeln!(out, "  Diversity: {:.2}", summary.diversity);
    for (name, spread) in [
        ("Path length", summary.path_length),
        ("Efficiency", summary.path_efficiency),
        ("Avg curvature", summary.avg_curvature),
        ("Smoothness", summary.smoothness_score),
        ("Endpoint error", summary.endpoint_error),
        ("Avg altitude", summary.avg_altitude),
    ] {
        let _ = writeln!(out, "  {:<15} {:.4} ± {:.4}", name, spread.mean, spread.std);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajgen_core::{rankings, select_top, summarize, Path, RankingWeights};

    fn selection() -> RankedSelection {
        let start = Point::new(0.0, 0.0, 100.0);
        let end = Point::new(20.0, 0.0, 100.0);
        let paths = vec![
            Path::new(vec![start, Point::new(10.0, 5.0, 100.0), end]),
            Path::new(vec![start, Point::new(10.0, 0.0, 100.0), end]),
        ];
        let ranked = rankings(&paths, &end, &RankingWeights::default());
        select_top(&paths, &ranked, 2, start, end)
    }

    #[test]
    fn table_lists_paths_in_rank_order() {
        let table = ranking_table(&selection());
        let rows: Vec<&str> = table.lines().skip(3).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("1 "));
        // The straight candidate ranks first with length 20.
        assert!(rows[0].contains("20.00"));
        assert!(table.starts_with("Start: [0.0, 0.0, 100.0]"));
    }

    #[test]
    fn details_use_selection_labels() {
        let details = path_details(&selection());
        assert!(details.contains("Trajectory #1 (Score: "));
        assert!(details.contains("Trajectory #2 (Score: "));
        assert!(details.contains("Waypoints: 3"));
    }

    #[test]
    fn summary_reports_batch_size() {
        let selection = selection();
        let text = summary(&summarize(&selection.paths, &selection.end, None));
        assert!(text.starts_with("Batch of 2 candidates"));
        assert!(text.contains("Diversity:"));
    }
}
