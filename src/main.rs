use thermal_detector::compare::{calculate_metrics, compute_difference, ComparisonResult};
use thermal_detector::edges::{detect_edges, EdgeParams};
use thermal_detector::grid::TempGrid;

fn main() {
    // Demo stub: synthesizes a master/slave pair with a hot spot and runs
    // the direct-difference comparison plus sobel edge detection.
    let w = 64usize;
    let h = 48usize;
    let master = TempGrid::filled(w, h, 20.0);
    let mut slave = master.clone();
    for y in 20..28 {
        for x in 28..36 {
            slave.set(x, y, 27.5);
        }
    }

    let result = compute_difference(&master, &slave, 1.0, false).expect("shapes match");
    let metrics = calculate_metrics(&ComparisonResult::DirectDiff(result));
    println!(
        "significant={} mean_diff={:.3} max_diff={:.3}",
        metrics.significant_pixel_count.unwrap_or(0),
        metrics.mean_diff.unwrap_or(0.0),
        metrics.max_diff.unwrap_or(0.0)
    );

    let edges = detect_edges(&slave, "sobel", &EdgeParams::default()).expect("known method");
    println!("edge pixels={}", edges.edges.count_true());
}
