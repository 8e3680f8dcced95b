mod common;

use common::synthetic_grid::{textured_grid, uniform_grid, with_hot_spot};
use thermal_detector::compare::{
    calculate_metrics, compute_difference, compute_gradient_preprocessed_difference,
    compute_smoothed_difference, compute_spatial_correlation, compute_statistical_significance,
    ComparisonResult,
};
use thermal_detector::error::AnalysisError;
use thermal_detector::grid::TempGrid;

#[test]
fn self_comparison_is_all_zero_for_any_threshold() {
    let grid = textured_grid(9, 7, 20.0);
    for threshold in [0.0, 0.5, 10.0] {
        for relative in [false, true] {
            let r = compute_difference(&grid, &grid, threshold, relative).unwrap();
            assert!(r.difference.data.iter().all(|&v| v == 0.0));
            assert!(r.significant_changes.unwrap().all_false());
        }
    }
}

#[test]
fn absolute_difference_is_antisymmetric() {
    let a = textured_grid(8, 8, 20.0);
    let b = with_hot_spot(&a, 2, 3, 3, 4.5);
    let ab = compute_difference(&a, &b, 1.0, false).unwrap();
    let ba = compute_difference(&b, &a, 1.0, false).unwrap();
    for (x, y) in ab.difference.data.iter().zip(ba.difference.data.iter()) {
        assert_eq!(*x, -*y);
    }
}

#[test]
fn every_two_grid_operation_rejects_mismatched_shapes() {
    let a = uniform_grid(5, 5, 20.0);
    let b = uniform_grid(5, 4, 20.0);
    let expected = AnalysisError::ShapeMismatch {
        master: (5, 5),
        slave: (4, 5),
    };
    assert_eq!(
        compute_difference(&a, &b, 1.0, false).unwrap_err(),
        expected
    );
    assert_eq!(
        compute_gradient_preprocessed_difference(&a, &b, 3, 1.0, false).unwrap_err(),
        expected
    );
    assert_eq!(
        compute_smoothed_difference(&a, &b, 3, 1.0, false).unwrap_err(),
        expected
    );
    assert_eq!(
        compute_statistical_significance(&a, &b, 5, 2.0).unwrap_err(),
        expected
    );
    assert_eq!(
        compute_spatial_correlation(&a, &b, 7, 0.7).unwrap_err(),
        expected
    );
}

#[test]
fn self_correlation_is_one_and_never_flagged() {
    let grid = textured_grid(11, 9, 22.0);
    let r = compute_spatial_correlation(&grid, &grid, 3, 0.9).unwrap();
    for &c in &r.correlation_map.data {
        assert!((-1.0..=1.0).contains(&c));
        assert!((c - 1.0).abs() < 1e-3, "self-correlation {c} far from 1");
    }
    assert!(r.low_correlation_mask.unwrap().all_false());
}

#[test]
fn displaced_pattern_lowers_local_correlation() {
    let master = textured_grid(13, 13, 20.0);
    // Flip the pattern inside a patch: locally anticorrelated.
    let mut slave = master.clone();
    for y in 4..9 {
        for x in 4..9 {
            slave.set(x, y, 45.0 - master.get(x, y));
        }
    }
    let r = compute_spatial_correlation(&master, &slave, 3, 0.0).unwrap();
    assert!(r.correlation_map.get(6, 6) < -0.9);
    assert!(r.low_correlation_mask.unwrap().get(6, 6));
}

#[test]
fn statistical_self_comparison_is_all_zero() {
    let grid = textured_grid(10, 10, 21.0);
    let r = compute_statistical_significance(&grid, &grid, 5, 2.0).unwrap();
    assert!(r.zscores.data.iter().all(|&z| z == 0.0));
    assert!(r.significant_changes.unwrap().all_false());
    assert_eq!(r.window_size, 5);
}

#[test]
fn constant_round_trip_scenario() {
    let grid = uniform_grid(5, 5, 20.0);
    let r = compute_difference(&grid, &grid, 0.5, false).unwrap();
    assert!(r.difference.data.iter().all(|&v| v == 0.0));
    assert!(r.significant_changes.unwrap().all_false());
    assert_eq!(r.threshold_value, 0.5);
    assert!(!r.is_relative);
}

#[test]
fn center_pixel_change_scenario() {
    let master = uniform_grid(5, 5, 20.0);
    let mut slave = master.clone();
    slave.set(2, 2, 25.0);
    let r = compute_difference(&master, &slave, 1.0, false).unwrap();
    for y in 0..5 {
        for x in 0..5 {
            let expected = if (x, y) == (2, 2) { 5.0 } else { 0.0 };
            assert_eq!(r.difference.get(x, y), expected);
        }
    }
    let mask = r.significant_changes.unwrap();
    assert_eq!(mask.count_true(), 1);
    assert!(mask.get(2, 2));
}

#[test]
fn gradient_preprocessing_ignores_uniform_warming() {
    // A uniform offset changes temperatures but not thermal structure;
    // the gradient difference stays zero.
    let master = textured_grid(10, 10, 20.0);
    let slave = master.map(|v| v + 5.0);
    let r = compute_gradient_preprocessed_difference(&master, &slave, 3, 0.5, false).unwrap();
    assert!(r.diff.difference.data.iter().all(|&v| v.abs() < 1e-3));
    assert!(r.diff.significant_changes.unwrap().all_false());
    assert_eq!(r.master_gradient.shape(), master.shape());
    assert_eq!(r.slave_gradient.shape(), master.shape());
}

#[test]
fn smoothing_damps_single_pixel_noise() {
    let master = uniform_grid(11, 11, 20.0);
    let mut slave = master.clone();
    slave.set(5, 5, 26.0);
    let direct = compute_difference(&master, &slave, 1.0, false).unwrap();
    let smoothed = compute_smoothed_difference(&master, &slave, 5, 1.0, false).unwrap();
    let direct_count = direct.significant_changes.unwrap().count_true();
    let smoothed_max = smoothed
        .diff
        .difference
        .data
        .iter()
        .fold(0.0f32, |m, &v| m.max(v.abs()));
    assert_eq!(direct_count, 1);
    assert!(smoothed_max < 6.0, "smoothing must spread the spike");
}

#[test]
fn metrics_follow_the_result_variant() {
    let master = uniform_grid(6, 6, 20.0);
    let slave = with_hot_spot(&master, 1, 1, 2, 3.0);

    let diff = compute_difference(&master, &slave, 1.0, false).unwrap();
    let m = calculate_metrics(&ComparisonResult::DirectDiff(diff));
    assert_eq!(m.significant_pixel_count, Some(4));
    assert_eq!(m.positive_changes, Some(4));
    assert_eq!(m.negative_changes, Some(0));
    assert_eq!(m.max_diff, Some(3.0));
    assert!(m.mean_correlation.is_none());
    assert!(m.mean_zscore.is_none());

    let corr = compute_spatial_correlation(&master, &slave, 3, 0.7).unwrap();
    let m = calculate_metrics(&ComparisonResult::Correlation(corr));
    assert!(m.mean_correlation.is_some());
    assert!(m.min_correlation.is_some());
    assert!(m.low_correlation_count.is_some());
    assert!(m.mean_diff.is_none());
}

#[test]
fn metrics_tolerate_missing_masks() {
    let master = textured_grid(6, 6, 20.0);
    let slave = with_hot_spot(&master, 2, 2, 2, 5.0);

    let mut stat = compute_statistical_significance(&master, &slave, 3, 2.0).unwrap();
    stat.significant_changes = None;
    let m = calculate_metrics(&ComparisonResult::Statistical(stat));
    assert!(m.mean_zscore.is_some());
    assert!(m.significant_pixel_count.is_none());
    assert!(m.positive_significant.is_none());

    let mut corr = compute_spatial_correlation(&master, &slave, 3, 0.7).unwrap();
    corr.low_correlation_mask = None;
    let m = calculate_metrics(&ComparisonResult::Correlation(corr));
    assert!(m.mean_correlation.is_some());
    assert!(m.low_correlation_count.is_none());
}

#[test]
fn relative_threshold_is_in_percent() {
    let master = TempGrid::filled(3, 3, 20.0);
    let mut slave = master.clone();
    slave.set(1, 1, 22.0); // +10 percent
    let r = compute_difference(&master, &slave, 5.0, true).unwrap();
    assert!((r.difference.get(1, 1) - 10.0).abs() < 1e-4);
    let mask = r.significant_changes.unwrap();
    assert_eq!(mask.count_true(), 1);
    assert!(mask.get(1, 1));
}
