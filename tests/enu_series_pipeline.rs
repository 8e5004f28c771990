use std::fs;

use approx::assert_abs_diff_eq;
use enuplot::plot::scatter_panels_svg;
use enuplot::records::csv_reader::read_solution_file;
use enuplot::series::{EnuFrame, EnuSeries, DEFAULT_GRID_STEP};

#[test]
fn test_pipeline_from_log_file() {
    let records = read_solution_file("tests/data/cusv_sample.csv").unwrap();
    assert_eq!(records.len(), 8);
    assert!(records.iter().all(|r| r.gps.week == 2116));
    assert!(records.iter().all(|r| r.gps.day_of_week == 4));

    // 10:05:00 on the Thursday of the week
    assert_eq!(
        records[0].gps.second_of_week,
        4.0 * 86_400.0 + 10.0 * 3_600.0 + 5.0 * 60.0
    );

    let frame = EnuFrame::from_records(&records).unwrap();
    // the sample station sits near Bangkok
    let origin = &frame.origin_geographic;
    assert!((13.5..14.0).contains(&origin.latitude_degrees()));
    assert!((100.4..100.7).contains(&origin.longitude_degrees()));
    assert!((-1_000.0..2_000.0).contains(&origin.height));

    let series = EnuSeries::build(&records, &frame, DEFAULT_GRID_STEP).unwrap();

    // 10:05:00 to 10:09:00 at 30 s: nine grid epochs, two of them masked
    // (10:07:00 has no record, 10:08:00 is a float solution)
    assert_eq!(series.epochs.len(), 9);
    assert!(series.epochs[4].displacement.is_none());
    assert!(series.epochs[6].displacement.is_none());
    assert_eq!(
        series
            .epochs
            .iter()
            .filter(|e| e.displacement.is_some())
            .count(),
        7
    );

    for epoch in &series.epochs {
        if let Some(displacement) = epoch.displacement {
            assert!(displacement.east.abs() < 1.0);
            assert!(displacement.north.abs() < 1.0);
            assert!(displacement.up.abs() < 1.0);
        }
    }

    // the valid epochs scatter around the mean position
    let east = series.east_series();
    assert_eq!(east.len(), 7);
    let east_mean = east.iter().map(|(_, e)| e).sum::<f64>() / east.len() as f64;
    assert_abs_diff_eq!(east_mean, 0.0, epsilon = 0.1);
}

#[test]
fn test_scatter_panels_render() {
    let records = read_solution_file("tests/data/cusv_sample.csv").unwrap();
    let frame = EnuFrame::from_records(&records).unwrap();
    let series = EnuSeries::build(&records, &frame, DEFAULT_GRID_STEP).unwrap();

    let path = std::env::temp_dir().join("enuplot_scatter_panels.svg");
    scatter_panels_svg(&series, &path, "cusv_sample").unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("<svg"));
    assert!(contents.contains("East (m)"));
    assert!(contents.contains("Up (m)"));

    fs::remove_file(&path).unwrap();
}
