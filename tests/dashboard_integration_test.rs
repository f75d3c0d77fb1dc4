use anyhow::Result;
use httpmock::prelude::*;
use launch_dash::adapters::{source_from_config, FileSource, HttpSource};
use launch_dash::core::charts::Trace;
use launch_dash::core::dashboard::SliderSettings;
use launch_dash::core::{PayloadRange, SiteSelection};
use launch_dash::{load_table, Dashboard, DashError, TomlConfig};
use std::time::Duration;

const SAMPLE_CSV: &str = include_str!("fixtures/spacex_launch_sample.csv");

fn pie_values(trace: &Trace) -> (Vec<String>, Vec<f64>) {
    match trace {
        Trace::Pie { labels, values, .. } => (labels.clone(), values.clone()),
        other => panic!("expected pie trace, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_dataset_over_http() -> Result<()> {
    let server = MockServer::start_async().await;
    let csv_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/datasets/spacex_launch_dash.csv");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body(SAMPLE_CSV);
        })
        .await;

    let source = HttpSource::new(
        server.url("/datasets/spacex_launch_dash.csv"),
        Duration::from_secs(5),
    )?;
    let table = load_table(&source).await?;

    csv_mock.assert_async().await;
    assert_eq!(table.len(), 15);
    assert_eq!(table.min_payload(), 0.0);
    assert_eq!(table.max_payload(), 9600.0);
    assert_eq!(
        table.launch_sites(),
        &["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
    );
    Ok(())
}

#[tokio::test]
async fn test_dataset_server_error_fails_load() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/broken.csv");
            then.status(500);
        })
        .await;

    let source = HttpSource::new(server.url("/broken.csv"), Duration::from_secs(5))?;
    let result = load_table(&source).await;

    assert!(matches!(
        result,
        Err(DashError::HttpStatus { status: 500, .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_source_from_config_prefers_local_path() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let csv_path = temp_dir.path().join("launches.csv");
    tokio::fs::write(&csv_path, SAMPLE_CSV).await?;

    let mut config = TomlConfig::default();
    config.dataset.path = Some(csv_path.to_str().unwrap().to_string());

    let source = source_from_config(&config)?;
    assert_eq!(source.describe(), csv_path.display().to_string());

    let table = load_table(source.as_ref()).await?;
    assert_eq!(table.len(), 15);
    Ok(())
}

#[tokio::test]
async fn test_pie_chart_properties() -> Result<()> {
    let table = load_table(&FileSource::new("tests/fixtures/spacex_launch_sample.csv")).await?;
    let dashboard = Dashboard::new(table, SliderSettings::default());

    let all = dashboard.update_pie(Some("ALL"))?;
    let (labels, values) = pie_values(&all.data[0]);
    assert_eq!(labels.len(), 4);
    assert_eq!(values, vec![1.0, 2.0, 3.0, 1.0]);
    assert_eq!(
        values.iter().sum::<f64>(),
        dashboard.table().success_count() as f64
    );

    for site in dashboard.table().launch_sites() {
        let figure = dashboard.update_pie(Some(site))?;
        let (_, values) = pie_values(&figure.data[0]);
        let rows = dashboard
            .table()
            .filter_site(&SiteSelection::Site(site.clone()));

        assert_eq!(values.iter().sum::<f64>(), rows.len() as f64);
        assert!(rows.iter().all(|r| &r.launch_site == site));
        assert_eq!(
            figure.title(),
            format!("Total Success Launches for Site {}", site)
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_scatter_chart_tracks_slider_range() -> Result<()> {
    let table = load_table(&FileSource::new("tests/fixtures/spacex_launch_sample.csv")).await?;
    let dashboard = Dashboard::new(table, SliderSettings::default());

    for (low, high) in [(0.0, 10000.0), (2500.0, 5000.0), (4400.0, 4400.0)] {
        let figure = dashboard.update_scatter(Some("ALL"), Some(PayloadRange::new(low, high)?))?;
        assert_eq!(figure.layout.xaxis.as_ref().unwrap().range, Some([low, high]));

        // 範圍只影響 x 軸視窗，點數不變
        let points: usize = figure
            .data
            .iter()
            .map(|t| match t {
                Trace::Scatter { x, .. } => x.len(),
                Trace::Pie { .. } => 0,
            })
            .sum();
        assert_eq!(points, 15);
    }

    let ksc = dashboard.update_scatter(Some("KSC LC-39A"), None)?;
    let names: Vec<&str> = ksc
        .data
        .iter()
        .map(|t| match t {
            Trace::Scatter { name, .. } => name.as_str(),
            Trace::Pie { .. } => "",
        })
        .collect();
    assert_eq!(names, vec!["FT", "B4"]);
    assert_eq!(ksc.layout.xaxis.unwrap().range, Some([0.0, 9600.0]));
    Ok(())
}
