//! Fetch, derive and render in one pass.

use covtrend_common::{CaseType, Geography, Result};
use covtrend_config::Config;
use covtrend_data::{Dataset, DatasetFetcher};
use covtrend_graphs::{
    ActiveCasesGraph, CasesByGeographyGraph, Chart, ComparisonGraph, DailyNewCasesGraph,
    RenderTarget, SinceThresholdGraph,
};
use std::path::PathBuf;
use tracing::{info, instrument};

/// The geography the single-target charts are drawn for.
pub fn target_geography(config: &Config) -> Geography {
    match &config.analysis.province {
        Some(province) => Geography::province(&config.analysis.country, province),
        None => Geography::country(&config.analysis.country),
    }
}

/// Fetch the dataset and write every chart; returns the written paths in order.
#[instrument(skip_all, fields(country = %config.analysis.country))]
pub async fn run(config: &Config) -> Result<Vec<PathBuf>> {
    let dataset = DatasetFetcher::new(&config.data)?.fetch_all().await?;
    info!(
        "Loaded {} regions over {} days",
        dataset.confirmed.len(),
        dataset.confirmed.dates().len()
    );

    render_all(&dataset, config).await
}

/// Render every chart for an already loaded dataset.
pub async fn render_all(dataset: &Dataset, config: &Config) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(&config.output.plots_dir).await?;

    let analysis = &config.analysis;
    let geography = target_geography(config);
    let target = RenderTarget::from_output(&config.output);

    let charts: Vec<Box<dyn Chart>> = vec![
        Box::new(CasesByGeographyGraph::from_dataset(dataset, &geography)?),
        Box::new(ActiveCasesGraph::from_dataset(dataset, &geography)?),
        Box::new(DailyNewCasesGraph::from_dataset(dataset, &geography)?),
        Box::new(SinceThresholdGraph::from_dataset(
            dataset,
            CaseType::Confirmed,
            analysis.confirmed_threshold,
            &geography,
        )?),
        Box::new(ComparisonGraph::from_dataset(
            dataset,
            CaseType::Confirmed,
            analysis.confirmed_threshold,
            &analysis.comparison_countries,
        )?),
    ];
    let death_comparison = ComparisonGraph::from_dataset(
        dataset,
        CaseType::Deaths,
        analysis.death_threshold,
        &analysis.comparison_countries,
    )?;

    let mut written = Vec::with_capacity(charts.len() + 2);
    for chart in &charts {
        written.push(chart.render(&target).await?);
    }
    written.push(death_comparison.render(&target).await?);

    if let Some(summary) = &config.output.summary_image {
        written.push(
            death_comparison
                .render_to(summary, target.width, target.height)
                .await?,
        );
    }

    info!("Wrote {} charts", written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_geography() {
        let mut config = Config::default();
        config.analysis.country = "Australia".to_string();
        assert_eq!(target_geography(&config), Geography::country("Australia"));

        config.analysis.province = Some("Victoria".to_string());
        assert_eq!(
            target_geography(&config),
            Geography::province("Australia", "Victoria")
        );
    }
}
