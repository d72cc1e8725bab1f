#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Builds the incident dashboard page.
//!
//! Loads the incident records, the state topology and the state-name table
//! concurrently, aggregates them, and writes one self-contained HTML file.
//! If anything fails to load, a failure page is written in its place and
//! the process exits non-zero.

mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use incident_map_analytics::DashboardData;
use incident_map_cli_utils::IndicatifProgress;
use incident_map_incident_models::{CanvasSize, ResourceKind};
use incident_map_render::{DEFAULT_TITLE, RenderOptions, render_dashboard, render_failure_page};
use incident_map_source::progress::{ProgressCallback, null_progress};

use crate::config::DashboardConfig;

/// Fallback output path when the configuration itself cannot be loaded.
const FALLBACK_OUTPUT: &str = "dashboard.html";

#[derive(Parser)]
#[command(
    name = "incident_dashboard",
    about = "Render an incident choropleth and time series to a static HTML page"
)]
struct Cli {
    /// TOML file merged over the built-in configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Incident-record JSON (URL or file path)
    #[arg(long)]
    records: Option<String>,
    /// `TopoJSON` state topology (URL or file path)
    #[arg(long)]
    topology: Option<String>,
    /// State-name TSV (URL, file path, or `builtin:fips`)
    #[arg(long)]
    state_names: Option<String>,
    /// Output HTML file
    #[arg(long)]
    output: Option<PathBuf>,
    /// Canvas width in pixels (height is width × 4/6)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,
    /// Retries for transient network failures
    #[arg(long)]
    retries: Option<u32>,
    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Cli {
    /// Loads the configuration and applies command-line overrides.
    fn resolve_config(&self) -> Result<DashboardConfig, config::ConfigError> {
        let mut config = DashboardConfig::load(self.config.as_deref())?;

        if let Some(records) = &self.records {
            config.sources.records.clone_from(records);
        }
        if let Some(topology) = &self.topology {
            config.sources.topology.clone_from(topology);
        }
        if let Some(state_names) = &self.state_names {
            config.sources.state_names.clone_from(state_names);
        }
        if let Some(output) = &self.output {
            config.output.path.clone_from(output);
        }
        if let Some(width) = self.width {
            config.output.width = width;
        }
        if let Some(retries) = self.retries {
            config.fetch.retries = retries;
        }
        if self.timeout_secs.is_some() {
            config.fetch.timeout_secs = self.timeout_secs;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = incident_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            let output = cli
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(FALLBACK_OUTPUT));
            write_failure(&output, DEFAULT_TITLE, &e.to_string()).await?;
            return Err(e.into());
        }
    };

    let progress = if cli.no_progress {
        null_progress()
    } else {
        IndicatifProgress::resources_bar(
            &multi,
            "Loading resources",
            ResourceKind::all().len() as u64,
        )
    };

    match build_page(&config, &progress).await {
        Ok(html) => {
            tokio::fs::write(&config.output.path, html).await?;
            log::info!("Wrote dashboard to {}", config.output.path.display());
            Ok(())
        }
        Err(e) => {
            write_failure(&config.output.path, &config.output.title, &e.to_string()).await?;
            Err(e)
        }
    }
}

/// Loads every input and renders the dashboard document.
async fn build_page(
    config: &DashboardConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<String, Box<dyn std::error::Error>> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;

    let loaded =
        incident_map_source::load_all(&client, &config.sources, &config.fetch.options(), progress)
            .await?;

    let data = DashboardData::new(loaded.records, loaded.features, loaded.state_names);
    let options = RenderOptions {
        canvas: CanvasSize::from_width(config.output.width),
        title: config.output.title.clone(),
    };

    Ok(render_dashboard(&data, &options))
}

/// Logs `message` and writes the failure page to `path`.
async fn write_failure(path: &Path, title: &str, message: &str) -> std::io::Result<()> {
    log::error!("Failed to load data: {message}");
    tokio::fs::write(path, render_failure_page(title, message)).await?;
    log::info!("Wrote failure page to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "incident_dashboard",
            "--records",
            "records.json",
            "--state-names",
            "builtin:fips",
            "--width",
            "900",
            "--retries",
            "2",
            "--timeout-secs",
            "15",
            "--output",
            "out.html",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.sources.records, "records.json");
        assert_eq!(config.sources.state_names, "builtin:fips");
        assert_eq!(config.sources.topology, "https://d3js.org/us-10m.v1.json");
        assert_eq!(config.output.width, 900);
        assert_eq!(config.output.path, PathBuf::from("out.html"));
        assert_eq!(config.fetch.retries, 2);
        assert_eq!(config.fetch.timeout_secs, Some(15));
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(Cli::try_parse_from(["incident_dashboard", "--width", "0"]).is_err());
    }

    #[tokio::test]
    async fn builds_page_from_local_files() {
        let dir = std::env::temp_dir().join("incident_map_cli_build_page");
        std::fs::create_dir_all(&dir).unwrap();
        let records = dir.join("records.json");
        let topology = dir.join("topology.json");
        std::fs::write(
            &records,
            r#"{"data": [{"state": "Ohio", "city": "Columbus", "date": "2020-06-01"}]}"#,
        )
        .unwrap();
        std::fs::write(
            &topology,
            r#"{"type": "Topology", "arcs": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]],
                "objects": {"states": {"type": "GeometryCollection",
                "geometries": [{"type": "Polygon", "id": "39", "arcs": [[0]]}]}}}"#,
        )
        .unwrap();

        let mut config = DashboardConfig::builtin().unwrap();
        config.sources.records = records.display().to_string();
        config.sources.topology = topology.display().to_string();
        config.sources.state_names = "builtin:fips".to_string();

        let html = build_page(&config, &null_progress()).await.unwrap();
        assert!(html.contains("Ohio: 1"));
        assert!(html.contains("id=\"case_count\">1<"));
    }

    #[tokio::test]
    async fn unreadable_input_fails() {
        let mut config = DashboardConfig::builtin().unwrap();
        config.sources.records = std::env::temp_dir()
            .join("incident_map_cli_missing.json")
            .display()
            .to_string();
        config.sources.state_names = "builtin:fips".to_string();
        config.sources.topology = config.sources.records.clone();

        assert!(build_page(&config, &null_progress()).await.is_err());
    }
}
