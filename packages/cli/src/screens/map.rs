//! Tornado map screen: legend, summary, marker popups and `GeoJSON` export.

use std::path::Path;

use dialoguer::{Input, Select};
use radon_canvas_cli_utils::with_spinner;
use radon_canvas_map::{HIGH_RADON_THRESHOLD, MapOverlay};
use radon_canvas_views::{DataOrigin, MapState, MapView};

use super::{CliResult, Context};

pub const DEFAULT_EXPORT_PATH: &str = "tornado-map.geojson";

enum Action {
    Export,
    Popups,
    Reload,
    Back,
}

impl Action {
    const READY: &[Self] = &[Self::Export, Self::Popups, Self::Reload, Self::Back];
    const FAILED: &[Self] = &[Self::Reload, Self::Back];

    #[must_use]
    const fn label(&self, failed: bool) -> &'static str {
        match self {
            Self::Export => "Export GeoJSON",
            Self::Popups => "List radon test results",
            Self::Reload if failed => "Retry",
            Self::Reload => "Reload",
            Self::Back => "Back to menu",
        }
    }
}

fn origin_note(what: &str, origin: DataOrigin) -> Option<String> {
    match origin {
        DataOrigin::Fetched => None,
        DataOrigin::Fallback => Some(format!("{what}: backend unavailable, showing sample data")),
        DataOrigin::Unavailable => Some(format!("{what}: unavailable")),
    }
}

/// Legend, data notes and summary for a loaded overlay.
#[must_use]
pub fn render_overlay(overlay: &MapOverlay, origins: (DataOrigin, DataOrigin)) -> String {
    let summary = &overlay.summary;
    let t = HIGH_RADON_THRESHOLD;
    let mut lines = vec![
        "Legend".to_string(),
        "  --- May 16 Tornado Path".to_string(),
        format!("  (red)  High Radon (>={t} pCi/L) - {} tests", summary.high_count),
        format!("  (blue) Low Radon (<{t} pCi/L) - {} tests", summary.low_count),
        String::new(),
    ];

    if !overlay.has_data() {
        lines.push(
            "No data available. The map will display once data is loaded. If this persists, check the logs for errors."
                .to_string(),
        );
        lines.push(String::new());
    }
    let notes: Vec<String> = [
        origin_note("Tornado path", origins.0),
        origin_note("Radon results", origins.1),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !notes.is_empty() {
        lines.extend(notes);
        lines.push(String::new());
    }

    lines.push(format!(
        "Center: {:.4}, {:.4}   Zoom: {}",
        overlay.center.latitude, overlay.center.longitude, overlay.zoom
    ));
    if let Some(bounds) = overlay.bounds {
        lines.push(format!(
            "Bounds: {:.4}, {:.4} to {:.4}, {:.4}",
            bounds.south_west.latitude,
            bounds.south_west.longitude,
            bounds.north_east.latitude,
            bounds.north_east.longitude
        ));
    }
    lines.push(String::new());

    lines.push("Data Summary".to_string());
    lines.push(format!(
        "  Tornado Path Points: {} coordinates",
        summary.tornado_points
    ));
    lines.push(format!(
        "  Total Radon Tests: {} valid tests",
        summary.valid_tests
    ));
    lines.push(format!(
        "  Elevated Levels (>={t} pCi/L): {} tests ({:.1}%)",
        summary.high_count,
        summary.high_percent()
    ));
    lines.push(format!(
        "  Below Action Level (<{t} pCi/L): {} tests ({:.1}%)",
        summary.low_count,
        summary.low_percent()
    ));
    lines.join("\n")
}

/// The screen body for any map state.
#[must_use]
pub fn render(view: &MapView) -> String {
    match view.state() {
        MapState::Loading => "Loading map data...".to_string(),
        MapState::Error(message) => message.clone(),
        MapState::Ready(overlay) => render_overlay(overlay, view.origins()),
    }
}

/// Every marker's popup text, separated by blank lines.
#[must_use]
pub fn render_popups(overlay: &MapOverlay) -> String {
    overlay
        .markers
        .iter()
        .map(radon_canvas_map::RadonMarker::popup)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Writes `overlay` as a `GeoJSON` `FeatureCollection` to `path`.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn export(overlay: &MapOverlay, path: &Path) -> CliResult {
    let json = overlay.to_geojson_string()?;
    std::fs::write(path, json)?;
    log::info!(
        "Wrote {} markers and {} path points to {}",
        overlay.markers.len(),
        overlay.tornado_path.len(),
        path.display()
    );
    Ok(())
}

/// Fetches both datasets behind a spinner.
pub async fn load(ctx: &Context, view: &mut MapView) {
    with_spinner(&ctx.multi, "Loading map data...", view.load(&ctx.api)).await;
}

/// Runs the map screen until the user goes back.
///
/// # Errors
///
/// Returns an error if a prompt or the export fails.
pub async fn run(ctx: &Context) -> CliResult {
    let mut view = MapView::default();
    load(ctx, &mut view).await;

    loop {
        println!("{}", render(&view));
        println!();

        let failed = view.overlay().is_none();
        let actions = if failed { Action::FAILED } else { Action::READY };
        let labels: Vec<&str> = actions.iter().map(|a| a.label(failed)).collect();

        let idx = Select::new()
            .with_prompt("Tornado Map")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[idx] {
            Action::Export => {
                let Some(overlay) = view.overlay() else {
                    continue;
                };
                let path: String = Input::new()
                    .with_prompt("Output file")
                    .default(DEFAULT_EXPORT_PATH.to_string())
                    .interact_text()?;
                match export(overlay, Path::new(&path)) {
                    Ok(()) => println!("Saved {path}"),
                    Err(e) => eprintln!("{}", console::style(format!("Export failed: {e}")).red()),
                }
            }
            Action::Popups => {
                let Some(overlay) = view.overlay() else {
                    continue;
                };
                if overlay.markers.is_empty() {
                    println!("No radon test results to show.");
                } else {
                    println!("{}", render_popups(overlay));
                }
                println!();
            }
            Action::Reload => load(ctx, &mut view).await,
            Action::Back => return Ok(()),
        }
    }
}
