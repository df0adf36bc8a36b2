//! One-shot subcommands: load a view once, print it, exit.

use std::path::Path;

use radon_canvas_api::CanvassApi;
use radon_canvas_cli_utils::with_spinner;
use radon_canvas_models::{ApiStatus, HotNeighborhoodSort};
use radon_canvas_views::{
    AddressFilter, AddressesView, HotNeighborhoodsView, MapView, NeighborhoodsView, ReferenceSort,
    ReferenceView, SolutionsView, SourcesView, ViewError,
};

use crate::nav::Route;
use crate::screens::{self, CliResult, Context, heading};

/// # Errors
///
/// Returns an error if the neighborhoods cannot be loaded.
pub async fn neighborhoods(ctx: &Context) -> CliResult {
    let mut view = NeighborhoodsView::new();
    with_spinner(&ctx.multi, "Loading neighborhoods...", view.load(&ctx.api)).await?;
    heading(Route::Neighborhoods.title());
    println!("{}", screens::neighborhoods::render(&view));
    Ok(())
}

/// # Errors
///
/// Returns an error if the addresses cannot be loaded.
pub async fn addresses(ctx: &Context, filter: AddressFilter) -> CliResult {
    let mut view = AddressesView::new();
    let loaded = with_spinner(&ctx.multi, "Loading addresses...", async {
        view.load(&ctx.api).await?;
        if filter != AddressFilter::All {
            view.set_filter(&ctx.api, filter).await?;
        }
        Ok::<_, ViewError>(())
    })
    .await;
    loaded?;
    heading(Route::Addresses.title());
    println!("{}", screens::addresses::render(&view));
    Ok(())
}

/// # Errors
///
/// Returns an error if the ranking cannot be loaded.
pub async fn hot_neighborhoods(
    ctx: &Context,
    min_tests: u32,
    sort_by: HotNeighborhoodSort,
) -> CliResult {
    let mut view = HotNeighborhoodsView::new();
    view.set_min_tests(min_tests);
    view.set_sort(sort_by);
    with_spinner(&ctx.multi, "Loading radon data...", view.load(&ctx.api)).await?;
    heading(Route::HotNeighborhoods.title());
    println!("{}", screens::hot_neighborhoods::render(&view));
    Ok(())
}

/// Prints the map summary and, with `output`, writes the `GeoJSON` export.
///
/// # Errors
///
/// Returns an error if the map is in its error state or the export fails.
pub async fn map(ctx: &Context, output: Option<&Path>) -> CliResult {
    let mut view = MapView::default();
    screens::map::load(ctx, &mut view).await;
    heading(Route::TornadoMap.title());
    println!("{}", screens::map::render(&view));

    let Some(overlay) = view.overlay() else {
        return Err("map data unavailable".into());
    };
    if let Some(path) = output {
        screens::map::export(overlay, path)?;
        println!();
        println!("Saved {}", path.display());
    }
    Ok(())
}

pub fn reference(search: Option<String>, sort_by: ReferenceSort) {
    let mut view = ReferenceView::default();
    view.search = search.unwrap_or_default();
    view.sort_by = sort_by;
    heading(Route::Reference.title());
    println!("{}", screens::reference::render(&view));
}

pub fn solutions() {
    heading(Route::Solutions.title());
    print!("{}", screens::library::render_solutions(&SolutionsView::default()));
}

pub fn sources() {
    heading(Route::Sources.title());
    print!("{}", screens::library::render_sources(&SourcesView::default()));
}

/// Backend status as printed by `status`.
#[must_use]
pub fn render_status(base_url: &str, status: &ApiStatus) -> String {
    let source = &status.data_source;
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let mut lines = vec![
        format!("API:               {base_url} ({})", status.status),
        format!("Warehouse enabled: {}", yes_no(source.snowflake_enabled)),
        format!("Connected:         {}", yes_no(source.snowflake_connected)),
        format!("Sample data:       {}", yes_no(source.using_sample_data)),
    ];
    if let Some(error) = &source.error {
        lines.push(format!("Error:             {error}"));
    }
    lines.join("\n")
}

/// # Errors
///
/// Returns an error if the backend is unreachable.
pub async fn status(ctx: &Context) -> CliResult {
    let status = with_spinner(&ctx.multi, "Checking backend...", ctx.api.status()).await?;
    println!("{}", render_status(ctx.api.base_url(), &status));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use radon_canvas_models::DataSourceStatus;

    #[test]
    fn status_lines() {
        let status = ApiStatus {
            status: "running".to_string(),
            data_source: DataSourceStatus {
                snowflake_enabled: true,
                snowflake_connected: false,
                using_sample_data: true,
                error: Some("login timeout".to_string()),
            },
        };
        let text = render_status("http://localhost:8000/api", &status);
        assert_eq!(
            text,
            "API:               http://localhost:8000/api (running)\n\
             Warehouse enabled: yes\n\
             Connected:         no\n\
             Sample data:       yes\n\
             Error:             login timeout"
        );
    }
}
