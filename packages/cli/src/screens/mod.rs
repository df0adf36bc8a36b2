//! Terminal renderings of each route.
//!
//! Every screen module pairs pure `render*` functions, which format a
//! view's state as text, with an interactive `run` loop that drives the
//! view through `dialoguer` prompts until the user goes back to the menu.

pub mod addresses;
pub mod hot_neighborhoods;
pub mod library;
pub mod map;
pub mod neighborhoods;
pub mod reference;

use radon_canvas_api::HttpApi;
use radon_canvas_cli_utils::{DialoguerInteraction, MultiProgress};
use radon_canvas_views::{SolutionsView, SourcesView, ViewError};

use crate::nav::Route;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Everything a screen needs to talk to the backend and the user.
pub struct Context {
    pub api: HttpApi,
    pub multi: MultiProgress,
    pub ui: DialoguerInteraction,
}

/// Runs the interactive screen for `route`.
///
/// # Errors
///
/// Returns an error if a prompt or file write fails.
pub async fn show(route: Route, ctx: &Context) -> CliResult {
    heading(route.title());
    match route {
        Route::Neighborhoods => neighborhoods::run(ctx).await,
        Route::Addresses => addresses::run(ctx).await,
        Route::HotNeighborhoods => hot_neighborhoods::run(ctx).await,
        Route::TornadoMap => map::run(ctx).await,
        Route::Solutions => {
            print!("{}", library::render_solutions(&SolutionsView::default()));
            Ok(())
        }
        Route::Sources => {
            print!("{}", library::render_sources(&SourcesView::default()));
            Ok(())
        }
        Route::Reference => reference::run(),
    }
}

pub fn heading(title: &str) {
    println!();
    println!("{}", console::style(title).bold().cyan());
    println!("{}", "=".repeat(title.chars().count()));
}

/// Shortens `text` to at most `max` characters, marking the cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Reports a failed read. The previous data stays on screen.
pub fn warn_load(result: Result<(), ViewError>, what: &str) {
    if let Err(e) = result {
        eprintln!(
            "{}",
            console::style(format!("Could not load {what}: {e}")).yellow()
        );
    }
}

/// Unwraps a mutation outcome. Validation problems are printed; backend
/// failures were already alerted by the view.
pub fn settle<T>(result: Result<T, ViewError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(ViewError::Validation { message }) => {
            eprintln!("{}", console::style(message).yellow());
            None
        }
        Err(ViewError::Api(_)) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("Soulard", 10), "Soulard");
        assert_eq!(truncate("Tower Grove South", 10), "Tower G...");
        assert_eq!(truncate("Ünïcödé strêét", 8), "Ünïcö...");
    }

    #[test]
    fn settle_passes_values_through() {
        assert_eq!(settle::<u8>(Ok(3)), Some(3));
        assert_eq!(
            settle::<u8>(Err(ViewError::Validation {
                message: "Name is required".to_string()
            })),
            None
        );
    }
}
