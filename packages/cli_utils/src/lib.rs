#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the radon canvassing client.
//!
//! Provides [`init_logger`], which sets up `indicatif-log-bridge` so that
//! `log::info!` and friends are suspended while loading spinners redraw,
//! the [`Spinner`] shown while a view fetch is outstanding, and
//! [`DialoguerInteraction`], the terminal implementation of the blocking
//! confirm/alert prompts the views use around mutations.

use std::future::Future;
use std::time::Duration;

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use radon_canvas_views::Interaction;

pub use indicatif::MultiProgress;

/// A loading spinner attached to a [`MultiProgress`].
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Starts a spinner with `message` that ticks until finished.
    #[must_use]
    pub fn start(multi: &MultiProgress, message: &str) -> Self {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar }
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.bar.message()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    /// Stops the spinner, leaving `message` on screen.
    pub fn finish(&self, message: impl Into<String>) {
        self.bar.finish_with_message(message.into());
    }

    /// Stops the spinner and removes it.
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Runs `future` with a spinner showing `message`, clearing it afterwards.
pub async fn with_spinner<F: Future>(multi: &MultiProgress, message: &str, future: F) -> F::Output {
    let spinner = Spinner::start(multi, message);
    let output = future.await;
    spinner.finish_and_clear();
    output
}

/// Blocking yes/no confirmation and alert prompts on the terminal.
///
/// A prompt that cannot be shown (no TTY, interrupted) is treated as a
/// "no" so destructive actions never proceed unconfirmed.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerInteraction;

impl Interaction for DialoguerInteraction {
    fn confirm(&self, message: &str) -> bool {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                log::warn!("Confirmation prompt failed: {e}");
                false
            })
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", console::style(message).red().bold());
    }
}

/// Initializes the global logger wrapped in `indicatif-log-bridge` so that
/// `log::info!` and friends are suspended while spinners redraw.
///
/// Returns the [`MultiProgress`] that all spinners must be added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok(); // Already set (e.g., in tests)

    log::set_max_level(level);

    multi
}

#[cfg(test)]
mod tests {
    use indicatif::ProgressDrawTarget;

    use super::*;

    fn hidden() -> MultiProgress {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn spinner_keeps_final_message() {
        let multi = hidden();
        let spinner = Spinner::start(&multi, "Loading neighborhoods...");
        assert_eq!(spinner.message(), "Loading neighborhoods...");
        assert!(!spinner.is_finished());

        spinner.finish("Loaded 3 neighborhoods");
        assert!(spinner.is_finished());
        assert_eq!(spinner.message(), "Loaded 3 neighborhoods");
    }

    #[tokio::test]
    async fn with_spinner_returns_the_output() {
        let multi = hidden();
        let value = with_spinner(&multi, "Loading map data...", async { 42 }).await;
        assert_eq!(value, 42);
    }

    #[test]
    fn init_logger_is_idempotent() {
        let _first = init_logger();
        let _second = init_logger();
    }
}
