//! Target neighborhoods screen: server-ranked radon aggregates.

use dialoguer::{Input, Select};
use radon_canvas_cli_utils::with_spinner;
use radon_canvas_models::{EPA_ACTION_LEVEL, HotNeighborhoodSort};
use radon_canvas_views::hot_neighborhoods::parse_min_tests;
use radon_canvas_views::{HotNeighborhoodsView, RankedNeighborhood};

use super::{CliResult, Context, warn_load};

enum Action {
    MinTests,
    SortBy,
    Refresh,
    Back,
}

impl Action {
    const ALL: &[Self] = &[Self::MinTests, Self::SortBy, Self::Refresh, Self::Back];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::MinTests => "Set minimum tests",
            Self::SortBy => "Change sort order",
            Self::Refresh => "Refresh",
            Self::Back => "Back to menu",
        }
    }
}

fn card(row: &RankedNeighborhood<'_>) -> Vec<String> {
    let result = row.result;
    let mut lines = vec![
        format!(
            "#{} {}  [{}]  Ward {}  {}",
            row.rank, result.neighborhood, row.tier.label, result.ward, result.zip_code
        ),
        format!(
            "    Average: {:.1} pCi/L   Tests: {} homes tested   Above Action Level ({EPA_ACTION_LEVEL:.1} pCi/L): {} homes ({:.1}%)",
            result.average_radon_level,
            result.test_count,
            result.high_risk_count,
            result.percent_above_action_level
        ),
    ];
    match row.linked {
        Some(local) => {
            lines.push(format!(
                "    Defined in the app: {} - {} risk level",
                local.name, local.risk_level
            ));
            if let Some(description) = local.description.as_deref() {
                lines.push(format!("      {description}"));
            }
        }
        None => lines.push(
            "    Not yet defined in the app. Consider adding it to your neighborhoods list."
                .to_string(),
        ),
    }
    lines
}

/// The ranked list as shown under the heading.
#[must_use]
pub fn render(view: &HotNeighborhoodsView) -> String {
    let query = view.query();
    let mut lines = vec![
        format!(
            "Minimum Tests: {}   Sort By: {}",
            query.min_tests,
            query.sort_by.label()
        ),
        String::new(),
    ];

    if view.is_loading() {
        lines.push("Loading radon data...".to_string());
        return lines.join("\n");
    }

    let rows = view.rows();
    if rows.is_empty() {
        lines.push("No neighborhoods found".to_string());
        lines.push("Try adjusting the minimum number of tests to see more results.".to_string());
        return lines.join("\n");
    }
    for row in &rows {
        lines.extend(card(row));
        lines.push(String::new());
    }
    lines.pop();
    lines.join("\n")
}

/// Refetches the ranking for the current query. The request runs outside
/// the view borrow; only the newest response is applied.
async fn reload(ctx: &Context, view: &mut HotNeighborhoodsView) {
    let (token, query) = view.begin_fetch();
    let fetched = with_spinner(
        &ctx.multi,
        "Loading radon data...",
        HotNeighborhoodsView::fetch(&ctx.api, query),
    )
    .await;
    warn_load(view.finish_fetch(token, fetched).map(|_| ()), "radon data");
}

/// Loads local neighborhoods and the ranking for `view`'s query.
pub async fn load(ctx: &Context, view: &mut HotNeighborhoodsView) {
    let result = with_spinner(&ctx.multi, "Loading radon data...", view.load(&ctx.api)).await;
    warn_load(result, "radon data");
}

/// Runs the target neighborhoods screen until the user goes back.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub async fn run(ctx: &Context) -> CliResult {
    let mut view = HotNeighborhoodsView::new();
    load(ctx, &mut view).await;

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        println!("{}", render(&view));
        println!();

        let idx = Select::new()
            .with_prompt("Target Neighborhoods")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::MinTests => {
                let input: String = Input::new()
                    .with_prompt("Minimum Tests")
                    .with_initial_text(view.query().min_tests.to_string())
                    .allow_empty(true)
                    .interact_text()?;
                view.set_min_tests(parse_min_tests(&input));
                reload(ctx, &mut view).await;
            }
            Action::SortBy => {
                let sorts = HotNeighborhoodSort::all();
                let names: Vec<&str> = sorts.iter().map(|s| s.label()).collect();
                let current = sorts
                    .iter()
                    .position(|s| *s == view.query().sort_by)
                    .unwrap_or(0);
                let picked = Select::new()
                    .with_prompt("Sort By")
                    .items(&names)
                    .default(current)
                    .interact()?;
                view.set_sort(sorts[picked]);
                reload(ctx, &mut view).await;
            }
            Action::Refresh => load(ctx, &mut view).await,
            Action::Back => return Ok(()),
        }
    }
}
