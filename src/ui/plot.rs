use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::TeamColors;
use crate::data::aggregate::{AggregationResult, StatisticRanking};
use crate::data::ReferenceTables;

const PANEL_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// Team comparison charts (central panel)
// ---------------------------------------------------------------------------

/// Lay the rankings out as a grid of horizontal bar charts, in request order.
pub fn team_charts(
    ui: &mut Ui,
    result: &AggregationResult,
    reference: &ReferenceTables,
    colors: &TeamColors,
) {
    let columns = result.grid.columns.max(1);
    for (row_idx, row) in result.rankings.chunks(columns).enumerate() {
        ui.columns(columns, |cols: &mut [Ui]| {
            for (col_idx, (ui, ranking)) in cols.iter_mut().zip(row).enumerate() {
                let title = reference
                    .describe_column(&ranking.statistic)
                    .unwrap_or(ranking.statistic.as_str());
                ui.strong(title);
                ranking_chart(ui, row_idx * columns + col_idx, ranking, reference, colors);
            }
        });
        ui.add_space(8.0);
    }
}

/// One panel: lowest mean at the bottom, best team on top.
fn ranking_chart(
    ui: &mut Ui,
    panel: usize,
    ranking: &StatisticRanking,
    reference: &ReferenceTables,
    colors: &TeamColors,
) {
    let labels: Vec<String> = ranking.teams.iter().map(|t| t.team.clone()).collect();

    let bars: Vec<Bar> = ranking
        .teams
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Bar::new(i as f64, t.mean)
                .name(reference.team_name(&t.team).unwrap_or(t.team.as_str()))
                .width(0.7)
                .fill(colors.color_for(&t.team))
        })
        .collect();

    let chart = BarChart::new(bars)
        .horizontal()
        .name(&ranking.statistic);

    Plot::new(("team_chart", panel, ranking.statistic.as_str()))
        .height(PANEL_HEIGHT)
        .x_axis_label(ranking.statistic.as_str())
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
