use eframe::egui::{self, ComboBox, RichText, ScrollArea, Slider, Ui};

use crate::config::HEAD_ROWS;
use crate::data::aggregate::statistic_options;
use crate::data::filter::FilterCriterion;
use crate::data::summary::{self, ColumnSummary};
use crate::state::{AppState, Page};
use crate::ui::plot;
use crate::ui::table::{TableColumn, data_table};

const GLOSSARY_URL: &str = "https://www.basketball-reference.com/about/glossary.html";

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the navigation bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("NBA 2013").strong());
        ui.separator();

        for page in Page::ALL {
            if ui.selectable_label(state.page == page, page.title()).clicked() {
                state.page = page;
            }
        }

        ui.separator();
        ui.label(format!("{} players loaded", state.dashboard.dataset.len()));
    });
}

/// Render the page selected in the top bar.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    match state.page {
        Page::Home => home_page(ui, state),
        Page::Players => players_page(ui, state),
        Page::Teams => teams_page(ui, state),
    }
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

fn home_page(ui: &mut Ui, state: &AppState) {
    let dataset = &state.dashboard.dataset;
    let reference = &state.dashboard.reference;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("NBA 2013 dataset");
            ui.label(
                "This is a dashboard to compare the players and the teams of the NBA 2013 season.",
            );

            ui.add_space(8.0);
            ui.heading("Dataset source");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.label("Variable meanings follow the");
                ui.hyperlink_to("basketball-reference glossary", GLOSSARY_URL);
                ui.label(
                    ". The Player Comparison page compares rookies or seniors; \
                     the Team Comparison page compares teams on chosen statistics.",
                );
            });

            ui.add_space(8.0);
            ui.heading("Dataset head");
            let columns: Vec<TableColumn> = dataset
                .column_names
                .iter()
                .map(|c| TableColumn {
                    name: c,
                    description: reference.describe_column(c),
                })
                .collect();
            let head = summary::head(dataset, HEAD_ROWS);
            data_table(ui, "head", &columns, head.len(), false, |r, c| {
                head[r].cell(&dataset.column_names[c]).to_string()
            });

            ui.add_space(8.0);
            ui.heading("Dataset summary");
            let described = summary::describe(dataset);
            let mut summary_columns = vec![TableColumn::plain("")];
            summary_columns.extend(described.iter().map(|(c, _)| TableColumn::plain(c)));
            data_table(
                ui,
                "describe",
                &summary_columns,
                ColumnSummary::STATS.len(),
                false,
                |r, c| {
                    let stat = ColumnSummary::STATS[r];
                    match c {
                        0 => stat.to_string(),
                        c => described[c - 1].1.stat(stat),
                    }
                },
            );

            ui.add_space(8.0);
            ui.heading("Teams");
            let teams: Vec<(&str, &str)> = reference.teams().collect();
            data_table(
                ui,
                "teams",
                &[TableColumn::plain("CODE"), TableColumn::plain("TEAM")],
                teams.len(),
                false,
                |r, c| (if c == 0 { teams[r].0 } else { teams[r].1 }).to_string(),
            );

            ui.add_space(8.0);
            ui.heading("Variables");
            let glossary: Vec<(&str, &str)> = reference.glossary().collect();
            data_table(
                ui,
                "glossary",
                &[TableColumn::plain("VARIABLE"), TableColumn::plain("DESCRIPTION")],
                glossary.len(),
                false,
                |r, c| (if c == 0 { glossary[r].0 } else { glossary[r].1 }).to_string(),
            );
        });
}

// ---------------------------------------------------------------------------
// Player comparison
// ---------------------------------------------------------------------------

fn players_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Player Comparison");
    ui.strong("Choose the type of players you want to compare");

    let selected_text = state.criterion.map_or("Select…", FilterCriterion::label);
    let mut picked = None;
    ComboBox::from_id_salt("player_criterion")
        .selected_text(selected_text)
        .width(220.0)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(state.criterion.is_none(), "—").clicked() {
                picked = Some(None);
            }
            for criterion in FilterCriterion::ALL {
                if ui
                    .selectable_label(state.criterion == Some(criterion), criterion.label())
                    .clicked()
                {
                    picked = Some(Some(criterion));
                }
            }
        });
    if let Some(criterion) = picked {
        state.set_criterion(criterion);
    }

    ui.separator();

    let Some(indices) = &state.visible_players else {
        return;
    };
    let dataset = &state.dashboard.dataset;
    let reference = &state.dashboard.reference;

    ui.label(format!("{} players", indices.len()));
    let columns: Vec<TableColumn> = dataset
        .column_names
        .iter()
        .map(|c| TableColumn {
            name: c,
            description: reference.describe_column(c),
        })
        .collect();
    data_table(ui, "players", &columns, indices.len(), true, |r, c| {
        dataset.players[indices[r]]
            .cell(&dataset.column_names[c])
            .to_string()
    });
}

// ---------------------------------------------------------------------------
// Team comparison
// ---------------------------------------------------------------------------

fn teams_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Team Comparison");

    let options = statistic_options(&state.dashboard.dataset, &state.dashboard.reference);
    let mut toggled: Option<&str> = None;
    egui::CollapsingHeader::new(RichText::new(format!(
        "Choose the statistics to compute  ({}/{})",
        state.statistics.len(),
        options.len()
    ))
    .strong())
    .id_salt("statistics")
    .default_open(true)
    .show(ui, |ui: &mut Ui| {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for (column, description) in &options {
                let mut checked = state.statistics.iter().any(|s| s == column);
                if ui.checkbox(&mut checked, *description).changed() {
                    toggled = Some(*column);
                }
            }
        });
    });
    if let Some(column) = toggled {
        state.toggle_statistic(column);
    }

    ui.strong("If needed, split the analysis by position played");
    let choices = state.dashboard.dataset.position_choices();
    let mut index = state.position_index.unwrap_or(0);
    ui.horizontal(|ui: &mut Ui| {
        let slider = Slider::new(&mut index, 0..=choices.len().saturating_sub(1))
            .step_by(1.0)
            .show_value(false);
        let response = ui.add(slider);
        if response.changed() || (response.clicked() && state.position_index.is_none()) {
            state.set_position_index(index);
        }
        let label = match state.position_index.and_then(|i| choices.get(i)) {
            Some(choice) => state.dashboard.reference.position_name(choice.code()),
            None => "—",
        };
        ui.label(label);
    });

    ui.separator();

    if let Some(result) = state.chart.result() {
        if ui.button("Copy chart data as JSON").clicked() {
            match result.to_json() {
                Ok(json) => ui.ctx().copy_text(json),
                Err(e) => log::error!("Failed to export chart data: {e}"),
            }
        }
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                plot::team_charts(ui, result, &state.dashboard.reference, &state.team_colors);
            });
    }
}
