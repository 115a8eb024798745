use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{Dataset, PositionFilter};
use super::reference::ReferenceTables;

/// Teams kept per statistic.
pub const TOP_TEAMS: usize = 5;

/// Maximum chart panels per grid row.
pub const MAX_PANEL_COLUMNS: usize = 3;

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// One user selection on the team comparison page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationRequest {
    /// Statistic columns, in panel order.
    pub statistics: Vec<String>,
    /// `None` until the user picks a position.
    pub position: Option<PositionFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMean {
    pub team: String,
    pub mean: f64,
}

/// Best teams for one statistic, lowest first so a horizontal bar chart
/// draws the leader on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticRanking {
    pub statistic: String,
    pub teams: Vec<TeamMean>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelGrid {
    pub rows: usize,
    pub columns: usize,
}

impl PanelGrid {
    /// At most [`MAX_PANEL_COLUMNS`] panels per row.
    pub fn for_panels(count: usize) -> Self {
        PanelGrid {
            rows: count.div_ceil(MAX_PANEL_COLUMNS),
            columns: count.min(MAX_PANEL_COLUMNS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    /// One ranking per requested statistic, in request order.
    pub rankings: Vec<StatisticRanking>,
    pub grid: PanelGrid,
}

impl AggregationResult {
    /// Pretty JSON of the rankings, for copying chart data out of the UI.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// What the chart area shows after a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ChartView {
    #[default]
    Hidden,
    Visible(AggregationResult),
}

impl ChartView {
    pub fn is_visible(&self) -> bool {
        matches!(self, ChartView::Visible(_))
    }

    pub fn result(&self) -> Option<&AggregationResult> {
        match self {
            ChartView::Visible(r) => Some(r),
            ChartView::Hidden => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Mean of each requested statistic per team, top teams per statistic.
///
/// Returns [`ChartView::Hidden`] when the position is unset or absent from
/// the dataset, when no statistic is requested, when any statistic is not
/// a numeric column, or when some statistic ends up with no team at all.
///
/// Teams are grouped in ascending code order and both sorts are stable, so
/// teams with equal means stay in code order.
pub fn aggregate_teams(dataset: &Dataset, request: &AggregationRequest) -> ChartView {
    let Some(position) = &request.position else {
        return ChartView::Hidden;
    };
    if let PositionFilter::Code(code) = position {
        if !dataset.has_position(code) {
            return ChartView::Hidden;
        }
    }

    let mut statistics: Vec<&str> = Vec::with_capacity(request.statistics.len());
    for stat in &request.statistics {
        if !statistics.contains(&stat.as_str()) {
            statistics.push(stat);
        }
    }
    if statistics.is_empty() || !statistics.iter().all(|s| dataset.is_numeric(s)) {
        return ChartView::Hidden;
    }

    // team → per-statistic (sum, count) over non-null cells
    let mut groups: BTreeMap<&str, Vec<(f64, usize)>> = BTreeMap::new();
    for player in dataset.players.iter().filter(|p| position.matches(&p.position)) {
        let acc = groups
            .entry(player.team.as_str())
            .or_insert_with(|| vec![(0.0, 0); statistics.len()]);
        for (slot, stat) in acc.iter_mut().zip(&statistics) {
            if let Some(v) = player.stat(stat) {
                slot.0 += v;
                slot.1 += 1;
            }
        }
    }

    let rankings: Vec<StatisticRanking> = statistics
        .iter()
        .enumerate()
        .map(|(i, stat)| {
            let mut teams: Vec<TeamMean> = groups
                .iter()
                .filter(|(_, acc)| acc[i].1 > 0)
                .map(|(team, acc)| TeamMean {
                    team: team.to_string(),
                    mean: acc[i].0 / acc[i].1 as f64,
                })
                .collect();
            teams.sort_by(|a, b| b.mean.total_cmp(&a.mean));
            teams.truncate(TOP_TEAMS);
            teams.sort_by(|a, b| a.mean.total_cmp(&b.mean));
            StatisticRanking {
                statistic: stat.to_string(),
                teams,
            }
        })
        .collect();

    if rankings.iter().any(|r| r.teams.is_empty()) {
        log::debug!("No team left for {:?} at position {}", statistics, position.code());
        return ChartView::Hidden;
    }

    ChartView::Visible(AggregationResult {
        grid: PanelGrid::for_panels(rankings.len()),
        rankings,
    })
}

/// Statistics offered for selection: glossary variables that are numeric,
/// in glossary order.
pub fn statistic_options(
    dataset: &Dataset,
    reference: &ReferenceTables,
) -> Vec<(&'static str, &'static str)> {
    reference
        .glossary()
        .filter(|(col, _)| dataset.is_numeric(col))
        .collect()
}
