use crate::color::TeamColors;
use crate::data::aggregate::{AggregationRequest, ChartView, aggregate_teams};
use crate::data::filter::{FilterCriterion, player_indices};
use crate::data::Dashboard;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Dashboard pages reachable from the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Players,
    Teams,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Players, Page::Teams];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Players => "Player Comparison",
            Page::Teams => "Team Comparison",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded season and reference tables (read-only).
    pub dashboard: Dashboard,

    pub page: Page,

    /// Age bracket picked on the player page.
    pub criterion: Option<FilterCriterion>,

    /// Indices of players matching `criterion` (cached). `None` renders nothing.
    pub visible_players: Option<Vec<usize>>,

    /// Statistics ticked on the team page, in the order they were ticked.
    pub statistics: Vec<String>,

    /// Position slider index; `None` until the slider is touched.
    pub position_index: Option<usize>,

    /// Result of the latest team request.
    pub chart: ChartView,

    pub team_colors: TeamColors,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        let team_colors = TeamColors::new(dashboard.reference.teams().map(|(code, _)| code));
        Self {
            dashboard,
            page: Page::default(),
            criterion: None,
            visible_players: None,
            statistics: Vec::new(),
            position_index: None,
            chart: ChartView::Hidden,
            team_colors,
        }
    }

    pub fn set_criterion(&mut self, criterion: Option<FilterCriterion>) {
        self.criterion = criterion;
        self.visible_players = player_indices(&self.dashboard.dataset, criterion);
        log::debug!(
            "Player filter {:?} -> {:?} rows",
            criterion,
            self.visible_players.as_ref().map(Vec::len)
        );
    }

    /// Tick or untick a statistic.
    pub fn toggle_statistic(&mut self, statistic: &str) {
        if let Some(pos) = self.statistics.iter().position(|s| s == statistic) {
            self.statistics.remove(pos);
        } else {
            self.statistics.push(statistic.to_string());
        }
        self.reaggregate();
    }

    pub fn set_position_index(&mut self, index: usize) {
        self.position_index = Some(index);
        self.reaggregate();
    }

    /// The request described by the current widgets.
    pub fn request(&self) -> AggregationRequest {
        AggregationRequest {
            statistics: self.statistics.clone(),
            position: self
                .position_index
                .and_then(|i| self.dashboard.dataset.position_at(i)),
        }
    }

    /// Recompute the chart from scratch for the current request.
    pub fn reaggregate(&mut self) {
        let request = self.request();
        self.chart = aggregate_teams(&self.dashboard.dataset, &request);
        log::debug!(
            "Team aggregation {:?} -> visible: {}",
            request,
            self.chart.is_visible()
        );
    }
}
