use std::fmt;
use std::str::FromStr;

use super::model::{Dataset, PlayerRecord};

/// Age from which a player counts as a senior (as of February 1st).
pub const SENIOR_MIN_AGE: u32 = 24;

// ---------------------------------------------------------------------------
// FilterCriterion
// ---------------------------------------------------------------------------

/// Age bracket selected on the player comparison page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCriterion {
    /// Younger than [`SENIOR_MIN_AGE`].
    Rookies,
    /// [`SENIOR_MIN_AGE`] or older.
    Seniors,
}

impl FilterCriterion {
    pub const ALL: [FilterCriterion; 2] = [FilterCriterion::Rookies, FilterCriterion::Seniors];

    pub fn key(self) -> &'static str {
        match self {
            FilterCriterion::Rookies => "rookies",
            FilterCriterion::Seniors => "seniors",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterCriterion::Rookies => "Rookies (under 24 yo)",
            FilterCriterion::Seniors => "Seniors (over 24 yo)",
        }
    }

    pub fn matches(self, player: &PlayerRecord) -> bool {
        match self {
            FilterCriterion::Rookies => player.age < SENIOR_MIN_AGE,
            FilterCriterion::Seniors => player.age >= SENIOR_MIN_AGE,
        }
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCriterion(pub String);

impl FromStr for FilterCriterion {
    type Err = UnknownCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rookies" => Ok(FilterCriterion::Rookies),
            "seniors" => Ok(FilterCriterion::Seniors),
            _ => Err(UnknownCriterion(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Player selection
// ---------------------------------------------------------------------------

/// Indices of records matching `criterion`, in dataset order.
///
/// `None` means "nothing selected yet" and yields `None`, which the caller
/// must render as nothing at all. `Some(vec![])` is a selection that
/// matched zero rows.
pub fn player_indices(dataset: &Dataset, criterion: Option<FilterCriterion>) -> Option<Vec<usize>> {
    let criterion = criterion?;
    Some(
        dataset
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| criterion.matches(p))
            .map(|(i, _)| i)
            .collect(),
    )
}

/// Records matching `criterion`, in dataset order. See [`player_indices`].
pub fn filter_players(
    dataset: &Dataset,
    criterion: Option<FilterCriterion>,
) -> Option<Vec<&PlayerRecord>> {
    player_indices(dataset, criterion)
        .map(|indices| indices.into_iter().map(|i| &dataset.players[i]).collect())
}

/// Same as [`filter_players`] for a raw selection key such as `"rookies"`.
/// Unrecognised keys select nothing.
pub fn filter_players_by_key<'a>(dataset: &'a Dataset, key: &str) -> Option<Vec<&'a PlayerRecord>> {
    filter_players(dataset, key.parse().ok())
}
