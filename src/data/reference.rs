use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Embedded lookups
// ---------------------------------------------------------------------------

/// Column name → human description, in display order.
const GLOSSARY: &[(&str, &str)] = &[
    ("player", "Name of the player"),
    ("pos", "Position played"),
    ("age", "Age of the player, as of February 1st of the season"),
    ("bref_team_id", "3-letter team abbreviation"),
    ("g", "Games played"),
    ("gs", "Games started"),
    ("mp", "Minutes played"),
    ("fg.", "Field goals percentage"),
    ("efg.", "Effective field goals percentage"),
    ("ft.", "Free throw percentage"),
    ("orb", "Offensive rebounds"),
    ("drb", "Defensive rebounds"),
    ("trb", "Total rebounds"),
    ("ast", "Assists"),
    ("stl", "Steals"),
    ("blk", "Blocks"),
    ("tov", "Turnovers"),
    ("pf", "Personal fouls"),
    ("pts", "Points"),
    ("season", "Season"),
];

/// Position code → full name. `ALL` is the synthetic "no filter" entry.
const POSITIONS: &[(&str, &str)] = &[
    ("C", "Center"),
    ("F", "Forward"),
    ("G", "Guard"),
    ("PF", "Power Forward"),
    ("SF", "Small Forward"),
    ("PG", "Point Guard"),
    ("SG", "Shooting Guard"),
    (ALL_POSITIONS, "All positions"),
];

/// Team code → team name, Eastern then Western conference.
const TEAMS: &[(&str, &str)] = &[
    ("ATL", "Atlanta Hawks"),
    ("BOS", "Boston Celtics"),
    ("BRK", "Brooklyn Nets"),
    ("CHA", "Charlotte Hornets"),
    ("CHI", "Chicago Bulls"),
    ("CLE", "Cleveland Cavaliers"),
    ("DET", "Detroit Pistons"),
    ("IND", "Indiana Pacers"),
    ("MIA", "Miami Heat"),
    ("MIL", "Milwaukee Bucks"),
    ("NYK", "New York Knicks"),
    ("ORL", "Orlando Magic"),
    ("PHI", "Philadelphia 76ers"),
    ("TOR", "Toronto Raptors"),
    ("WAS", "Washington Wizards"),
    ("DAL", "Dallas Mavericks"),
    ("DEN", "Denver Nuggets"),
    ("GSW", "Golden State Warriors"),
    ("HOU", "Houston Rockets"),
    ("LAC", "Los Angeles Clippers"),
    ("LAL", "Los Angeles Lakers"),
    ("MEM", "Memphis Grizzlies"),
    ("MIN", "Minnesota Timberwolves"),
    ("NOP", "New Orleans Pelicans"),
    ("OKC", "Oklahoma City Thunder"),
    ("PHO", "Phoenix Suns"),
    ("POR", "Portland Trail Blazers"),
    ("SAC", "Sacramento Kings"),
    ("SAS", "San Antonio Spurs"),
    ("UTA", "Utah Jazz"),
];

/// Synthetic position code meaning "every position".
pub const ALL_POSITIONS: &str = "ALL";

/// Team code of the per-season total row written for traded players.
pub const TOTAL_TEAM_CODE: &str = "TOT";

/// Legacy guard-only position code removed during cleaning.
pub const LEGACY_GUARD_POSITION: &str = "G";

/// Well-known column names.
pub mod columns {
    pub const PLAYER: &str = "player";
    pub const POSITION: &str = "pos";
    pub const AGE: &str = "age";
    pub const TEAM: &str = "bref_team_id";
    pub const SEASON: &str = "season";
}

// ---------------------------------------------------------------------------
// ReferenceTables
// ---------------------------------------------------------------------------

/// Static lookups used for display and validation. Never mutated.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    teams: BTreeMap<&'static str, &'static str>,
    glossary: BTreeMap<&'static str, &'static str>,
    positions: BTreeMap<&'static str, &'static str>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceTables {
    pub fn new() -> Self {
        ReferenceTables {
            teams: TEAMS.iter().copied().collect(),
            glossary: GLOSSARY.iter().copied().collect(),
            positions: POSITIONS.iter().copied().collect(),
        }
    }

    pub fn team_name(&self, code: &str) -> Option<&'static str> {
        self.teams.get(code).copied()
    }

    pub fn is_known_team(&self, code: &str) -> bool {
        self.teams.contains_key(code)
    }

    /// Teams in declaration order.
    pub fn teams(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        TEAMS.iter().copied()
    }

    pub fn describe_column(&self, column: &str) -> Option<&'static str> {
        self.glossary.get(column).copied()
    }

    /// Glossary entries in declaration order.
    pub fn glossary(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        GLOSSARY.iter().copied()
    }

    /// Columns every dataset must provide.
    pub fn required_columns(&self) -> impl Iterator<Item = &'static str> {
        GLOSSARY.iter().map(|(col, _)| *col)
    }

    /// Full position name; unknown codes fall back to the code itself.
    pub fn position_name<'a>(&self, code: &'a str) -> &'a str {
        match self.positions.get(code) {
            Some(name) => *name,
            None => code,
        }
    }
}
