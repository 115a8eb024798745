use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::{DatasetError, LoadError};
use super::reference::{
    ALL_POSITIONS, LEGACY_GUARD_POSITION, ReferenceTables, TOTAL_TEAM_CODE, columns,
};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the season table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the Pandas dtypes found in the file.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    String(String),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                String(_) => 3,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.3}"),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell. Null and text have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null) || matches!(self, CellValue::Float(v) if v.is_nan())
    }

    fn is_numeric_or_null(&self) -> bool {
        !matches!(self, CellValue::String(_))
    }
}

// ---------------------------------------------------------------------------
// PlayerRecord – one row of the season table
// ---------------------------------------------------------------------------

/// One player/team line of the season. Immutable after load.
#[derive(Debug, Clone)]
pub struct PlayerRecord {
    pub player: String,
    /// Position code, e.g. `PG`.
    pub position: String,
    /// Age as of February 1st of the season.
    pub age: u32,
    /// 3-letter team code.
    pub team: String,
    pub season: String,
    /// Every cell of the row, keyed by column name.
    pub cells: BTreeMap<String, CellValue>,
}

impl PlayerRecord {
    pub fn cell(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&CellValue::Null)
    }

    pub fn stat(&self, column: &str) -> Option<f64> {
        self.cells.get(column).and_then(CellValue::as_f64)
    }

    /// Build a typed record from a raw row, checking the identity columns.
    fn from_cells(row: usize, cells: BTreeMap<String, CellValue>) -> Result<Self, LoadError> {
        let text = |column: &str| -> Result<String, LoadError> {
            match cells.get(column) {
                Some(CellValue::String(s)) => Ok(s.clone()),
                other => Err(invalid(row, column, other)),
            }
        };
        let age = match cells.get(columns::AGE) {
            Some(CellValue::Integer(a)) => u32::try_from(*a).ok(),
            Some(CellValue::Float(a)) if a.fract() == 0.0 && *a >= 0.0 => Some(*a as u32),
            _ => None,
        }
        .ok_or_else(|| invalid(row, columns::AGE, cells.get(columns::AGE)))?;

        Ok(PlayerRecord {
            player: text(columns::PLAYER)?,
            position: text(columns::POSITION)?,
            age,
            team: text(columns::TEAM)?,
            season: text(columns::SEASON)?,
            cells,
        })
    }
}

fn invalid(row: usize, column: &str, value: Option<&CellValue>) -> LoadError {
    LoadError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.map(|v| v.to_string()).unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// PositionFilter
// ---------------------------------------------------------------------------

/// Position selection for team aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PositionFilter {
    All,
    Code(String),
}

impl PositionFilter {
    pub fn code(&self) -> &str {
        match self {
            PositionFilter::All => ALL_POSITIONS,
            PositionFilter::Code(c) => c,
        }
    }

    pub fn matches(&self, position: &str) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Code(c) => c == position,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded season
// ---------------------------------------------------------------------------

/// The cleaned season table with pre-computed column metadata.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records (rows), in file order.
    pub players: Vec<PlayerRecord>,
    /// Column names in header order.
    pub column_names: Vec<String>,
    /// Columns whose every non-null cell is a number, in header order.
    pub numeric_columns: Vec<String>,
    /// Low-cardinality text columns (team code excluded).
    pub categorical_columns: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
    /// Distinct position codes in order of first appearance.
    pub positions: Vec<String>,
}

impl Dataset {
    /// Type, clean and validate raw rows.
    ///
    /// Columns are classified over every parsed row before cleaning, the
    /// same way a dataframe types a column at read time. Total rows and the
    /// legacy guard code are then dropped, and the remaining team codes are
    /// checked against `reference`.
    pub fn from_rows(
        column_names: Vec<String>,
        rows: Vec<BTreeMap<String, CellValue>>,
        reference: &ReferenceTables,
    ) -> Result<Self, DatasetError> {
        let missing: Vec<String> = reference
            .required_columns()
            .filter(|col| !column_names.iter().any(|c| c == col))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing).into());
        }
        if rows.is_empty() {
            return Err(LoadError::Empty.into());
        }

        let numeric_columns: Vec<String> = column_names
            .iter()
            .filter(|col| {
                rows.iter().all(|row| {
                    row.get(col.as_str())
                        .map_or(true, CellValue::is_numeric_or_null)
                })
            })
            .cloned()
            .collect();

        let mut players = Vec::with_capacity(rows.len());
        for (row_no, cells) in rows.into_iter().enumerate() {
            let record = PlayerRecord::from_cells(row_no, cells)?;
            if record.team == TOTAL_TEAM_CODE || record.position == LEGACY_GUARD_POSITION {
                continue;
            }
            players.push(record);
        }

        let unknown: BTreeSet<&str> = players
            .iter()
            .map(|p| p.team.as_str())
            .filter(|team| !reference.is_known_team(team))
            .collect();
        if !unknown.is_empty() {
            return Err(DatasetError::Integrity(
                unknown.into_iter().map(str::to_string).collect(),
            ));
        }

        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();
        let mut positions: Vec<String> = Vec::new();
        for p in &players {
            for (col, val) in &p.cells {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
            if !positions.contains(&p.position) {
                positions.push(p.position.clone());
            }
        }

        let categorical_columns = column_names
            .iter()
            .filter(|col| !numeric_columns.contains(col) && col.as_str() != columns::TEAM)
            .filter(|col| {
                let distinct = unique_values
                    .get(col.as_str())
                    .map_or(0, |vals| vals.iter().filter(|v| !v.is_null()).count());
                distinct > 1 && distinct < column_names.len()
            })
            .cloned()
            .collect();

        Ok(Dataset {
            players,
            column_names,
            numeric_columns,
            categorical_columns,
            unique_values,
            positions,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == column)
    }

    pub fn has_position(&self, code: &str) -> bool {
        self.positions.iter().any(|p| p == code)
    }

    /// Position slider values: `All` followed by every position present.
    pub fn position_choices(&self) -> Vec<PositionFilter> {
        std::iter::once(PositionFilter::All)
            .chain(self.positions.iter().cloned().map(PositionFilter::Code))
            .collect()
    }

    /// Position at a slider index, `None` when out of range.
    pub fn position_at(&self, index: usize) -> Option<PositionFilter> {
        match index {
            0 => Some(PositionFilter::All),
            i => self.positions.get(i - 1).cloned().map(PositionFilter::Code),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard – the immutable context handed to the UI
// ---------------------------------------------------------------------------

/// Reference tables plus the season they validated. Built once at startup.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub reference: ReferenceTables,
    pub dataset: Dataset,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn header() -> Vec<String> {
        ReferenceTables::new()
            .required_columns()
            .map(str::to_string)
            .collect()
    }

    /// A row with every required column; stats default to zero.
    pub(crate) fn row(
        player: &str,
        pos: &str,
        age: i64,
        team: &str,
        stats: &[(&str, CellValue)],
    ) -> BTreeMap<String, CellValue> {
        let mut cells: BTreeMap<String, CellValue> = header()
            .into_iter()
            .map(|c| (c, CellValue::Integer(0)))
            .collect();
        cells.insert("player".into(), CellValue::String(player.into()));
        cells.insert("pos".into(), CellValue::String(pos.into()));
        cells.insert("age".into(), CellValue::Integer(age));
        cells.insert("bref_team_id".into(), CellValue::String(team.into()));
        cells.insert("season".into(), CellValue::String("2013-2014".into()));
        for (col, val) in stats {
            cells.insert(col.to_string(), val.clone());
        }
        cells
    }

    pub(crate) fn dataset(rows: Vec<BTreeMap<String, CellValue>>) -> Dataset {
        Dataset::from_rows(header(), rows, &ReferenceTables::new()).unwrap()
    }

    #[test]
    fn cleaning_drops_totals_and_legacy_guards() {
        let ds = dataset(vec![
            row("A", "PG", 25, "ATL", &[]),
            row("B", "SF", 27, "TOT", &[]),
            row("C", "G", 30, "BOS", &[]),
            row("D", "SG", 22, "BOS", &[]),
        ]);
        assert_eq!(ds.len(), 2);
        assert!(ds.players.iter().all(|p| p.team != "TOT" && p.position != "G"));
        assert_eq!(ds.positions, vec!["PG", "SG"]);
    }

    #[test]
    fn unknown_team_is_integrity_error() {
        let err = Dataset::from_rows(
            header(),
            vec![row("A", "C", 25, "XYZ", &[]), row("B", "C", 25, "ABC", &[])],
            &ReferenceTables::new(),
        )
        .unwrap_err();
        match err {
            DatasetError::Integrity(codes) => assert_eq!(codes, vec!["ABC", "XYZ"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn total_rows_are_dropped_before_integrity_check() {
        let ds = dataset(vec![row("A", "C", 25, "TOT", &[]), row("B", "C", 25, "MIA", &[])]);
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn missing_columns_are_load_errors() {
        let mut cols = header();
        cols.retain(|c| c != "pts" && c != "age");
        let err = Dataset::from_rows(cols, Vec::new(), &ReferenceTables::new()).unwrap_err();
        match err {
            DatasetError::Load(LoadError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["age", "pts"])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn numeric_columns_are_classified_by_value() {
        let ds = dataset(vec![
            row("A", "C", 25, "ATL", &[("fg.", CellValue::Null)]),
            row("B", "PF", 21, "ATL", &[("fg.", CellValue::Float(0.5))]),
        ]);
        assert!(ds.is_numeric("fg."));
        assert!(ds.is_numeric("age"));
        assert!(!ds.is_numeric("player"));
        assert!(!ds.is_numeric("season"));
        assert_eq!(ds.categorical_columns, vec!["player", "pos"]);
    }

    #[test]
    fn header_without_rows_is_empty_error() {
        let err = Dataset::from_rows(header(), Vec::new(), &ReferenceTables::new()).unwrap_err();
        assert!(matches!(err, DatasetError::Load(LoadError::Empty)));
    }

    #[test]
    fn missing_cells_do_not_count_as_categories() {
        let mut cols = header();
        cols.push("college".into());
        let college = |v: CellValue| [("college", v)];
        let ds = Dataset::from_rows(
            cols,
            vec![
                row("A", "C", 25, "ATL", &college(CellValue::String("Duke".into()))),
                row("B", "PF", 21, "ATL", &college(CellValue::Null)),
                row("C", "PF", 22, "BOS", &college(CellValue::String("Duke".into()))),
            ],
            &ReferenceTables::new(),
        )
        .unwrap();
        assert!(!ds.is_numeric("college"));
        assert!(!ds.categorical_columns.iter().any(|c| c == "college"));
        assert!(ds.categorical_columns.iter().any(|c| c == "pos"));
    }

    #[test]
    fn non_integer_age_is_rejected() {
        let err = Dataset::from_rows(
            header(),
            vec![row("A", "C", 25, "ATL", &[("age", CellValue::String("old".into()))])],
            &ReferenceTables::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Load(LoadError::InvalidValue { ref column, .. }) if column == "age"
        ));
    }

    #[test]
    fn position_index_space() {
        let ds = dataset(vec![row("A", "SF", 25, "ATL", &[]), row("B", "C", 25, "ATL", &[])]);
        assert_eq!(ds.position_at(0), Some(PositionFilter::All));
        assert_eq!(ds.position_at(1), Some(PositionFilter::Code("SF".into())));
        assert_eq!(ds.position_at(2), Some(PositionFilter::Code("C".into())));
        assert_eq!(ds.position_at(3), None);
        assert_eq!(ds.position_choices().len(), 3);
    }

    #[test]
    fn cells_order_and_display() {
        let mut set = BTreeSet::new();
        set.insert(CellValue::String("b".into()));
        set.insert(CellValue::Integer(3));
        set.insert(CellValue::Null);
        set.insert(CellValue::Float(0.25));
        let shown: Vec<String> = set.iter().map(|v| v.to_string()).collect();
        assert_eq!(shown, vec!["NaN", "3", "0.250", "b"]);
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
    }
}
