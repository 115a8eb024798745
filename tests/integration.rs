use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use nba_dashboard::data::aggregate::{AggregationRequest, ChartView, aggregate_teams};
use nba_dashboard::data::filter::{FilterCriterion, filter_players, filter_players_by_key};
use nba_dashboard::data::{Dashboard, DatasetError, LoadError, PositionFilter};

const HEADER: &str = "player,pos,age,bref_team_id,g,gs,mp,fg.,efg.,ft.,orb,drb,trb,ast,stl,blk,tov,pf,pts,season,season_end";

fn line(player: &str, pos: &str, age: u32, team: &str, pts: u32, ft: &str) -> String {
    format!("{player},{pos},{age},{team},70,10,1500,0.45,0.5,{ft},20,100,120,80,30,10,40,90,{pts},2013-2014,2013")
}

fn write_csv(dir: &TempDir, name: &str, lines: &[String]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for l in lines {
        writeln!(file, "{l}").unwrap();
    }
    path
}

fn season() -> Vec<String> {
    vec![
        line("Quincy Acy", "SF", 23, "TOR", 300, "0.66"),
        line("Steven Adams", "C", 20, "OKC", 200, "0.58"),
        line("Jeff Adrien", "PF", 27, "CHA", 250, ""),
        line("Arron Afflalo", "SG", 28, "ORL", 1300, "0.81"),
        line("Alexis Ajinca", "C", 25, "NOP", 400, "0.77"),
        line("Cole Aldrich", "C", 24, "NYK", 100, "0.68"),
        line("LaMarcus Aldridge", "PF", 28, "POR", 1900, "0.82"),
        line("Lavoy Allen", "PF", 24, "TOT", 500, "0.68"),
        line("Lavoy Allen", "PF", 24, "PHI", 300, "0.68"),
        line("Lavoy Allen", "PF", 24, "IND", 200, "0.68"),
        line("Tony Allen", "G", 32, "MEM", 600, "0.63"),
        line("Al-Farouq Aminu", "SF", 23, "NOP", 600, "0.66"),
    ]
}

fn load(path: &Path) -> Dashboard {
    Dashboard::load(path).unwrap()
}

#[test]
fn csv_load_cleans_rows() {
    let dir = TempDir::new().unwrap();
    let ds = load(&write_csv(&dir, "nba_2013.csv", &season())).dataset;

    assert_eq!(ds.len(), 10);
    assert!(ds.players.iter().all(|p| p.team != "TOT"));
    assert!(ds.players.iter().all(|p| p.position != "G"));
    assert_eq!(ds.positions, vec!["SF", "C", "PF", "SG"]);
    assert!(ds.is_numeric("ft."));
    assert!(ds.is_numeric("season_end"));
    assert!(!ds.is_numeric("season"));
    assert!(ds.players[2].cell("ft.").is_null());
}

#[test]
fn unknown_team_fails_integrity_check() {
    let dir = TempDir::new().unwrap();
    let mut lines = season();
    lines.push(line("Ghost", "C", 30, "SEA", 100, "0.5"));
    let err = Dashboard::load(&write_csv(&dir, "bad.csv", &lines)).unwrap_err();
    match err {
        DatasetError::Integrity(codes) => assert_eq!(codes, vec!["SEA"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_column_fails_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.csv");
    std::fs::write(&path, "player,pos,age,bref_team_id\nA,C,25,ATL\n").unwrap();
    let err = Dashboard::load(&path).unwrap_err();
    assert!(matches!(err, DatasetError::Load(LoadError::MissingColumns(_))));
}

#[test]
fn header_only_file_fails_load() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "empty.csv", &[]);
    let err = Dashboard::load(&path).unwrap_err();
    assert!(matches!(err, DatasetError::Load(LoadError::Empty)));
}

#[test]
fn missing_file_fails_load() {
    let dir = TempDir::new().unwrap();
    let err = Dashboard::load(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, DatasetError::Load(_)));
}

#[test]
fn rookies_and_seniors_split_at_24() {
    let dir = TempDir::new().unwrap();
    let ds = load(&write_csv(&dir, "nba_2013.csv", &season())).dataset;

    let rookies = filter_players(&ds, Some(FilterCriterion::Rookies)).unwrap();
    let seniors = filter_players(&ds, Some(FilterCriterion::Seniors)).unwrap();
    assert_eq!(rookies.len() + seniors.len(), ds.len());
    assert!(rookies.iter().all(|p| p.age < 24));
    assert!(seniors.iter().all(|p| p.age >= 24));
    assert!(seniors.iter().any(|p| p.player == "Cole Aldrich"));
    assert!(filter_players_by_key(&ds, "bogus").is_none());
}

#[test]
fn top_teams_by_points() {
    let dir = TempDir::new().unwrap();
    let lines = vec![
        line("a", "C", 25, "ATL", 20, "0.7"),
        line("b", "C", 25, "BOS", 30, "0.7"),
        line("c", "PF", 25, "BOS", 20, "0.7"),
        line("d", "SF", 25, "CHI", 15, "0.7"),
    ];
    let ds = load(&write_csv(&dir, "small.csv", &lines)).dataset;

    let view = aggregate_teams(
        &ds,
        &AggregationRequest {
            statistics: vec!["pts".into()],
            position: Some(PositionFilter::All),
        },
    );
    let teams: Vec<(String, f64)> = view.result().unwrap().rankings[0]
        .teams
        .iter()
        .map(|t| (t.team.clone(), t.mean))
        .collect();
    assert_eq!(
        teams,
        vec![("CHI".to_string(), 15.0), ("ATL".to_string(), 20.0), ("BOS".to_string(), 25.0)]
    );

    let legacy = aggregate_teams(
        &ds,
        &AggregationRequest {
            statistics: vec!["pts".into()],
            position: Some(PositionFilter::Code("G".into())),
        },
    );
    assert_eq!(legacy, ChartView::Hidden);
}

#[test]
fn json_records_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nba_2013.json");
    let records = serde_json::json!([
        {
            "player": "Quincy Acy", "pos": "SF", "age": 23, "bref_team_id": "TOR",
            "g": 63, "gs": 0, "mp": 847, "fg.": 0.42, "efg.": 0.47, "ft.": 0.66,
            "orb": 72, "drb": 144, "trb": 216, "ast": 28, "stl": 23, "blk": 26,
            "tov": 30, "pf": 122, "pts": 171, "season": "2013-2014"
        },
        {
            "player": "Someone", "pos": "C", "age": 30, "bref_team_id": "TOT",
            "g": 1, "gs": 0, "mp": 1, "fg.": null, "efg.": null, "ft.": null,
            "orb": 0, "drb": 0, "trb": 0, "ast": 0, "stl": 0, "blk": 0,
            "tov": 0, "pf": 0, "pts": 0, "season": "2013-2014"
        }
    ]);
    std::fs::write(&path, records.to_string()).unwrap();

    let ds = load(&path).dataset;
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.players[0].team, "TOR");
    assert_eq!(ds.column_names[..4], ["player", "pos", "age", "bref_team_id"]);
    assert_eq!(ds.column_names.last().map(String::as_str), Some("season"));
    assert!(ds.is_numeric("fg."));
}

#[test]
fn parquet_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nba_2013.parquet");

    let text = |vals: [&str; 3]| -> ArrayRef { Arc::new(StringArray::from(vals.to_vec())) };
    let ints = |vals: [i64; 3]| -> ArrayRef { Arc::new(Int64Array::from(vals.to_vec())) };

    let mut fields = vec![
        Field::new("player", DataType::Utf8, false),
        Field::new("pos", DataType::Utf8, false),
        Field::new("age", DataType::Int64, false),
        Field::new("bref_team_id", DataType::Utf8, false),
        Field::new("season", DataType::Utf8, false),
    ];
    let mut columns = vec![
        text(["A", "B", "C"]),
        text(["PG", "C", "SF"]),
        ints([22, 31, 24]),
        text(["ATL", "TOT", "GSW"]),
        text(["2013-2014"; 3]),
    ];
    for name in ["g", "gs", "mp", "orb", "drb", "trb", "ast", "stl", "blk", "tov", "pf", "pts"] {
        fields.push(Field::new(name, DataType::Int64, false));
        columns.push(ints([10, 20, 30]));
    }
    for name in ["fg.", "efg.", "ft."] {
        fields.push(Field::new(name, DataType::Float64, true));
        columns.push(Arc::new(Float64Array::from(vec![Some(0.4), None, Some(0.5)])));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load(&path).dataset;
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.players[1].age, 24);
    assert_eq!(ds.players[1].stat("pts"), Some(30.0));
    assert_eq!(
        filter_players(&ds, Some(FilterCriterion::Rookies)).map(|v| v.len()),
        Some(1)
    );
}
