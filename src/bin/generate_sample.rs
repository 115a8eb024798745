use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Builder, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use nba_dashboard::data::ReferenceTables;

const POSITIONS: [&str; 5] = ["PG", "SG", "SF", "PF", "C"];
const PLAYERS_PER_TEAM: usize = 12;
const SEASON: &str = "2013-2014";
const SEASON_END: i64 = 2013;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }
}

/// One generated season line.
struct SampleRow {
    player: String,
    pos: &'static str,
    age: i64,
    team: String,
    /// g, gs, mp, orb, drb, trb, ast, stl, blk, tov, pf, pts
    counts: [i64; 12],
    /// fg., efg., ft. (ft. is missing for players without free throws)
    pcts: [Option<f64>; 3],
}

const COUNT_COLUMNS: [&str; 12] = [
    "g", "gs", "mp", "orb", "drb", "trb", "ast", "stl", "blk", "tov", "pf", "pts",
];
const PCT_COLUMNS: [&str; 3] = ["fg.", "efg.", "ft."];

fn generate_row(rng: &mut SimpleRng, player: String, pos: &'static str, team: &str) -> SampleRow {
    let g = rng.range(5, 82);
    let gs = rng.range(0, g);
    let mp = g * rng.range(8, 36);
    let orb = rng.range(0, mp / 20);
    let drb = rng.range(orb, mp / 6 + orb);
    let fg = 0.35 + rng.next_f64() * 0.2;
    let ft = if rng.next_f64() < 0.05 {
        None
    } else {
        Some(0.5 + rng.next_f64() * 0.4)
    };
    SampleRow {
        player,
        pos,
        age: rng.range(19, 38),
        team: team.to_string(),
        counts: [
            g,
            gs,
            mp,
            orb,
            drb,
            orb + drb,
            rng.range(0, mp / 5),
            rng.range(0, mp / 30),
            rng.range(0, mp / 40),
            rng.range(0, mp / 15),
            rng.range(0, mp / 10),
            rng.range(mp / 10, mp / 2),
        ],
        pcts: [Some(fg), Some(fg + rng.next_f64() * 0.05), ft],
    }
}

fn generate(reference: &ReferenceTables) -> Vec<SampleRow> {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::new();

    for (code, _) in reference.teams() {
        for i in 0..PLAYERS_PER_TEAM {
            let name = format!("{code} Player {}", i + 1);
            rows.push(generate_row(&mut rng, name, POSITIONS[i % POSITIONS.len()], code));
        }
    }

    // A traded player: two team lines plus the season total line.
    let traded = "Traded Player".to_string();
    rows.push(generate_row(&mut rng, traded.clone(), "SF", "BOS"));
    rows.push(generate_row(&mut rng, traded.clone(), "SF", "LAL"));
    rows.push(generate_row(&mut rng, traded, "SF", "TOT"));
    // Legacy guard-only code, dropped by the loader.
    rows.push(generate_row(&mut rng, "Legacy Guard".to_string(), "G", "MIA"));

    rows
}

fn header() -> Vec<&'static str> {
    let mut cols = vec!["player", "pos", "age", "bref_team_id"];
    cols.extend_from_slice(&COUNT_COLUMNS);
    cols.extend_from_slice(&PCT_COLUMNS);
    cols.extend_from_slice(&["season", "season_end"]);
    cols
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(header())?;
    for r in rows {
        let mut record = vec![r.player.clone(), r.pos.to_string(), r.age.to_string(), r.team.clone()];
        record.extend(r.counts.iter().map(|v| v.to_string()));
        record.extend(
            r.pcts
                .iter()
                .map(|v| v.map(|p| format!("{p:.3}")).unwrap_or_default()),
        );
        record.push(SEASON.to_string());
        record.push(SEASON_END.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut fields = vec![
        Field::new("player", DataType::Utf8, false),
        Field::new("pos", DataType::Utf8, false),
        Field::new("age", DataType::Int64, false),
        Field::new("bref_team_id", DataType::Utf8, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.player.as_str()))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.pos))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.age))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.team.as_str()))),
    ];

    for (i, name) in COUNT_COLUMNS.iter().enumerate() {
        fields.push(Field::new(*name, DataType::Int64, false));
        columns.push(Arc::new(Int64Array::from_iter_values(
            rows.iter().map(|r| r.counts[i]),
        )));
    }
    for (i, name) in PCT_COLUMNS.iter().enumerate() {
        fields.push(Field::new(*name, DataType::Float64, true));
        let mut builder = Float64Builder::with_capacity(rows.len());
        for r in rows {
            builder.append_option(r.pcts[i]);
        }
        columns.push(Arc::new(builder.finish()));
    }

    fields.push(Field::new("season", DataType::Utf8, false));
    columns.push(Arc::new(StringArray::from_iter_values(
        rows.iter().map(|_| SEASON),
    )));
    fields.push(Field::new("season_end", DataType::Int64, false));
    columns.push(Arc::new(Int64Array::from_iter_values(
        rows.iter().map(|_| SEASON_END),
    )));

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let rows = generate(&ReferenceTables::new());

    write_csv(&rows, "nba_sample.csv")?;
    write_parquet(&rows, "nba_sample.parquet")?;

    println!(
        "Wrote {} season lines to nba_sample.csv and nba_sample.parquet",
        rows.len()
    );
    Ok(())
}
