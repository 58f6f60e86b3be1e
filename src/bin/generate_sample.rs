use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

use launch_dash::data::loader::{COL_BOOSTER, COL_CLASS, COL_PAYLOAD, COL_SITE};

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster eras in flight order: (category, mean payload kg, success probability).
const ERAS: [(&str, f64, f64); 5] = [
    ("v1.0", 400.0, 0.2),
    ("v1.1", 2500.0, 0.35),
    ("FT", 4500.0, 0.7),
    ("B4", 5000.0, 0.75),
    ("B5", 6500.0, 0.95),
];

/// Write a synthetic launch table as CSV and Parquet.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Number of launches to generate.
    #[arg(long, default_value_t = 56)]
    rows: usize,

    /// PRNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Launch {
    flight: i64,
    site: &'static str,
    payload_kg: f64,
    booster_version: String,
    booster_category: &'static str,
    class: i64,
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<Launch> {
    (0..rows)
        .map(|i| {
            // Later flights fly later booster generations.
            let era = (i * ERAS.len() / rows.max(1)).min(ERAS.len() - 1);
            let (category, mean_payload, p_success) = ERAS[era];
            let payload_kg = rng
                .gauss(mean_payload, mean_payload * 0.4)
                .clamp(0.0, 9600.0)
                .round();
            Launch {
                flight: i as i64 + 1,
                site: rng.pick(&SITES),
                payload_kg,
                booster_version: format!("F9 {category} B{:04}", 1000 + i),
                booster_category: category,
                class: i64::from(rng.next_f64() < p_success),
            }
        })
        .collect()
}

fn write_csv(launches: &[Launch], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "Flight Number",
        COL_SITE,
        COL_CLASS,
        COL_PAYLOAD,
        "Booster Version",
        COL_BOOSTER,
    ])?;
    for l in launches {
        writer.write_record([
            l.flight.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload_kg),
            l.booster_version.clone(),
            l.booster_category.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(launches: &[Launch], path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new(COL_SITE, DataType::Utf8, false),
        Field::new(COL_CLASS, DataType::Int64, false),
        Field::new(COL_PAYLOAD, DataType::Float64, false),
        Field::new(COL_BOOSTER, DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload_kg))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_category),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);
    let launches = generate(args.rows, &mut rng);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let csv_path = args.out_dir.join("spacex_launch_dash.csv");
    let parquet_path = args.out_dir.join("spacex_launch_dash.parquet");

    write_csv(&launches, &csv_path)?;
    write_parquet(&launches, &parquet_path)?;

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to {} and {}",
        launches.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
