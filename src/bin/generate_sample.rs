//! Writes a synthetic launch dataset (`spacex_launch_geo.csv` and
//! `spacex_launch_geo.parquet`) with the dashboard's 14-column layout.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const HEADER: [&str; 14] = [
    "Flight Number",
    "Date",
    "Time (UTC)",
    "Booster Version",
    "Launch Site",
    "Payload",
    "Payload Mass (kg)",
    "Orbit",
    "Customer",
    "Mission Outcome",
    "Landing Outcome",
    "class",
    "Lat",
    "Long",
];

/// Site name, latitude, longitude, relative launch weight.
const SITES: [(&str, f64, f64, f64); 4] = [
    ("CCAFS LC-40", 28.562302, -80.577356, 0.45),
    ("CCAFS SLC-40", 28.563197, -80.576820, 0.13),
    ("KSC LC-39A", 28.573255, -80.646895, 0.24),
    ("VAFB SLC-4E", 34.632834, -120.610745, 0.18),
];

/// Booster family by flight era, and its baseline landing success rate.
const BOOSTERS: [(&str, f64); 5] = [
    ("F9 v1.0", 0.0),
    ("F9 v1.1", 0.2),
    ("F9 FT", 0.6),
    ("F9 B4", 0.75),
    ("F9 B5", 0.9),
];

const ORBITS: [&str; 6] = ["LEO", "LEO (ISS)", "GTO", "SSO", "Polar LEO", "MEO"];
const CUSTOMERS: [&str; 6] = ["NASA (CRS)", "SES", "Iridium", "SpaceX", "Telesat", "USAF"];

const FLIGHTS: u32 = 56;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Launch {
    flight: u32,
    date: String,
    time: String,
    booster: String,
    site: usize,
    payload: String,
    mass: f64,
    orbit: String,
    customer: String,
    landing: String,
    class: i64,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    (1..=FLIGHTS)
        .map(|flight| {
            let era = ((flight - 1) as usize * BOOSTERS.len()) / FLIGHTS as usize;
            let (family, success_rate) = BOOSTERS[era];

            let roll = rng.next_f64();
            let mut acc = 0.0;
            let site = SITES
                .iter()
                .position(|&(_, _, _, w)| {
                    acc += w;
                    roll < acc
                })
                .unwrap_or(0);

            // Heavier payloads later in the programme, rounded to 10 kg.
            let ceiling = 2500.0 + 7100.0 * flight as f64 / FLIGHTS as f64;
            let mass = (rng.next_f64() * ceiling / 10.0).round() * 10.0;

            let class = i64::from(rng.next_f64() < success_rate);
            let landing = if class == 1 {
                *rng.pick(&["Success (drone ship)", "Success (ground pad)"])
            } else {
                *rng.pick(&["Failure (drone ship)", "Controlled (ocean)", "No attempt"])
            };

            let year = 2010 + (flight - 1) * 10 / FLIGHTS;
            let month = 1 + rng.next_u64() % 12;
            let day = 1 + rng.next_u64() % 28;

            Launch {
                flight,
                date: format!("{year}-{month:02}-{day:02}"),
                time: format!("{:02}:{:02}:00", rng.next_u64() % 24, rng.next_u64() % 60),
                booster: format!("{family} B{:04}", 1000 + flight),
                site,
                payload: format!("Payload-{flight}"),
                mass,
                orbit: rng.pick(&ORBITS).to_string(),
                customer: rng.pick(&CUSTOMERS).to_string(),
                landing: landing.to_string(),
                class,
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(HEADER)?;
    for l in launches {
        let (site, lat, long, _) = SITES[l.site];
        writer.write_record([
            l.flight.to_string(),
            l.date.clone(),
            l.time.clone(),
            l.booster.clone(),
            site.to_string(),
            l.payload.clone(),
            l.mass.to_string(),
            l.orbit.clone(),
            l.customer.clone(),
            "Success".to_string(),
            l.landing.clone(),
            l.class.to_string(),
            lat.to_string(),
            long.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> Result<()> {
    let strings = |f: &dyn Fn(&Launch) -> String| -> ArrayRef {
        Arc::new(StringArray::from(launches.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight as i64))),
        strings(&|l| l.date.clone()),
        strings(&|l| l.time.clone()),
        strings(&|l| l.booster.clone()),
        strings(&|l| SITES[l.site].0.to_string()),
        strings(&|l| l.payload.clone()),
        Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.mass))),
        strings(&|l| l.orbit.clone()),
        strings(&|l| l.customer.clone()),
        strings(&|_| "Success".to_string()),
        strings(&|l| l.landing.clone()),
        Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
        Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| SITES[l.site].1))),
        Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| SITES[l.site].2))),
    ];

    let fields: Vec<Field> = HEADER
        .iter()
        .zip(&columns)
        .map(|(name, col)| Field::new(*name, col.data_type().clone(), false))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    write_csv("spacex_launch_geo.csv", &launches)?;
    write_parquet("spacex_launch_geo.parquet", &launches)?;

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to spacex_launch_geo.csv and spacex_launch_geo.parquet",
        launches.len()
    );
    Ok(())
}
