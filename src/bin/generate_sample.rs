use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const FACULTIES: [&str; 5] = ["Engineering", "Science", "Business", "Arts", "Medicine"];
const INDUSTRIES: [&str; 6] = ["Fintech", "Healthtech", "Edtech", "Agritech", "SaaS", "Climate"];
const PREFIXES: [&str; 8] = ["Nova", "Blue", "Pixel", "Green", "Bright", "Quantum", "Swift", "Ever"];
const SUFFIXES: [&str; 6] = ["ly", "Labs", "Works", "Hub", "AI", "Pay"];

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

/// A cohort label in one of the shapes seen in the real export.
fn cohort_label(rng: &mut SimpleRng) -> String {
    match rng.below(20) {
        0 => "Checks".to_string(),
        1 => "Cactus Academy".to_string(),
        2 => String::new(),
        3 | 4 => "Current".to_string(),
        5..=9 => format!("{}", 1 + rng.below(11)),
        10..=14 => format!("Cohort {}", 1 + rng.below(11)),
        _ => format!("{}th cohort", 1 + rng.below(11)),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // ---- Founders ----
    let mut faculty_col: Vec<Option<String>> = Vec::new();
    let mut cohort_col: Vec<Option<String>> = Vec::new();

    let founders_path = "Cleaned_Founders_Data.csv";
    let mut founders = csv::Writer::from_path(founders_path).context("creating founders CSV")?;
    founders.write_record(["Founder", "Faculty", "Cohort"])?;
    for i in 0..200 {
        let faculty = if rng.below(15) == 0 {
            String::new()
        } else {
            rng.pick(&FACULTIES).to_string()
        };
        let cohort = cohort_label(&mut rng);
        founders.write_record([format!("Founder {i}"), faculty.clone(), cohort.clone()])?;

        faculty_col.push((!faculty.is_empty()).then_some(faculty));
        cohort_col.push((!cohort.is_empty()).then_some(cohort));
    }
    founders.flush()?;

    // ---- Startups ----
    let startups_path = "Cleaned_Startup_Data.csv";
    let mut startups = csv::Writer::from_path(startups_path).context("creating startups CSV")?;
    startups.write_record(["Startup Name", "Industry"])?;
    for _ in 0..60 {
        let name = format!("{}{}", rng.pick(&PREFIXES), rng.pick(&SUFFIXES));
        startups.write_record([name.as_str(), rng.pick(&INDUSTRIES)])?;
    }
    startups.flush()?;

    // ---- Founders again as Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new("Faculty", DataType::Utf8, true),
        Field::new("Cohort", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(faculty_col)),
        Arc::new(StringArray::from(cohort_col)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let parquet_path = "Cleaned_Founders_Data.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;

    println!("Wrote 200 founders to {founders_path} and {parquet_path}, 60 startups to {startups_path}");
    Ok(())
}
