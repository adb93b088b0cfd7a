//! Writes a deterministic sample SME survey CSV for trying out the dashboard.

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

    /// Uniform integer in `1..=max`.
    fn next_code(&mut self, max: u64) -> u64 {
        1 + self.next_u64() % max
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_rows = 200;

    let metric_columns = [
        ("FL_Leverage", 0.8, 0.3),
        ("FR_Liquidity", 1.5, 0.5),
        ("RA_ReturnOnAssets", 0.07, 0.04),
        ("MDA_Score", 2.0, 0.9),
        ("FDM_Index", 0.5, 0.2),
        ("FA_TurnoverRatio", 1.1, 0.4),
    ];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let mut header = vec![
        "Type_SME".to_string(),
        "Established_year".to_string(),
        "Sector".to_string(),
        "SME_Size".to_string(),
    ];
    header.extend(metric_columns.iter().map(|(name, _, _)| name.to_string()));
    writer.write_record(&header).expect("Failed to write header");

    for _ in 0..n_rows {
        let sme_type = rng.next_code(4);
        let established = rng.next_code(3);
        let sector = rng.next_code(5);
        let size = rng.next_code(5);

        let mut record = vec![
            sme_type.to_string(),
            established.to_string(),
            sector.to_string(),
            size.to_string(),
        ];
        for (_, mean, std_dev) in &metric_columns {
            // Larger firms trend a little higher so the charts have structure.
            let shift = 0.1 * *std_dev * size as f64;
            record.push(format!("{:.4}", rng.gauss(mean + shift, *std_dev)));
        }
        writer.write_record(&record).expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} survey responses to {output_path}");
}
