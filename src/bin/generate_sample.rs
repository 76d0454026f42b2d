//! Writes `sample_data.csv`: a free-fall style measurement series
//! `d = v·t + d0` with Gaussian noise, plus a couple of incomplete rows.

/// Seeded Gaussian noise; splitmix64 feeding a Box-Muller transform.
struct Noise(u64);

impl Noise {
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    fn normal(&mut self, std_dev: f64) -> f64 {
        let r = (-2.0 * self.uniform().max(f64::MIN_POSITIVE).ln()).sqrt();
        r * (std::f64::consts::TAU * self.uniform()).cos() * std_dev
    }
}

fn main() -> anyhow::Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_data.csv".to_string());

    let mut noise = Noise(42);
    let velocity = 1.25;
    let offset = 0.4;

    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record(["Time (t) [s]", "Distance (d) [m]"])?;

    let mut rows = 0;
    for i in 0..20 {
        let t = i as f64 * 0.5;
        let d = velocity * t + offset + noise.normal(0.15);
        writer.write_record([format!("{t:.2}"), format!("{d:.3}")])?;
        rows += 1;
    }
    // Rows the editor must tolerate: a missing value and a typo.
    writer.write_record(["10.50", ""])?;
    writer.write_record(["11.00", "13,9"])?;
    writer.flush()?;

    println!("Wrote {} rows to {output_path}", rows + 2);
    Ok(())
}
