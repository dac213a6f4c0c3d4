use anyhow::{Context, Result};

/// Scope sample interval (s)
const DT: f64 = 1e-5;
const N_SAMPLES: usize = 20_000;

/// Coil pulse centres (s): entry coil, two intermediate coils, exit coil
const PULSE_TIMES: [f64; 4] = [0.020, 0.065, 0.110, 0.155];

/// Induced coil pulse: positive lobe followed by a smaller negative swing as
/// the magnet leaves the coil.
fn coil_pulse(t: f64, centre: f64, amplitude: f64) -> f64 {
    let sigma: f64 = 4e-4;
    let lobe = |mu: f64| (-(t - mu).powi(2) / (2.0 * sigma.powi(2))).exp();
    amplitude * (lobe(centre) - 0.6 * lobe(centre + 3.0 * sigma))
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_scope.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Time (s)", "Ch1 (V)"])?;

    // Pulses weaken slightly as the projectile loses speed.
    let amplitudes = [0.62, 0.55, 0.48, 0.42];

    let mut undefined = 0;
    for i in 0..N_SAMPLES {
        let t = i as f64 * DT;
        let signal: f64 = PULSE_TIMES
            .iter()
            .zip(amplitudes)
            .map(|(&c, a)| coil_pulse(t, c, a))
            .sum();
        let v = signal + rng.gauss(0.0, 0.004);

        // The scope occasionally reports an out-of-range reading.
        let voltage = if i % 1499 == 7 {
            undefined += 1;
            "undefined".to_string()
        } else {
            format!("{v:.5}")
        };
        writer.write_record([format!("{t:.6}"), voltage])?;
    }
    writer.flush()?;

    println!(
        "Wrote {N_SAMPLES} samples ({undefined} undefined) with {} coil pulses to {output_path}",
        PULSE_TIMES.len()
    );
    Ok(())
}
