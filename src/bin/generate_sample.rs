//! Write a folder of synthetic TGA/DSC and tensile exports for trying the
//! viewer without instrument data.
//!
//! ```bash
//! cargo run --bin generate_sample -- demo_data
//! material-workup thermal demo_data/thermal --show-dsc-lines --show-tga-lines
//! material-workup tensile demo_data/tensile
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Smooth step from 0 to 1 centred on `mu`.
fn logistic(x: f64, mu: f64, width: f64) -> f64 {
    1.0 / (1.0 + (-(x - mu) / width).exp())
}

/// Small deterministic noise source (splitmix64).
struct Noise {
    state: u64,
}

impl Noise {
    fn new(seed: u64) -> Self {
        Noise { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[-amplitude, amplitude)`.
    fn jitter(&mut self, amplitude: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * amplitude
    }
}

// ---------------------------------------------------------------------------
// TGA / DSC
// ---------------------------------------------------------------------------

struct ThermalProfile {
    stem: &'static str,
    /// (centre °C, width °C, amplitude W/g) of DSC events.
    dsc_events: &'static [(f64, f64, f64)],
    /// (centre °C, width °C, mass lost %) of decomposition steps.
    mass_steps: &'static [(f64, f64, f64)],
}

const THERMAL_PROFILES: [ThermalProfile; 3] = [
    ThermalProfile {
        stem: "uncoated",
        dsc_events: &[(110.0, 12.0, -0.6), (340.0, 25.0, 1.8)],
        mass_steps: &[(100.0, 10.0, 6.0), (345.0, 18.0, 70.0)],
    },
    ThermalProfile {
        stem: "coated-laser",
        dsc_events: &[(105.0, 10.0, -0.4), (330.0, 20.0, 1.2), (450.0, 30.0, 0.8)],
        mass_steps: &[(95.0, 10.0, 4.0), (335.0, 16.0, 40.0), (460.0, 25.0, 8.0)],
    },
    ThermalProfile {
        stem: "coated-oven",
        dsc_events: &[(115.0, 14.0, -0.5), (355.0, 22.0, 1.5)],
        mass_steps: &[(105.0, 12.0, 5.0), (360.0, 20.0, 42.0)],
    },
];

fn write_thermal(path: &Path, profile: &ThermalProfile, noise: &mut Noise) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    // Nine metadata lines, as the instrument writes them.
    writeln!(out, "Sample,{}", profile.stem)?;
    writeln!(out, "Instrument,SDT Q600 (synthetic)")?;
    writeln!(out, "Operator,generate_sample")?;
    writeln!(out, "Method,Ramp 10.00 °C/min to 600.00 °C")?;
    writeln!(out, "Atmosphere,Nitrogen")?;
    writeln!(out, "Flow,100 mL/min")?;
    writeln!(out, "Pan,Alumina")?;
    writeln!(out, "Size,5.0 mg")?;
    writeln!(out, "Comment,")?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["°C", "W/g", "%"])?;

    // 25 → 600 °C at 0.1 °C per row
    for i in 0..=5750 {
        let t = 25.0 + i as f64 * 0.1;
        let heat_flow: f64 = profile
            .dsc_events
            .iter()
            .map(|&(mu, sigma, amp)| gaussian(t, mu, sigma, amp))
            .sum::<f64>()
            + noise.jitter(0.002);
        let mass: f64 = 100.0
            - profile
                .mass_steps
                .iter()
                .map(|&(mu, width, loss)| loss * logistic(t, mu, width))
                .sum::<f64>();
        writer.write_record([
            format!("{t:.2}"),
            format!("{heat_flow:.5}"),
            format!("{mass:.4}"),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tensile
// ---------------------------------------------------------------------------

/// (name, modulus N/mm², yield strain, failure strain)
const TENSILE_PROFILES: [(&str, f64, f64, f64); 3] = [
    ("uncoated-1", 1800.0, 0.012, 0.030),
    ("laser-1", 2400.0, 0.010, 0.022),
    ("oven-1", 2100.0, 0.011, 0.026),
];

fn write_tensile(
    path: &Path,
    (modulus, yield_strain, failure_strain): (f64, f64, f64),
    noise: &mut Noise,
) -> Result<()> {
    // Same cross-section as the default configuration.
    let area_cm2 = 0.2725 * 2.54;

    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "Test Method\tTensile (synthetic)")?;
    writeln!(out, "Specimen\t{}", path.display())?;
    writeln!(out, "Rate\t5 mm/min")?;
    writeln!(out)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(out);
    writer.write_record(["Time ", "Load ", "Strain 1 "])?;

    let yield_stress = modulus * yield_strain;
    let steps = 600;
    for i in 0..=steps {
        let strain = failure_strain * i as f64 / steps as f64;
        let stress = if strain <= yield_strain {
            modulus * strain
        } else {
            // hardening toward 1.3× yield stress
            yield_stress * (1.0 + 0.3 * (1.0 - (-(strain - yield_strain) / 0.004).exp()))
        };
        let load = stress / 0.1 * area_cm2 + noise.jitter(2.0);
        writer.write_record([
            format!("{:.2}", i as f64 * 0.1),
            format!("{load:.3}"),
            format!("{strain:.6}"),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demo_data"));

    let thermal_dir = root.join("thermal");
    let tensile_dir = root.join("tensile");
    std::fs::create_dir_all(&thermal_dir)
        .with_context(|| format!("creating {}", thermal_dir.display()))?;
    std::fs::create_dir_all(&tensile_dir)
        .with_context(|| format!("creating {}", tensile_dir.display()))?;

    let mut noise = Noise::new(42);

    for profile in &THERMAL_PROFILES {
        let path = thermal_dir.join(format!("{}.csv", profile.stem));
        write_thermal(&path, profile, &mut noise)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    for (name, modulus, yield_strain, failure_strain) in TENSILE_PROFILES {
        let path = tensile_dir.join(format!("{name}.txt"));
        write_tensile(&path, (modulus, yield_strain, failure_strain), &mut noise)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    println!(
        "Wrote {} thermal and {} tensile samples under {}",
        THERMAL_PROFILES.len(),
        TENSILE_PROFILES.len(),
        root.display()
    );
    Ok(())
}
