/// Perlin-noise thermal anomaly seeding.
///
/// A freshly built grid is laterally uniform: every column carries the same
/// geotherm, so every interface pressure difference — and therefore every
/// Darcy flux — is exactly zero. Seeding a smooth temperature anomaly field
/// gives the lateral solver realistic structure to act on. Deterministic for
/// a fixed seed.

use crate::grid::Grid;
use noise::{NoiseFn, Perlin};

#[derive(Debug, Clone)]
pub struct ThermalAnomalyConfig {
    pub seed: u32,
    /// Horizontal feature size in grid cells.
    pub horizontal_scale: f64,
    /// Vertical feature size in layers.
    pub vertical_scale: f64,
    /// Peak perturbation amplitude, °C.
    pub amplitude_c: f64,
}

impl Default for ThermalAnomalyConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            horizontal_scale: 4.0,
            vertical_scale: 25.0,
            amplitude_c: 50.0,
        }
    }
}

impl Grid {
    /// Perturb every column's interior temperatures with smooth noise, then
    /// re-settle the derived per-layer fields. Boundary layers keep their
    /// clamped values.
    pub fn seed_thermal_anomalies(&mut self, config: &ThermalAnomalyConfig) {
        let perlin = Perlin::new(config.seed);

        for y in 0..self.height {
            for x in 0..self.width {
                let index = self.index(x, y);
                let column = &mut self.columns[index];
                let bottom = column.bottom_index();

                for i in 1..bottom {
                    let sample = perlin.get([
                        x as f64 / config.horizontal_scale,
                        y as f64 / config.horizontal_scale,
                        i as f64 / config.vertical_scale,
                    ]);
                    column.temperature_c[i] += config.amplitude_c * sample;
                }

                column.apply_bottom_boundary();
                column.update_densities();
                column.calculate_buoyancy_forces();
                column.calculate_velocities();
            }
        }
    }
}
