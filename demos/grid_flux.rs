/// Drive a small periodic grid: seed Perlin thermal anomalies, step the
/// thermal system, and print detected boundary/flux events as a registered
/// listener receives them.

use crust_mantle_rust::anomaly::ThermalAnomalyConfig;
use crust_mantle_rust::events::{GridEvent, GridListener};
use crust_mantle_rust::grid::{Grid, GridConfig};
use crust_mantle_rust::reporting::{format_event, print_flux_summary};

struct ConsoleListener;

impl GridListener for ConsoleListener {
    fn on_event(&mut self, event: &GridEvent) {
        if let GridEvent::SignificantMaterialFlux { .. } = event {
            println!("  {}", format_event(event));
        }
    }
}

fn main() {
    let seed: u32 = rand::random();
    println!("thermal anomaly seed: {}", seed);

    let mut grid = Grid::new(GridConfig {
        width: 6,
        height: 6,
        ..GridConfig::default()
    });
    grid.seed_thermal_anomalies(&ThermalAnomalyConfig {
        seed,
        amplitude_c: 120.0,
        ..ThermalAnomalyConfig::default()
    });
    grid.add_listener(Box::new(ConsoleListener));

    let dt_s = 1.0e4;
    for step in 0..30 {
        let events = grid.step(dt_s);

        if step % 10 == 0 {
            let gradients = events
                .iter()
                .filter(|e| matches!(e, GridEvent::SteepDensityGradient { .. }))
                .count();
            print_flux_summary(&grid);
            println!(
                "step {:>3}: {} events ({} gradient events)",
                step,
                events.len(),
                gradients,
            );
        }
    }
}
