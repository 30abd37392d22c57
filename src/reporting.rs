/// Console diagnostics for demo drivers. Never called from the numerical
/// core.

use crate::column::Column;
use crate::events::GridEvent;
use crate::grid::Grid;
use colored::Colorize;

fn colorize_temp(temp_c: f64) -> colored::ColoredString {
    let text = format!("{:8.1}", temp_c);
    if temp_c >= 1200.0 {
        text.as_str().red()
    } else if temp_c >= 600.0 {
        text.as_str().yellow()
    } else if temp_c >= 200.0 {
        text.as_str().green()
    } else {
        text.as_str().blue()
    }
}

/// Print a depth/temperature/density/velocity table for one column, one row
/// every `stride` layers.
pub fn print_column_profile(column: &Column, stride: usize) {
    println!("{}", column);
    println!(
        "{:>8} {:>12} {:>8} {:>10} {:>12} {:>14}",
        "depth km", "material", "T °C", "rho", "buoyancy", "velocity m/s"
    );

    let stride = stride.max(1);
    for i in (0..column.layer_count()).step_by(stride) {
        println!(
            "{:>8.1} {:>12} {} {:>10.1} {:>12.3} {:>14.3e}",
            column.depth_km(i),
            column.material[i].as_str(),
            colorize_temp(column.temperature_c[i]),
            column.actual_density_kg_m3[i],
            column.buoyancy_n_m3[i],
            column.vertical_velocity_m_s[i],
        );
    }
}

/// Print the grid's flux field extremes and active boundary count.
pub fn print_flux_summary(grid: &Grid) {
    let mut max_magnitude = 0.0_f64;
    let mut hottest_cell = (0, 0);

    for y in 0..grid.height {
        for x in 0..grid.width {
            let magnitude = grid.flux[grid.index(x, y)].length();
            if magnitude > max_magnitude {
                max_magnitude = magnitude;
                hottest_cell = (x, y);
            }
        }
    }

    let header = grid.to_string();
    println!(
        "{}  peak |flux| {:.3e} kg/m²s at ({}, {})",
        header.as_str().bold(),
        max_magnitude,
        hottest_cell.0,
        hottest_cell.1,
    );
}

/// One-line rendering of a grid event.
pub fn format_event(event: &GridEvent) -> String {
    match event {
        GridEvent::SteepDensityGradient {
            x,
            y,
            depth_km,
            gradient_magnitude,
            boundary_kind,
        } => format!(
            "{} ({},{}) at {:.0} km: Δρ {:.1} kg/m³ [{}]",
            "boundary".cyan(),
            x,
            y,
            depth_km,
            gradient_magnitude,
            boundary_kind.as_str(),
        ),
        GridEvent::SignificantMaterialFlux {
            source,
            target,
            depth_km,
            flux_rate,
        } => format!(
            "{} ({},{}) -> ({},{}) at {:.0} km: {:.3e} kg/m²s",
            "flux".magenta(),
            source.0,
            source.1,
            target.0,
            target.1,
            depth_km,
            flux_rate,
        ),
    }
}
