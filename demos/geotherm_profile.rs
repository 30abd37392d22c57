/// Build a single default column, print its steady-state geotherm, then
/// step it for a while and print the profile again to show the fixed point
/// holds.

use crust_mantle_rust::column::{Column, ColumnConfig};
use crust_mantle_rust::reporting::print_column_profile;

fn main() {
    let mut column = Column::new(ColumnConfig::default());

    println!("=== steady-state geotherm ===");
    print_column_profile(&column, 10);

    let dt_s = 1.0e4;
    let steps = 1000;
    for _ in 0..steps {
        column.update_temperatures(dt_s);
    }

    println!();
    println!("=== after {} explicit steps of {:.0e} s ===", steps, dt_s);
    print_column_profile(&column, 10);

    let boundaries = column.find_steep_density_gradients(50.0);
    println!();
    println!("{} steep density boundaries:", boundaries.len());
    for record in &boundaries {
        println!(
            "  layer {} ({:.0} km): Δρ {:+.1} kg/m³ [{}]",
            record.depth_index,
            column.depth_km(record.depth_index),
            record.density_gradient,
            record.boundary_kind.as_str(),
        );
    }
}
