/// Pairwise Darcy flux between neighboring columns.
///
/// Columns exchange no references during the lateral phase; each one is
/// reduced to a fixed-field snapshot first, and every interface calculation
/// reads only snapshots.

use crate::column::Column;
use crate::constants::DARCY_PERMEABILITY_M2;
use crate::material::{Material, MaterialTable};

/// Immutable per-step view of one column, captured after the per-column
/// update phase has fully settled.
#[derive(Debug, Clone)]
pub struct ColumnSnapshot {
    pub pressures_pa: Vec<f64>,
    pub temperatures_c: Vec<f64>,
    pub materials: Vec<Material>,
    pub densities_kg_m3: Vec<f64>,
}

impl ColumnSnapshot {
    pub fn capture(column: &Column) -> Self {
        Self {
            pressures_pa: column.get_pressure_profile(),
            temperatures_c: column.temperature_c.clone(),
            materials: column.material.clone(),
            densities_kg_m3: column.actual_density_kg_m3.clone(),
        }
    }
}

/// Mass flux across the interface between columns `a` and `b` at one depth
/// index, kg/(m²·s). Positive means mass flows a → b.
///
/// Darcy's law: the pressure difference over the column spacing gives a
/// gradient, `v = (k/mu) * gradient`, and `v * rho` the mass flux. The
/// effective viscosity and density are evaluated from the *first* column's
/// material and temperature at that depth; the asymmetry is a deliberate
/// modeling choice carried over unchanged.
pub fn interface_flux(
    a: &ColumnSnapshot,
    b: &ColumnSnapshot,
    depth_index: usize,
    spacing_m: f64,
    materials: &MaterialTable,
) -> f64 {
    let pressure_gradient =
        (a.pressures_pa[depth_index] - b.pressures_pa[depth_index]) / spacing_m;
    let profile = materials.get(a.materials[depth_index]);
    let viscosity = profile.effective_viscosity_pa_s(a.temperatures_c[depth_index]);
    let velocity = DARCY_PERMEABILITY_M2 / viscosity * pressure_gradient;
    velocity * a.densities_kg_m3[depth_index]
}
