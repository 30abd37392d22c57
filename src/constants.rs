pub const GRAVITY_M_S2: f64 = 9.81;

// Default column geometry and boundary conditions
pub const DEFAULT_SURFACE_TEMP_C: f64 = 15.0;
pub const DEFAULT_BASELINE_HEAT_FLOW_W_M2: f64 = 0.030; // mantle heat flux entering the column bottom
pub const DEFAULT_LAYER_THICKNESS_M: f64 = 1000.0;
pub const DEFAULT_TOTAL_DEPTH_M: f64 = 100_000.0;
pub const DEFAULT_CRUST_THICKNESS_M: f64 = 40_000.0;

/// Reference temperature for the thermal expansion law, °C.
pub const REFERENCE_TEMP_C: f64 = 15.0;

/// Linear densification of the reference density profile with depth, 1/m.
/// Stands in for hydrostatic self-compression of the column.
pub const PRESSURE_DENSIFICATION_PER_M: f64 = 1.0e-8;

/// e-folding temperature of the effective viscosity, °C:
/// mu_eff = mu_0 * exp(-T / VISCOSITY_TEMP_SCALE_C)
pub const VISCOSITY_TEMP_SCALE_C: f64 = 1000.0;

// Advection limits. The fraction cap is a CFL-like limiter: no more than
// 10% of a layer's content may move upward per step.
pub const MAX_ADVECTION_FRACTION: f64 = 0.1;
pub const MATERIAL_CARRY_FRACTION: f64 = 0.5;
pub const MAX_REPLENISH_MIX_FRACTION: f64 = 0.3;

// Lateral (Darcy) coupling
pub const DARCY_PERMEABILITY_M2: f64 = 1.0e-15; // placeholder bulk permeability
pub const DEFAULT_COLUMN_SPACING_M: f64 = 50_000.0;

/// Density-boundary rescans happen once every this many
/// `update_thermal_system` calls.
pub const BOUNDARY_SCAN_INTERVAL: u32 = 10;

// Default detection thresholds
pub const DEFAULT_GRADIENT_THRESHOLD_KG_M3: f64 = 50.0;
// Interface fluxes are tiny in absolute terms (permeability 1e-15 against
// viscosities of 1e20+ Pa·s); the default trips on strong lateral contrasts
// only.
pub const DEFAULT_FLUX_EVENT_THRESHOLD_KG_M2_S: f64 = 1.0e-30;
