/// A geological column: one vertical stack of fixed-thickness depth layers
/// with independent thermal, density, and velocity state.
///
/// Layer index 0 is the surface, the last index is the column bottom. Layer
/// state lives in parallel arrays, one value per layer index; depths and the
/// layer count never change after construction.

pub mod advection;
pub mod boundary;
pub mod thermal;

pub use boundary::{BoundaryKind, BoundaryRecord};

use crate::constants::{
    DEFAULT_BASELINE_HEAT_FLOW_W_M2, DEFAULT_CRUST_THICKNESS_M, DEFAULT_LAYER_THICKNESS_M,
    DEFAULT_SURFACE_TEMP_C, DEFAULT_TOTAL_DEPTH_M,
};
use crate::material::{Material, MaterialTable};

/// Construction parameters for a single column.
#[derive(Debug, Clone)]
pub struct ColumnConfig {
    pub total_depth_m: f64,
    pub layer_thickness_m: f64,
    pub surface_temp_c: f64,
    /// Heat flux entering the column bottom from below, W/m².
    pub baseline_heat_flow_w_m2: f64,
    /// Depth of the crust/mantle material transition, m.
    pub crust_thickness_m: f64,
    pub crust_material: Material,
    pub mantle_material: Material,
    pub advection_enabled: bool,
    pub materials: MaterialTable,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            total_depth_m: DEFAULT_TOTAL_DEPTH_M,
            layer_thickness_m: DEFAULT_LAYER_THICKNESS_M,
            surface_temp_c: DEFAULT_SURFACE_TEMP_C,
            baseline_heat_flow_w_m2: DEFAULT_BASELINE_HEAT_FLOW_W_M2,
            crust_thickness_m: DEFAULT_CRUST_THICKNESS_M,
            crust_material: Material::Granite,
            mantle_material: Material::Peridotite,
            advection_enabled: true,
            materials: MaterialTable::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub layer_thickness_m: f64,
    pub surface_temp_c: f64,
    pub baseline_heat_flow_w_m2: f64,
    pub mantle_material: Material,
    pub advection_enabled: bool,
    pub materials: MaterialTable,

    /// Depth of each layer below the surface, m. Fixed at construction.
    pub depth_m: Vec<f64>,
    pub temperature_c: Vec<f64>,
    pub material: Vec<Material>,
    pub actual_density_kg_m3: Vec<f64>,
    pub reference_density_kg_m3: Vec<f64>,
    pub buoyancy_n_m3: Vec<f64>,
    pub vertical_velocity_m_s: Vec<f64>,

    /// Bottom temperature of the steady-state geotherm, used to replenish
    /// material rising out of the bottom layer.
    reference_mantle_temp_c: f64,
}

impl Column {
    pub fn new(config: ColumnConfig) -> Self {
        assert!(config.layer_thickness_m > 0.0, "layer thickness must be positive");
        assert!(
            config.total_depth_m >= config.layer_thickness_m,
            "column must hold at least one full layer"
        );

        let layer_count = (config.total_depth_m / config.layer_thickness_m) as usize + 1;
        let dz = config.layer_thickness_m;

        let depth_m: Vec<f64> = (0..layer_count).map(|i| i as f64 * dz).collect();
        let material: Vec<Material> = depth_m
            .iter()
            .map(|&depth| {
                if depth < config.crust_thickness_m {
                    config.crust_material
                } else {
                    config.mantle_material
                }
            })
            .collect();

        let mut column = Self {
            layer_thickness_m: dz,
            surface_temp_c: config.surface_temp_c,
            baseline_heat_flow_w_m2: config.baseline_heat_flow_w_m2,
            mantle_material: config.mantle_material,
            advection_enabled: config.advection_enabled,
            materials: config.materials,
            depth_m,
            temperature_c: vec![0.0; layer_count],
            material,
            actual_density_kg_m3: vec![0.0; layer_count],
            reference_density_kg_m3: vec![0.0; layer_count],
            buoyancy_n_m3: vec![0.0; layer_count],
            vertical_velocity_m_s: vec![0.0; layer_count],
            reference_mantle_temp_c: 0.0,
        };

        column.calculate_steady_state_geotherm();
        column.update_densities();
        column.calculate_buoyancy_forces();
        column.calculate_velocities();

        column
    }

    pub fn layer_count(&self) -> usize {
        self.depth_m.len()
    }

    pub fn bottom_index(&self) -> usize {
        self.depth_m.len() - 1
    }

    pub fn total_depth_m(&self) -> f64 {
        *self.depth_m.last().expect("columns always hold at least one layer")
    }

    /// Bottom temperature of the steady-state geotherm recorded at
    /// construction, °C.
    pub fn reference_mantle_temp_c(&self) -> f64 {
        self.reference_mantle_temp_c
    }

    pub(crate) fn set_reference_mantle_temp_c(&mut self, temp_c: f64) {
        self.reference_mantle_temp_c = temp_c;
    }

    pub fn depth_km(&self, index: usize) -> f64 {
        self.depth_m[index] / 1000.0
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bottom = self.bottom_index();
        write!(
            f,
            "Column[{} layers, 0-{:.0}km, {:.1}°C surface, {:.1}°C bottom]",
            self.layer_count(),
            self.total_depth_m() / 1000.0,
            self.temperature_c[0],
            self.temperature_c[bottom],
        )
    }
}
