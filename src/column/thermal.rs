/// Vertical thermal solver: steady-state geotherm construction, explicit
/// diffusion stepping, and the density/buoyancy/velocity chain recomputed
/// from temperature every step.

use crate::column::Column;
use crate::constants::{
    GRAVITY_M_S2, PRESSURE_DENSIFICATION_PER_M, REFERENCE_TEMP_C,
};

impl Column {
    /// Two-pass steady-state geotherm.
    ///
    /// Pass 1 accumulates conductive heat flux bottom-to-top, seeding the
    /// bottom with the baseline mantle heat flow and adding each deeper
    /// layer's radiogenic production on the way up. Pass 2 integrates
    /// temperature top-to-bottom from the clamped surface value. The
    /// resulting bottom temperature is stored as the reference mantle
    /// geotherm used by advection replenishment.
    pub fn calculate_steady_state_geotherm(&mut self) {
        let n = self.layer_count();
        let dz = self.layer_thickness_m;

        let mut flux_w_m2 = vec![0.0; n];
        flux_w_m2[n - 1] = self.baseline_heat_flow_w_m2;
        for i in (0..n - 1).rev() {
            let below = self.materials.get(self.material[i + 1]);
            flux_w_m2[i] = flux_w_m2[i + 1] + below.radiogenic_heat_w_m3 * dz;
        }

        self.temperature_c[0] = self.surface_temp_c;
        for i in 1..n {
            let profile = self.materials.get(self.material[i]);
            self.temperature_c[i] =
                self.temperature_c[i - 1] + flux_w_m2[i] * dz / profile.thermal_conductivity_w_m_k;
        }

        let bottom_temp = self.temperature_c[n - 1];
        self.set_reference_mantle_temp_c(bottom_temp);
    }

    /// Advance the column temperature field by `dt_s` seconds with one
    /// explicit forward-Euler step, then recompute densities, buoyancy
    /// forces, and vertical velocities, and (when enabled) advect material.
    ///
    /// Stability is the caller's responsibility: the explicit scheme needs a
    /// diffusion number `kappa * dt / dz²` of at most 0.5 for every material
    /// in the column. No runtime check is made.
    pub fn update_temperatures(&mut self, dt_s: f64) {
        let n = self.layer_count();
        let dz = self.layer_thickness_m;
        let dz2 = dz * dz;

        let mut next = self.temperature_c.clone();
        for i in 1..n - 1 {
            let profile = self.materials.get(self.material[i]);
            let diffusion = profile.diffusivity_m2_s()
                * (self.temperature_c[i - 1] - 2.0 * self.temperature_c[i]
                    + self.temperature_c[i + 1])
                / dz2;
            let heat_source = profile.radiogenic_heat_w_m3
                / (profile.density_kg_m3 * profile.specific_heat_capacity_j_per_kg_k);
            next[i] = self.temperature_c[i] + dt_s * (diffusion + heat_source);
        }

        next[0] = self.surface_temp_c;
        self.temperature_c = next;
        self.apply_bottom_boundary();

        self.update_densities();
        self.calculate_buoyancy_forces();
        self.calculate_velocities();

        if self.advection_enabled {
            self.advect_material(dt_s);
        }
    }

    /// Enforce the fixed outward heat flux at the column bottom by deriving
    /// its temperature from the layer above — a Neumann condition expressed
    /// as a Dirichlet value.
    pub(crate) fn apply_bottom_boundary(&mut self) {
        let bottom = self.bottom_index();
        let profile = self.materials.get(self.material[bottom]);
        self.temperature_c[bottom] = self.temperature_c[bottom - 1]
            + self.baseline_heat_flow_w_m2 * self.layer_thickness_m
                / profile.thermal_conductivity_w_m_k;
    }

    /// Recompute actual and reference densities from the temperature field.
    /// Actual density follows the thermal expansion law
    /// `rho = rho0 * (1 - alpha * (T - T_ref))`; the reference profile
    /// densifies linearly with depth.
    pub fn update_densities(&mut self) {
        for i in 0..self.layer_count() {
            let profile = self.materials.get(self.material[i]);
            self.actual_density_kg_m3[i] = profile.density_kg_m3
                * (1.0 - profile.thermal_expansion_per_k * (self.temperature_c[i] - REFERENCE_TEMP_C));
            self.reference_density_kg_m3[i] =
                profile.density_kg_m3 * (1.0 + PRESSURE_DENSIFICATION_PER_M * self.depth_m[i]);
        }
    }

    /// Buoyancy force per unit volume, N/m³. Positive where the layer is
    /// lighter than the reference profile (drives upward motion).
    pub fn calculate_buoyancy_forces(&mut self) {
        for i in 0..self.layer_count() {
            self.buoyancy_n_m3[i] =
                (self.reference_density_kg_m3[i] - self.actual_density_kg_m3[i]) * GRAVITY_M_S2;
        }
    }

    /// Stokes-flow approximation of vertical velocity: force over effective
    /// viscosity, with viscosity falling exponentially as the rock heats.
    pub fn calculate_velocities(&mut self) {
        for i in 0..self.layer_count() {
            let profile = self.materials.get(self.material[i]);
            let viscosity = profile.effective_viscosity_pa_s(self.temperature_c[i]);
            self.vertical_velocity_m_s[i] = self.buoyancy_n_m3[i] / viscosity;
        }
    }

    /// Hydrostatic pressure at every layer, Pa. `P[0] = 0`; each deeper
    /// entry integrates the actual density of the layer above.
    pub fn get_pressure_profile(&self) -> Vec<f64> {
        let n = self.layer_count();
        let mut pressure_pa = vec![0.0; n];
        for i in 1..n {
            pressure_pa[i] = pressure_pa[i - 1]
                + self.actual_density_kg_m3[i - 1] * GRAVITY_M_S2 * self.layer_thickness_m;
        }
        pressure_pa
    }
}
