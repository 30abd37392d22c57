/// Upward material advection within a column.
///
/// Each layer moves a capped fraction of its content into the layer above,
/// carrying thermal content always and material identity only when the
/// moved fraction is large. The bottom layer is replenished from the mantle
/// so the column never runs dry.

use crate::column::Column;
use crate::constants::{
    MATERIAL_CARRY_FRACTION, MAX_ADVECTION_FRACTION, MAX_REPLENISH_MIX_FRACTION,
};

impl Column {
    /// Upward volumetric fraction moved out of `index` over `dt_s`, clamped
    /// to `[0, MAX_ADVECTION_FRACTION]`. Downward velocities and non-finite
    /// inputs contribute nothing; the clamp guarantees the transfer logic
    /// never sees a negative fraction or NaN.
    pub fn advection_fraction(&self, index: usize, dt_s: f64) -> f64 {
        let raw = self.vertical_velocity_m_s[index].max(0.0) * dt_s / self.layer_thickness_m;
        if !raw.is_finite() {
            return 0.0;
        }
        raw.clamp(0.0, MAX_ADVECTION_FRACTION)
    }

    /// Apply upward transfers top-to-bottom, then replenish the bottom layer
    /// and re-assert both temperature boundary conditions.
    pub fn advect_material(&mut self, dt_s: f64) {
        let n = self.layer_count();
        let bottom = n - 1;
        let mut total_upward_flux = 0.0;

        for i in 1..n {
            let fraction = self.advection_fraction(i, dt_s);
            if fraction <= 0.0 {
                continue;
            }

            // the moved parcel mixes into the layer above
            self.temperature_c[i - 1] = self.temperature_c[i - 1] * (1.0 - fraction)
                + self.temperature_c[i] * fraction;
            if fraction > MATERIAL_CARRY_FRACTION {
                self.material[i - 1] = self.material[i];
            }

            total_upward_flux += fraction;
        }

        // Bottom replenishment: fresh mantle rock wells up to replace what
        // left, pulling the bottom temperature toward the reference geotherm.
        self.material[bottom] = self.mantle_material;
        let mix = total_upward_flux.clamp(0.0, MAX_REPLENISH_MIX_FRACTION);
        let mix_delta = mix * (self.reference_mantle_temp_c() - self.temperature_c[bottom]);
        self.temperature_c[bottom] += mix_delta;

        self.temperature_c[0] = self.surface_temp_c;
        self.apply_bottom_boundary();
    }
}
