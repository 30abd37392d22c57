/// Detection of sharp density discontinuities between adjacent layers.

use crate::column::Column;
use crate::material::Material;
use serde::{Deserialize, Serialize};

/// Which material transition borders a density jump. Classified from the
/// materials on either side of the interface, upper layer first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryKind {
    CrustMantle,
    MantleCrust,
    IntraCrust,
    IntraMantle,
}

impl BoundaryKind {
    pub fn classify(upper: Material, lower: Material) -> Self {
        match (upper.is_crustal(), lower.is_crustal()) {
            (true, false) => BoundaryKind::CrustMantle,
            (false, true) => BoundaryKind::MantleCrust,
            (true, true) => BoundaryKind::IntraCrust,
            (false, false) => BoundaryKind::IntraMantle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::CrustMantle => "crust-mantle",
            BoundaryKind::MantleCrust => "mantle-crust",
            BoundaryKind::IntraCrust => "intra-crust",
            BoundaryKind::IntraMantle => "intra-mantle",
        }
    }
}

/// One detected density discontinuity. `depth_index` is the lower layer of
/// the jump; `density_gradient` keeps its sign (positive = denser below).
#[derive(Debug, Clone)]
pub struct BoundaryRecord {
    pub depth_index: usize,
    pub density_gradient: f64,
    pub boundary_kind: BoundaryKind,
}

impl Column {
    /// Scan adjacent-layer density differences and report every jump whose
    /// magnitude exceeds `threshold` (kg/m³).
    pub fn find_steep_density_gradients(&self, threshold: f64) -> Vec<BoundaryRecord> {
        let mut records = Vec::new();
        for i in 1..self.layer_count() {
            let gradient = self.actual_density_kg_m3[i] - self.actual_density_kg_m3[i - 1];
            if gradient.abs() > threshold {
                records.push(BoundaryRecord {
                    depth_index: i,
                    density_gradient: gradient,
                    boundary_kind: BoundaryKind::classify(self.material[i - 1], self.material[i]),
                });
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Column, ColumnConfig};
    use more_asserts::assert_gt;

    #[test]
    fn test_crust_mantle_jump_is_detected() {
        let column = Column::new(ColumnConfig {
            advection_enabled: false,
            ..ColumnConfig::default()
        });

        let records = column.find_steep_density_gradients(50.0);
        let crust_mantle: Vec<_> = records
            .iter()
            .filter(|r| r.boundary_kind == BoundaryKind::CrustMantle)
            .collect();

        assert_eq!(crust_mantle.len(), 1);
        assert_eq!(crust_mantle[0].depth_index, 40);
        assert_gt!(crust_mantle[0].density_gradient, 50.0);
    }

    #[test]
    fn test_threshold_filters_small_gradients() {
        let column = Column::new(ColumnConfig::default());
        // nothing in a fresh geotherm jumps by 10000 kg/m³
        assert!(column.find_steep_density_gradients(10_000.0).is_empty());
    }

    #[test]
    fn test_classification_covers_all_transitions() {
        use crate::material::Material::*;
        assert_eq!(BoundaryKind::classify(Granite, Peridotite), BoundaryKind::CrustMantle);
        assert_eq!(BoundaryKind::classify(Peridotite, Basalt), BoundaryKind::MantleCrust);
        assert_eq!(BoundaryKind::classify(Granite, Basalt), BoundaryKind::IntraCrust);
        assert_eq!(BoundaryKind::classify(Peridotite, Peridotite), BoundaryKind::IntraMantle);
        assert_eq!(BoundaryKind::CrustMantle.as_str(), "crust-mantle");
    }
}
