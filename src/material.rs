// src/material.rs - Material system with thermal and physical properties

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Granite,
    Basalt,
    Peridotite,
}

impl Material {
    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Granite => "granite",
            Material::Basalt => "basalt",
            Material::Peridotite => "peridotite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "granite" => Some(Material::Granite),
            "basalt" => Some(Material::Basalt),
            "peridotite" => Some(Material::Peridotite),
            _ => None,
        }
    }

    /// Crustal materials sit above the mantle transition in the default
    /// column layout; peridotite is mantle rock.
    pub fn is_crustal(&self) -> bool {
        !matches!(self, Material::Peridotite)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialProfile {
    pub kind: Material,
    pub thermal_conductivity_w_m_k: f64,
    pub density_kg_m3: f64,
    pub specific_heat_capacity_j_per_kg_k: f64,
    pub radiogenic_heat_w_m3: f64,
    pub thermal_expansion_per_k: f64,
    pub base_viscosity_pa_s: f64,
}

impl MaterialProfile {
    /// Thermal diffusivity k / (rho * cp), m²/s.
    pub fn diffusivity_m2_s(&self) -> f64 {
        self.thermal_conductivity_w_m_k
            / (self.density_kg_m3 * self.specific_heat_capacity_j_per_kg_k)
    }

    /// Effective viscosity at a given temperature, Pa·s. Viscosity drops
    /// exponentially as the rock heats; always strictly positive.
    pub fn effective_viscosity_pa_s(&self, temp_c: f64) -> f64 {
        self.base_viscosity_pa_s * (-temp_c / crate::constants::VISCOSITY_TEMP_SCALE_C).exp()
    }
}

pub static MATERIAL_PROFILES: Lazy<HashMap<Material, MaterialProfile>> = Lazy::new(|| {
    use Material::*;
    let mut m = HashMap::new();

    m.insert(Granite, MaterialProfile {
        kind: Granite,
        thermal_conductivity_w_m_k: 3.0,
        density_kg_m3: 2700.0,
        specific_heat_capacity_j_per_kg_k: 790.0,
        radiogenic_heat_w_m3: 3.0e-6,
        thermal_expansion_per_k: 2.4e-5,
        base_viscosity_pa_s: 1.0e22,
    });

    m.insert(Basalt, MaterialProfile {
        kind: Basalt,
        thermal_conductivity_w_m_k: 2.1,
        density_kg_m3: 2900.0,
        specific_heat_capacity_j_per_kg_k: 840.0,
        radiogenic_heat_w_m3: 0.5e-6,
        thermal_expansion_per_k: 2.7e-5,
        base_viscosity_pa_s: 1.0e21,
    });

    m.insert(Peridotite, MaterialProfile {
        kind: Peridotite,
        thermal_conductivity_w_m_k: 4.0,
        density_kg_m3: 3300.0,
        specific_heat_capacity_j_per_kg_k: 1000.0,
        radiogenic_heat_w_m3: 0.02e-6,
        thermal_expansion_per_k: 3.0e-5,
        base_viscosity_pa_s: 1.0e20,
    });

    m
});

pub fn get_profile(kind: Material) -> &'static MaterialProfile {
    MATERIAL_PROFILES
        .get(&kind)
        .expect("every Material variant has a profile")
}

/// Per-simulation material constants. Defaults to the built-in profiles;
/// individual entries can be replaced from JSON before construction.
#[derive(Debug, Clone)]
pub struct MaterialTable {
    profiles: HashMap<Material, MaterialProfile>,
}

impl MaterialTable {
    pub fn from_profiles(profiles: HashMap<Material, MaterialProfile>) -> Self {
        Self { profiles }
    }

    /// Load overrides from a JSON table; materials absent from the document
    /// keep their built-in profiles.
    pub fn from_json_str(json_str: &str) -> Result<Self, String> {
        let overrides = profiles_from_json_str(json_str)?;
        let mut table = Self::default();
        table.profiles.extend(overrides);
        Ok(table)
    }

    pub fn get(&self, kind: Material) -> &MaterialProfile {
        self.profiles
            .get(&kind)
            .expect("every Material variant has a profile")
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            profiles: MATERIAL_PROFILES.clone(),
        }
    }
}

/// Parse a full per-material profile table from a JSON document, e.g. a
/// project-local materials.json. Missing or non-positive entries are
/// rejected so downstream divisions stay safe.
pub fn profiles_from_json_str(json_str: &str) -> Result<HashMap<Material, MaterialProfile>, String> {
    let table: HashMap<String, MaterialProfile> = serde_json::from_str(json_str)
        .map_err(|e| format!("Failed to parse material profiles: {}", e))?;

    let mut out = HashMap::new();
    for (name, profile) in table {
        let kind = Material::from_str(&name)
            .ok_or_else(|| format!("Unknown material name: {}", name))?;
        if profile.thermal_conductivity_w_m_k <= 0.0
            || profile.density_kg_m3 <= 0.0
            || profile.specific_heat_capacity_j_per_kg_k <= 0.0
            || profile.base_viscosity_pa_s <= 0.0
        {
            return Err(format!("Non-positive physical constant for {}", name));
        }
        out.insert(kind, profile);
    }
    Ok(out)
}
