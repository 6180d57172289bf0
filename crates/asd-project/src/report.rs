//! Serializable snapshots of derived quantities.

use crate::build::StudyModel;
use asd_model::{Api, AsdSystem, Polymer, TgOrigin};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiReport {
    pub name: String,
    pub tm_celsius: Option<f64>,
    pub tm_kelvin: Option<f64>,
    pub tg_celsius: Option<f64>,
    pub tg_kelvin: Option<f64>,
    pub density_g_cm3: Option<f64>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PolymerReport {
    pub name: String,
    pub polymer_type: String,
    pub monomer_count: usize,
    pub mole_fraction_sum: f64,
    pub tg_celsius: Option<f64>,
    pub tg_kelvin: Option<f64>,
    pub tg_origin: Option<TgOrigin>,
    pub pdi: Option<f64>,
    pub density_g_cm3: Option<f64>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SystemReport {
    pub id: String,
    pub drug_load_wt_percent: f64,
    pub drug_load_frac: f64,
    pub polymer_load_frac: f64,
    pub volume_fraction_api: Option<f64>,
    pub tg_gap_k: Option<f64>,
    pub risk_flags: Vec<String>,
    pub api: ApiReport,
    pub polymer: PolymerReport,
    pub summary: String,
}

pub fn api_report(api: &Api) -> ApiReport {
    ApiReport {
        name: api.name().to_string(),
        tm_celsius: api.tm_celsius(),
        tm_kelvin: api.tm_kelvin(),
        tg_celsius: api.tg_celsius(),
        tg_kelvin: api.tg_kelvin(),
        density_g_cm3: api.density_g_cm3(),
        summary: api.to_string(),
    }
}

pub fn polymer_report(polymer: &Polymer) -> PolymerReport {
    PolymerReport {
        name: polymer.name().to_string(),
        polymer_type: polymer.polymer_type().to_string(),
        monomer_count: polymer.monomers().len(),
        mole_fraction_sum: polymer.mole_fraction_sum(),
        tg_celsius: polymer.tg_celsius(),
        tg_kelvin: polymer.tg_kelvin(),
        tg_origin: polymer.tg_origin(),
        pdi: polymer.pdi(),
        density_g_cm3: polymer.density_g_cm3(),
        summary: polymer.to_string(),
    }
}

pub fn system_report(id: &str, system: &AsdSystem) -> SystemReport {
    SystemReport {
        id: id.to_string(),
        drug_load_wt_percent: system.drug_load_wt_percent(),
        drug_load_frac: system.drug_load_frac(),
        polymer_load_frac: system.polymer_load_frac(),
        volume_fraction_api: system.volume_fraction_api(),
        tg_gap_k: system.tg_gap_k(),
        risk_flags: system.stability_risk_flags().to_vec(),
        api: api_report(system.api()),
        polymer: polymer_report(system.polymer()),
        summary: system.to_string(),
    }
}

/// Reports for every system of the study, in file order.
///
/// Systems are evaluated in parallel; derived reads never mutate shared state.
pub fn study_reports(model: &StudyModel) -> Vec<SystemReport> {
    model
        .systems
        .par_iter()
        .map(|(id, system)| system_report(id, system))
        .collect()
}
