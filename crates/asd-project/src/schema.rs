//! Study file schema definitions.

use asd_model::{MonomerInfo, PolymerType, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Study {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub apis: Vec<ApiDef>,
    #[serde(default)]
    pub polymers: Vec<PolymerDef>,
    #[serde(default)]
    pub systems: Vec<SystemDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiDef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smiles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molecular_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tm_celsius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hf_j_per_mol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tg_celsius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solubility_mg_per_ml: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_bond_donors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_bond_acceptors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_g_cm3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcs_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_dose_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub calculated_descriptors: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PolymerDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub polymer_type: PolymerType,
    #[serde(default)]
    pub monomers: Vec<MonomerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tg_celsius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_g_cm3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mn_g_per_mol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mw_g_per_mol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hansen: Option<HansenDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_cp_j_per_g_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hygroscopicity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree_of_hydrolysis_mol_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree_of_substitution: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub calculated_properties: BTreeMap<String, PropertyValue>,
}

/// Hansen solubility parameters [MPa^0.5]. Any component may be unknown.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HansenDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_h: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemDef {
    pub id: String,
    /// `ApiDef::id` of the dispersed drug.
    pub api: String,
    /// `PolymerDef::id` of the carrier.
    pub polymer: String,
    pub drug_load_wt_percent: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risk_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ml_predictions: BTreeMap<String, PropertyValue>,
}
