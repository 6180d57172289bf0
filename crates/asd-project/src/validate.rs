//! Study validation logic.

use crate::schema::{ApiDef, PolymerDef, Study, SystemDef};
use asd_core::{ensure_finite, in_open_interval};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_study(study: &Study) -> Result<(), ValidationError> {
    if study.version == 0 || study.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: study.version,
        });
    }

    let mut api_ids = HashSet::new();
    for api in &study.apis {
        if !api_ids.insert(api.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: api.id.clone(),
                context: "apis".to_string(),
            });
        }
        validate_api(api)?;
    }

    let mut polymer_ids = HashSet::new();
    for polymer in &study.polymers {
        if !polymer_ids.insert(polymer.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: polymer.id.clone(),
                context: "polymers".to_string(),
            });
        }
        validate_polymer(polymer)?;
    }

    let mut system_ids = HashSet::new();
    for system in &study.systems {
        if !system_ids.insert(system.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: system.id.clone(),
                context: "systems".to_string(),
            });
        }
        if !api_ids.contains(system.api.as_str()) {
            return Err(ValidationError::MissingReference {
                id: system.api.clone(),
                context: format!("system '{}' api", system.id),
            });
        }
        if !polymer_ids.contains(system.polymer.as_str()) {
            return Err(ValidationError::MissingReference {
                id: system.polymer.clone(),
                context: format!("system '{}' polymer", system.id),
            });
        }
        validate_system(system)?;
    }

    Ok(())
}

fn validate_api(api: &ApiDef) -> Result<(), ValidationError> {
    let fields = [
        ("molecular_weight", api.molecular_weight),
        ("tm_celsius", api.tm_celsius),
        ("hf_j_per_mol", api.hf_j_per_mol),
        ("tg_celsius", api.tg_celsius),
        ("solubility_mg_per_ml", api.solubility_mg_per_ml),
        ("log_p", api.log_p),
        ("psa", api.psa),
        ("density_g_cm3", api.density_g_cm3),
        ("highest_dose_mg", api.highest_dose_mg),
    ];
    check_finite(&api.id, &fields)
}

fn validate_polymer(polymer: &PolymerDef) -> Result<(), ValidationError> {
    let hansen = polymer.hansen.clone().unwrap_or_default();
    let fields = [
        ("tg_celsius", polymer.tg_celsius),
        ("density_g_cm3", polymer.density_g_cm3),
        ("mn_g_per_mol", polymer.mn_g_per_mol),
        ("mw_g_per_mol", polymer.mw_g_per_mol),
        ("hansen.delta_d", hansen.delta_d),
        ("hansen.delta_p", hansen.delta_p),
        ("hansen.delta_h", hansen.delta_h),
        ("delta_cp_j_per_g_k", polymer.delta_cp_j_per_g_k),
        (
            "degree_of_hydrolysis_mol_percent",
            polymer.degree_of_hydrolysis_mol_percent,
        ),
    ];
    check_finite(&polymer.id, &fields)?;

    for monomer in &polymer.monomers {
        let fields = [
            ("mole_fraction", Some(monomer.mole_fraction)),
            ("molecular_weight", monomer.molecular_weight),
            ("tg_homopolymer_celsius", monomer.tg_homopolymer_celsius),
        ];
        check_finite(&format!("{}.{}", polymer.id, monomer.name), &fields)?;

        if monomer.mole_fraction < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("{}.{}.mole_fraction", polymer.id, monomer.name),
                value: monomer.mole_fraction.to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_system(system: &SystemDef) -> Result<(), ValidationError> {
    if !in_open_interval(system.drug_load_wt_percent, 0.0, 100.0) {
        return Err(ValidationError::InvalidValue {
            field: format!("{}.drug_load_wt_percent", system.id),
            value: system.drug_load_wt_percent.to_string(),
            reason: "must be between 0 and 100 wt% (exclusive)".to_string(),
        });
    }
    Ok(())
}

fn check_finite(
    owner: &str,
    fields: &[(&'static str, Option<f64>)],
) -> Result<(), ValidationError> {
    for (name, value) in fields {
        if let Some(v) = value {
            ensure_finite(*v, *name).map_err(|e| ValidationError::InvalidValue {
                field: format!("{owner}.{name}"),
                value: v.to_string(),
                reason: e.to_string(),
            })?;
        }
    }
    Ok(())
}
