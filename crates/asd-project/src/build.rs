//! Building model entities from a validated study.

use crate::schema::{ApiDef, PolymerDef, Study};
use crate::validate::validate_study;
use crate::{ProjectError, ProjectResult};
use asd_model::{Api, AsdSystem, Polymer};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Model entities of one study.
///
/// Every system referencing the same API or polymer id holds the same `Arc`.
#[derive(Debug, Clone)]
pub struct StudyModel {
    pub name: String,
    pub apis: BTreeMap<String, Arc<Api>>,
    pub polymers: BTreeMap<String, Arc<Polymer>>,
    /// Systems in file order, keyed by their id.
    pub systems: Vec<(String, AsdSystem)>,
}

impl StudyModel {
    pub fn system(&self, id: &str) -> Option<&AsdSystem> {
        self.systems
            .iter()
            .find(|(system_id, _)| system_id == id)
            .map(|(_, system)| system)
    }
}

pub fn build_api(def: &ApiDef) -> Api {
    let mut b = Api::builder(def.name.clone());
    if let Some(v) = &def.smiles {
        b = b.smiles(v.clone());
    }
    if let Some(v) = def.molecular_weight {
        b = b.molecular_weight(v);
    }
    if let Some(v) = def.tm_celsius {
        b = b.tm_celsius(v);
    }
    if let Some(v) = def.hf_j_per_mol {
        b = b.hf_j_per_mol(v);
    }
    if let Some(v) = def.tg_celsius {
        b = b.tg_celsius(v);
    }
    if let Some(v) = def.solubility_mg_per_ml {
        b = b.solubility_mg_per_ml(v);
    }
    if let Some(v) = def.log_p {
        b = b.log_p(v);
    }
    if let Some(v) = def.h_bond_donors {
        b = b.h_bond_donors(v);
    }
    if let Some(v) = def.h_bond_acceptors {
        b = b.h_bond_acceptors(v);
    }
    if let Some(v) = def.psa {
        b = b.psa(v);
    }
    if let Some(v) = def.density_g_cm3 {
        b = b.density_g_cm3(v);
    }
    if let Some(v) = &def.bcs_class {
        b = b.bcs_class(v.clone());
    }
    if let Some(v) = def.highest_dose_mg {
        b = b.highest_dose_mg(v);
    }

    let api = b.build();
    if !def.calculated_descriptors.is_empty() {
        api.update_calculated_descriptors(def.calculated_descriptors.clone());
    }
    api
}

pub fn build_polymer(def: &PolymerDef) -> ProjectResult<Polymer> {
    let mut b = Polymer::builder(def.name.clone())
        .polymer_type(def.polymer_type.clone())
        .monomers(def.monomers.iter().cloned());
    if let Some(v) = def.tg_celsius {
        b = b.tg_celsius(v);
    }
    if let Some(v) = def.density_g_cm3 {
        b = b.density_g_cm3(v);
    }
    if let Some(v) = def.mn_g_per_mol {
        b = b.mn_g_per_mol(v);
    }
    if let Some(v) = def.mw_g_per_mol {
        b = b.mw_g_per_mol(v);
    }
    if let Some(hansen) = &def.hansen {
        if let Some(v) = hansen.delta_d {
            b = b.hsp_delta_d(v);
        }
        if let Some(v) = hansen.delta_p {
            b = b.hsp_delta_p(v);
        }
        if let Some(v) = hansen.delta_h {
            b = b.hsp_delta_h(v);
        }
    }
    if let Some(v) = def.delta_cp_j_per_g_k {
        b = b.delta_cp_j_per_g_k(v);
    }
    if let Some(v) = &def.hygroscopicity {
        b = b.hygroscopicity(v.clone());
    }
    if let Some(v) = def.degree_of_hydrolysis_mol_percent {
        b = b.degree_of_hydrolysis_mol_percent(v);
    }
    if let Some(groups) = &def.degree_of_substitution {
        b = b.degree_of_substitution(groups.clone());
    }

    let polymer = b.build().map_err(|source| ProjectError::Model {
        context: format!("polymer '{}'", def.id),
        source,
    })?;
    if !def.calculated_properties.is_empty() {
        polymer.update_calculated_properties(def.calculated_properties.clone());
    }
    Ok(polymer)
}

/// Validate `study` and build all of its entities.
pub fn build_study(study: &Study) -> ProjectResult<StudyModel> {
    validate_study(study)?;

    let apis: BTreeMap<String, Arc<Api>> = study
        .apis
        .iter()
        .map(|def| (def.id.clone(), Arc::new(build_api(def))))
        .collect();

    let mut polymers = BTreeMap::new();
    for def in &study.polymers {
        let polymer = build_polymer(def)?;
        debug!(id = %def.id, tg_k = ?polymer.tg_kelvin(), "built polymer");
        polymers.insert(def.id.clone(), Arc::new(polymer));
    }

    let mut systems = Vec::with_capacity(study.systems.len());
    for def in &study.systems {
        // References were checked by validate_study.
        let (Some(api), Some(polymer)) = (apis.get(&def.api), polymers.get(&def.polymer)) else {
            continue;
        };
        let mut system = AsdSystem::new(api.clone(), polymer.clone(), def.drug_load_wt_percent)
            .map_err(|source| ProjectError::Model {
                context: format!("system '{}'", def.id),
                source,
            })?;
        for flag in &def.risk_flags {
            system.add_risk_flag(flag.clone());
        }
        system.ml_predictions.extend(def.ml_predictions.clone());
        systems.push((def.id.clone(), system));
    }

    info!(
        study = %study.name,
        apis = apis.len(),
        polymers = polymers.len(),
        systems = systems.len(),
        "study built"
    );

    Ok(StudyModel {
        name: study.name.clone(),
        apis,
        polymers,
        systems,
    })
}
