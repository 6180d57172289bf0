//! Active pharmaceutical ingredient records.

use crate::property::{PropertySource, PropertyTable, PropertyValue};
use asd_core::{Density, Real, Temperature, g_per_cm3, k, kelvin_from_celsius};
use std::collections::BTreeMap;
use std::fmt;

/// A drug substance, frozen after `ApiBuilder::build`.
///
/// Kelvin temperatures are derived from the stored Celsius values on every
/// access, so they can never disagree with them.
#[derive(Debug, Clone, PartialEq)]
pub struct Api {
    name: String,
    smiles: Option<String>,
    molecular_weight: Option<Real>,
    tm_celsius: Option<Real>,
    hf_j_per_mol: Option<Real>,
    tg_celsius: Option<Real>,
    solubility_mg_per_ml: Option<Real>,
    log_p: Option<Real>,
    h_bond_donors: Option<u32>,
    h_bond_acceptors: Option<u32>,
    psa: Option<Real>,
    density_g_cm3: Option<Real>,
    bcs_class: Option<String>,
    highest_dose_mg: Option<Real>,
    calculated_descriptors: PropertyTable,
}

impl Api {
    pub fn builder(name: impl Into<String>) -> ApiBuilder {
        ApiBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn smiles(&self) -> Option<&str> {
        self.smiles.as_deref()
    }

    /// Molecular weight [g/mol]
    pub fn molecular_weight(&self) -> Option<Real> {
        self.molecular_weight
    }

    /// Melting point [°C]
    pub fn tm_celsius(&self) -> Option<Real> {
        self.tm_celsius
    }

    pub fn tm_kelvin(&self) -> Option<Real> {
        kelvin_from_celsius(self.tm_celsius)
    }

    pub fn tm(&self) -> Option<Temperature> {
        self.tm_kelvin().map(k)
    }

    /// Enthalpy of fusion [J/mol]
    pub fn hf_j_per_mol(&self) -> Option<Real> {
        self.hf_j_per_mol
    }

    /// Glass transition of the amorphous API [°C]
    pub fn tg_celsius(&self) -> Option<Real> {
        self.tg_celsius
    }

    pub fn tg_kelvin(&self) -> Option<Real> {
        kelvin_from_celsius(self.tg_celsius)
    }

    pub fn tg(&self) -> Option<Temperature> {
        self.tg_kelvin().map(k)
    }

    /// Crystalline solubility [mg/mL]
    pub fn solubility_mg_per_ml(&self) -> Option<Real> {
        self.solubility_mg_per_ml
    }

    pub fn log_p(&self) -> Option<Real> {
        self.log_p
    }

    pub fn h_bond_donors(&self) -> Option<u32> {
        self.h_bond_donors
    }

    pub fn h_bond_acceptors(&self) -> Option<u32> {
        self.h_bond_acceptors
    }

    /// Polar surface area [Å²]
    pub fn psa(&self) -> Option<Real> {
        self.psa
    }

    pub fn density_g_cm3(&self) -> Option<Real> {
        self.density_g_cm3
    }

    pub fn density(&self) -> Option<Density> {
        self.density_g_cm3.map(g_per_cm3)
    }

    pub fn bcs_class(&self) -> Option<&str> {
        self.bcs_class.as_deref()
    }

    pub fn highest_dose_mg(&self) -> Option<Real> {
        self.highest_dose_mg
    }

    /// Merge calculated descriptors into the side table.
    pub fn update_calculated_descriptors<I, K, V>(&self, descriptors: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.update_calculated_properties(descriptors);
    }

    pub fn calculated_descriptors(&self) -> BTreeMap<String, PropertyValue> {
        self.calculated_descriptors.snapshot()
    }
}

impl PropertySource for Api {
    fn explicit_property(&self, name: &str) -> Option<PropertyValue> {
        let real = |v: Option<Real>| v.map(PropertyValue::Real);
        let count = |v: Option<u32>| v.map(PropertyValue::from);
        let text = |v: &Option<String>| v.clone().map(PropertyValue::Text);
        match name {
            "name" => Some(PropertyValue::Text(self.name.clone())),
            "smiles" => text(&self.smiles),
            "molecular_weight" => real(self.molecular_weight),
            "tm_celsius" => real(self.tm_celsius),
            "tm_kelvin" => real(self.tm_kelvin()),
            "hf_j_per_mol" => real(self.hf_j_per_mol),
            "tg_celsius" => real(self.tg_celsius),
            "tg_kelvin" => real(self.tg_kelvin()),
            "solubility_mg_per_ml" => real(self.solubility_mg_per_ml),
            "log_p" => real(self.log_p),
            "h_bond_donors" => count(self.h_bond_donors),
            "h_bond_acceptors" => count(self.h_bond_acceptors),
            "psa" => real(self.psa),
            "density_g_cm3" => real(self.density_g_cm3),
            "bcs_class" => text(&self.bcs_class),
            "highest_dose_mg" => real(self.highest_dose_mg),
            _ => None,
        }
    }

    fn calculated(&self) -> &PropertyTable {
        &self.calculated_descriptors
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.molecular_weight, self.tm_celsius, self.tg_celsius) {
            (Some(mw), Some(tm), Some(tg)) => write!(
                f,
                "API(name='{}', MW={:.2} g/mol, Tm={}°C, Tg_API={}°C)",
                self.name, mw, tm, tg
            ),
            _ => write!(f, "API(name='{}')", self.name),
        }
    }
}

/// Builder for `Api`. Every constant except the name is optional.
#[derive(Debug, Clone, Default)]
pub struct ApiBuilder {
    name: String,
    smiles: Option<String>,
    molecular_weight: Option<Real>,
    tm_celsius: Option<Real>,
    hf_j_per_mol: Option<Real>,
    tg_celsius: Option<Real>,
    solubility_mg_per_ml: Option<Real>,
    log_p: Option<Real>,
    h_bond_donors: Option<u32>,
    h_bond_acceptors: Option<u32>,
    psa: Option<Real>,
    density_g_cm3: Option<Real>,
    bcs_class: Option<String>,
    highest_dose_mg: Option<Real>,
}

impl ApiBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn smiles(mut self, v: impl Into<String>) -> Self {
        self.smiles = Some(v.into());
        self
    }

    pub fn molecular_weight(mut self, v: Real) -> Self {
        self.molecular_weight = Some(v);
        self
    }

    pub fn tm_celsius(mut self, v: Real) -> Self {
        self.tm_celsius = Some(v);
        self
    }

    pub fn hf_j_per_mol(mut self, v: Real) -> Self {
        self.hf_j_per_mol = Some(v);
        self
    }

    pub fn tg_celsius(mut self, v: Real) -> Self {
        self.tg_celsius = Some(v);
        self
    }

    pub fn solubility_mg_per_ml(mut self, v: Real) -> Self {
        self.solubility_mg_per_ml = Some(v);
        self
    }

    pub fn log_p(mut self, v: Real) -> Self {
        self.log_p = Some(v);
        self
    }

    pub fn h_bond_donors(mut self, v: u32) -> Self {
        self.h_bond_donors = Some(v);
        self
    }

    pub fn h_bond_acceptors(mut self, v: u32) -> Self {
        self.h_bond_acceptors = Some(v);
        self
    }

    pub fn psa(mut self, v: Real) -> Self {
        self.psa = Some(v);
        self
    }

    pub fn density_g_cm3(mut self, v: Real) -> Self {
        self.density_g_cm3 = Some(v);
        self
    }

    pub fn bcs_class(mut self, v: impl Into<String>) -> Self {
        self.bcs_class = Some(v.into());
        self
    }

    pub fn highest_dose_mg(mut self, v: Real) -> Self {
        self.highest_dose_mg = Some(v);
        self
    }

    pub fn build(self) -> Api {
        Api {
            name: self.name,
            smiles: self.smiles,
            molecular_weight: self.molecular_weight,
            tm_celsius: self.tm_celsius,
            hf_j_per_mol: self.hf_j_per_mol,
            tg_celsius: self.tg_celsius,
            solubility_mg_per_ml: self.solubility_mg_per_ml,
            log_p: self.log_p,
            h_bond_donors: self.h_bond_donors,
            h_bond_acceptors: self.h_bond_acceptors,
            psa: self.psa,
            density_g_cm3: self.density_g_cm3,
            bcs_class: self.bcs_class,
            highest_dose_mg: self.highest_dose_mg,
            calculated_descriptors: PropertyTable::new(),
        }
    }
}
