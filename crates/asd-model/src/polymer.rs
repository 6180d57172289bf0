//! Polymer records.

use crate::error::{ModelError, ModelResult};
use crate::fox;
use crate::monomer::MonomerInfo;
use crate::property::{PropertySource, PropertyTable, PropertyValue};
use asd_core::{
    Density, Real, Temperature, g_per_cm3, in_open_interval, k, kelvin_from_celsius,
    kelvin_to_celsius,
};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Allowed deviation of a copolymer's mole-fraction sum from 1.
pub const MOLE_FRACTION_TOLERANCE: Real = 1e-3;

/// Chain architecture of a polymer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum PolymerType {
    #[default]
    Homopolymer,
    RandomCopolymer,
    BlockCopolymer,
    /// Any other label, kept verbatim. Treated as a copolymer.
    Other(String),
}

impl PolymerType {
    pub fn label(&self) -> &str {
        match self {
            PolymerType::Homopolymer => "Homopolymer",
            PolymerType::RandomCopolymer => "Copolymer-Random",
            PolymerType::BlockCopolymer => "Copolymer-Block",
            PolymerType::Other(label) => label,
        }
    }

    pub fn is_homopolymer(&self) -> bool {
        matches!(self, PolymerType::Homopolymer)
    }
}

/// Labels are matched after trimming surrounding whitespace, so `" Homopolymer "`
/// parses as `Homopolymer`. Unrecognised labels are kept trimmed in `Other`.
impl From<&str> for PolymerType {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Homopolymer" => PolymerType::Homopolymer,
            "Copolymer-Random" => PolymerType::RandomCopolymer,
            "Copolymer-Block" => PolymerType::BlockCopolymer,
            other => PolymerType::Other(other.to_string()),
        }
    }
}

impl From<String> for PolymerType {
    fn from(s: String) -> Self {
        PolymerType::from(s.as_str())
    }
}

impl From<PolymerType> for String {
    fn from(t: PolymerType) -> Self {
        t.label().to_string()
    }
}

impl std::str::FromStr for PolymerType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PolymerType::from(s))
    }
}

impl fmt::Display for PolymerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a polymer's Tg came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TgOrigin {
    /// Supplied with the record.
    Supplied,
    /// Estimated from monomer data with the Fox equation.
    FoxEstimate,
}

/// A polymer carrier, frozen after `PolymerBuilder::build`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polymer {
    name: String,
    polymer_type: PolymerType,
    monomers: Vec<MonomerInfo>,
    tg_celsius: Option<Real>,
    tg_kelvin: Option<Real>,
    tg_origin: Option<TgOrigin>,
    density_g_cm3: Option<Real>,
    mn_g_per_mol: Option<Real>,
    mw_g_per_mol: Option<Real>,
    hsp_delta_d: Option<Real>,
    hsp_delta_p: Option<Real>,
    hsp_delta_h: Option<Real>,
    delta_cp_j_per_g_k: Option<Real>,
    hygroscopicity: Option<String>,
    degree_of_hydrolysis_mol_percent: Option<Real>,
    degree_of_substitution: Option<BTreeMap<String, Real>>,
    calculated_properties: PropertyTable,
}

impl Polymer {
    pub fn builder(name: impl Into<String>) -> PolymerBuilder {
        PolymerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polymer_type(&self) -> &PolymerType {
        &self.polymer_type
    }

    pub fn monomers(&self) -> &[MonomerInfo] {
        &self.monomers
    }

    /// Tg [°C], supplied or back-filled from the Fox estimate.
    pub fn tg_celsius(&self) -> Option<Real> {
        self.tg_celsius
    }

    pub fn tg_kelvin(&self) -> Option<Real> {
        self.tg_kelvin
    }

    pub fn tg(&self) -> Option<Temperature> {
        self.tg_kelvin.map(k)
    }

    pub fn tg_origin(&self) -> Option<TgOrigin> {
        self.tg_origin
    }

    pub fn density_g_cm3(&self) -> Option<Real> {
        self.density_g_cm3
    }

    pub fn density(&self) -> Option<Density> {
        self.density_g_cm3.map(g_per_cm3)
    }

    pub fn mn_g_per_mol(&self) -> Option<Real> {
        self.mn_g_per_mol
    }

    pub fn mw_g_per_mol(&self) -> Option<Real> {
        self.mw_g_per_mol
    }

    /// Hansen parameters (δd, δp, δh) [MPa^0.5].
    pub fn hansen_parameters(&self) -> (Option<Real>, Option<Real>, Option<Real>) {
        (self.hsp_delta_d, self.hsp_delta_p, self.hsp_delta_h)
    }

    pub fn delta_cp_j_per_g_k(&self) -> Option<Real> {
        self.delta_cp_j_per_g_k
    }

    pub fn hygroscopicity(&self) -> Option<&str> {
        self.hygroscopicity.as_deref()
    }

    pub fn degree_of_hydrolysis_mol_percent(&self) -> Option<Real> {
        self.degree_of_hydrolysis_mol_percent
    }

    pub fn degree_of_substitution(&self) -> Option<&BTreeMap<String, Real>> {
        self.degree_of_substitution.as_ref()
    }

    /// Polydispersity index Mw/Mn, when both are positive.
    pub fn pdi(&self) -> Option<Real> {
        match (self.mw_g_per_mol, self.mn_g_per_mol) {
            (Some(mw), Some(mn)) if mw > 0.0 && mn > 0.0 => Some(mw / mn),
            _ => None,
        }
    }

    /// Copolymer Tg [K].
    ///
    /// A known Tg is returned as is. Otherwise the Fox estimate is attempted for
    /// copolymers with at least two units.
    pub fn estimate_copolymer_tg_k(&self) -> Option<Real> {
        self.tg_kelvin
            .or_else(|| fox::copolymer_tg_k(&self.polymer_type, &self.monomers))
    }

    /// Sum of monomer mole fractions.
    pub fn mole_fraction_sum(&self) -> Real {
        mole_fraction_sum(&self.monomers)
    }

    /// Merge calculated properties into the side table.
    pub fn update_calculated_properties<I, K, V>(&self, properties: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        PropertySource::update_calculated_properties(self, properties);
    }

    pub fn calculated_properties(&self) -> BTreeMap<String, PropertyValue> {
        self.calculated_properties.snapshot()
    }
}

impl PropertySource for Polymer {
    fn explicit_property(&self, name: &str) -> Option<PropertyValue> {
        let real = |v: Option<Real>| v.map(PropertyValue::Real);
        match name {
            "name" => Some(PropertyValue::Text(self.name.clone())),
            "polymer_type" => Some(PropertyValue::Text(self.polymer_type.label().to_string())),
            "tg_celsius" => real(self.tg_celsius),
            "tg_kelvin" => real(self.tg_kelvin),
            "density_g_cm3" => real(self.density_g_cm3),
            "mn_g_per_mol" => real(self.mn_g_per_mol),
            "mw_g_per_mol" => real(self.mw_g_per_mol),
            "pdi" => real(self.pdi()),
            "hsp_delta_d" => real(self.hsp_delta_d),
            "hsp_delta_p" => real(self.hsp_delta_p),
            "hsp_delta_h" => real(self.hsp_delta_h),
            "delta_cp_j_per_g_k" => real(self.delta_cp_j_per_g_k),
            "hygroscopicity" => self.hygroscopicity.clone().map(PropertyValue::Text),
            "degree_of_hydrolysis_mol_percent" => real(self.degree_of_hydrolysis_mol_percent),
            "degree_of_substitution" => self
                .degree_of_substitution
                .clone()
                .map(PropertyValue::Table),
            _ => None,
        }
    }

    fn calculated(&self) -> &PropertyTable {
        &self.calculated_properties
    }
}

impl fmt::Display for Polymer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tg_celsius, self.mn_g_per_mol) {
            (Some(tg), Some(mn)) => write!(
                f,
                "Polymer(name='{}', Type='{}', Tg={}°C, Mn={} g/mol)",
                self.name, self.polymer_type, tg, mn
            ),
            _ => write!(f, "Polymer(name='{}', Type='{}')", self.name, self.polymer_type),
        }
    }
}

fn mole_fraction_sum(monomers: &[MonomerInfo]) -> Real {
    monomers.iter().map(|m| m.mole_fraction).sum()
}

/// Builder for `Polymer`.
///
/// `build()` checks the monomer composition and settles the Tg, then freezes
/// the record.
#[derive(Debug, Clone, Default)]
pub struct PolymerBuilder {
    name: String,
    polymer_type: PolymerType,
    monomers: Vec<MonomerInfo>,
    tg_celsius: Option<Real>,
    density_g_cm3: Option<Real>,
    mn_g_per_mol: Option<Real>,
    mw_g_per_mol: Option<Real>,
    hsp_delta_d: Option<Real>,
    hsp_delta_p: Option<Real>,
    hsp_delta_h: Option<Real>,
    delta_cp_j_per_g_k: Option<Real>,
    hygroscopicity: Option<String>,
    degree_of_hydrolysis_mol_percent: Option<Real>,
    degree_of_substitution: Option<BTreeMap<String, Real>>,
}

impl PolymerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn polymer_type(mut self, polymer_type: impl Into<PolymerType>) -> Self {
        self.polymer_type = polymer_type.into();
        self
    }

    pub fn monomer(mut self, monomer: MonomerInfo) -> Self {
        self.monomers.push(monomer);
        self
    }

    pub fn monomers(mut self, monomers: impl IntoIterator<Item = MonomerInfo>) -> Self {
        self.monomers.extend(monomers);
        self
    }

    pub fn tg_celsius(mut self, v: Real) -> Self {
        self.tg_celsius = Some(v);
        self
    }

    pub fn density_g_cm3(mut self, v: Real) -> Self {
        self.density_g_cm3 = Some(v);
        self
    }

    pub fn mn_g_per_mol(mut self, v: Real) -> Self {
        self.mn_g_per_mol = Some(v);
        self
    }

    pub fn mw_g_per_mol(mut self, v: Real) -> Self {
        self.mw_g_per_mol = Some(v);
        self
    }

    pub fn hansen(mut self, delta_d: Real, delta_p: Real, delta_h: Real) -> Self {
        self.hsp_delta_d = Some(delta_d);
        self.hsp_delta_p = Some(delta_p);
        self.hsp_delta_h = Some(delta_h);
        self
    }

    pub fn hsp_delta_d(mut self, v: Real) -> Self {
        self.hsp_delta_d = Some(v);
        self
    }

    pub fn hsp_delta_p(mut self, v: Real) -> Self {
        self.hsp_delta_p = Some(v);
        self
    }

    pub fn hsp_delta_h(mut self, v: Real) -> Self {
        self.hsp_delta_h = Some(v);
        self
    }

    pub fn delta_cp_j_per_g_k(mut self, v: Real) -> Self {
        self.delta_cp_j_per_g_k = Some(v);
        self
    }

    pub fn hygroscopicity(mut self, v: impl Into<String>) -> Self {
        self.hygroscopicity = Some(v.into());
        self
    }

    pub fn degree_of_hydrolysis_mol_percent(mut self, v: Real) -> Self {
        self.degree_of_hydrolysis_mol_percent = Some(v);
        self
    }

    pub fn degree_of_substitution(
        mut self,
        groups: impl IntoIterator<Item = (impl Into<String>, Real)>,
    ) -> Self {
        self.degree_of_substitution =
            Some(groups.into_iter().map(|(g, v)| (g.into(), v)).collect());
        self
    }

    /// Validate and freeze.
    ///
    /// Fails when a copolymer's mole fractions do not sum to 1 within
    /// `MOLE_FRACTION_TOLERANCE`. A missing Tg is estimated with the Fox
    /// equation when the monomer data allows it, and left unknown otherwise.
    pub fn build(self) -> ModelResult<Polymer> {
        if !self.polymer_type.is_homopolymer() && !self.monomers.is_empty() {
            let sum = mole_fraction_sum(&self.monomers);
            if !in_open_interval(
                sum,
                1.0 - MOLE_FRACTION_TOLERANCE,
                1.0 + MOLE_FRACTION_TOLERANCE,
            ) {
                warn!(polymer = %self.name, sum, "monomer mole fractions do not sum to 1");
                return Err(ModelError::MoleFractionSum {
                    polymer: self.name,
                    sum,
                });
            }
        }

        let (tg_celsius, tg_kelvin, tg_origin) = match self.tg_celsius {
            Some(tg_c) => (Some(tg_c), kelvin_from_celsius(Some(tg_c)), Some(TgOrigin::Supplied)),
            None => match fox::copolymer_tg_k(&self.polymer_type, &self.monomers) {
                Some(tg_k) => {
                    debug!(polymer = %self.name, tg_k, "Tg back-filled from Fox estimate");
                    (Some(kelvin_to_celsius(tg_k)), Some(tg_k), Some(TgOrigin::FoxEstimate))
                }
                None => (None, None, None),
            },
        };

        Ok(Polymer {
            name: self.name,
            polymer_type: self.polymer_type,
            monomers: self.monomers,
            tg_celsius,
            tg_kelvin,
            tg_origin,
            density_g_cm3: self.density_g_cm3,
            mn_g_per_mol: self.mn_g_per_mol,
            mw_g_per_mol: self.mw_g_per_mol,
            hsp_delta_d: self.hsp_delta_d,
            hsp_delta_p: self.hsp_delta_p,
            hsp_delta_h: self.hsp_delta_h,
            delta_cp_j_per_g_k: self.delta_cp_j_per_g_k,
            hygroscopicity: self.hygroscopicity,
            degree_of_hydrolysis_mol_percent: self.degree_of_hydrolysis_mol_percent,
            degree_of_substitution: self.degree_of_substitution,
            calculated_properties: PropertyTable::new(),
        })
    }
}
