//! Monomer (repeat unit) records.

use asd_core::Real;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One repeat unit of a polymer.
///
/// Carries no invariant of its own; the owning `Polymer` checks that the mole
/// fractions of its monomers add up.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonomerInfo {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub smiles: Option<String>,
    #[cfg_attr(feature = "serde", serde(default = "default_mole_fraction"))]
    pub mole_fraction: Real,
    /// Repeat-unit molecular weight [g/mol]
    #[cfg_attr(feature = "serde", serde(default))]
    pub molecular_weight: Option<Real>,
    /// Tg of the homopolymer made of this unit [°C]
    #[cfg_attr(feature = "serde", serde(default))]
    pub tg_homopolymer_celsius: Option<Real>,
}

#[cfg(feature = "serde")]
fn default_mole_fraction() -> Real {
    1.0
}

impl MonomerInfo {
    /// Monomer with mole fraction 1.0 and nothing else known.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            smiles: None,
            mole_fraction: 1.0,
            molecular_weight: None,
            tg_homopolymer_celsius: None,
        }
    }

    pub fn with_smiles(mut self, smiles: impl Into<String>) -> Self {
        self.smiles = Some(smiles.into());
        self
    }

    pub fn with_mole_fraction(mut self, x: Real) -> Self {
        self.mole_fraction = x;
        self
    }

    pub fn with_molecular_weight(mut self, mw: Real) -> Self {
        self.molecular_weight = Some(mw);
        self
    }

    pub fn with_tg_homopolymer_celsius(mut self, tg_c: Real) -> Self {
        self.tg_homopolymer_celsius = Some(tg_c);
        self
    }

    /// True when the unit can take part in a Fox estimate.
    pub fn has_fox_data(&self) -> bool {
        self.molecular_weight.is_some() && self.tg_homopolymer_celsius.is_some()
    }
}
