//! API–polymer systems at a fixed drug load.

use crate::api::Api;
use crate::error::ModelResult;
use crate::polymer::Polymer;
use crate::property::PropertyValue;
use crate::risk::RiskFlags;
use asd_core::{Real, TempInterval, dk, ensure_open_interval};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One point of a Gibbs mixing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MixingPoint {
    /// API volume fraction
    pub phi_api: Real,
    /// ΔG_mix / RT
    pub delta_g_mix_rt: Real,
}

impl MixingPoint {
    /// Order points into a curve: ascending `phi_api`, one point per `phi_api`.
    ///
    /// When the same `phi_api` appears more than once the last point wins.
    pub fn curve(points: impl IntoIterator<Item = MixingPoint>) -> Vec<MixingPoint> {
        let mut curve: Vec<MixingPoint> = Vec::new();
        for point in points {
            match curve.iter_mut().find(|p| p.phi_api.total_cmp(&point.phi_api).is_eq()) {
                Some(existing) => *existing = point,
                None => curve.push(point),
            }
        }
        curve.sort_by(|a, b| a.phi_api.total_cmp(&b.phi_api));
        curve
    }
}

/// Mixing thermodynamics computed elsewhere for this combination.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThermodynamicResults {
    /// Hansen distance Ra [MPa^0.5]
    pub hansen_ra_mpa_half: Option<Real>,
    /// Hildebrand parameter difference [MPa^0.5]
    pub delta_hildebrand_mpa_half: Option<Real>,
    /// Flory–Huggins χ
    pub chi_interaction_parameter: Option<Real>,
    /// ΔG_mix/RT as a function of `phi_api`: ascending, unique `phi_api`.
    /// Build it with `MixingPoint::curve`.
    pub delta_g_mix: Option<Vec<MixingPoint>>,
    /// Crystalline API solubility in the polymer [wt%]
    pub sp_cry_wt_percent: Option<Real>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlassTransitionResults {
    /// Tg of the dispersion [°C]
    pub tg_asd_celsius: Option<Real>,
    /// Tg of the dispersion after water uptake [°C]
    pub tg_asd_plasticized_celsius: Option<Real>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StabilityResults {
    /// Tg_ASD − T_storage [K]
    pub tg_margin_k: Option<Real>,
    pub qualitative_score: Option<Real>,
    pub predicted_shelf_life_conceptual: Option<String>,
}

/// An API dispersed in a polymer at a given drug load.
///
/// The API and polymer are shared, never mutated through the system. The drug
/// load is fixed at construction; the load fractions derive from it.
#[derive(Debug, Clone)]
pub struct AsdSystem {
    api: Arc<Api>,
    polymer: Arc<Polymer>,
    drug_load_wt_percent: Real,
    drug_load_frac: Real,
    polymer_load_frac: Real,
    risk_flags: RiskFlags,

    pub thermodynamics: ThermodynamicResults,
    pub glass_transition: GlassTransitionResults,
    pub stability: StabilityResults,
    /// Opaque results written by prediction pipelines.
    pub ml_predictions: BTreeMap<String, PropertyValue>,
}

impl AsdSystem {
    /// Combine `api` and `polymer` at `drug_load_wt_percent` (strictly between 0 and 100).
    pub fn new(
        api: Arc<Api>,
        polymer: Arc<Polymer>,
        drug_load_wt_percent: Real,
    ) -> ModelResult<Self> {
        ensure_open_interval(drug_load_wt_percent, 0.0, 100.0, "drug_load_wt_percent")?;

        let drug_load_frac = drug_load_wt_percent / 100.0;
        Ok(Self {
            api,
            polymer,
            drug_load_wt_percent,
            drug_load_frac,
            polymer_load_frac: 1.0 - drug_load_frac,
            risk_flags: RiskFlags::new(),
            thermodynamics: ThermodynamicResults::default(),
            glass_transition: GlassTransitionResults::default(),
            stability: StabilityResults::default(),
            ml_predictions: BTreeMap::new(),
        })
    }

    pub fn api(&self) -> &Arc<Api> {
        &self.api
    }

    pub fn polymer(&self) -> &Arc<Polymer> {
        &self.polymer
    }

    pub fn drug_load_wt_percent(&self) -> Real {
        self.drug_load_wt_percent
    }

    /// API mass fraction.
    pub fn drug_load_frac(&self) -> Real {
        self.drug_load_frac
    }

    /// Polymer mass fraction, `1 - drug_load_frac`.
    pub fn polymer_load_frac(&self) -> Real {
        self.polymer_load_frac
    }

    /// API volume fraction from the component densities.
    ///
    /// `None` when either density is unknown or not positive.
    pub fn volume_fraction_api(&self) -> Option<Real> {
        let rho_api = self.api.density_g_cm3().filter(|rho| *rho > 0.0)?;
        let rho_polymer = self.polymer.density_g_cm3().filter(|rho| *rho > 0.0)?;

        let vol_api = self.drug_load_frac / rho_api;
        let vol_polymer = self.polymer_load_frac / rho_polymer;
        let vol_total = vol_api + vol_polymer;
        if vol_total == 0.0 {
            return None;
        }
        Some(vol_api / vol_total)
    }

    /// Polymer Tg minus API Tg, when both are known.
    pub fn tg_gap_k(&self) -> Option<Real> {
        Some(self.polymer.tg_kelvin()? - self.api.tg_kelvin()?)
    }

    pub fn tg_gap(&self) -> Option<TempInterval> {
        self.tg_gap_k().map(dk)
    }

    /// Record a risk flag. Returns `false` when the same text is already present.
    pub fn add_risk_flag(&mut self, flag: impl Into<String>) -> bool {
        self.risk_flags.add(flag)
    }

    pub fn risk_flags(&self) -> &RiskFlags {
        &self.risk_flags
    }

    pub fn stability_risk_flags(&self) -> &[String] {
        self.risk_flags.as_slice()
    }
}

impl fmt::Display for AsdSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ASDSystem(API='{}', Polymer='{}', DrugLoad={}%)",
            self.api.name(),
            self.polymer.name(),
            self.drug_load_wt_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::property::PropertySource;
    use asd_core::{CoreError, Tolerances, nearly_equal};
    use proptest::prelude::*;

    fn api(density: Option<Real>) -> Arc<Api> {
        let mut b = Api::builder("Felodipine").tg_celsius(45.0);
        if let Some(rho) = density {
            b = b.density_g_cm3(rho);
        }
        Arc::new(b.build())
    }

    fn polymer(density: Option<Real>) -> Arc<Polymer> {
        let mut b = Polymer::builder("PVP K30").tg_celsius(168.0);
        if let Some(rho) = density {
            b = b.density_g_cm3(rho);
        }
        Arc::new(b.build().unwrap())
    }

    #[test]
    fn fractions_from_percent() {
        let s = AsdSystem::new(api(None), polymer(None), 25.0).unwrap();
        assert_eq!(s.drug_load_frac(), 0.25);
        assert_eq!(s.polymer_load_frac(), 0.75);
    }

    #[test]
    fn drug_load_bounds_are_exclusive() {
        for bad in [0.0, 100.0, -5.0, 150.0, Real::NAN] {
            let err = AsdSystem::new(api(None), polymer(None), bad).unwrap_err();
            assert!(matches!(
                err,
                ModelError::Core(CoreError::OutOfRange {
                    what: "drug_load_wt_percent",
                    ..
                })
            ));
        }
        assert!(AsdSystem::new(api(None), polymer(None), 0.001).is_ok());
        assert!(AsdSystem::new(api(None), polymer(None), 99.999).is_ok());
    }

    #[test]
    fn volume_fraction_rejects_non_positive_densities() {
        for (rho_api, rho_polymer) in [(-1.3, 1.2), (1.3, -1.2), (0.0, 1.2), (1.3, 0.0)] {
            let s = AsdSystem::new(api(Some(rho_api)), polymer(Some(rho_polymer)), 20.0).unwrap();
            assert_eq!(
                s.volume_fraction_api(),
                None,
                "densities {rho_api} / {rho_polymer}"
            );
        }
    }

    #[test]
    fn mixing_curve_is_ordered_and_unique() {
        let point = |phi_api, delta_g_mix_rt| MixingPoint {
            phi_api,
            delta_g_mix_rt,
        };
        let curve = MixingPoint::curve([
            point(0.5, -0.2),
            point(0.1, -0.05),
            point(0.5, -0.25),
            point(0.9, 0.01),
        ]);
        assert_eq!(
            curve,
            [point(0.1, -0.05), point(0.5, -0.25), point(0.9, 0.01)]
        );
        assert!(MixingPoint::curve(Vec::<MixingPoint>::new()).is_empty());
    }

    #[test]
    fn volume_fraction_needs_both_densities() {
        assert_eq!(
            AsdSystem::new(api(None), polymer(Some(1.2)), 20.0)
                .unwrap()
                .volume_fraction_api(),
            None
        );
        assert_eq!(
            AsdSystem::new(api(Some(1.3)), polymer(None), 20.0)
                .unwrap()
                .volume_fraction_api(),
            None
        );
    }

    #[test]
    fn volume_fraction_value() {
        let s = AsdSystem::new(api(Some(1.3)), polymer(Some(1.2)), 20.0).unwrap();
        let expected = (0.2 / 1.3) / (0.2 / 1.3 + 0.8 / 1.2);
        assert!(nearly_equal(
            s.volume_fraction_api().unwrap(),
            expected,
            Tolerances::default()
        ));
    }

    #[test]
    fn equal_densities_give_mass_fraction() {
        let s = AsdSystem::new(api(Some(1.25)), polymer(Some(1.25)), 30.0).unwrap();
        assert!(nearly_equal(
            s.volume_fraction_api().unwrap(),
            0.3,
            Tolerances::default()
        ));
    }

    #[test]
    fn shared_components_see_calculated_updates() {
        let shared_api = api(Some(1.3));
        let shared_polymer = polymer(Some(1.2));
        let a = AsdSystem::new(shared_api.clone(), shared_polymer.clone(), 10.0).unwrap();
        let b = AsdSystem::new(shared_api.clone(), shared_polymer, 40.0).unwrap();

        shared_api.update_calculated_descriptors([("log_p", 3.9)]);
        assert_eq!(
            a.api().get_property("log_p", true),
            Some(PropertyValue::Real(3.9))
        );
        assert_eq!(
            b.api().get_property("log_p", true),
            Some(PropertyValue::Real(3.9))
        );
        assert!(Arc::ptr_eq(a.api(), b.api()));
    }

    #[test]
    fn risk_flags_are_idempotent_and_ordered() {
        let mut s = AsdSystem::new(api(None), polymer(None), 20.0).unwrap();
        assert!(s.add_risk_flag("Low Tg margin"));
        assert!(!s.add_risk_flag("Low Tg margin"));
        assert!(s.add_risk_flag("Hygroscopic polymer"));
        assert_eq!(
            s.stability_risk_flags(),
            ["Low Tg margin", "Hygroscopic polymer"]
        );
    }

    #[test]
    fn result_slots_start_empty() {
        let mut s = AsdSystem::new(api(None), polymer(None), 20.0).unwrap();
        assert_eq!(s.thermodynamics, ThermodynamicResults::default());
        assert!(s.glass_transition.tg_asd_celsius.is_none());
        assert!(s.stability.tg_margin_k.is_none());
        assert!(s.ml_predictions.is_empty());

        s.ml_predictions
            .insert("stability_class".into(), PropertyValue::from("stable"));
        assert_eq!(s.ml_predictions.len(), 1);
    }

    #[test]
    fn tg_gap() {
        let s = AsdSystem::new(api(None), polymer(None), 20.0).unwrap();
        let gap = s.tg_gap_k().unwrap();
        assert!(nearly_equal(gap, 123.0, Tolerances { abs: 1e-9, rel: 1e-12 }));
        assert!(s.tg_gap().is_some());

        let no_tg = Arc::new(Polymer::builder("x").build().unwrap());
        let s = AsdSystem::new(api(None), no_tg, 20.0).unwrap();
        assert_eq!(s.tg_gap_k(), None);
    }

    #[test]
    fn display_summary() {
        let s = AsdSystem::new(api(None), polymer(None), 20.5).unwrap();
        assert_eq!(
            s.to_string(),
            "ASDSystem(API='Felodipine', Polymer='PVP K30', DrugLoad=20.5%)"
        );
    }

    proptest! {
        #[test]
        fn load_fractions_sum_to_one(pct in 0.001_f64..99.999) {
            let s = AsdSystem::new(api(None), polymer(None), pct).unwrap();
            prop_assert!(nearly_equal(
                s.drug_load_frac() + s.polymer_load_frac(),
                1.0,
                Tolerances::default()
            ));
        }

        #[test]
        fn volume_fraction_is_bounded(
            pct in 0.001_f64..99.999,
            rho_api in 0.5_f64..3.0,
            rho_polymer in 0.5_f64..3.0,
        ) {
            let s = AsdSystem::new(api(Some(rho_api)), polymer(Some(rho_polymer)), pct).unwrap();
            let phi = s.volume_fraction_api().unwrap();
            prop_assert!((0.0..=1.0).contains(&phi));
        }
    }
}
