//! Fox-equation glass transition estimate for copolymers.
//!
//! ```text
//! 1 / Tg = Σ w_i / Tg_i
//! ```
//!
//! with `w_i` the weight fraction of repeat unit `i` and `Tg_i` the glass
//! transition of its homopolymer, both temperatures in Kelvin.
//!
//! Every function here declines with `None` when the data is incomplete or the
//! arithmetic degenerates. Missing data is not an error.

use crate::monomer::MonomerInfo;
use crate::polymer::PolymerType;
use asd_core::{Real, celsius_to_kelvin};
use tracing::debug;

/// Weight fractions from mole fractions: `w_i = x_i M_i / Σ x_j M_j`.
///
/// `None` when any monomer lacks a molecular weight or the weighted sum is zero.
pub fn weight_fractions(monomers: &[MonomerInfo]) -> Option<Vec<Real>> {
    let weighted: Vec<Real> = monomers
        .iter()
        .map(|m| m.molecular_weight.map(|mw| m.mole_fraction * mw))
        .collect::<Option<_>>()?;

    let total: Real = weighted.iter().sum();
    if total == 0.0 {
        return None;
    }
    Some(weighted.into_iter().map(|xm| xm / total).collect())
}

/// Fox estimate [K] over the given repeat units.
///
/// Requires a molecular weight and homopolymer Tg on every unit. Declines on a
/// zero weighted sum, a homopolymer Tg of exactly 0 K, or a zero reciprocal sum.
pub fn fox_tg_k(monomers: &[MonomerInfo]) -> Option<Real> {
    if !monomers.iter().all(MonomerInfo::has_fox_data) {
        debug!("Fox estimate skipped: monomer Tg or molecular weight missing");
        return None;
    }

    let Some(weights) = weight_fractions(monomers) else {
        debug!("Fox estimate skipped: zero mole-weighted molecular weight");
        return None;
    };

    let mut sum_w_over_tg = 0.0;
    for (m, w) in monomers.iter().zip(weights) {
        let tg_k = celsius_to_kelvin(m.tg_homopolymer_celsius?);
        if tg_k == 0.0 {
            debug!(monomer = %m.name, "Fox estimate skipped: homopolymer Tg at 0 K");
            return None;
        }
        sum_w_over_tg += w / tg_k;
    }

    if sum_w_over_tg == 0.0 {
        return None;
    }
    Some(1.0 / sum_w_over_tg)
}

/// Fox estimate gated on polymer type and unit count.
///
/// Homopolymers and anything with fewer than two units are not estimated.
pub fn copolymer_tg_k(polymer_type: &PolymerType, monomers: &[MonomerInfo]) -> Option<Real> {
    if polymer_type.is_homopolymer() || monomers.len() < 2 {
        return None;
    }
    fox_tg_k(monomers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asd_core::{Tolerances, nearly_equal};

    fn unit(name: &str, x: Real, mw: Real, tg_c: Real) -> MonomerInfo {
        MonomerInfo::new(name)
            .with_mole_fraction(x)
            .with_molecular_weight(mw)
            .with_tg_homopolymer_celsius(tg_c)
    }

    fn tol() -> Tolerances {
        Tolerances {
            abs: 1e-9,
            rel: 1e-12,
        }
    }

    #[test]
    fn reference_pair() {
        let monomers = [unit("A", 0.5, 100.0, 80.0), unit("B", 0.5, 150.0, -20.0)];

        let w = weight_fractions(&monomers).unwrap();
        assert!(nearly_equal(w[0], 0.4, tol()));
        assert!(nearly_equal(w[1], 0.6, tol()));

        let expected = 1.0 / (0.4 / 353.15 + 0.6 / 253.15);
        let tg = fox_tg_k(&monomers).unwrap();
        assert!(nearly_equal(tg, expected, tol()));
        // Fox mixing lands between the two homopolymer values.
        assert!(tg > 253.15 && tg < 353.15);
    }

    #[test]
    fn identical_units_give_homopolymer_tg() {
        let monomers = [unit("A", 0.3, 100.0, 50.0), unit("B", 0.7, 120.0, 50.0)];
        let tg = fox_tg_k(&monomers).unwrap();
        assert!(nearly_equal(tg, 323.15, tol()));
    }

    #[test]
    fn declines_on_missing_data() {
        let monomers = [
            unit("A", 0.5, 100.0, 80.0),
            MonomerInfo::new("B")
                .with_mole_fraction(0.5)
                .with_molecular_weight(150.0),
        ];
        assert_eq!(fox_tg_k(&monomers), None);

        let monomers = [
            unit("A", 0.5, 100.0, 80.0),
            MonomerInfo::new("B")
                .with_mole_fraction(0.5)
                .with_tg_homopolymer_celsius(-20.0),
        ];
        assert_eq!(fox_tg_k(&monomers), None);
        assert_eq!(weight_fractions(&monomers), None);
    }

    #[test]
    fn declines_on_zero_kelvin_unit() {
        let monomers = [unit("A", 0.5, 100.0, -273.15), unit("B", 0.5, 150.0, 20.0)];
        assert_eq!(fox_tg_k(&monomers), None);
    }

    #[test]
    fn declines_on_zero_weighted_sum() {
        let monomers = [unit("A", 0.0, 100.0, 80.0), unit("B", 0.0, 150.0, 20.0)];
        assert_eq!(weight_fractions(&monomers), None);
        assert_eq!(fox_tg_k(&monomers), None);
    }

    #[test]
    fn gate_rejects_homopolymer_and_single_unit() {
        let pair = [unit("A", 0.5, 100.0, 80.0), unit("B", 0.5, 150.0, -20.0)];
        assert_eq!(copolymer_tg_k(&PolymerType::Homopolymer, &pair), None);
        assert!(copolymer_tg_k(&PolymerType::RandomCopolymer, &pair).is_some());
        assert!(copolymer_tg_k(&PolymerType::Other("Graft".into()), &pair).is_some());

        let single = [unit("A", 1.0, 100.0, 80.0)];
        assert_eq!(copolymer_tg_k(&PolymerType::RandomCopolymer, &single), None);
        assert_eq!(copolymer_tg_k(&PolymerType::BlockCopolymer, &[]), None);
    }
}
