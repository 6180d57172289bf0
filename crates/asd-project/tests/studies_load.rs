use asd_core::{Tolerances, nearly_equal};
use asd_model::{PropertySource, PropertyValue, TgOrigin};
use asd_project::{build_study, load_study, study_reports};
use std::path::PathBuf;
use std::sync::Arc;

fn studies_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // go to crates
    path.pop(); // go to repo root
    path.push("studies");
    path
}

#[test]
fn sample_study_builds() {
    let path = studies_dir().join("felodipine_screen.yaml");
    let study = load_study(&path)
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));
    let model = build_study(&study).unwrap();

    assert_eq!(model.apis.len(), 2);
    assert_eq!(model.polymers.len(), 3);
    assert_eq!(model.systems.len(), 4);

    let vaco = &model.polymers["pvp-va64"];
    assert_eq!(vaco.tg_origin(), Some(TgOrigin::FoxEstimate));
    let tg_k = vaco.tg_kelvin().unwrap();
    assert!(tg_k > 308.15 && tg_k < 448.15);

    let pvp = &model.polymers["pvp-k30"];
    assert_eq!(pvp.pdi(), Some(5.0));

    let a = model.system("fel-pvpva-20").unwrap();
    let b = model.system("fel-pvpva-40").unwrap();
    assert!(Arc::ptr_eq(a.polymer(), b.polymer()));
    assert!(a.volume_fraction_api().unwrap() < b.volume_fraction_api().unwrap());

    let itz = model.system("itz-hpmcas-25").unwrap();
    assert_eq!(
        itz.ml_predictions.get("stability_class"),
        Some(&PropertyValue::Text("stable".to_string()))
    );
    assert_eq!(
        itz.api().get_property("tpsa", true),
        Some(PropertyValue::Real(104.7))
    );
}

#[test]
fn reports_follow_file_order() {
    let study = load_study(&studies_dir().join("felodipine_screen.yaml")).unwrap();
    let model = build_study(&study).unwrap();
    let reports = study_reports(&model);

    let ids: Vec<&str> = reports.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["fel-pvp-20", "fel-pvpva-20", "fel-pvpva-40", "itz-hpmcas-25"]);

    for r in &reports {
        assert!(nearly_equal(
            r.drug_load_frac + r.polymer_load_frac,
            1.0,
            Tolerances::default()
        ));
        let phi = r.volume_fraction_api.unwrap();
        assert!((0.0..=1.0).contains(&phi));
    }
    assert_eq!(reports[0].risk_flags, ["Hygroscopic carrier"]);
}
