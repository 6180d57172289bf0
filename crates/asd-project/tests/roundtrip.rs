use asd_model::{MonomerInfo, PolymerType, PropertyValue};
use asd_project::schema::*;
use asd_project::{
    ProjectError, load_json, load_study, load_yaml, save_json, save_yaml, validate_study,
};

fn sample_study() -> Study {
    Study {
        version: 1,
        name: "Roundtrip".to_string(),
        apis: vec![ApiDef {
            id: "ind".to_string(),
            name: "Indomethacin".to_string(),
            tm_celsius: Some(160.0),
            tg_celsius: Some(42.0),
            h_bond_donors: Some(1),
            bcs_class: Some("II".to_string()),
            ..ApiDef::default()
        }],
        polymers: vec![PolymerDef {
            id: "ab".to_string(),
            name: "AB copolymer".to_string(),
            polymer_type: PolymerType::BlockCopolymer,
            monomers: vec![
                MonomerInfo::new("A")
                    .with_mole_fraction(0.5)
                    .with_molecular_weight(100.0)
                    .with_tg_homopolymer_celsius(80.0),
                MonomerInfo::new("B")
                    .with_mole_fraction(0.5)
                    .with_molecular_weight(150.0)
                    .with_tg_homopolymer_celsius(-20.0),
            ],
            ..PolymerDef::default()
        }],
        systems: vec![SystemDef {
            id: "s1".to_string(),
            api: "ind".to_string(),
            polymer: "ab".to_string(),
            drug_load_wt_percent: 15.0,
            risk_flags: vec!["Low API Tg".to_string()],
            ml_predictions: [("score".to_string(), PropertyValue::Real(0.7))]
                .into_iter()
                .collect(),
        }],
    }
}

#[test]
fn roundtrip_yaml() {
    let study = sample_study();
    validate_study(&study).unwrap();

    let path = std::env::temp_dir().join("asd_project_roundtrip.yaml");
    save_yaml(&path, &study).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(study, loaded);
}

#[test]
fn roundtrip_json() {
    let study = sample_study();

    let path = std::env::temp_dir().join("asd_project_roundtrip.json");
    save_json(&path, &study).unwrap();
    let loaded = load_study(&path).unwrap();

    assert_eq!(study, loaded);
    assert_eq!(load_json(&path).unwrap(), loaded);
}

#[test]
fn polymer_type_uses_labels() {
    let yaml = serde_yaml::to_string(&sample_study()).unwrap();
    assert!(yaml.contains("polymer_type: Copolymer-Block"));
}

#[test]
fn monomer_defaults_apply() {
    let yaml = r#"
version: 1
name: defaults
polymers:
  - id: p
    name: P
    monomers:
      - name: only
"#;
    let study: Study = serde_yaml::from_str(yaml).unwrap();
    let polymer = &study.polymers[0];
    assert_eq!(polymer.polymer_type, PolymerType::Homopolymer);
    assert_eq!(polymer.monomers[0].mole_fraction, 1.0);
    assert!(study.systems.is_empty());
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::env::temp_dir().join("asd_project_study.toml");
    assert!(matches!(
        load_study(&path),
        Err(ProjectError::UnsupportedFormat(ext)) if ext == "toml"
    ));
}
