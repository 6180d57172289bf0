//! asd-model: physicochemical description of amorphous solid dispersions.
//!
//! Provides:
//! - Drug substance records (`Api`)
//! - Polymer records with monomer composition (`Polymer`, `MonomerInfo`)
//! - Fox-equation Tg estimation for copolymers
//! - API–polymer systems at a given drug load (`AsdSystem`)
//! - Calculated-property side tables shared by `Api` and `Polymer`
//!
//! # Sharing
//!
//! `Api` and `Polymer` are frozen once built and are meant to be wrapped in
//! `Arc` and shared by any number of `AsdSystem`s. Only their calculated-property
//! tables change after construction, and those merges are visible to every
//! system holding the same instance.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use asd_model::{Api, AsdSystem, MonomerInfo, Polymer, PolymerType};
//!
//! let api = Arc::new(Api::builder("Itraconazole").density_g_cm3(1.27).build());
//! let polymer = Polymer::builder("PVP-VA64")
//!     .polymer_type(PolymerType::RandomCopolymer)
//!     .monomer(
//!         MonomerInfo::new("VP")
//!             .with_mole_fraction(0.6)
//!             .with_molecular_weight(111.14)
//!             .with_tg_homopolymer_celsius(175.0),
//!     )
//!     .monomer(
//!         MonomerInfo::new("VA")
//!             .with_mole_fraction(0.4)
//!             .with_molecular_weight(86.09)
//!             .with_tg_homopolymer_celsius(35.0),
//!     )
//!     .density_g_cm3(1.19)
//!     .build()
//!     .unwrap();
//! let polymer = Arc::new(polymer);
//!
//! let system = AsdSystem::new(api, polymer.clone(), 20.0).unwrap();
//! assert!(polymer.tg_kelvin().is_some());
//! assert!(system.volume_fraction_api().is_some());
//! ```

pub mod api;
pub mod error;
pub mod fox;
pub mod monomer;
pub mod polymer;
pub mod property;
pub mod risk;
pub mod system;

// Re-exports for ergonomics
pub use api::{Api, ApiBuilder};
pub use error::{ModelError, ModelResult};
pub use fox::{copolymer_tg_k, fox_tg_k, weight_fractions};
pub use monomer::MonomerInfo;
pub use polymer::{MOLE_FRACTION_TOLERANCE, Polymer, PolymerBuilder, PolymerType, TgOrigin};
pub use property::{PropertySource, PropertyTable, PropertyValue};
pub use risk::RiskFlags;
pub use system::{
    AsdSystem, GlassTransitionResults, MixingPoint, StabilityResults, ThermodynamicResults,
};
