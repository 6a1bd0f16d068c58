//! Data-driven content definitions and loaders.
//!
//! This crate houses the static battle content and provides loaders for
//! RON/TOML data files:
//! - Species catalog (data-driven via RON)
//! - Element effectiveness chart (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! A default data set ships inside the crate (see [`ContentFactory::embedded`]);
//! the same files can be overridden from a data directory.
//!
//! Content is consumed by runtime oracles and never appears in battle state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CONFIG_FILE, ConfigLoader, ContentFactory, EFFECTIVENESS_FILE, EffectivenessEntry,
    EffectivenessLoader, EffectivenessTable, GameContent, LoadResult, SPECIES_FILE,
    SpeciesCatalog, SpeciesLoader,
};
