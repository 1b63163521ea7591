//! Compendium persistence adapters
//!
//! Compendiums are read from JSON dumps of the host's packs, one file per
//! compendium named after its id.

mod json_compendium_repository;

pub use json_compendium_repository::JsonCompendiumRepository;
