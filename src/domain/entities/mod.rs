//! Domain entities - Records read from the host's compendiums

mod compendium;
mod document;
mod folder;

pub use compendium::{Compendium, CompendiumSummary};
pub use document::{get_property, Document};
pub use folder::Folder;
