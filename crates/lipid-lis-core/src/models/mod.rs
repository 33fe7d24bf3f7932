//! Domain models in their local (screen-facing) shape.

mod patient;
mod result;
mod technician;

pub use patient::*;
pub use result::*;
pub use technician::*;

use serde::{Deserialize, Serialize};

/// The three entity collections held by the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum EntityKind {
    Patient,
    LabTechnician,
    LipidProfile,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Patient => "patient",
            EntityKind::LabTechnician => "lab_technician",
            EntityKind::LipidProfile => "lipid_profile",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
