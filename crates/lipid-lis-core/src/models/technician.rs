//! Lab technician models.

use serde::{Deserialize, Serialize};

/// Professional title of a lab technician.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum Title {
    Bacteriologist,
    Microbiologist,
    Biologist,
}

impl Title {
    pub const ALL: [Title; 3] = [Title::Bacteriologist, Title::Microbiologist, Title::Biologist];

    /// Remote short code.
    pub fn code(&self) -> &'static str {
        match self {
            Title::Bacteriologist => "BACT",
            Title::Microbiologist => "MICR",
            Title::Biologist => "BIOL",
        }
    }

    /// Parse a remote short code. Unknown codes map to Bacteriologist.
    pub fn from_code(code: &str) -> Self {
        match code {
            "MICR" => Title::Microbiologist,
            "BIOL" => Title::Biologist,
            _ => Title::Bacteriologist,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Title::Bacteriologist => "Bacteriólogo/a",
            Title::Microbiologist => "Microbiólogo/a",
            Title::Biologist => "Biólogo/a",
        }
    }
}

/// A lab technician (specialist) who signs results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct LabTechnician {
    /// Internal code - business identifier, immutable
    pub id: String,
    pub name: String,
    pub title: Title,
    pub phone: String,
    /// Server surrogate key - None until persisted remotely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_key: Option<i64>,
}

impl LabTechnician {
    pub fn new(id: String, name: String, title: Title, phone: String) -> Self {
        Self {
            id,
            name,
            title,
            phone,
            remote_key: None,
        }
    }

    pub fn is_synced(&self) -> bool {
        self.remote_key.is_some()
    }
}
