//! Typed records for the camera cloud API.
//!
//! Every optional upstream field is an explicit `Option` here and gets
//! normalized once at the fetch boundary (`display_name`, `vendor_name`,
//! `dc_name`), so business logic never probes loosely-shaped payloads.

use serde::{Deserialize, Serialize};

/// Data center a camera streams to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCenter {
    pub name: String,
}

/// SD / memory card status block reported by the camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCardState {
    #[serde(default)]
    pub state: String,
}

impl MemoryCardState {
    /// States that do not indicate a card problem. An absent or empty state
    /// is treated as "nothing to report", not as a failure.
    const HEALTHY: [&'static str; 3] = ["CardOK", "CardNotFound", "Unknown"];

    pub fn is_problem(&self) -> bool {
        !self.state.is_empty() && !Self::HEALTHY.contains(&self.state.as_str())
    }
}

/// One camera from the fleet inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub uid: String,
    pub name: Option<String>,
    pub sn: Option<String>,
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub is_online: bool,
    /// Epoch seconds of the moment the camera went offline, when known.
    pub offline_since: Option<i64>,
    pub data_center: Option<DataCenter>,
    pub memory_card_state: Option<MemoryCardState>,
}

impl Camera {
    /// Display name: camera name, or a shortened uid when unnamed.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => self.uid.chars().take(12).collect(),
        }
    }

    pub fn vendor_name(&self) -> &str {
        self.vendor.as_deref().filter(|v| !v.is_empty()).unwrap_or("Unknown")
    }

    pub fn model_name(&self) -> &str {
        self.model.as_deref().filter(|m| !m.is_empty()).unwrap_or("Unknown")
    }

    pub fn dc_name(&self) -> &str {
        self.data_center.as_ref().map(|dc| dc.name.as_str()).unwrap_or("Unknown")
    }

    pub fn has_memory_issue(&self) -> bool {
        self.memory_card_state.as_ref().is_some_and(|mc| mc.is_problem())
    }
}

/// Processing state of a baked (exported) archive job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ArchiveStatus {
    New,
    Enqueued,
    Error,
    Done,
}

impl ArchiveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ArchiveStatus::New => "NEW",
            ArchiveStatus::Enqueued => "ENQUEUED",
            ArchiveStatus::Error => "ERROR",
            ArchiveStatus::Done => "DONE",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "NEW" => Some(ArchiveStatus::New),
            "ENQUEUED" => Some(ArchiveStatus::Enqueued),
            "ERROR" => Some(ArchiveStatus::Error),
            "DONE" => Some(ArchiveStatus::Done),
            _ => None,
        }
    }
}

impl TryFrom<u8> for ArchiveStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            0 => Ok(ArchiveStatus::New),
            1 => Ok(ArchiveStatus::Enqueued),
            2 => Ok(ArchiveStatus::Error),
            3 => Ok(ArchiveStatus::Done),
            other => Err(format!("unknown archive status: {}", other)),
        }
    }
}

impl From<ArchiveStatus> for u8 {
    fn from(status: ArchiveStatus) -> u8 {
        match status {
            ArchiveStatus::New => 0,
            ArchiveStatus::Enqueued => 1,
            ArchiveStatus::Error => 2,
            ArchiveStatus::Done => 3,
        }
    }
}

/// One baked archive export job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakedArchive {
    pub id: i64,
    pub camera_uid: Option<String>,
    pub name: Option<String>,
    pub status: ArchiveStatus,
    pub since: Option<i64>,
    pub till: Option<i64>,
    pub size_bytes: Option<i64>,
    pub updated_at: Option<String>,
}

/// Service health probe payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub status: String,
}

impl Health {
    /// Placeholder used when the health endpoint itself is unreachable.
    pub fn error() -> Self {
        Self { status: "error".to_string() }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// Response envelopes.

#[derive(Debug, Deserialize)]
pub struct CamerasPage {
    #[serde(default)]
    pub cameras: Vec<Camera>,
    #[serde(default = "one")]
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct FragmentsResponse {
    #[serde(default)]
    pub fragments: Vec<crate::libs::analyzer::Fragment>,
}

#[derive(Debug, Deserialize)]
pub struct BakedArchivesResponse {
    #[serde(default)]
    pub baked_archives: Vec<BakedArchive>,
}

fn one() -> u32 {
    1
}
