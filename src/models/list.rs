//! List model and the per-agent distribution view.

use serde::{Deserialize, Serialize};

use super::LeadSummary;

/// Distribution state of an uploaded list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListStatus {
    Uploaded,
    Distributed,
}

impl ListStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListStatus::Uploaded => "Uploaded",
            ListStatus::Distributed => "Distributed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Uploaded" => Some(ListStatus::Uploaded),
            "Distributed" => Some(ListStatus::Distributed),
            _ => None,
        }
    }
}

/// A named batch of leads created from one uploaded file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub name: String,
    pub upload_date: String,
    pub total_leads: i64,
    pub status: ListStatus,
}

/// Response body for GET /api/lists/:id/distribution.
#[derive(Debug, Serialize)]
pub struct ListDistribution {
    pub list: List,
    pub distribution: Vec<AgentDistribution>,
}

/// One agent's share of a list's leads.
#[derive(Debug, Serialize)]
pub struct AgentDistribution {
    pub agent: DistributionAgent,
    pub leads: Vec<LeadSummary>,
}

/// Agent fields embedded in a distribution response.
#[derive(Debug, Serialize)]
pub struct DistributionAgent {
    pub id: String,
    pub name: String,
    pub email: String,
}
