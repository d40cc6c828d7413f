//! Lead models: the persisted record and its ingestion/response views.

use serde::Serialize;

/// One contact record assigned to an agent and owned by a list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub first_name: String,
    pub phone: String,
    pub notes: String,
    /// Agent this lead was distributed to
    pub assigned_to: String,
    /// List this lead was created from
    pub list_id: String,
}

/// A parsed upload row that passed field validation, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub first_name: String,
    pub phone: String,
    pub notes: String,
}

/// Lead fields embedded in distribution responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummary {
    pub id: String,
    pub first_name: String,
    pub phone: String,
    pub notes: String,
}
