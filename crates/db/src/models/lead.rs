//! Lead entity model, DTOs, and the placeholder value mapping.

use leadflow_core::placeholder::PlaceholderValues;
use leadflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The placeholder names every lead can fill, in template-author order.
pub const LEAD_PLACEHOLDER_KEYS: [&str; 10] = [
    "clientName",
    "email",
    "phone",
    "whatsapp",
    "website",
    "address",
    "serviceType",
    "source",
    "serviceStatus",
    "approachCount",
];

/// Default and maximum page sizes for lead listing.
pub const DEFAULT_LEAD_PAGE_SIZE: i64 = 10;
pub const MAX_LEAD_PAGE_SIZE: i64 = 100;

/// A row from the `leads` table.
///
/// `service_type` and `service_status` hold the strings from
/// [`leadflow_core::leads`].
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: DbId,
    pub user_id: DbId,
    pub client_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub service_type: String,
    pub source: Option<String>,
    pub service_status: String,
    pub notes: Option<String>,
    pub email_sent: bool,
    pub whatsapp_sent: bool,
    pub approach_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lead {
    /// Map this lead onto the placeholder names in [`LEAD_PLACEHOLDER_KEYS`].
    ///
    /// Absent optional fields map to the empty string.
    pub fn placeholder_values(&self) -> PlaceholderValues {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let pairs = [
            ("clientName", self.client_name.clone()),
            ("email", text(&self.email)),
            ("phone", text(&self.phone)),
            ("whatsapp", text(&self.whatsapp)),
            ("website", text(&self.website)),
            ("address", text(&self.address)),
            ("serviceType", self.service_type.clone()),
            ("source", text(&self.source)),
            ("serviceStatus", self.service_status.clone()),
            ("approachCount", self.approach_count.to_string()),
        ];
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// The lead's email if it holds anything other than whitespace.
    pub fn usable_email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

/// DTO for creating a new lead. Missing required fields deserialize as
/// empty strings and are rejected by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateLead {
    pub client_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub service_type: String,
    pub source: Option<String>,
    pub service_status: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a lead. All fields are optional; the owner and the
/// send counters are not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLead {
    pub client_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub service_type: Option<String>,
    pub source: Option<String>,
    pub service_status: Option<String>,
    pub notes: Option<String>,
}

/// Query parameters for listing leads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadQuery {
    pub service_type: Option<String>,
    pub service_status: Option<String>,
    pub email_sent: Option<bool>,
    pub whatsapp_sent: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl LeadQuery {
    /// 1-based page number, clamped to at least 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, clamped to `1..=MAX_LEAD_PAGE_SIZE`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LEAD_PAGE_SIZE)
            .clamp(1, MAX_LEAD_PAGE_SIZE)
    }

    /// Row offset; saturates instead of overflowing on huge page numbers.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}
