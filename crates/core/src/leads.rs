//! Lead classification enums.
//!
//! Stored as upper-case text in `leads.service_type` and
//! `leads.service_status`.

use serde::{Deserialize, Serialize};

/// All valid service type strings.
pub const VALID_SERVICE_TYPES: &[&str] = &[
    "WEB",
    "SEO",
    "MARKETING",
    "DESIGN",
    "DEVELOPMENT",
    "CONSULTING",
    "OTHER",
];

/// All valid service status strings.
pub const VALID_SERVICE_STATUSES: &[&str] = &["INTERESTED", "CONVERTED", "NOT_INTERESTED"];

/// Status assigned to newly created leads.
pub const DEFAULT_SERVICE_STATUS: ServiceStatus = ServiceStatus::Interested;

/// The kind of service a lead is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    Web,
    Seo,
    Marketing,
    Design,
    Development,
    Consulting,
    Other,
}

impl ServiceType {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "WEB" => Ok(Self::Web),
            "SEO" => Ok(Self::Seo),
            "MARKETING" => Ok(Self::Marketing),
            "DESIGN" => Ok(Self::Design),
            "DEVELOPMENT" => Ok(Self::Development),
            "CONSULTING" => Ok(Self::Consulting),
            "OTHER" => Ok(Self::Other),
            _ => Err(format!(
                "Invalid service type '{s}'. Must be one of: {}",
                VALID_SERVICE_TYPES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "WEB",
            Self::Seo => "SEO",
            Self::Marketing => "MARKETING",
            Self::Design => "DESIGN",
            Self::Development => "DEVELOPMENT",
            Self::Consulting => "CONSULTING",
            Self::Other => "OTHER",
        }
    }
}

/// Where a lead stands in the sales funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Interested,
    Converted,
    NotInterested,
}

impl ServiceStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "INTERESTED" => Ok(Self::Interested),
            "CONVERTED" => Ok(Self::Converted),
            "NOT_INTERESTED" => Ok(Self::NotInterested),
            _ => Err(format!(
                "Invalid service status '{s}'. Must be one of: {}",
                VALID_SERVICE_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interested => "INTERESTED",
            Self::Converted => "CONVERTED",
            Self::NotInterested => "NOT_INTERESTED",
        }
    }
}
