//! Category taxonomy for the medical equipment catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A product category.
///
/// The set is fixed. Categories serialize as their display label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Category {
    #[default]
    #[serde(rename = "Diagnostic & Monitoring")]
    DiagnosticMonitoring,
    #[serde(rename = "Clinical & Hospital")]
    ClinicalHospital,
    #[serde(rename = "Mobility & Rehabilitation")]
    MobilityRehabilitation,
    #[serde(rename = "Laboratory")]
    Laboratory,
    #[serde(rename = "Emergency & First Aid")]
    EmergencyFirstAid,
}

impl Category {
    /// Every category, in storefront order.
    pub const ALL: [Category; 5] = [
        Category::DiagnosticMonitoring,
        Category::ClinicalHospital,
        Category::MobilityRehabilitation,
        Category::Laboratory,
        Category::EmergencyFirstAid,
    ];

    /// The display label (e.g., "Diagnostic & Monitoring").
    pub fn label(&self) -> &'static str {
        match self {
            Category::DiagnosticMonitoring => "Diagnostic & Monitoring",
            Category::ClinicalHospital => "Clinical & Hospital",
            Category::MobilityRehabilitation => "Mobility & Rehabilitation",
            Category::Laboratory => "Laboratory",
            Category::EmergencyFirstAid => "Emergency & First Aid",
        }
    }

    /// Look up a category by its exact label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// The first category, used when imported data names an unknown one.
    pub fn first() -> Self {
        Category::DiagnosticMonitoring
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
