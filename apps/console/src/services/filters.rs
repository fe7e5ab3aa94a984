use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;
use tracing::warn;

use crate::services::location::ALL_SENTINEL;

/// Current dashboard filter values, rebuilt on every refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub state_id: String,
    #[serde(default)]
    pub lga_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    StartDate,
    EndDate,
    ServiceType,
    Status,
    State,
    Lga,
}

impl FilterState {
    /// Updates one field. The location "all" sentinel is stored as no selection.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let mut value = value.into();
        if matches!(field, FilterField::State | FilterField::Lga) && value.trim() == ALL_SENTINEL {
            value.clear();
        }
        match field {
            FilterField::StartDate => self.start_date = value,
            FilterField::EndDate => self.end_date = value,
            FilterField::ServiceType => self.service_type = value,
            FilterField::Status => self.status = value,
            FilterField::State => {
                if self.state_id != value {
                    self.lga_id.clear();
                }
                self.state_id = value;
            }
            FilterField::Lga => self.lga_id = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query parameters in request order. The four base keys are always present;
    /// location keys only when selected.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("start_date", checked_date("start_date", &self.start_date)),
            ("end_date", checked_date("end_date", &self.end_date)),
            ("service_type", self.service_type.trim().to_string()),
            ("status", self.status.trim().to_string()),
        ];

        let lga = self.lga_id.trim();
        if !lga.is_empty() {
            pairs.push(("lga_id", lga.to_string()));
        }

        let state = self.state_id.trim();
        if !state.is_empty() {
            pairs.push(("state_id", state.to_string()));
        }

        pairs
    }
}

fn checked_date(key: &str, raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }

    match Date::parse(value, format_description!("[year]-[month]-[day]")) {
        Ok(_) => value.to_string(),
        Err(err) => {
            warn!(%key, %value, %err, "dropping malformed filter date");
            String::new()
        }
    }
}
