use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{serde_as, DefaultOnError, DefaultOnNull, DisplayFromStr, PickFirst};

/// One labeled numeric dataset driving a chart.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde_as(as = "Vec<DefaultOnNull>")]
    #[serde(default)]
    pub data: Vec<f64>,
}

impl ChartSeries {
    #[cfg(test)]
    pub fn new<L, S>(labels: L, data: Vec<f64>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            data,
        }
    }

    /// Labels and values paired positionally; extra entries on either side are dropped.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.data.iter().copied())
    }

    pub fn is_aligned(&self) -> bool {
        self.labels.len() == self.data.len()
    }
}

/// Region display-name to count, as sent under `map_data`.
pub type RegionCounts = BTreeMap<String, u64>;

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_chart: Option<ChartSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pie_chart: Option<ChartSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_chart: Option<ChartSeries>,
    /// Unreadable counts (null, negative, non-numeric) read as 0 and get no marker.
    #[serde_as(as = "Option<BTreeMap<_, DefaultOnError<PickFirst<(_, DisplayFromStr)>>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_data: Option<RegionCounts>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOption {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

impl RegionOption {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(value) => value,
        RawId::Int(value) => value.to_string(),
        RawId::Float(value) => value.to_string(),
    })
}

/// A counter value that may arrive as a JSON number or as display text such as `"1,234"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterValue(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterParseError(pub String);

impl fmt::Display for CounterParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a counter value: {:?}", self.0)
    }
}

impl std::error::Error for CounterParseError {}

impl FromStr for CounterValue {
    type Err = CounterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ',' | '_' | ' ' | '\u{a0}'))
            .collect();
        if digits.is_empty() {
            return Err(CounterParseError(raw.to_string()));
        }
        digits
            .parse::<u64>()
            .map(CounterValue)
            .map_err(|_| CounterParseError(raw.to_string()))
    }
}

impl fmt::Display for CounterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicStats {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub patients_registered: CounterValue,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub appointments_confirmed: CounterValue,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub states_covered: CounterValue,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasePatient {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// A case escalated to a human volunteer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalatedCase {
    #[serde(deserialize_with = "string_or_number")]
    pub appointment_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "patient")]
    pub patients: CasePatient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

impl EscalatedCase {
    pub fn status_label(&self) -> String {
        self.status.replace('_', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_tolerates_null_points_and_misalignment() {
        let series: ChartSeries =
            serde_json::from_str(r#"{"labels":["A","B","C"],"data":[1,null]}"#).unwrap();
        assert_eq!(series.data, vec![1.0, 0.0]);
        assert!(!series.is_aligned());
        assert_eq!(series.points().collect::<Vec<_>>(), vec![("A", 1.0), ("B", 0.0)]);
    }

    #[test]
    fn dashboard_payload_keys_are_optional() {
        let payload: DashboardPayload =
            serde_json::from_str(r#"{"bar_chart":{"labels":["A","B"],"data":[1,2]}}"#).unwrap();
        assert!(payload.bar_chart.is_some());
        assert!(payload.pie_chart.is_none());
        assert!(payload.line_chart.is_none());
        assert!(payload.map_data.is_none());
    }

    #[test]
    fn bad_map_counts_do_not_sink_the_payload() {
        let payload: DashboardPayload = serde_json::from_str(
            r#"{"bar_chart":{"labels":["AI"],"data":[4]},"map_data":{"Lagos":3,"Kano":null,"Oyo":-2,"Edo":"4","Imo":"many"}}"#,
        )
        .unwrap();
        assert_eq!(payload.bar_chart.map(|series| series.data), Some(vec![4.0]));

        let counts = payload.map_data.unwrap();
        assert_eq!(counts["Lagos"], 3);
        assert_eq!(counts["Kano"], 0);
        assert_eq!(counts["Oyo"], 0);
        assert_eq!(counts["Edo"], 4);
        assert_eq!(counts["Imo"], 0);
    }

    #[test]
    fn region_ids_accept_numbers_and_strings() {
        let options: Vec<RegionOption> = serde_json::from_str(
            r#"[{"id":"5f0c","name":"Ikeja"},{"id":12,"name":"Epe"}]"#,
        )
        .unwrap();
        assert_eq!(options[0].id, "5f0c");
        assert_eq!(options[1].id, "12");
    }

    #[test]
    fn public_stats_accept_formatted_text() {
        let stats: PublicStats = serde_json::from_str(
            r#"{"patients_registered":"12,480","appointments_confirmed":311}"#,
        )
        .unwrap();
        assert_eq!(stats.patients_registered, CounterValue(12_480));
        assert_eq!(stats.appointments_confirmed, CounterValue(311));
        assert_eq!(stats.states_covered, CounterValue(0));
    }

    #[test]
    fn counter_text_rejects_garbage() {
        assert!("".parse::<CounterValue>().is_err());
        assert!("about 40".parse::<CounterValue>().is_err());
        assert_eq!("1 024".parse::<CounterValue>().unwrap(), CounterValue(1_024));
    }

    #[test]
    fn escalated_case_reads_nested_patient() {
        let case: EscalatedCase = serde_json::from_str(
            r#"{"appointment_id":"a1","status":"human_escalation","patients":{"full_name":"Aisha Bello","phone_number":"0803"}}"#,
        )
        .unwrap();
        assert_eq!(case.patients.full_name, "Aisha Bello");
        assert_eq!(case.status_label(), "human escalation");
    }
}
