//! Chart slots: one owned visualization instance per canvas.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::ChartSeries;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("container #{0} not found")]
    MissingContainer(String),
    #[error("chart library unavailable: {0}")]
    LibraryUnavailable(String),
    #[error("js interop failed: {0}")]
    Interop(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

/// Fixed visual encoding of a slot; not part of the data contract.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    pub kind: ChartKind,
    pub dataset_label: Option<&'static str>,
    pub palette: &'static [&'static str],
    pub fill: bool,
    pub tension: Option<f64>,
    pub border_radius: Option<u32>,
}

impl ChartStyle {
    pub fn agent_calls() -> Self {
        Self {
            kind: ChartKind::Bar,
            dataset_label: Some("Number of Calls"),
            palette: &["#1DE9B6", "#A0D2EB"],
            fill: false,
            tension: None,
            border_radius: Some(5),
        }
    }

    pub fn outcomes() -> Self {
        Self {
            kind: ChartKind::Pie,
            dataset_label: None,
            palette: &["#1DE9B6", "#4DD0E1", "#FFD54F", "#FF8A65", "#90A4AE", "#7986CB"],
            fill: false,
            tension: None,
            border_radius: None,
        }
    }

    pub fn call_volume() -> Self {
        Self {
            kind: ChartKind::Line,
            dataset_label: Some("Call Volume"),
            palette: &["#1DE9B6"],
            fill: false,
            tension: Some(0.1),
            border_radius: None,
        }
    }

    pub fn service_histogram() -> Self {
        Self {
            kind: ChartKind::Bar,
            dataset_label: Some("Service Count"),
            palette: &["#4DD0E1"],
            fill: false,
            tension: None,
            border_radius: Some(5),
        }
    }

    /// Chart.js configuration object for `series`.
    pub fn config_for(&self, series: &ChartSeries) -> Value {
        let (labels, data): (Vec<&str>, Vec<f64>) = series.points().unzip();

        let mut dataset = json!({ "data": data });
        if let Some(label) = self.dataset_label {
            dataset["label"] = json!(label);
        }

        match self.kind {
            ChartKind::Line => {
                dataset["fill"] = json!(self.fill);
                dataset["borderColor"] = json!(self.palette.first().copied().unwrap_or("#1DE9B6"));
                if let Some(tension) = self.tension {
                    dataset["tension"] = json!(tension);
                }
            }
            ChartKind::Bar => {
                dataset["backgroundColor"] = palette_value(self.palette);
                dataset["borderWidth"] = json!(1);
                if let Some(radius) = self.border_radius {
                    dataset["borderRadius"] = json!(radius);
                }
            }
            ChartKind::Pie => {
                dataset["backgroundColor"] = palette_value(self.palette);
            }
        }

        json!({
            "type": self.kind,
            "data": { "labels": labels, "datasets": [dataset] },
            "options": { "responsive": true, "maintainAspectRatio": false },
        })
    }
}

fn palette_value(palette: &[&str]) -> Value {
    match palette {
        [single] => json!(single),
        many => json!(many),
    }
}

/// Something that can create and destroy chart instances on a canvas.
pub trait ChartBackend {
    type Handle;

    fn create(&mut self, canvas_id: &str, config: &Value) -> Result<Self::Handle, RenderError>;

    fn destroy(&mut self, handle: Self::Handle);
}

/// Owns the single live chart instance of one canvas.
pub struct ChartSlot<B: ChartBackend> {
    canvas_id: &'static str,
    style: ChartStyle,
    backend: B,
    live: Option<B::Handle>,
    renders: u64,
}

impl<B: ChartBackend> ChartSlot<B> {
    pub fn new(canvas_id: &'static str, style: ChartStyle, backend: B) -> Self {
        Self {
            canvas_id,
            style,
            backend,
            live: None,
            renders: 0,
        }
    }

    #[cfg(test)]
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    #[cfg(test)]
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Replaces whatever the slot shows with `series`.
    pub fn render(&mut self, series: &ChartSeries) -> Result<(), RenderError> {
        if !series.is_aligned() {
            warn!(
                canvas = self.canvas_id,
                labels = series.labels.len(),
                data = series.data.len(),
                "series labels and data differ in length"
            );
        }

        self.clear();
        let config = self.style.config_for(series);
        let handle = self.backend.create(self.canvas_id, &config)?;
        self.live = Some(handle);
        self.renders += 1;
        debug!(canvas = self.canvas_id, renders = self.renders, "chart rendered");
        Ok(())
    }

    pub fn clear(&mut self) {
        if let Some(handle) = self.live.take() {
            self.backend.destroy(handle);
        }
    }
}

impl<B: ChartBackend> Drop for ChartSlot<B> {
    fn drop(&mut self) {
        self.clear();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingBackend;
    use super::*;

    fn series() -> ChartSeries {
        ChartSeries::new(["AI", "Human"], vec![120.0, 30.0])
    }

    #[test]
    fn repeated_renders_keep_one_live_instance() {
        let backend = CountingBackend::default();
        let mut slot = ChartSlot::new("agentCallsChart", ChartStyle::agent_calls(), backend.clone());

        for _ in 0..5 {
            slot.render(&series()).unwrap();
            assert_eq!(backend.live_on("agentCallsChart"), 1);
        }
        assert_eq!(slot.render_count(), 5);
    }

    #[test]
    fn failed_create_leaves_slot_empty() {
        let backend = CountingBackend::default();
        let mut slot = ChartSlot::new("outcomesPieChart", ChartStyle::outcomes(), backend.clone());
        slot.render(&series()).unwrap();

        slot.backend.fail = true;
        let err = slot.render(&series()).unwrap_err();
        assert_eq!(err, RenderError::MissingContainer("outcomesPieChart".into()));
        assert!(!slot.is_live());
        assert_eq!(backend.live_on("outcomesPieChart"), 0);
    }

    #[test]
    fn dropping_a_slot_destroys_its_instance() {
        let backend = CountingBackend::default();
        {
            let mut slot = ChartSlot::new("callVolumeLineChart", ChartStyle::call_volume(), backend.clone());
            slot.render(&series()).unwrap();
        }
        assert_eq!(backend.live_on("callVolumeLineChart"), 0);
    }

    #[test]
    fn config_pairs_labels_with_data() {
        let config = ChartStyle::call_volume().config_for(&ChartSeries::new(
            ["Mon", "Tue", "Wed"],
            vec![10.0, 15.0],
        ));
        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["labels"], json!(["Mon", "Tue"]));
        assert_eq!(config["data"]["datasets"][0]["data"], json!([10.0, 15.0]));
        assert_eq!(config["data"]["datasets"][0]["tension"], json!(0.1));
    }

    #[test]
    fn single_color_palette_is_a_plain_string() {
        let config = ChartStyle::service_histogram().config_for(&series());
        assert_eq!(config["data"]["datasets"][0]["backgroundColor"], "#4DD0E1");
        assert_eq!(config["data"]["datasets"][0]["label"], "Service Count");
    }
}
