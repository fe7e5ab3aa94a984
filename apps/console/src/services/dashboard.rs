use std::fmt::{self, Display};

use tracing::{debug, error};

use crate::models::{ChartSeries, DashboardPayload};
use crate::services::charts::{ChartBackend, ChartSlot, ChartStyle};
use crate::services::filters::FilterState;
use crate::services::map::{MapBackend, MapSlot};

pub const BAR_CANVAS: &str = "agentCallsChart";
pub const PIE_CANVAS: &str = "outcomesPieChart";
pub const LINE_CANVAS: &str = "callVolumeLineChart";
pub const HISTOGRAM_CANVAS: &str = "serviceHistogramChart";
pub const MAP_CONTAINER: &str = "patientMap";

#[allow(async_fn_in_trait)]
pub trait DashboardSource {
    type Error: Display;

    async fn dashboard_data(&self, filter: &FilterState) -> Result<DashboardPayload, Self::Error>;

    async fn histogram_data(&self, filter: &FilterState) -> Result<ChartSeries, Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SlotId {
    Bar,
    Pie,
    Line,
    Histogram,
    Map,
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Line => "line",
            Self::Histogram => "histogram",
            Self::Map => "map",
        };
        f.write_str(name)
    }
}

/// What one refresh changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub updated: Vec<SlotId>,
    pub failed: Vec<SlotId>,
}

impl RefreshReport {
    #[cfg(test)]
    pub fn touched(&self, slot: SlotId) -> bool {
        self.updated.contains(&slot)
    }

    fn record(&mut self, slot: SlotId, result: Result<(), String>) {
        match result {
            Ok(()) => self.updated.push(slot),
            Err(err) => {
                error!(%slot, "render failed: {err}");
                self.failed.push(slot);
            }
        }
    }
}

/// Issues one ticket per refresh; only the newest may touch the slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshGate {
    generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshTicket(u64);

impl RefreshGate {
    pub fn begin(&mut self) -> RefreshTicket {
        self.generation += 1;
        RefreshTicket(self.generation)
    }

    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        ticket.0 == self.generation
    }
}

/// Every visualization slot on the dashboard page.
pub struct DashboardSlots<C: ChartBackend, M: MapBackend> {
    pub bar: ChartSlot<C>,
    pub pie: ChartSlot<C>,
    pub line: ChartSlot<C>,
    pub histogram: ChartSlot<C>,
    pub map: Option<MapSlot<M>>,
}

impl<C, M> DashboardSlots<C, M>
where
    C: ChartBackend + Clone,
    M: MapBackend,
{
    pub fn new(charts: C, map: Option<MapSlot<M>>) -> Self {
        Self {
            bar: ChartSlot::new(BAR_CANVAS, ChartStyle::agent_calls(), charts.clone()),
            pie: ChartSlot::new(PIE_CANVAS, ChartStyle::outcomes(), charts.clone()),
            line: ChartSlot::new(LINE_CANVAS, ChartStyle::call_volume(), charts.clone()),
            histogram: ChartSlot::new(HISTOGRAM_CANVAS, ChartStyle::service_histogram(), charts),
            map,
        }
    }
}

impl<C: ChartBackend, M: MapBackend> DashboardSlots<C, M> {
    /// Renders each series present in `payload`; absent keys leave their slot alone.
    pub fn apply(&mut self, payload: &DashboardPayload) -> RefreshReport {
        let mut report = RefreshReport::default();

        if let Some(series) = payload.bar_chart.as_ref() {
            report.record(SlotId::Bar, self.bar.render(series).map_err(|e| e.to_string()));
        }
        if let Some(series) = payload.pie_chart.as_ref() {
            report.record(SlotId::Pie, self.pie.render(series).map_err(|e| e.to_string()));
        }
        if let Some(series) = payload.line_chart.as_ref() {
            report.record(SlotId::Line, self.line.render(series).map_err(|e| e.to_string()));
        }
        if let (Some(counts), Some(map)) = (payload.map_data.as_ref(), self.map.as_mut()) {
            report.record(
                SlotId::Map,
                map.render(counts).map(|_| ()).map_err(|e| e.to_string()),
            );
        }

        debug!(updated = ?report.updated, failed = ?report.failed, "dashboard refresh applied");
        report
    }

    /// Applies the results of one refresh; a failed fetch arrives as `None`.
    pub fn apply_refresh(
        &mut self,
        payload: Option<&DashboardPayload>,
        histogram: Option<&ChartSeries>,
    ) -> RefreshReport {
        let mut report = payload.map(|payload| self.apply(payload)).unwrap_or_default();
        if let Some(series) = histogram {
            let histogram = self.apply_histogram(series);
            report.updated.extend(histogram.updated);
            report.failed.extend(histogram.failed);
        }
        report
    }

    pub fn apply_histogram(&mut self, series: &ChartSeries) -> RefreshReport {
        let mut report = RefreshReport::default();
        report.record(
            SlotId::Histogram,
            self.histogram.render(series).map_err(|e| e.to_string()),
        );
        report
    }
}

/// Fetches the dashboard payload; failures are logged and yield `None`.
pub async fn fetch_dashboard<S>(source: &S, filter: &FilterState) -> Option<DashboardPayload>
where
    S: DashboardSource,
{
    match source.dashboard_data(filter).await {
        Ok(payload) => Some(payload),
        Err(err) => {
            error!("Error fetching dashboard data: {err}");
            None
        }
    }
}

pub async fn fetch_histogram<S>(source: &S, filter: &FilterState) -> Option<ChartSeries>
where
    S: DashboardSource,
{
    match source.histogram_data(filter).await {
        Ok(series) => Some(series),
        Err(err) => {
            error!("Error fetching histogram data: {err}");
            None
        }
    }
}
