use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::interop::chartjs::ChartJsBackend;
use crate::interop::leaflet::LeafletBackend;
use crate::services::dashboard::{
    fetch_dashboard, fetch_histogram, DashboardSlots, RefreshGate, RefreshReport, MAP_CONTAINER,
};
use crate::services::filters::FilterState;
use crate::services::map::{MapSlot, RegionTable};
use crate::state::use_app_actions;
use crate::API_CLIENT;

pub type WebDashboardSlots = DashboardSlots<ChartJsBackend, LeafletBackend>;

#[derive(Clone, Copy)]
pub struct DashboardHandle {
    pub loading: Signal<bool>,
    pub last_report: Signal<Option<RefreshReport>>,
}

fn build_slots() -> WebDashboardSlots {
    let table = RegionTable::nigeria();
    let map = match table.validate() {
        Ok(()) => Some(MapSlot::new(MAP_CONTAINER, table, LeafletBackend)),
        Err(err) => {
            warn!("region table rejected, map disabled: {err}");
            None
        }
    };
    DashboardSlots::new(ChartJsBackend, map)
}

/// Refreshes every dashboard slot on mount and whenever `filter` changes.
pub fn use_dashboard(filter: Signal<FilterState>) -> DashboardHandle {
    let actions = use_app_actions();
    let mut slots = use_signal(build_slots);
    let mut loading = use_signal(|| false);
    let mut last_report = use_signal(|| None::<RefreshReport>);
    let mut gate = use_signal(RefreshGate::default);

    use_effect(move || {
        let filter = filter();
        let ticket = gate.write().begin();
        spawn(async move {
            let Some(client) = API_CLIENT.get().cloned() else {
                actions.set_operation_error("API client is not initialised".into());
                return;
            };

            loading.set(true);
            let payload = fetch_dashboard(&client, &filter).await;
            let histogram = fetch_histogram(&client, &filter).await;

            if !gate.peek().is_current(ticket) {
                debug!(?filter, "dropping superseded dashboard refresh");
                return;
            }

            let report = slots
                .write()
                .apply_refresh(payload.as_ref(), histogram.as_ref());
            debug!(?report, "dashboard refreshed");
            last_report.set(Some(report));
            loading.set(false);
        });
    });

    DashboardHandle {
        loading,
        last_report,
    }
}
