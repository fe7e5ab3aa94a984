use std::time::Duration;

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tracing::warn;

use crate::interop::dom;
use crate::services::kpi::{format_count, CountUp, FRAME};
use crate::{API_CLIENT, APP_CONFIG};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KpiKind {
    PatientsRegistered,
    AppointmentsConfirmed,
    StatesCovered,
}

impl KpiKind {
    pub const ALL: [KpiKind; 3] = [
        Self::PatientsRegistered,
        Self::AppointmentsConfirmed,
        Self::StatesCovered,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            Self::PatientsRegistered => "kpi-patients-registered",
            Self::AppointmentsConfirmed => "kpi-appointments-confirmed",
            Self::StatesCovered => "kpi-states-covered",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PatientsRegistered => "Patients Registered",
            Self::AppointmentsConfirmed => "Appointments Confirmed",
            Self::StatesCovered => "States Covered",
        }
    }

    /// Host-page element carrying a server-rendered value, if any.
    fn seed_id(self) -> String {
        format!("{}-seed", self.element_id())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct KpiDisplay {
    pub values: [String; 3],
}

/// Counters animate from 0 to their targets; unreadable targets show as-is.
pub fn use_public_kpis() -> Signal<KpiDisplay> {
    let mut display = use_signal(|| KpiDisplay {
        values: ["0".to_string(), "0".to_string(), "0".to_string()],
    });

    use_future(move || async move {
        let duration = APP_CONFIG
            .get()
            .map(|config| config.kpi_duration)
            .unwrap_or(Duration::from_millis(2_000));

        let texts = match seeded_texts() {
            Some(texts) => texts,
            None => fetched_texts().await,
        };

        let counters: Vec<Option<CountUp>> = texts
            .iter()
            .map(|text| CountUp::from_text(text, duration))
            .collect();

        for (idx, (text, counter)) in texts.iter().zip(&counters).enumerate() {
            if counter.is_none() && !text.is_empty() {
                warn!(kpi = KpiKind::ALL[idx].element_id(), %text, "counter will not animate");
                display.write().values[idx] = text.clone();
            }
        }

        let frames = counters
            .iter()
            .flatten()
            .map(CountUp::frame_count)
            .max()
            .unwrap_or(0);
        for frame in 1..=frames {
            TimeoutFuture::new(FRAME.as_millis() as u32).await;
            let mut current = display.write();
            for (idx, counter) in counters.iter().enumerate() {
                if let Some(counter) = counter {
                    current.values[idx] = format_count(counter.value_at_frame(frame));
                }
            }
        }
    });

    display
}

fn seeded_texts() -> Option<[String; 3]> {
    let mut texts: [String; 3] = Default::default();
    for (slot, kind) in texts.iter_mut().zip(KpiKind::ALL) {
        let text = dom::element_by_id(&kind.seed_id())?.text_content()?;
        if text.trim().is_empty() {
            return None;
        }
        *slot = text;
    }
    Some(texts)
}

async fn fetched_texts() -> [String; 3] {
    let Some(client) = API_CLIENT.get().cloned() else {
        return Default::default();
    };
    match client.get_public_stats().await {
        Ok(stats) => [
            stats.patients_registered.to_string(),
            stats.appointments_confirmed.to_string(),
            stats.states_covered.to_string(),
        ],
        Err(err) => {
            tracing::error!("Error fetching public stats: {err}");
            Default::default()
        }
    }
}
