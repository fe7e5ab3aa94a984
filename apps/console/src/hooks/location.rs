use dioxus::prelude::*;

use crate::models::RegionOption;
use crate::services::location::{resolve, CascadeProfile, DependentSelector};
use crate::state::use_app_actions;
use crate::API_CLIENT;

#[derive(Clone, Copy)]
pub struct LocationCascade {
    pub selector: Signal<DependentSelector>,
}

impl LocationCascade {
    /// Call from the parent selector's change handler.
    pub fn parent_changed(&self, region_id: String) {
        let mut selector = self.selector;
        let Some(client) = API_CLIENT.get().cloned() else {
            let ticket = selector.write().begin(&region_id);
            if let Some(ticket) = ticket {
                selector
                    .write()
                    .complete(ticket, Err::<Vec<RegionOption>, _>("API client is not initialised"));
            }
            return;
        };

        spawn(async move {
            resolve(selector, &client, &region_id).await;
        });
    }
}

pub fn use_location_cascade(profile: CascadeProfile) -> LocationCascade {
    let selector = use_signal(|| DependentSelector::new(profile));
    LocationCascade { selector }
}

/// Parent (state) options, loaded once per mount.
pub fn use_states() -> Resource<Vec<RegionOption>> {
    let actions = use_app_actions();
    use_resource(move || async move {
        let Some(client) = API_CLIENT.get().cloned() else {
            return Vec::new();
        };
        match client.get_states().await {
            Ok(states) => states,
            Err(err) => {
                actions.report_client_error("Loading states", &err);
                Vec::new()
            }
        }
    })
}
