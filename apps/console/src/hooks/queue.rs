use dioxus::prelude::*;

use crate::models::EscalatedCase;
use crate::state::use_app_actions;
use crate::API_CLIENT;

pub fn use_volunteer_queue() -> Resource<Vec<EscalatedCase>> {
    let actions = use_app_actions();
    use_resource(move || async move {
        let Some(client) = API_CLIENT.get().cloned() else {
            return Vec::new();
        };
        match client.get_volunteer_queue().await {
            Ok(cases) => cases,
            Err(err) => {
                actions.report_client_error("Loading volunteer queue", &err);
                Vec::new()
            }
        }
    })
}
