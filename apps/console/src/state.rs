use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api::ClientError;

pub type AppSignal = Signal<AppState>;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct OperationState {
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    pub operation: OperationState,
}

#[derive(Clone, Copy)]
pub struct AppActions {
    state: AppSignal,
}

impl AppActions {
    pub fn set_operation_error(&self, message: String) {
        let mut state = self.state;
        let mut state = state.write();
        state.operation.error = Some(message);
        state.operation.last_status = None;
        state.operation.context = None;
    }

    pub fn report_client_error(&self, context: &str, err: &ClientError) {
        let mut state = self.state;
        let mut state = state.write();
        state.operation = OperationState {
            error: Some(err.to_string()),
            last_status: err.status().map(|status| status.as_u16()),
            context: Some(context.to_string()),
        };
    }

    pub fn clear_operation(&self) {
        let mut state = self.state;
        state.write().operation = OperationState::default();
    }
}

pub fn use_app_state() -> AppSignal {
    use_context::<AppSignal>()
}

pub fn use_app_actions() -> AppActions {
    let state = use_app_state();
    AppActions { state }
}

pub(crate) fn http_status_advice(status: u16) -> &'static str {
    match status {
        401 => "401 Unauthorized: your session may have expired, sign in again.",
        403 => "403 Forbidden: your role cannot access this data.",
        404 => "404 Not Found: the record may have been removed.",
        _ => "Request failed, please try again shortly.",
    }
}
