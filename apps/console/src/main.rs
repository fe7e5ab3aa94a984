#![allow(non_snake_case)]

mod api;
mod config;
mod hooks;
mod interop;
mod models;
mod services;
mod state;
mod ui;

use api::{ClientError, OutreachClient};
use config::AppConfig;
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use once_cell::sync::OnceCell;
use state::AppState;
use tracing::{error, info};
use ui::chatbot::Chatbot;
use ui::dashboard::Dashboard;
use ui::home::Home;
use ui::layout::Layout;
use ui::registration::RegisterPatient;
use ui::volunteer_queue::VolunteerQueue;

pub(crate) static APP_CONFIG: OnceCell<AppConfig> = OnceCell::new();
pub(crate) static API_CLIENT: OnceCell<OutreachClient> = OnceCell::new();

fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    bootstrap_infrastructure();
    launch(App);
}

fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = dioxus_logger::init(tracing::Level::INFO);
    });
}

fn bootstrap_infrastructure() {
    let config = AppConfig::from_env();
    info!(
        base_url = %config.api_base_url,
        production = config.is_production(),
        "configuration loaded"
    );
    let _ = APP_CONFIG.set(config.clone());

    match OutreachClient::new(config) {
        Ok(client) => {
            let _ = API_CLIENT.set(client);
            info!("outreach client initialized");
        }
        Err(err) => {
            report_client_error("failed to initialize outreach client", &err);
        }
    }
}

fn report_client_error(context: &str, err: &ClientError) {
    error!(%context, ?err, status = ?err.status(), "api bootstrap error");
}

#[component]
fn App() -> Element {
    let app_state = use_signal(AppState::default);

    use_context_provider(|| app_state);

    rsx! {
        Router::<Route> {}
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
pub(crate) enum Route {
    #[layout(Layout)]
    #[route("/")]
    Home {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/register-patient")]
    RegisterPatient {},
    #[route("/volunteer-queue")]
    VolunteerQueue {},
    #[route("/chatbot")]
    Chatbot {},
}
