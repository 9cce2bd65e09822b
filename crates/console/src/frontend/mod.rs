//! Leptos frontend, compiled for the browser only.

pub mod app;
pub mod platform;

use leptos::*;
use wasm_bindgen::prelude::*;

use riskdesk_client::config::{API_URL_ENV, AUTH_TOKEN_ENV};
use riskdesk_client::{ClientConfig, HttpClient};

use app::{App, ConsoleContext};

/// WASM entry point for the frontend.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = ClientConfig::from_lookup(|key| match key {
        API_URL_ENV => option_env!("RISKDESK_API_URL").map(str::to_string),
        AUTH_TOKEN_ENV => option_env!("RISKDESK_AUTH_TOKEN").map(str::to_string),
        _ => None,
    });
    let client = config.and_then(|config| {
        // A token baked in at build time only stands in when nobody signed in.
        let stored = platform::load_session();
        let auth = if stored.bearer_token().is_some() {
            stored
        } else {
            config.auth_context()
        };
        HttpClient::new(&config, auth.clone()).map(|api| (api, auth))
    });

    match client {
        Ok((api, auth)) => {
            let ctx = ConsoleContext { api, auth };
            mount_to_body(move || view! { <App ctx=ctx/> });
        }
        Err(err) => {
            let message = format!("Console unavailable: {err}");
            mount_to_body(move || view! { <p class="error-banner">{message}</p> });
        }
    }
}
