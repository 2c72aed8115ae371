use std::rc::Rc;

use log::{info, Level};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Document};

mod config;
mod dom;
mod remote_config;
mod pricing {
    pub mod binding;
    pub mod checkout;
    pub mod render;
    pub mod tier;
}
mod scheduling {
    pub mod calendly;
    pub mod poller;
}
mod ui {
    pub mod nav;
    pub mod reveal;
    pub mod smooth_scroll;
}

use pricing::binding::{bind_toggle_events, PricingTable};
use remote_config::{fetch_remote_config, settle};

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn start(document: Document) {
    // Paint with the local defaults before anything touches the network.
    let table = Rc::new(PricingTable::bind(&document));
    table.render_all();
    table.bind_checkout_buttons();
    bind_toggle_events(&document, table.clone());

    ui::nav::bind(&document);
    ui::reveal::bind(&document);
    ui::smooth_scroll::bind(&document);

    spawn_local(async move {
        let Some(config) = settle(fetch_remote_config(&config::config_url()).await) else {
            return;
        };
        info!("Remote config loaded");
        table.apply_config(&config);

        if let Some(url) = config.scheduling_url() {
            let _ = scheduling::calendly::mount_into_page(&document, url);
        }
    });
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    console_log::init_with_level(level).expect("error initializing log");

    info!("Starting pricing page");
    match window().and_then(|w| w.document()) {
        Some(document) => start(document),
        None => log::error!("No document to attach to"),
    }
}
