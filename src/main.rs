//! Fills a sample service configuration from its declared defaults and prints
//! it as JSON.
//!
//! Usage: `defaultbox [settings-file]`. Settings may also come from
//! `DEFAULTBOX_*` environment variables; `RUST_LOG` overrides the log filter.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use defaultbox::{DefaultBox, Settings};

defaultbox::record! {
    #[derive(Debug, Default, Serialize)]
    pub struct ServiceConfig {
        pub name: String => { default: "defaultbox-demo", env: "staging" },
        pub port: u16 => { default: "8080", env: "9090" },
        pub workers: u8 => { default: "4" },
        pub verbose: bool => { default: "f", env: "t" },
        pub ratio: f32 => { default: "0.75" },
        pub peers: Vec<String> => { default: "[alpha, beta, gamma]" },
        pub limits: BTreeMap<String, u32> => { default: "{read: 100, write: 20}" },
        pub retries: Option<u8> => { default: "3" },
        pub owner: String,
        secret: String => { default: "never-filled" },
    }
}

fn main() {
    let path = std::env::args().nth(1);
    let settings = match Settings::load(path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = ServiceConfig::default();
    let mut engine = match DefaultBox::with_settings(&mut config, &settings) {
        Ok(engine) => engine,
        Err(e) => {
            warn!(error = %e, "rejected settings");
            std::process::exit(1);
        }
    };
    let report = engine.fill_report();
    info!(
        tag_key = engine.tag_key(),
        filled = report.filled().count(),
        unresolved = report.unresolved().count(),
        "defaults applied"
    );
    for field in report.unresolved() {
        warn!(field, "default not applied");
    }

    let config = engine.into_inner();
    match serde_json::to_string_pretty(config) {
        Ok(json) => println!("{json}"),
        Err(e) => warn!(error = %e, "could not serialize configuration"),
    }
}
