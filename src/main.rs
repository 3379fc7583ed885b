#![allow(non_snake_case)]

mod client;

use learnybox_map::model;
#[cfg(feature = "server")]
use learnybox_map::server;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(client::App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use std::sync::Arc;

        use dioxus_logger::tracing;

        use crate::server::{config::Config, model::app::AppState, startup};

        dotenvy::dotenv().ok();
        let config = match Config::from_env() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        };

        let transient_store = startup::connect_to_transient_store(&config).await?;
        let learnybox_client =
            startup::build_learnybox_client(&config, Arc::new(transient_store))?;
        let db = startup::connect_to_database(&config).await?;

        tracing::info!(
            training_id = config.learnybox_training_id,
            "Starting members map server"
        );

        let app_state = AppState::from((
            db,
            learnybox_client,
            config.learnybox_training_id,
            config.consent_text.clone(),
            config.nonce_secret.clone(),
        ));

        let mut router = dioxus::server::router(client::App);
        let server_routes = server::router::routes().with_state(app_state);
        router = router.merge(server_routes);

        Ok(router)
    })
}
