use dioxus::prelude::*;

use crate::client::router::Route;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_PROVIDERS_JS: &str =
    "https://unpkg.com/leaflet-providers@2.0.0/leaflet-providers.js";

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: LEAFLET_CSS }
        document::Script { src: LEAFLET_JS }
        document::Script { src: LEAFLET_PROVIDERS_JS }

        Router::<Route> {}
    }
}
