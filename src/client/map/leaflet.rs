//! Leaflet bindings.
//!
//! Leaflet and leaflet-providers are loaded by the app shell. Each map registers itself in
//! `window.learnyboxMaps` under its element id so later scripts can reach it.

use dioxus::prelude::*;
use serde::Deserialize;
use serde_json::json;

use crate::{
    client::map::{
        layers::MapLayers, marker::CurrentMemberMarker, view::MapView, BASE_LAYERS,
        DEFAULT_CENTER, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM,
    },
    model::geo::GeoCoordinates,
};

/// Interaction with the current member marker, sent back by the map script.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MarkerEvent {
    /// Dropped at a new position
    Dragged { latitude: f64, longitude: f64 },
    Clicked,
}

impl MarkerEvent {
    /// Moves the marker where it was dropped, or focuses the map on it when clicked.
    pub fn apply<V: MapView>(self, marker: &mut CurrentMemberMarker<V>) {
        match self {
            Self::Dragged {
                latitude,
                longitude,
            } => marker.set(GeoCoordinates::new(latitude, longitude)),
            Self::Clicked => marker.focus(),
        }
    }
}

/// Map rendered by Leaflet inside the element with id `map_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafletView {
    map_id: String,
}

impl LeafletView {
    pub fn new(map_id: &str) -> Self {
        Self {
            map_id: map_id.to_string(),
        }
    }

    /// Creates the map, replacing a previous one on the same element.
    ///
    /// The returned handle receives a [`MarkerEvent`] every time the current member marker is
    /// dragged or clicked.
    pub fn init(&self, layers: &MapLayers) -> document::Eval {
        document::eval(&init_script(&self.map_id, layers))
    }

    fn run(&self, script: String) {
        let _ = document::eval(&script);
    }
}

impl MapView for LeafletView {
    fn show_marker(&mut self, position: GeoCoordinates) {
        self.run(show_marker_script(&self.map_id, position));
    }

    fn hide_marker(&mut self) {
        self.run(with_map(
            &self.map_id,
            "m.map.removeLayer(m.currentMarker);",
        ));
    }

    fn set_view(&mut self, center: GeoCoordinates, zoom: u8) {
        self.run(with_map(
            &self.map_id,
            &format!(
                "m.map.setView([{}, {}], {});",
                center.latitude, center.longitude, zoom
            ),
        ));
    }

    fn post_to_parent(&mut self, message: &str) {
        self.run(format!(
            "if (window.parent !== window) {{ window.parent.postMessage({}, '*'); }}",
            json!(message)
        ));
    }
}

fn with_map(map_id: &str, body: &str) -> String {
    format!(
        "const m = (window.learnyboxMaps || {{}})[{}]; if (!m) {{ return; }} {}",
        json!(map_id),
        body
    )
}

pub fn show_marker_script(map_id: &str, position: GeoCoordinates) -> String {
    with_map(
        map_id,
        &format!(
            "m.currentMarker.setLatLng([{}, {}]); if (!m.map.hasLayer(m.currentMarker)) {{ m.currentMarker.addTo(m.map); }}",
            position.latitude, position.longitude
        ),
    )
}

pub fn init_script(map_id: &str, layers: &MapLayers) -> String {
    let options = json!({
        "id": map_id,
        "center": [DEFAULT_CENTER.latitude, DEFAULT_CENTER.longitude],
        "zoom": DEFAULT_ZOOM,
        "minZoom": MIN_ZOOM,
        "maxZoom": MAX_ZOOM,
        "baseLayers": BASE_LAYERS,
        "layers": layers,
    });

    format!(
        r#"const data = {options};
const maps = window.learnyboxMaps = window.learnyboxMaps || {{}};
if (maps[data.id]) {{ maps[data.id].map.remove(); }}
const map = L.map(data.id, {{ center: data.center, zoom: data.zoom, minZoom: data.minZoom, maxZoom: data.maxZoom }});
const icon = (className) => L.divIcon({{ className: 'member-marker ' + className, iconSize: [24, 24] }});
const marker = (m) => L.marker([m.latitude, m.longitude], {{ icon: icon(m.icon_class) }}).bindPopup(m.popup);
const baseLayers = {{}};
data.baseLayers.forEach(([label, provider], index) => {{
  const layer = L.tileLayer.provider(provider);
  baseLayers[label] = layer;
  if (index === 0) {{ layer.addTo(map); }}
}});
const overlays = {{}};
data.layers.categories.forEach((category) => {{
  const group = L.layerGroup(category.markers.map(marker)).addTo(map);
  overlays['<span class="' + category.icon_class + '"></span> ' + category.name] = group;
}});
data.layers.uncategorized.forEach((m) => marker(m).addTo(map));
L.control.layers(baseLayers, overlays).addTo(map);
const current = data.layers.current_member;
const currentMarker = L.marker(data.center, {{ draggable: true, icon: icon(current ? current.icon_class : 'cat-current') }});
if (current) {{ currentMarker.bindPopup(current.popup); }}
currentMarker.on('dragend', () => {{
  const position = currentMarker.getLatLng();
  dioxus.send({{ event: 'dragged', latitude: position.lat, longitude: position.lng }});
}});
currentMarker.on('click', () => dioxus.send({{ event: 'clicked' }}));
maps[data.id] = {{ map, currentMarker }};
await new Promise(() => {{}});"#
    )
}
