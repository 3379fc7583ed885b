//! Leaflet map of the published members.
//!
//! The browser side only talks to Leaflet through [`view::MapView`], so the marker and search
//! logic can be exercised without a DOM.

pub mod geocode;
pub mod layers;
pub mod leaflet;
pub mod marker;
pub mod search;
pub mod view;

use crate::model::geo::GeoCoordinates;

/// Center of France, where most training members live.
pub const DEFAULT_CENTER: GeoCoordinates = GeoCoordinates::new(46.227638, 2.213749);
pub const DEFAULT_ZOOM: u8 = 5;
pub const MIN_ZOOM: u8 = 2;
pub const MAX_ZOOM: u8 = 14;
/// Zoom used when focusing the current member marker.
pub const MEDIUM_ZOOM: u8 = 8;

/// Base layers offered in the layer control as (label, leaflet-providers name). The first one
/// is shown by default.
pub const BASE_LAYERS: [(&str, &str); 3] = [
    ("OpenStreetMap", "OpenStreetMap.Mapnik"),
    ("Satellite", "Esri.WorldImagery"),
    ("Watercolor", "Stamen.Watercolor"),
];

/// Message asking the embedding page to scroll the map into view.
pub const GO_ON_TOP_MESSAGE: &str = "goOnTop";
