use crate::{
    client::map::{geocode::Geocoder, marker::CurrentMemberMarker, view::MapView},
    model::geo::GeoCoordinates,
};

/// Moves the current member marker to a geocoding result.
///
/// A found position is set before the view is focused so listeners see the final coordinates
/// first. A miss clears the marker instead of leaving a stale position behind.
///
/// Returns whether a position was found.
pub fn apply_geocode_result<V: MapView>(
    marker: &mut CurrentMemberMarker<V>,
    result: Option<GeoCoordinates>,
) -> bool {
    match result {
        Some(position) => {
            marker.set(position);
            marker.focus();
            true
        }
        None => {
            marker.clear();
            false
        }
    }
}

/// Geocodes `address` and moves the marker to the result.
pub async fn search_address<V: MapView>(
    geocoder: &Geocoder,
    marker: &mut CurrentMemberMarker<V>,
    address: &str,
) -> bool {
    let result = geocoder.locate(address).await;

    apply_geocode_result(marker, result)
}
