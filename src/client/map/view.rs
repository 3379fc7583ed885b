use crate::model::geo::GeoCoordinates;

/// Operations the current member marker needs from the rendered map.
pub trait MapView {
    /// Shows the current member marker at `position`, adding it to the map if hidden.
    fn show_marker(&mut self, position: GeoCoordinates);

    /// Removes the current member marker from the map.
    fn hide_marker(&mut self);

    /// Centers the map on `center` at `zoom`.
    fn set_view(&mut self, center: GeoCoordinates, zoom: u8);

    /// Posts `message` to the embedding page, if the map runs inside a frame.
    fn post_to_parent(&mut self, message: &str);
}
