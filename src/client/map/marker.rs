use crate::{
    client::map::{view::MapView, DEFAULT_CENTER, GO_ON_TOP_MESSAGE, MEDIUM_ZOOM},
    model::geo::GeoCoordinates,
};

type ChangeListener = Box<dyn FnMut(&str)>;

/// Handle of a change listener, used to remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Draggable marker of the member filling the registration form.
///
/// The marker is bound to the form's coordinate field: every change of position rewrites the
/// field as `"lat, lng"` (or empty once cleared) before listeners are notified.
pub struct CurrentMemberMarker<V: MapView> {
    view: V,
    position: Option<GeoCoordinates>,
    field: String,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener: u64,
}

impl<V: MapView> CurrentMemberMarker<V> {
    /// Creates a hidden marker.
    pub fn new(view: V) -> Self {
        Self {
            view,
            position: None,
            field: String::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Creates a marker positioned from a stored `"lat, lng"` value.
    ///
    /// The marker stays hidden when the value doesn't parse. No change is emitted.
    pub fn from_field(view: V, field: &str) -> Self {
        let mut marker = Self::new(view);

        if let Some(position) = GeoCoordinates::parse(field) {
            marker.position = Some(position);
            marker.field = position.to_string();
            marker.view.show_marker(position);
        }

        marker
    }

    /// Registers a listener called with the coordinate field after every change.
    ///
    /// The listener lives as long as the marker unless removed with the returned handle.
    pub fn on_change(&mut self, listener: impl FnMut(&str) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));

        id
    }

    /// Removes a listener registered with [`on_change`](Self::on_change).
    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Shows the marker at `position`, or moves it there.
    pub fn set(&mut self, position: GeoCoordinates) {
        self.position = Some(position);
        self.field = position.to_string();
        self.view.show_marker(position);

        self.notify();
    }

    /// Hides the marker and empties the coordinate field.
    pub fn clear(&mut self) {
        self.position = None;
        self.field.clear();
        self.view.hide_marker();

        self.notify();
    }

    /// Centers the map on the marker at [`MEDIUM_ZOOM`], placing it on [`DEFAULT_CENTER`]
    /// first if it is hidden, then asks the embedding page to scroll to the map.
    pub fn focus(&mut self) {
        let position = match self.position {
            Some(position) => position,
            None => {
                self.set(DEFAULT_CENTER);
                DEFAULT_CENTER
            }
        };

        self.view.set_view(position, MEDIUM_ZOOM);
        self.view.post_to_parent(GO_ON_TOP_MESSAGE);
    }

    /// Value of the bound coordinate field.
    pub fn get(&self) -> &str {
        &self.field
    }

    pub fn position(&self) -> Option<GeoCoordinates> {
        self.position
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.field);
        }
    }
}
