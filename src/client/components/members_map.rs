use dioxus::prelude::*;
#[cfg(feature = "web")]
use dioxus_logger::tracing;

use crate::{
    client::map::{
        layers::MapLayers,
        leaflet::{LeafletView, MarkerEvent},
        marker::CurrentMemberMarker,
    },
    model::member::RegisterStatus,
};

/// Id of the element Leaflet renders into.
pub const MAP_ELEMENT_ID: &str = "members-map";

#[component]
pub fn RegisterStatusAlert(status: RegisterStatus) -> Element {
    let message = match status {
        RegisterStatus::Created => "Welcome aboard, you are now on the members map!",
        RegisterStatus::Updated => "Your entry on the members map has been updated.",
    };

    rsx!(
        div { role: "alert", class: "alert alert-success w-full max-w-[1440px]",
            span { "{message}" }
        }
    )
}

#[component]
pub fn MembersMapPanel(member: String) -> Element {
    #[cfg(feature = "web")]
    let members_map = use_resource(use_reactive!(|(member,)| async move {
        crate::client::util::api::get_members_map(&member).await
    }));

    #[cfg(feature = "web")]
    let content = match &*members_map.read() {
        Some(Ok(members_map)) => rsx!(MembersMapCanvas {
            layers: MapLayers::from_members_map(members_map)
        }),
        Some(Err(err)) => {
            tracing::error!("{}", err);

            rsx!(div { role: "alert", class: "alert alert-error",
                "The members map could not be loaded, please try again later."
            })
        }
        None => rsx!(div { class: "skeleton h-[70vh] w-full" }),
    };

    #[cfg(not(feature = "web"))]
    let content = rsx!(div { class: "skeleton h-[70vh] w-full" });

    rsx!(
        div {
            class: "card shadow-sm w-full max-w-[1440px]",
            div {
                class: "card-body",
                h2 {
                    class: "card-title",
                    "Members map"
                }
                {content}
            }
        }
    )
}

#[component]
fn MembersMapCanvas(layers: MapLayers) -> Element {
    let mut marker = use_context::<Signal<CurrentMemberMarker<LeafletView>>>();

    rsx!(
        div {
            id: MAP_ELEMENT_ID,
            class: "h-[70vh] w-full rounded-box",
            onmounted: move |_| {
                let layers = layers.clone();

                async move {
                    let mut events = LeafletView::new(MAP_ELEMENT_ID).init(&layers);

                    // A position filled in by the form wins over the published one.
                    let stored = marker.peek().position();
                    if let Some(position) = stored.or(layers.current_member_position()) {
                        marker.write().set(position);
                    }

                    while let Ok(event) = events.recv::<MarkerEvent>().await {
                        event.apply(&mut *marker.write());
                    }
                }
            },
        }
    )
}
