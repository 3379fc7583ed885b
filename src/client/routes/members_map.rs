use dioxus::prelude::*;

use crate::{
    client::{
        components::{
            MembersMapPanel, Page, RegisterStatusAlert, RegistrationForm, MAP_ELEMENT_ID,
        },
        map::{leaflet::LeafletView, marker::CurrentMemberMarker},
    },
    model::member::RegisterStatus,
};

#[component]
pub fn MembersMap(member: String, register_status: String) -> Element {
    // Shared by the map and the registration form.
    use_context_provider(|| {
        Signal::new(CurrentMemberMarker::new(LeafletView::new(MAP_ELEMENT_ID)))
    });

    let status = RegisterStatus::parse(&register_status);

    rsx!(
        Title { "Members map | LearnyBox Map" }
        Meta {
            name: "description",
            content: "Find the members of the training on the map."
        }
        Page { class: "flex flex-col items-center gap-4",
            if let Some(status) = status {
                RegisterStatusAlert { status }
            }
            MembersMapPanel { member: member.clone() }
            if !member.is_empty() {
                RegistrationForm { member: member.clone() }
            }
        }
    )
}
