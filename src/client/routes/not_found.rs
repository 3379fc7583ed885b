use dioxus::prelude::*;

use crate::client::{components::Page, router::Route};

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    rsx!(
        Title { "Page not found | LearnyBox Map" }
        Page { class: "flex flex-col items-center justify-center gap-4",
            p { class: "text-2xl",
                "Page not found"
            }
            Link {
                to: Route::MembersMap { member: String::new(), register_status: String::new() },
                class: "btn btn-primary",
                "Back to the map"
            }
        }
    )
}
