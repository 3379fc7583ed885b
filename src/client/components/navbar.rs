use dioxus::prelude::*;

pub use crate::client::router::Route;

#[component]
pub fn Navbar() -> Element {
    rsx! {
        div {
            class: "navbar bg-base-200 fixed z-[1000]",
            div {
                class: "navbar-start",
                Link {
                    to: Route::MembersMap { member: String::new(), register_status: String::new() },
                    p { class: "text-xl",
                        "LearnyBox Map"
                    }
                }
            }
            div {
                class: "navbar-end",
                a { href: "/api/docs",
                    button {
                        class: "btn btn-outline",
                        "API Docs"
                    }
                }
            }
        }

        Outlet::<Route> {}
    }
}
