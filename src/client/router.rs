use dioxus::prelude::*;

use crate::client::{
    components::Navbar,
    routes::{MembersMap, NotFound},
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]

    #[route("/?:member&:register_status")]
    MembersMap { member: String, register_status: String },

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
