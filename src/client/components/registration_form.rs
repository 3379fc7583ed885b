use std::{cell::Cell, rc::Rc};

use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaLocationDot, FaMapLocationDot};
use dioxus_free_icons::Icon;
#[cfg(feature = "web")]
use dioxus_logger::tracing;

use crate::{
    client::map::{
        geocode::Geocoder,
        leaflet::LeafletView,
        marker::{CurrentMemberMarker, ListenerId},
        search::apply_geocode_result,
    },
    model::{
        geo::GeoCoordinates,
        member::{CategoryDto, RegistrationFormDto, RegistrationPageDto, RegistrationRequest},
    },
};

#[component]
pub fn RegistrationForm(member: String) -> Element {
    #[cfg(feature = "web")]
    let page = use_resource(use_reactive!(|(member,)| async move {
        crate::client::util::api::get_registration_page(&member).await
    }));

    #[cfg(feature = "web")]
    let content = match &*page.read() {
        Some(Ok(Some(page))) => rsx!(RegistrationFields { page: page.clone() }),
        Some(Ok(None)) => rsx!(div { role: "alert", class: "alert alert-warning",
            "We couldn't find you among the members of the training. Please use the email address of your LearnyBox account."
        }),
        Some(Err(err)) => {
            tracing::error!("{}", err);

            rsx!(div { role: "alert", class: "alert alert-error",
                "The registration form could not be loaded, please try again later."
            })
        }
        None => rsx!(div { class: "skeleton h-96 w-full" }),
    };

    #[cfg(not(feature = "web"))]
    let content = rsx!(div { class: "skeleton h-96 w-full" });

    rsx!(
        div {
            class: "card shadow-sm w-full max-w-[1440px]",
            div {
                class: "card-body",
                {content}
            }
        }
    )
}

fn field_error(form: &RegistrationFormDto, field: &str) -> Option<&'static str> {
    form.errors.get(field).map(|error| error.message())
}

fn to_request(form: &RegistrationFormDto, nonce: &str) -> RegistrationRequest {
    RegistrationRequest {
        member: form.member.clone(),
        name: form.name.clone(),
        category: form.category.clone(),
        geo_coordinates: form.geo_coordinates.clone(),
        address: form.address.clone(),
        description: form.description.clone(),
        consent: form.consent.then(|| "on".to_string()),
        nonce: nonce.to_string(),
    }
}

#[component]
fn RegistrationFields(page: RegistrationPageDto) -> Element {
    let mut marker = use_context::<Signal<CurrentMemberMarker<LeafletView>>>();
    let mut form = use_signal(|| page.form.clone());
    let mut nonce = use_signal(|| page.nonce.clone());
    let mut address_not_found = use_signal(|| false);
    let mut searching = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let mut submit_error = use_signal(|| None::<String>);

    // The marker outlives this form, the binding is removed when the form unmounts.
    let listener = use_hook(|| Rc::new(Cell::new(None::<ListenerId>)));

    use_effect({
        let listener = listener.clone();

        move || {
            let mut marker = marker.write();
            let id = marker.on_change(move |field| {
                if let Ok(mut form) = form.try_write() {
                    form.geo_coordinates = field.to_string();
                }
            });
            listener.set(Some(id));

            if let Some(position) = GeoCoordinates::parse(&form.peek().geo_coordinates) {
                marker.set(position);
            }
        }
    });

    use_drop(move || {
        if let (Some(id), Ok(mut marker)) = (listener.take(), marker.try_write()) {
            marker.remove_listener(id);
        }
    });

    let on_locate = move |_| async move {
        searching.set(true);

        let address = form.peek().address.clone();
        let result = Geocoder::default().locate(&address).await;
        let found = apply_geocode_result(&mut *marker.write(), result);

        address_not_found.set(!found);
        searching.set(false);
    };

    let on_coordinates_change = move |event: FormEvent| {
        let value = event.value();

        match GeoCoordinates::parse(&value) {
            Some(position) => marker.write().set(position),
            None if value.trim().is_empty() => marker.write().clear(),
            None => (),
        }
    };

    let on_submit = move |event: FormEvent| async move {
        event.prevent_default();
        submitting.set(true);
        submit_error.set(None);

        let request = to_request(&form.peek(), &nonce.peek());

        #[cfg(feature = "web")]
        {
            use crate::client::{router::Route, util::api::Submission};

            match crate::client::util::api::submit_registration(&request).await {
                Ok(Submission::Registered { member, status }) => {
                    navigator().push(Route::MembersMap {
                        member,
                        register_status: status.as_str().to_string(),
                    });
                }
                Ok(Submission::Rejected(page)) => {
                    form.set(page.form);
                    nonce.set(page.nonce);
                }
                Err(err) => {
                    tracing::error!("{}", err);
                    submit_error.set(Some(
                        "Your registration could not be saved, please reload the page and try again."
                            .to_string(),
                    ));
                }
            }
        }

        #[cfg(not(feature = "web"))]
        let _ = request;

        submitting.set(false);
    };

    let current = form.read().clone();
    let categories: Vec<CategoryDto> = page.categories.clone();
    let title = if page.is_registered {
        "Update your entry on the map"
    } else {
        "Appear on the members map"
    };

    rsx!(
        h2 { class: "card-title", "{title}" }
        form {
            class: "flex flex-col gap-4",
            onsubmit: on_submit,
            fieldset { class: "fieldset",
                legend { class: "fieldset-legend", "Name" }
                input {
                    class: "input w-full",
                    r#type: "text",
                    name: "name",
                    value: "{current.name}",
                    oninput: move |event| form.write().name = event.value(),
                }
                if let Some(error) = field_error(&current, "name") {
                    p { class: "label text-error", "{error}" }
                }
            }
            if !categories.is_empty() {
                fieldset { class: "fieldset",
                    legend { class: "fieldset-legend", "Category" }
                    select {
                        class: "select w-full",
                        name: "category",
                        value: "{current.category}",
                        onchange: move |event| form.write().category = event.value(),
                        option { value: "", "Choose a category" }
                        for category in categories.iter() {
                            option {
                                value: "{category.id}",
                                selected: current.category == category.id.to_string(),
                                "{category.name}"
                            }
                        }
                    }
                    if let Some(error) = field_error(&current, "category") {
                        p { class: "label text-error", "{error}" }
                    }
                }
            }
            fieldset { class: "fieldset",
                legend { class: "fieldset-legend", "Address" }
                div { class: "join w-full",
                    input {
                        class: "input join-item w-full",
                        r#type: "text",
                        name: "address",
                        value: "{current.address}",
                        oninput: move |event| form.write().address = event.value(),
                    }
                    button {
                        class: "btn btn-secondary join-item",
                        r#type: "button",
                        disabled: searching(),
                        onclick: on_locate,
                        Icon {
                            width: 16,
                            height: 16,
                            icon: FaLocationDot
                        }
                        "Locate"
                    }
                }
                if address_not_found() {
                    p { class: "label text-warning",
                        "This address could not be found, place the marker on the map instead."
                    }
                }
            }
            fieldset { class: "fieldset",
                legend { class: "fieldset-legend", "Position on the map" }
                div { class: "join w-full",
                    input {
                        class: "input join-item w-full",
                        r#type: "text",
                        name: "geo_coordinates",
                        placeholder: "48.8566, 2.3522",
                        value: "{current.geo_coordinates}",
                        oninput: move |event| form.write().geo_coordinates = event.value(),
                        onchange: on_coordinates_change,
                    }
                    button {
                        class: "btn btn-outline join-item",
                        r#type: "button",
                        onclick: move |_| marker.write().focus(),
                        Icon {
                            width: 16,
                            height: 16,
                            icon: FaMapLocationDot
                        }
                        "Show on map"
                    }
                }
                p { class: "label", "Drag the marker on the map to adjust your position." }
                if let Some(error) = field_error(&current, "geo_coordinates") {
                    p { class: "label text-error", "{error}" }
                }
            }
            fieldset { class: "fieldset",
                legend { class: "fieldset-legend", "Description" }
                textarea {
                    class: "textarea w-full h-32",
                    name: "description",
                    value: "{current.description}",
                    oninput: move |event| form.write().description = event.value(),
                }
            }
            fieldset { class: "fieldset",
                label { class: "label gap-2",
                    input {
                        class: "checkbox",
                        r#type: "checkbox",
                        name: "consent",
                        checked: current.consent,
                        onchange: move |event| form.write().consent = event.checked(),
                    }
                    span { dangerous_inner_html: "{page.consent_text}" }
                }
                if let Some(error) = field_error(&current, "consent") {
                    p { class: "label text-error", "{error}" }
                }
            }
            if let Some(error) = submit_error() {
                div { role: "alert", class: "alert alert-error", "{error}" }
            }
            button {
                class: "btn btn-primary self-end",
                r#type: "submit",
                disabled: submitting(),
                if page.is_registered { "Update" } else { "Register" }
            }
        }
    )
}
