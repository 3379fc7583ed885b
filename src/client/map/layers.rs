use std::collections::HashMap;

use serde::Serialize;

use crate::model::{
    geo::GeoCoordinates,
    member::{MapMemberDto, MembersMapDto},
};

/// Icon class of members without a known category.
pub const UNCATEGORIZED_ICON_CLASS: &str = "cat-0";

/// A static marker of a published member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub latitude: f64,
    pub longitude: f64,
    pub icon_class: String,
    pub popup: String,
}

/// A togglable overlay grouping the members of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryLayer {
    pub name: String,
    pub icon_class: String,
    pub markers: Vec<MarkerSpec>,
}

/// Markers of the map, split the way they are added to Leaflet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapLayers {
    pub categories: Vec<CategoryLayer>,
    /// Members whose category is unset or unknown, added straight to the map
    pub uncategorized: Vec<MarkerSpec>,
    /// Entry of the member viewing the map, shown through the current member marker
    pub current_member: Option<MarkerSpec>,
}

impl MapLayers {
    pub fn from_members_map(members_map: &MembersMapDto) -> Self {
        let mut categories: Vec<CategoryLayer> = members_map
            .categories
            .iter()
            .enumerate()
            .map(|(index, category)| CategoryLayer {
                name: category.name.clone(),
                icon_class: format!("cat-{}", index + 1),
                markers: Vec::new(),
            })
            .collect();

        let layer_index: HashMap<i32, usize> = members_map
            .categories
            .iter()
            .enumerate()
            .map(|(index, category)| (category.id, index))
            .collect();

        let mut layers = MapLayers::default();

        for member in &members_map.members {
            let layer = member
                .category_id
                .and_then(|category_id| layer_index.get(&category_id).copied());

            let (icon_class, category_name) = match layer {
                Some(index) => (
                    categories[index].icon_class.clone(),
                    Some(categories[index].name.as_str()),
                ),
                None => (UNCATEGORIZED_ICON_CLASS.to_string(), None),
            };

            let marker = MarkerSpec {
                latitude: member.latitude,
                longitude: member.longitude,
                popup: popup_html(member, category_name),
                icon_class,
            };

            if member.is_current_member {
                layers.current_member = Some(marker);
                continue;
            }

            match layer {
                Some(index) => categories[index].markers.push(marker),
                None => layers.uncategorized.push(marker),
            }
        }

        layers.categories = categories;
        layers
    }

    /// Position the current member marker starts at, if the member is already on the map.
    pub fn current_member_position(&self) -> Option<GeoCoordinates> {
        self.current_member
            .as_ref()
            .map(|marker| GeoCoordinates::new(marker.latitude, marker.longitude))
    }
}

/// Popup content: category, bold name, then the description below a rule.
///
/// The description is already sanitized by the server and kept as HTML.
pub fn popup_html(member: &MapMemberDto, category_name: Option<&str>) -> String {
    let mut popup = String::new();

    if let Some(category_name) = category_name {
        popup.push_str(&format!("<em>{}</em><br>", escape_html(category_name)));
    }
    popup.push_str(&format!("<strong>{}</strong>", escape_html(&member.name)));

    if !member.description.is_empty() {
        popup.push_str("<hr>");
        popup.push_str(&member.description);
    }

    popup
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}
