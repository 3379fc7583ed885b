//! HTML sanitization of member supplied rich text.

use std::collections::{HashMap, HashSet};

/// Inline formatting tags kept in descriptions and in the consent text, with their allowed
/// attributes.
const ALLOWED_TAGS: &[(&str, &[&str])] = &[
    ("a", &["href", "title"]),
    ("abbr", &["title"]),
    ("acronym", &["title"]),
    ("b", &[]),
    ("blockquote", &["cite"]),
    ("cite", &[]),
    ("code", &[]),
    ("del", &["datetime"]),
    ("em", &[]),
    ("i", &[]),
    ("q", &["cite"]),
    ("s", &[]),
    ("strike", &[]),
    ("strong", &[]),
];

/// Removes every tag and attribute outside of the allowed inline formatting set.
///
/// Text content of removed tags is kept, except for `script` and `style` whose content is
/// dropped entirely.
pub fn sanitize_html(input: &str) -> String {
    let tags: HashSet<&str> = ALLOWED_TAGS.iter().map(|(tag, _)| *tag).collect();
    let tag_attributes: HashMap<&str, HashSet<&str>> = ALLOWED_TAGS
        .iter()
        .filter(|(_, attributes)| !attributes.is_empty())
        .map(|(tag, attributes)| (*tag, attributes.iter().copied().collect()))
        .collect();

    ammonia::Builder::default()
        .tags(tags)
        .tag_attributes(tag_attributes)
        .generic_attributes(HashSet::new())
        .clean(input)
        .to_string()
}

/// Converts line breaks to `<br>` tags.
pub fn nl2br(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\n', "<br>")
}
