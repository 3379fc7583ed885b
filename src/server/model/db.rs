//! Database model type aliases.

/// A LearnyBox member registered, or registering, on the map.
///
/// Created as a draft the first time its email is resolved against LearnyBox and published once
/// the member submits a valid registration form.
pub type MemberModel = entity::learnybox_member::Model;

/// A category members can pick to group their marker with others.
pub type CategoryModel = entity::learnybox_member_category::Model;
