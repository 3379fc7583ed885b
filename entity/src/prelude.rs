pub use super::learnybox_member::Entity as LearnyboxMember;
pub use super::learnybox_member_category::Entity as LearnyboxMemberCategory;
