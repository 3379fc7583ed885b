pub mod prelude;

pub mod learnybox_member;
pub mod learnybox_member_category;
