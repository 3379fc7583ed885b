pub mod members_map;
pub mod not_found;

pub use members_map::MembersMap;
pub use not_found::NotFound;
