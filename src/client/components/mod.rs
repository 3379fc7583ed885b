pub mod members_map;
pub mod navbar;
pub mod page;
pub mod registration_form;

pub use members_map::{MembersMapPanel, RegisterStatusAlert, MAP_ELEMENT_ID};
pub use navbar::Navbar;
pub use page::Page;
pub use registration_form::RegistrationForm;
