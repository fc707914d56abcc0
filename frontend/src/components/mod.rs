pub mod handlers;
pub mod header;
pub mod notifications;
pub mod results;
pub mod search_form;
pub mod upload_section;
pub mod utils;
