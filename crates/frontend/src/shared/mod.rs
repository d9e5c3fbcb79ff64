pub mod api_utils;
pub mod date_utils;
pub mod download;
pub mod session;
