pub mod model;
pub mod panel;
