pub mod model;
pub mod picker;

pub use picker::ClientPicker;
