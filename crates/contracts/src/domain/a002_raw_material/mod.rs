pub mod aggregate;

pub use aggregate::{RawMaterial, RawMaterialDto, SCRAP_RATE_MESSAGE};
