pub mod aggregate;

pub use aggregate::{ProductDraft, ProductLine, Rfq, RfqStatus, SkuDraft, SkuLine};
