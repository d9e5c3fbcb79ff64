pub mod a001_client;
pub mod a002_raw_material;
pub mod a003_rfq;
pub mod a004_document;
