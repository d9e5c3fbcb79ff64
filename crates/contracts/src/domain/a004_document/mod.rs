pub mod aggregate;

pub use aggregate::{
    accept_attr, is_allowed_filename, require_rfq_id, RfqDocument, ALLOWED_EXTENSIONS,
    MISSING_RFQ_ID_MESSAGE,
};
