pub mod aggregate;

pub use aggregate::{BillingAddress, Client, ClientContact, ClientDto, ClientListRow, ClientRef};
