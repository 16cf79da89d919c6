pub mod leads;

pub use leads::{LeadStore, PgLeadStore};
