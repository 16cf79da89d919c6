mod delivery;
mod submission;

pub use delivery::{ChannelOutcome, DeliveryOutcome, PersistOutcome};
pub use submission::{EXPECTED_FORM_NAME, SubmissionRecord};
