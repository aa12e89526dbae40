pub mod application;
pub mod option;
pub mod session;

pub use application::{ApplicationRecord, ApplicationStatus, JobId, JobPosting};
pub use option::OptionRecord;
pub use session::{Role, Session, SessionIdentity};
