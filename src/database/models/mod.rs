pub mod job;
pub mod user;

pub use job::{Job, JobFields, JobStatus};
pub use user::{NewUser, User};
