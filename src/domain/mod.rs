pub mod job_posting;

pub use job_posting::*;
