pub mod droid;
pub mod extractor;
pub mod rate_guard;

pub use droid::*;
pub use extractor::*;
pub use rate_guard::*;
