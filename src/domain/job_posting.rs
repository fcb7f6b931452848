use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ScrapeRequest {
    pub url: Option<String>,
}

/// The result record of one scrape. Every field is always present in the
/// serialized output; a field the page did not yield stays an empty string.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct JobPosting {
    pub role: String,
    pub company: String,
    pub location: String,
    pub description: String,
}
