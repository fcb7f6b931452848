use thirtyfour::{By, WebDriver};

use crate::domain::JobPosting;

const FALLBACK_DESCRIPTION_CHARS: usize = 500;

/// How one output field is read from the loaded page.
#[derive(Debug, PartialEq, Eq)]
pub enum FieldRule {
    Text(&'static str),
    TruncatedText(&'static str, usize),
    Skip,
}

pub struct ProfileRules {
    pub role: FieldRule,
    pub company: FieldRule,
    pub location: FieldRule,
    pub description: FieldRule,
}

/// Known job boards plus the generic fallback. Picked by URL substring in
/// fixed priority order; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteProfile {
    Linkedin,
    Indeed,
    Glassdoor,
    Generic,
}

impl SiteProfile {
    pub fn for_url(url: &str) -> Self {
        if url.contains("linkedin.com") {
            SiteProfile::Linkedin
        } else if url.contains("indeed.com") {
            SiteProfile::Indeed
        } else if url.contains("glassdoor.com") {
            SiteProfile::Glassdoor
        } else {
            SiteProfile::Generic
        }
    }

    pub fn rules(&self) -> ProfileRules {
        match self {
            SiteProfile::Linkedin => ProfileRules {
                role: FieldRule::Text("h1"),
                company: FieldRule::Text(".topcard__flavor"),
                location: FieldRule::Text(".topcard__flavor--bullet"),
                description: FieldRule::Text(".description__text"),
            },
            SiteProfile::Indeed => ProfileRules {
                role: FieldRule::Text("h1.jobsearch-JobInfoHeader-title"),
                company: FieldRule::Text(
                    ".jobsearch-CompanyInfoWithoutHeaderImage div:first-child",
                ),
                location: FieldRule::Text(
                    ".jobsearch-CompanyInfoWithoutHeaderImage div:nth-child(2)",
                ),
                description: FieldRule::Text("#jobDescriptionText"),
            },
            SiteProfile::Glassdoor => ProfileRules {
                role: FieldRule::Text("h1"),
                company: FieldRule::Text(".employerName"),
                location: FieldRule::Text(".location"),
                description: FieldRule::Text(".jobDescriptionContent"),
            },
            SiteProfile::Generic => ProfileRules {
                role: FieldRule::Text("h1, h2"),
                company: FieldRule::Skip,
                location: FieldRule::Skip,
                description: FieldRule::TruncatedText("body", FALLBACK_DESCRIPTION_CHARS),
            },
        }
    }
}

/// A field whose lookup finds nothing comes back as an empty string;
/// misses never fail the scrape.
pub async fn extract_job(driver: &WebDriver, url: &str) -> JobPosting {
    let rules = SiteProfile::for_url(url).rules();

    JobPosting {
        role: lookup(driver, &rules.role).await.unwrap_or_default(),
        company: lookup(driver, &rules.company).await.unwrap_or_default(),
        location: lookup(driver, &rules.location).await.unwrap_or_default(),
        description: lookup(driver, &rules.description).await.unwrap_or_default(),
    }
}

async fn lookup(driver: &WebDriver, rule: &FieldRule) -> Option<String> {
    let (selector, max_chars) = match rule {
        FieldRule::Text(selector) => (*selector, None),
        FieldRule::TruncatedText(selector, max) => (*selector, Some(*max)),
        FieldRule::Skip => return None,
    };

    let element = driver.find(By::Css(selector)).await.ok()?;
    let text = element.text().await.ok()?;

    Some(match max_chars {
        Some(max) => truncate_chars(&text, max),
        None => text,
    })
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
