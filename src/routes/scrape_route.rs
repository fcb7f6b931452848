use std::net::{IpAddr, Ipv4Addr};

use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use thirtyfour::error::WebDriverResult;

use crate::{
    configuration::WebdriverSettings,
    domain::{JobPosting, ScrapeRequest},
    services::{extract_job, Droid, RateGuard, RATE_LIMIT_MESSAGE},
};

const UNKNOWN_PEER: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[post("/scrape")]
async fn scrape(
    request: HttpRequest,
    body: web::Json<ScrapeRequest>,
    webdriver: web::Data<WebdriverSettings>,
    rate_guard: web::Data<RateGuard>,
) -> HttpResponse {
    // The guard runs before validation, matching the limiter's position in
    // front of the whole scrape path. A request without a socket address
    // (possible only in-process) is guarded under one shared key rather
    // than slipping past the cooldown.
    let addr = request
        .peer_addr()
        .map_or(UNKNOWN_PEER, |socket| socket.ip());
    if !rate_guard.try_acquire(addr) {
        return HttpResponse::TooManyRequests().body(RATE_LIMIT_MESSAGE);
    }

    let Some(url) = body.url.as_deref() else {
        return HttpResponse::BadRequest().json(json!({ "error": "Missing URL" }));
    };

    let droid = match Droid::launch(&webdriver.server_url).await {
        Ok(droid) => droid,
        Err(e) => {
            log::error!("Scrape failed: {:?}", e);
            return HttpResponse::InternalServerError().json(json!({ "error": "Failed to scrape" }));
        }
    };

    // Capture the outcome first so the session is released on every path.
    let outcome = scrape_page(&droid, url).await;

    if let Err(e) = droid.release().await {
        log::error!("Failed to close browser session: {:?}", e);
    }

    match outcome {
        Ok(posting) => HttpResponse::Ok().json(posting),
        Err(e) => {
            log::error!("Scrape failed: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to scrape" }))
        }
    }
}

async fn scrape_page(droid: &Droid, url: &str) -> WebDriverResult<JobPosting> {
    droid.open(url).await?;
    Ok(extract_job(&droid.driver, url).await)
}
