use std::time::Duration;

use thirtyfour::{
    error::{WebDriverError, WebDriverResult},
    ChromiumLikeCapabilities, DesiredCapabilities, WebDriver,
};

const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(250);
// 30s at the poll interval, the same budget as the driver's page-load timeout
const SETTLE_MAX_POLLS: u32 = 120;
const SETTLE_STABLE_POLLS: u32 = 2;

/// One isolated headless browser session, owned by a single scrape request.
pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    // Sandbox args let chrome start inside unprivileged containers.
    pub async fn launch(server_url: &str) -> WebDriverResult<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--headless=new")?;
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-setuid-sandbox")?;

        let driver = WebDriver::new(server_url, caps).await?;
        Ok(Droid { driver })
    }

    pub async fn open(&self, url: &str) -> WebDriverResult<()> {
        self.driver.goto(url).await?;
        self.wait_until_settled().await
    }

    /// Network-idle stand-in: readyState must reach "complete" and the
    /// rendered body must hold its size across consecutive polls. A page
    /// that never settles within the poll budget is a navigation failure.
    async fn wait_until_settled(&self) -> WebDriverResult<()> {
        let mut tracker = SettleTracker::new();

        for _ in 0..SETTLE_MAX_POLLS {
            let ret = self
                .driver
                .execute(
                    "return [document.readyState, \
                     document.body ? document.body.innerText.length : 0];",
                    vec![],
                )
                .await?;
            let (state, len): (String, u64) = ret.convert()?;

            if tracker.observe(&state, len) {
                return Ok(());
            }

            tokio::time::sleep(SETTLE_POLL_INTERVAL).await;
        }

        Err(WebDriverError::Timeout(
            "page never settled within the poll budget".to_string(),
        ))
    }

    pub async fn release(self) -> WebDriverResult<()> {
        self.driver.quit().await
    }
}

/// Decides when a page counts as settled, one readyState/body-size
/// observation at a time.
struct SettleTracker {
    stable_polls: u32,
    last_len: Option<u64>,
}

impl SettleTracker {
    fn new() -> Self {
        SettleTracker {
            stable_polls: 0,
            last_len: None,
        }
    }

    fn observe(&mut self, state: &str, len: u64) -> bool {
        if state == "complete" && self.last_len == Some(len) {
            self.stable_polls += 1;
        } else {
            self.stable_polls = 0;
        }
        self.last_len = Some(len);

        self.stable_polls >= SETTLE_STABLE_POLLS
    }
}
