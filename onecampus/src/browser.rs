use std::{fmt, time::Duration};

use async_trait::async_trait;
use campus_agenda::{LocationGrid, LocationLabels};
use secrecy::SecretString;
use thirtyfour::{prelude::*, ChromiumLikeCapabilities};
use tracing::{debug, instrument};

use crate::{
    calendar, capture, session,
    util::{click, wait_for_new_window},
    Portal, Result,
};

/// Portal start page.
pub const PORTAL_URL: &str = "https://app.1campus.net/";

/// Cloud function the timetable app loads its data from.
pub const TIMETABLE_ENDPOINT: &str =
    "https://asia-east1-campus-lite.cloudfunctions.net/tschool/timetable";

const TIMETABLE_TILE: &str = "//img[@src='https://campus-lite.web.app/icons/tschool/timetable.png' and @alt='學生課表']";
const CALENDAR_TILE: &str = "//img[@src='https://campus-lite.web.app/icons/tschool/calendar.png' and @alt='學習週曆']";

/// How the browser session is set up and how long it waits for things.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Address of a running chromedriver.
    pub webdriver_url: String,

    /// See [`PORTAL_URL`].
    pub portal_url: String,

    /// See [`TIMETABLE_ENDPOINT`].
    pub timetable_endpoint: String,

    /// Run Chrome without a window.
    pub headless: bool,

    /// WebDriver implicit wait for element lookups.
    pub implicit_wait: Duration,

    /// Limit for waiting on a single element or tab.
    pub wait_timeout: Duration,

    /// How long to watch for the timetable response.
    pub capture_timeout: Duration,

    /// Pause before filling in the report form, which renders slowly.
    pub form_settle: Duration,

    /// Pause after submitting the report before moving on.
    pub submit_grace: Duration,

    /// Attempts at loading the portal start page.
    pub page_load_attempts: u32,

    /// Pause between those attempts.
    pub retry_delay: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_owned(),
            portal_url: PORTAL_URL.to_owned(),
            timetable_endpoint: TIMETABLE_ENDPOINT.to_owned(),
            headless: true,
            implicit_wait: Duration::from_secs(40),
            wait_timeout: Duration::from_secs(60),
            capture_timeout: Duration::from_secs(40),
            form_settle: Duration::from_secs(20),
            submit_grace: Duration::from_secs(10),
            page_load_attempts: 3,
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// A Chrome session logged in to the portal.
pub struct Browser {
    driver: WebDriver,
    options: BrowserOptions,
}

impl fmt::Debug for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Browser")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Browser {
    /// Start a new Chrome session.
    ///
    /// # Errors
    ///
    /// Fails if chromedriver cannot be reached or refuses the session.
    #[instrument(skip_all, fields(webdriver = %options.webdriver_url, headless = options.headless))]
    pub async fn launch(options: BrowserOptions) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();

        if options.headless {
            caps.add_arg("--headless")?;
        }
        for arg in [
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-gpu",
            "--window-size=1920,1080",
        ] {
            caps.add_arg(arg)?;
        }

        let driver = WebDriver::new(options.webdriver_url.as_str(), caps).await?;
        driver.set_implicit_wait_timeout(options.implicit_wait).await?;

        debug!("session started");

        Ok(Self { driver, options })
    }

    /// Sign in with a school account.
    ///
    /// # Errors
    ///
    /// Fails if the portal cannot be loaded after the configured number of
    /// attempts, or if the sign-in pages do not show up in time.
    pub async fn login(&mut self, username: &str, password: &SecretString) -> Result<()> {
        session::login(&self.driver, &self.options, username, password).await
    }

    /// End the session and close Chrome.
    ///
    /// # Errors
    ///
    /// Fails if chromedriver does not acknowledge.
    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        debug!("session closed");
        Ok(())
    }

    /// Click a portal tile that opens in a new tab and switch to that tab.
    #[instrument(skip(self))]
    async fn open_tile(&self, xpath: &'static str) -> Result<()> {
        let known = self.driver.windows().await?.len();

        click(&self.driver, xpath, self.options.wait_timeout).await?;

        let tab = wait_for_new_window(&self.driver, known, self.options.wait_timeout).await?;
        self.driver.switch_to_window(tab).await?;

        Ok(())
    }
}

#[async_trait]
impl Portal for Browser {
    #[instrument(skip(self))]
    async fn fetch_timetable(&mut self) -> Result<Option<Vec<u8>>> {
        let home = self.driver.window().await?;

        self.open_tile(TIMETABLE_TILE).await?;

        let body = capture::timetable(
            &self.driver,
            &self.options.timetable_endpoint,
            self.options.capture_timeout,
        )
        .await;

        self.driver.switch_to_window(home).await?;

        Ok(body?.map(String::into_bytes))
    }

    #[instrument(skip_all)]
    async fn submit_plan(&mut self, grid: &LocationGrid, labels: &LocationLabels) -> Result<()> {
        self.open_tile(CALENDAR_TILE).await?;

        calendar::fill_and_submit(&self.driver, &self.options, &labels.render(grid)).await
    }
}
