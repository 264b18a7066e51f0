use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thirtyfour::prelude::*;
use tracing::{debug, instrument};

use crate::{retry, BrowserOptions, Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[instrument(skip(driver, options), fields(url = %options.portal_url))]
async fn open_portal(driver: &WebDriver, options: &BrowserOptions) -> Result<()> {
    retry(
        options.page_load_attempts,
        options.retry_delay,
        "loading the portal",
        || async move {
            driver.goto(options.portal_url.as_str()).await?;
            driver.find(By::ClassName("btn-square")).await?.click().await?;
            Ok::<_, Error>(())
        },
    )
    .await?;

    debug!("sign-in button clicked");

    Ok(())
}

/// Type into the field once it shows up and press enter.
async fn submit_field(driver: &WebDriver, by: By, limit: Duration, text: &str) -> Result<()> {
    let field = driver.query(by).wait(limit, POLL_INTERVAL).first().await?;

    field.send_keys(text).await?;
    field.send_keys(Key::Enter + "").await?;

    Ok(())
}

#[instrument(skip(driver, options, password))]
pub(crate) async fn login(
    driver: &WebDriver,
    options: &BrowserOptions,
    username: &str,
    password: &SecretString,
) -> Result<()> {
    open_portal(driver, options).await?;

    submit_field(driver, By::Id("identifierId"), options.wait_timeout, username).await?;
    debug!("username entered");

    submit_field(
        driver,
        By::Name("Passwd"),
        options.wait_timeout,
        password.expose_secret(),
    )
    .await?;
    debug!("password entered");

    Ok(())
}
