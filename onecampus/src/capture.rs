//! Picking the timetable response out of the page's network traffic.
//!
//! A small script is registered through the DevTools protocol so that it
//! runs before any page script. It wraps `fetch` and `XMLHttpRequest` and
//! keeps the body of the first response whose URL contains the endpoint.
use std::time::Duration;

use serde_json::{json, Value};
use thirtyfour::{extensions::cdp::ChromeDevTools, prelude::*};
use tracing::{debug, instrument, warn};

use crate::{util::poll, Error, Result};

const SLOT: &str = "__onecampusTimetable";

fn hook_script(endpoint: &str) -> String {
    // serde_json quoting doubles as JS string escaping
    let endpoint = Value::from(endpoint);

    format!(
        r#"(() => {{
  const endpoint = {endpoint};
  const keep = (url, body) => {{
    if (window.{SLOT} == null && String(url).includes(endpoint)) window.{SLOT} = body;
  }};
  const fetch = window.fetch;
  window.fetch = async (...args) => {{
    const res = await fetch(...args);
    res.clone().text().then((body) => keep(res.url, body), () => {{}});
    return res;
  }};
  const open = XMLHttpRequest.prototype.open;
  XMLHttpRequest.prototype.open = function (method, url, ...rest) {{
    this.addEventListener("load", () => {{
      try {{ keep(url, this.responseText); }} catch (_) {{}}
    }});
    return open.call(this, method, url, ...rest);
  }};
}})();"#
    )
}

async fn install(driver: &WebDriver, endpoint: &str) -> Result<()> {
    let dev_tools = ChromeDevTools::new(driver.handle.clone());

    dev_tools
        .execute_cdp_with_params(
            "Page.addScriptToEvaluateOnNewDocument",
            json!({ "source": hook_script(endpoint) }),
        )
        .await?;

    Ok(())
}

async fn captured(driver: &WebDriver) -> Result<Option<String>> {
    let ret = driver
        .execute(&format!("return window.{SLOT} ?? null;"), Vec::new())
        .await?;

    match ret.json() {
        Value::Null => Ok(None),
        Value::String(body) => Ok(Some(body.clone())),
        other => Err(Error::UnexpectedPage {
            details: format!("captured timetable is not text: {other}"),
        }),
    }
}

/// Reload the current tab with the hook in place and wait for the
/// timetable response.
#[instrument(skip(driver))]
pub(crate) async fn timetable(
    driver: &WebDriver,
    endpoint: &str,
    limit: Duration,
) -> Result<Option<String>> {
    install(driver, endpoint).await?;
    driver.refresh().await?;

    let body = poll(limit, || captured(driver)).await?;

    match &body {
        Some(body) => debug!(bytes = body.len(), "timetable captured"),
        None => warn!("no timetable response within {limit:?}"),
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::hook_script;

    #[test]
    fn endpoint_is_quoted() {
        let script = hook_script("https://example.com/a\"b");

        assert!(script.contains(r#"const endpoint = "https://example.com/a\"b";"#));
        assert!(script.starts_with("(() => {"));
        assert!(script.ends_with("})();"));
    }
}
