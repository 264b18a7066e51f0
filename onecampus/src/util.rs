//! Waiting and retrying.
use std::{future::Future, time::Duration};

use thirtyfour::{prelude::*, WindowHandle};
use tokio::time::{sleep, timeout};
use tracing::{instrument, trace, warn};

use crate::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Run `op` up to `attempts` times, sleeping `delay` between failures.
///
/// `attempts` of zero is treated as one.
///
/// # Errors
///
/// Returns the error of the last attempt.
pub async fn retry<T, F, Fut>(attempts: u32, delay: Duration, what: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < attempts => {
                warn!(attempt, attempts, error = %e, "{what} failed, retrying");
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Poll `check` until it yields a value or `limit` has passed.
pub(crate) async fn poll<T, F, Fut>(limit: Duration, mut check: F) -> Result<Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let res = timeout(limit, async {
        loop {
            if let Some(v) = check().await? {
                break Ok::<_, Error>(v);
            }
            sleep(POLL_INTERVAL).await;
        }
    })
    .await;

    match res {
        Ok(v) => v.map(Some),
        Err(_) => Ok(None),
    }
}

/// Wait for the element at `xpath` to become clickable, then click it.
#[instrument(skip(driver))]
pub(crate) async fn click(driver: &WebDriver, xpath: &'static str, limit: Duration) -> Result<()> {
    driver
        .query(By::XPath(xpath))
        .wait(limit, POLL_INTERVAL)
        .and_clickable()
        .first()
        .await?
        .click()
        .await?;

    Ok(())
}

/// Wait until more than `known` windows are open and return the newest.
#[instrument(skip(driver))]
pub(crate) async fn wait_for_new_window(
    driver: &WebDriver,
    known: usize,
    limit: Duration,
) -> Result<WindowHandle> {
    let window = poll(limit, || async move {
        let mut windows = driver.windows().await?;
        trace!(open = windows.len());

        Ok::<_, Error>(if windows.len() > known {
            windows.pop()
        } else {
            None
        })
    })
    .await?;

    window.ok_or(Error::Timeout { what: "new tab" })
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, time::Duration};

    use super::{poll, retry};
    use crate::Error;

    fn flaky(fail: u32, calls: &Cell<u32>) -> crate::Result<u32> {
        calls.set(calls.get() + 1);
        if calls.get() <= fail {
            Err(Error::UnexpectedPage {
                details: "not yet".into(),
            })
        } else {
            Ok(calls.get())
        }
    }

    #[tokio::test]
    async fn retry_until_success() {
        let cell = Cell::new(0);
        let calls = &cell;
        let res = retry(3, Duration::ZERO, "load", || async move { flaky(2, calls) }).await;

        assert_eq!(res.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn retry_gives_up() {
        let cell = Cell::new(0);
        let calls = &cell;
        let res = retry(2, Duration::ZERO, "load", || async move { flaky(5, calls) }).await;

        assert!(matches!(res, Err(Error::UnexpectedPage { .. })));
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn zero_attempts_runs_once() {
        let cell = Cell::new(0);
        let calls = &cell;
        let res = retry(0, Duration::ZERO, "load", || async move { flaky(1, calls) }).await;

        assert!(res.is_err());
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_times_out() {
        let res: Option<()> = poll(Duration::from_secs(5), || async { Ok::<_, Error>(None) })
            .await
            .unwrap();

        assert!(res.is_none());
    }

    #[tokio::test]
    async fn poll_returns_value() {
        let cell = Cell::new(0);
        let calls = &cell;
        let res = poll(Duration::from_secs(5), || async move {
            calls.set(calls.get() + 1);
            Ok::<_, Error>((calls.get() == 1).then_some(7))
        })
        .await
        .unwrap();

        assert_eq!(res, Some(7));
    }
}
