//! The weekly calendar ("學習週曆") app, where next week's locations are
//! reported.
use thirtyfour::{components::SelectElement, prelude::*};
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::{util::click, BrowserOptions, Error, Result};

const NEXT_WEEK_TAB: &str = "//div[@class='tabs tabs-boxed']/a[text()='待填下週']";
const REPORT_BUTTON: &str =
    "//button[@class='btn btn-sm btn-neutral' and .//span[text()='週曆填報']]";
const LOCATION_SELECTS: &str = "//div[@class='p-4 space-y-4']//select";
const SUBMIT_BUTTON: &str = "//button[@class='btn btn-neutral' and .//span[text()='回報計劃']]";

/// Check that the form has room for every location.
///
/// Fewer fields than locations happens when the school leaves days out of
/// the form; the trailing locations are dropped.
fn check_field_count(fields: usize, locations: usize) -> Result<()> {
    if fields > locations {
        return Err(Error::UnexpectedPage {
            details: format!("expected at most {locations} location fields, found {fields}"),
        });
    }
    if fields < locations {
        warn!(fields, locations, "report form has fewer fields than half days");
    }
    Ok(())
}

/// Open next week's report form in the current tab, select a location for
/// every half day and submit.
#[instrument(skip_all, fields(locations = locations.len()))]
pub(crate) async fn fill_and_submit(
    driver: &WebDriver,
    options: &BrowserOptions,
    locations: &[&str],
) -> Result<()> {
    click(driver, NEXT_WEEK_TAB, options.wait_timeout).await?;
    debug!("next week tab opened");

    click(driver, REPORT_BUTTON, options.wait_timeout).await?;
    debug!("report form opened");

    sleep(options.form_settle).await;

    let selects = driver.find_all(By::XPath(LOCATION_SELECTS)).await?;
    check_field_count(selects.len(), locations.len())?;

    for (select, location) in selects.iter().zip(locations.iter().copied()) {
        SelectElement::new(select)
            .await?
            .select_by_value(location)
            .await?;
    }
    debug!(fields = selects.len(), "locations selected");

    click(driver, SUBMIT_BUTTON, options.wait_timeout).await?;
    debug!("plan submitted");

    sleep(options.submit_grace).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::check_field_count;
    use crate::Error;

    #[test]
    fn field_count() {
        assert!(check_field_count(14, 14).is_ok());
        assert!(check_field_count(10, 14).is_ok());
        assert!(matches!(
            check_field_count(16, 14),
            Err(Error::UnexpectedPage { .. })
        ));
    }
}
