#![doc = include_str!("../README.md")]
#![warn(
    unreachable_pub,
    missing_debug_implementations,
    missing_docs,
    clippy::pedantic
)]

use async_trait::async_trait;
use campus_agenda::{LocationGrid, LocationLabels};

mod browser;
mod capture;
mod calendar;
mod session;
pub mod timetable;
mod util;

pub use browser::*;
pub use util::retry;

/// An error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The WebDriver session failed, e.g. an element could not be found.
    #[error("webdriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    /// The portal did not look the way we expected.
    #[error("unexpected page: {details}")]
    UnexpectedPage {
        /// Detailed error information (human readable).
        details: String,
    },

    /// Something we were waiting for never happened.
    #[error("timed out waiting for {what}")]
    Timeout {
        /// What we were waiting for.
        what: &'static str,
    },

    /// The captured timetable is not the JSON we expected.
    #[error("malformed timetable payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// 1Campus result.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The parts of the portal the weekly report needs.
#[async_trait]
pub trait Portal {
    /// Raw body of the timetable response, or `None` if the portal never
    /// requested it while we were watching.
    async fn fetch_timetable(&mut self) -> Result<Option<Vec<u8>>>;

    /// Fill in and send the weekly location report.
    async fn submit_plan(&mut self, grid: &LocationGrid, labels: &LocationLabels) -> Result<()>;
}
