use std::{convert::Infallible, num::ParseIntError, time::Duration};

use campus_agenda::{LabelError, LocationLabels};
use chrono::NaiveDate;
use chrono_tz::Tz;
use onecampus::{BrowserOptions, PORTAL_URL, TIMETABLE_ENDPOINT};
use secrecy::SecretString;

pub mod error;
pub mod log;
pub mod report;

pub use error::{AppError, AppResult};

/// What to do when the timetable response never shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ArgEnum)]
pub enum MissingTimetable {
    /// Stop without submitting anything.
    Abort,
    /// Report every half day as remote.
    AssumeRemote,
}

#[derive(Debug, clap::Parser)]
#[clap(version, about = "Fill in next week's location report on 1Campus")]
pub struct Config {
    #[clap(long, env = "CAMPUS_USERNAME")]
    pub username: String,

    #[clap(long, env = "CAMPUS_PASSWORD", hide_env_values = true, parse(try_from_str = parse_secret))]
    pub password: SecretString,

    /// First day of the semester, counted as week 2.
    #[clap(long, env, default_value = "2024-08-30")]
    pub semester_start: NaiveDate,

    /// Time zone used to decide what "today" is.
    #[clap(long, env, default_value = "Asia/Taipei", parse(try_from_str = parse_tz))]
    pub timezone: Tz,

    #[clap(long, env, default_value = "http://localhost:9515")]
    pub webdriver_url: String,

    #[clap(long, env, default_value = PORTAL_URL)]
    pub portal_url: String,

    #[clap(long, env, default_value = TIMETABLE_ENDPOINT)]
    pub timetable_endpoint: String,

    /// Show the browser window.
    #[clap(long)]
    pub headed: bool,

    /// Seconds.
    #[clap(long, env, default_value = "40", parse(try_from_str = parse_seconds))]
    pub implicit_wait: Duration,

    /// Seconds.
    #[clap(long, env, default_value = "60", parse(try_from_str = parse_seconds))]
    pub wait_timeout: Duration,

    /// Seconds.
    #[clap(long, env, default_value = "40", parse(try_from_str = parse_seconds))]
    pub capture_timeout: Duration,

    /// Seconds.
    #[clap(long, env, default_value = "20", parse(try_from_str = parse_seconds))]
    pub form_settle: Duration,

    /// Seconds.
    #[clap(long, env, default_value = "10", parse(try_from_str = parse_seconds))]
    pub submit_grace: Duration,

    #[clap(long, env, default_value = "3")]
    pub page_load_attempts: u32,

    #[clap(long, env, arg_enum, default_value = "abort")]
    pub on_missing_timetable: MissingTimetable,

    #[clap(long, env, default_value = "吉林基地")]
    pub on_site_label: String,

    #[clap(long, env, default_value = "在家中")]
    pub remote_label: String,

    /// Work out the plan but do not submit it.
    #[clap(long)]
    pub dry_run: bool,
}

impl Config {
    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            webdriver_url: self.webdriver_url.clone(),
            portal_url: self.portal_url.clone(),
            timetable_endpoint: self.timetable_endpoint.clone(),
            headless: !self.headed,
            implicit_wait: self.implicit_wait,
            wait_timeout: self.wait_timeout,
            capture_timeout: self.capture_timeout,
            form_settle: self.form_settle,
            submit_grace: self.submit_grace,
            page_load_attempts: self.page_load_attempts,
            ..BrowserOptions::default()
        }
    }

    pub fn labels(&self) -> Result<LocationLabels, LabelError> {
        LocationLabels::new(&self.on_site_label, &self.remote_label)
    }
}

#[allow(clippy::unnecessary_wraps)]
fn parse_secret(s: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::new(s.to_owned()))
}

fn parse_tz(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>().map_err(|e| e.to_string())
}

fn parse_seconds(s: &str) -> Result<Duration, ParseIntError> {
    s.parse().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::{Config, LabelError, LocationLabels, MissingTimetable};

    fn parse(extra: &[&str]) -> Config {
        let args = ["campus-reporter", "--username", "student", "--password", "hunter2"];
        Config::try_parse_from(args.iter().chain(extra)).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);

        assert_eq!(config.password.expose_secret(), "hunter2");
        assert_eq!(config.semester_start, NaiveDate::from_ymd_opt(2024, 8, 30).unwrap());
        assert_eq!(config.timezone, chrono_tz::Asia::Taipei);
        assert_eq!(config.on_missing_timetable, MissingTimetable::Abort);
        assert_eq!(config.labels(), Ok(LocationLabels::default()));

        let options = config.browser_options();
        assert!(options.headless);
        assert_eq!(options.capture_timeout, Duration::from_secs(40));
        assert_eq!(options.page_load_attempts, 3);
    }

    #[test]
    fn overrides() {
        let config = parse(&[
            "--semester-start",
            "2025-02-17",
            "--timezone",
            "Europe/Stockholm",
            "--capture-timeout",
            "5",
            "--on-missing-timetable",
            "assume-remote",
            "--headed",
            "--dry-run",
        ]);

        assert_eq!(config.semester_start, NaiveDate::from_ymd_opt(2025, 2, 17).unwrap());
        assert_eq!(config.timezone, chrono_tz::Europe::Stockholm);
        assert_eq!(config.on_missing_timetable, MissingTimetable::AssumeRemote);
        assert!(config.dry_run);

        let options = config.browser_options();
        assert!(!options.headless);
        assert_eq!(options.capture_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_values() {
        let args = ["campus-reporter", "--username", "a", "--password", "b"];

        for extra in [
            ["--timezone", "Mars/Olympus"],
            ["--semester-start", "30/08/2024"],
            ["--wait-timeout", "soon"],
        ] {
            assert!(Config::try_parse_from(args.iter().chain(&extra)).is_err());
        }
    }

    #[test]
    fn labels_must_differ() {
        let config = parse(&["--on-site-label", "campus", "--remote-label", "campus"]);
        assert_eq!(
            config.labels(),
            Err(LabelError::Indistinct("campus".to_owned()))
        );

        let config = parse(&["--remote-label", "library"]);
        assert_eq!(config.labels().unwrap().remote, "library");
    }
}
