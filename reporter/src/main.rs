use anyhow::Context;
use campus_agenda::SemesterCalendar;
use campus_reporter::{
    log,
    report::{self, Settings},
    AppError, Config,
};
use chrono::Utc;
use clap::Parser;
use dotenv::dotenv;
use onecampus::Browser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    log::init();

    let config = Config::parse();
    let labels = config.labels().context("invalid location labels")?;
    let today = Utc::now().with_timezone(&config.timezone).date_naive();
    let settings = Settings {
        calendar: SemesterCalendar::new(config.semester_start),
        labels,
        on_missing_timetable: config.on_missing_timetable,
        dry_run: config.dry_run,
    };

    let mut browser = Browser::launch(config.browser_options())
        .await
        .context("failed to start browser session")?;

    let res = async {
        browser.login(&config.username, &config.password).await?;
        let report = report::run(&mut browser, &settings, today).await?;
        Ok::<_, AppError>(report)
    }
    .await;

    // the session is closed whatever happened above
    if let Err(e) = browser.quit().await {
        error!("failed to close browser session: {e}");
    }

    let report = res?;

    info!(
        week = report.target_week,
        on_site = report.grid.on_site_count(),
        submitted = report.submitted,
        "done"
    );

    Ok(())
}
