use campus_agenda::{derive, LocationGrid, LocationLabels, SemesterCalendar};
use chrono::NaiveDate;
use onecampus::{timetable, Portal};
use tracing::{info, instrument, warn};

use crate::{AppError, AppResult, MissingTimetable};

#[derive(Debug, Clone)]
pub struct Settings {
    pub calendar: SemesterCalendar,
    pub labels: LocationLabels,
    pub on_missing_timetable: MissingTimetable,
    pub dry_run: bool,
}

/// Where a submitted grid came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Timetable,
    /// No timetable was captured, everything was reported as remote.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub current_week: i64,
    pub target_week: i64,
    pub grid: LocationGrid,
    pub source: Source,
    pub submitted: bool,
}

/// Work out next week's locations from the timetable and report them.
#[instrument(skip(portal, settings))]
pub async fn run<P>(portal: &mut P, settings: &Settings, today: NaiveDate) -> AppResult<Report>
where
    P: Portal + Send,
{
    let current_week = settings.calendar.current_week(today);
    let target_week = settings.calendar.target_week(today);

    info!(
        current_week,
        target_week,
        week_start = %settings.calendar.week_start(target_week),
        "planning next week"
    );

    let (grid, source) = match portal.fetch_timetable().await? {
        Some(body) => {
            let entries = timetable::decode(&body)?;
            info!(entries = entries.len(), "timetable received");
            (derive(&entries, target_week)?, Source::Timetable)
        }
        None => match settings.on_missing_timetable {
            MissingTimetable::Abort => return Err(AppError::MissingTimetable),
            MissingTimetable::AssumeRemote => {
                warn!("no timetable, reporting every half day as remote");
                (LocationGrid::default(), Source::Fallback)
            }
        },
    };

    info!(on_site = grid.on_site_count(), "plan for week {target_week}:\n{grid}");

    if settings.dry_run {
        info!("dry run, not submitting");
    } else {
        portal.submit_plan(&grid, &settings.labels).await?;
        info!("plan submitted");
    }

    Ok(Report {
        current_week,
        target_week,
        grid,
        source,
        submitted: !settings.dry_run,
    })
}
