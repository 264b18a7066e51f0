use campus_agenda::DeriveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("portal error: {0}")]
    Portal(#[from] onecampus::Error),

    #[error("bad timetable data: {0}")]
    Timetable(#[from] DeriveError),

    #[error("no timetable response was captured")]
    MissingTimetable,
}

pub type AppResult<T> = Result<T, AppError>;
