use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::LocationGrid;

/// A label list could not be turned back into a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// A label matched neither location.
    #[error("unknown location {0:?}")]
    UnknownLocation(String),

    /// Wrong number of labels.
    #[error("expected {} locations, got {0}", LocationGrid::SLOTS)]
    WrongCount(usize),

    /// Both locations share one label, so a form could not tell them apart.
    #[error("on-site and remote locations are both labelled {0:?}")]
    Indistinct(String),
}

/// Option values used by the weekly report form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationLabels {
    /// Value selected for on-site half days.
    pub on_site: String,

    /// Value selected for remote half days.
    pub remote: String,
}

impl Default for LocationLabels {
    fn default() -> Self {
        Self {
            on_site: "吉林基地".to_owned(),
            remote: "在家中".to_owned(),
        }
    }
}

impl LocationLabels {
    /// Labels for the two locations.
    ///
    /// # Errors
    ///
    /// Fails if both labels are the same.
    pub fn new(
        on_site: impl Into<String>,
        remote: impl Into<String>,
    ) -> Result<Self, LabelError> {
        let (on_site, remote) = (on_site.into(), remote.into());

        if on_site == remote {
            return Err(LabelError::Indistinct(on_site));
        }

        Ok(Self { on_site, remote })
    }

    /// Label for one slot.
    #[must_use]
    pub fn label(&self, on_site: bool) -> &str {
        if on_site {
            &self.on_site
        } else {
            &self.remote
        }
    }

    /// Labels for every slot of `grid`, in form order.
    #[must_use]
    pub fn render(&self, grid: &LocationGrid) -> Vec<&str> {
        grid.slots()
            .map(|(_, _, on_site)| self.label(on_site))
            .collect()
    }

    /// Inverse of [`Self::render`].
    ///
    /// # Errors
    ///
    /// Fails on a label that is neither location, or if the number of
    /// labels is not [`LocationGrid::SLOTS`].
    pub fn parse<S: AsRef<str>>(
        &self,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<LocationGrid, LabelError> {
        let values = labels
            .into_iter()
            .map(|label| match label.as_ref() {
                l if l == self.on_site => Ok(true),
                l if l == self.remote => Ok(false),
                l => Err(LabelError::UnknownLocation(l.to_owned())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let count = values.len();

        LocationGrid::from_slots(values).ok_or(LabelError::WrongCount(count))
    }
}
