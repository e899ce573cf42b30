//! States of the province weather lookup.
//!
//! `Idle -> Loading -> {Success, Error, NotFound}`; every new slug goes back
//! through `Loading`.

use chrono::{DateTime, Utc};
use meteo_core::LookupErrorKind;
use meteo_provinces::ProvinceRecord;
use meteo_weather::{GeoPoint, WeatherSnapshot};
use tokio_util::sync::CancellationToken;

/// Everything shown for a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub province: ProvinceRecord,
    /// "<name> (capital: <capital>)"
    pub display_label: String,
    pub geo: GeoPoint,
    pub weather: WeatherSnapshot,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading {
        slug: String,
    },
    Success(LookupResult),
    Error {
        slug: String,
        kind: LookupErrorKind,
        message: String,
    },
    NotFound {
        slug: String,
    },
}

impl LookupState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading { .. })
    }

    /// True for `Success`, `Error` and `NotFound`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LookupState::Success(_) | LookupState::Error { .. } | LookupState::NotFound { .. }
        )
    }

    /// Slug this state belongs to (`None` when idle).
    pub fn slug(&self) -> Option<&str> {
        match self {
            LookupState::Idle => None,
            LookupState::Loading { slug }
            | LookupState::Error { slug, .. }
            | LookupState::NotFound { slug } => Some(slug),
            LookupState::Success(result) => Some(result.province.slug),
        }
    }

    pub fn result(&self) -> Option<&LookupResult> {
        match self {
            LookupState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LookupState::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Handle owned by one lookup invocation.
///
/// A newer invocation cancels the previous ticket; a cancelled ticket can no
/// longer change the lookup state.
#[derive(Debug, Clone)]
pub struct LookupTicket {
    generation: u64,
    slug: String,
    cancel: CancellationToken,
}

impl LookupTicket {
    pub(crate) fn new(generation: u64, slug: impl Into<String>) -> Self {
        Self {
            generation,
            slug: slug.into(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }
}
