use thiserror::Error;

/// Why a City Store mutation did not happen.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("'{0}' is already tracked")]
    AlreadyTracked(String),

    #[error("failed to persist city list")]
    Storage(#[source] anyhow::Error),
}

/// Failures surfaced by the dashboard controller. None of them are fatal.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("no city matches '{0}'")]
    NotFound(String),

    #[error("'{0}' is already on the dashboard")]
    AlreadyTracked(String),

    #[error("failed to fetch conditions for '{city}'")]
    Fetch {
        city: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to update the tracked city list")]
    Storage(#[source] anyhow::Error),
}

impl DashboardError {
    /// Short message meant for the person at the keyboard.
    pub fn user_notice(&self) -> &'static str {
        match self {
            DashboardError::NotFound(_) => "City not found. Please try again.",
            DashboardError::AlreadyTracked(_) => "This city is already on the dashboard.",
            DashboardError::Fetch { .. } => "Failed to fetch weather data. Please try again later.",
            DashboardError::Storage(_) => "Could not save the city list.",
        }
    }
}

impl From<StoreError> for DashboardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyTracked(name) => DashboardError::AlreadyTracked(name),
            StoreError::Storage(e) => DashboardError::Storage(e),
        }
    }
}
