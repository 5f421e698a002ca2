use chrono::Weekday;
use menudeck_model::StoreId;

/// Store management errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No store with this id in the directory
    #[error("unknown store: {0}")]
    UnknownStore(StoreId),

    /// Time is not `HH:MM`
    #[error("invalid time {value:?}, expected HH:MM")]
    InvalidTime { value: String },

    /// Closing time not after opening time
    #[error("{day}: closing time {close} must be after opening time {open}")]
    ClosesBeforeOpens {
        day: Weekday,
        open: String,
        close: String,
    },

    /// Weekly schedule is not Monday to Sunday in order
    #[error("schedule must list Monday to Sunday in order, got {days:?}")]
    InvalidSchedule { days: Vec<Weekday> },
}

impl StoreError {
    /// Whether the error came from operator input
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidTime { .. } | Self::ClosesBeforeOpens { .. } | Self::InvalidSchedule { .. }
        )
    }
}
