use thiserror::Error;

/// Errors raised at the edges of the engine: decoding input data and
/// validating user-supplied parameters. The countdown and notification
/// paths never produce these; they degrade to absent values instead.
#[derive(Error, Debug)]
pub enum AlifError {
    /// Timings payload was not valid JSON or had the wrong shape.
    #[error("Invalid timings payload: {0}")]
    TimingsDecode(#[from] serde_json::Error),

    /// Calculation method not supported by the offline calculator.
    #[error(
        "Unknown calculation method: '{0}'. Use one of: {}",
        crate::prayer_times::calculator::CALC_METHODS.join(", ")
    )]
    UnknownMethod(String),

    /// Madhab not supported by the offline calculator.
    #[error("Unknown madhab: '{0}'")]
    UnknownMadhab(String),

    /// UTC offset outside what a fixed offset can represent.
    #[error("Invalid timezone offset: {0} minutes")]
    InvalidOffset(i32),

    /// Ramadan day outside 1..=30.
    #[error("Ramadan day must be between 1 and 30, got {0}")]
    InvalidRamadanDay(u32),
}
