//! Command outcomes and their wire encoding
//!
//! Every parsed command produces exactly one [`DispatchResult`]. The reporter
//! sends its message text as UTF-8, unmodified.

use core::fmt::Write;

use heapless::String;

/// Maximum report length in bytes
pub const MAX_REPORT_LEN: usize = 512;

/// Owned report text
pub type ReportText = String<MAX_REPORT_LEN>;

/// The message did not fit in [`MAX_REPORT_LEN`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportOverflow;

/// Outcome of a dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchResult {
    Ok(ReportText),
    Err(ReportText),
}

impl DispatchResult {
    /// Successful outcome with a fixed message
    pub fn ok(message: &str) -> Result<Self, ReportOverflow> {
        Ok(Self::Ok(text(message)?))
    }

    /// Failed outcome with a fixed message
    pub fn err(message: &str) -> Result<Self, ReportOverflow> {
        Ok(Self::Err(text(message)?))
    }

    /// Successful outcome built from format arguments
    pub fn ok_fmt(args: core::fmt::Arguments<'_>) -> Result<Self, ReportOverflow> {
        Ok(Self::Ok(format(args)?))
    }

    /// Failed outcome built from format arguments
    pub fn err_fmt(args: core::fmt::Arguments<'_>) -> Result<Self, ReportOverflow> {
        Ok(Self::Err(format(args)?))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, DispatchResult::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, DispatchResult::Err(_))
    }

    /// Message text regardless of outcome
    pub fn message(&self) -> &str {
        match self {
            DispatchResult::Ok(text) | DispatchResult::Err(text) => text.as_str(),
        }
    }
}

fn text(message: &str) -> Result<ReportText, ReportOverflow> {
    ReportText::try_from(message).map_err(|_| ReportOverflow)
}

fn format(args: core::fmt::Arguments<'_>) -> Result<ReportText, ReportOverflow> {
    let mut out = ReportText::new();
    out.write_fmt(args).map_err(|_| ReportOverflow)?;
    Ok(out)
}

/// Encode a result for notification
pub fn encode_report(result: &DispatchResult) -> &[u8] {
    result.message().as_bytes()
}
