/// Escalation Policy Module
///
/// Late failures (unreadable column metadata, unreadable affected-row count,
/// an unreachable database) are either fatal or returned, depending on the
/// policy the caller picks.
use crate::core::SqlPrintError;
use serde::Deserialize;
use tracing::error;

/// How late failures are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Escalation {
    /// Log the error and terminate the process with `std::process::abort`,
    /// whatever thread the failure happens on.
    #[default]
    Abort,
    /// Log the error and panic with it as the message. Only the calling
    /// thread unwinds; the process survives if the panic is caught.
    Panic,
    /// Hand the error back to the caller like any other failure.
    ReturnError,
}

impl Escalation {
    /// Applies the policy to `err`.
    ///
    /// Returns the error under [`Escalation::ReturnError`]; never returns
    /// under the other two policies.
    pub fn escalate(self, err: SqlPrintError) -> SqlPrintError {
        match self {
            Escalation::Abort => {
                error!("fatal database condition, aborting: {}", err);
                eprintln!("fatal: {}", err);
                std::process::abort()
            }
            Escalation::Panic => {
                error!("fatal database condition: {}", err);
                panic!("{}", err)
            }
            Escalation::ReturnError => err,
        }
    }
}
