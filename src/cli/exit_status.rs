use std::process::ExitCode;

/// Exit status for CLI commands, following common conventions for analysis tools.
///
/// - `Success` (0): Command completed and the report was printed
/// - `Failure` (1): The requested template could not be analyzed (missing or unparseable)
/// - `Error` (2): Command failed before analysis started (project, config or IO error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed and the report was printed.
    Success,
    /// The requested template could not be analyzed.
    Failure,
    /// Command failed before analysis started.
    Error,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
