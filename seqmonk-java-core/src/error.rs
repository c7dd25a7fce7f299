use std::io;

use thiserror::Error;

/// A blocking, user-facing report for a fatal configuration problem.
#[derive(Debug)]
pub struct Alert {
    pub title: &'static str,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Couldn't find java on your system")]
    JavaNotFound,

    #[error("The java on your system did not identify itself as Java: {0}")]
    UnrecognizedJava(String),

    #[error("You appear to be running a 64 bit OS, but only have 32 bit Java.  Please install a 64 bit version of Java")]
    Needs64BitJava,

    #[error("Not enough memory to run SeqMonk (you need at least 1GB)")]
    InsufficientMemory(u64),

    #[error("SeqMonk process failed to start.  Did you move the SeqMonk launcher out of the SeqMonk directory?")]
    HeapValidationFailed,

    #[error("Couldn't determine the launcher directory: {0}")]
    LauncherDir(io::Error),

    #[error("Failed to start SeqMonk: {0}")]
    SpawnFailed(io::Error),
}

impl LaunchError {
    /// Fatal configuration problems raise a blocking alert. A launch
    /// failure of SeqMonk itself is reported on the console only, so it
    /// maps to `None`.
    pub fn alert(&self) -> Option<Alert> {
        let title = match self {
            LaunchError::Needs64BitJava => "Wrong version of Java",
            LaunchError::SpawnFailed(_) => return None,
            _ => "Failed to launch SeqMonk",
        };

        Some(Alert {
            title,
            message: self.to_string(),
        })
    }
}
