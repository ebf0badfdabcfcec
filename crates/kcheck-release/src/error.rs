use std::io;
use std::process::ExitStatus;

use camino::Utf8PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error("Failed to read the running kernel version")]
    Source(#[source] io::Error),

    #[error("Failed to list kernel images in {path}")]
    BootDir {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to run `{command}`")]
    Query {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    QueryFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}
