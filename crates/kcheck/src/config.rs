use camino::{Utf8Path, Utf8PathBuf};
use config::{Environment, File, FileFormat};
use kcheck_release::{InstalledSource, PROC_VERSION, ReleaseError, read_proc_version};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::GlobalArgs;
use crate::commands::OutputFormat;

const ENV_PREFIX: &str = "KCHECK";

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error("Failed to load configuration")]
    #[diagnostic(help("configuration files are YAML with the keys proc_version, boot_dir and source"))]
    Load(#[from] config::ConfigError),
}

/// Everything that can be set from a configuration file or `KCHECK_*` variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File with the running kernel's banner.
    pub proc_version: Utf8PathBuf,
    /// Directory scanned for `vmlinuz-<release>` images.
    pub boot_dir: Utf8PathBuf,
    pub source: InstalledSource,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            proc_version: Utf8PathBuf::from(PROC_VERSION),
            boot_dir: Utf8PathBuf::from("/boot"),
            source: InstalledSource::default(),
        }
    }
}

impl Settings {
    /// Layers `files` in order, later ones winning, then the environment.
    ///
    /// Files marked as required must exist.
    pub fn load(files: &[(Utf8PathBuf, bool)]) -> Result<Self, Error> {
        let mut builder = config::Config::builder();

        for (path, required) in files {
            debug!("Loading configuration from {path}");
            builder = builder.add_source(
                File::from(path.as_std_path())
                    .format(FileFormat::Yaml)
                    .required(*required),
            );
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    pub format: OutputFormat,
}

impl Config {
    #[instrument(skip_all)]
    pub(crate) fn new(global_args: &GlobalArgs) -> Result<Self, Error> {
        let mut settings = Settings::load(&config_files(
            global_args.config.as_deref(),
            global_args.no_config,
        ))?;

        if let Some(proc_version) = &global_args.proc_version {
            settings.proc_version = proc_version.clone();
        }
        if let Some(boot_dir) = &global_args.boot_dir {
            settings.boot_dir = boot_dir.clone();
        }
        if let Some(source) = global_args.source {
            settings.source = source;
        }

        debug!("Using {settings:?}");

        Ok(Self {
            settings,
            format: global_args.format,
        })
    }

    /// The running kernel's banner.
    pub fn banner(&self) -> Result<String, ReleaseError> {
        read_proc_version(&self.settings.proc_version).map_err(ReleaseError::Source)
    }
}

/// Configuration files to read, lowest precedence first, each with whether it
/// must exist.
fn config_files(explicit: Option<&Utf8Path>, no_config: bool) -> Vec<(Utf8PathBuf, bool)> {
    if let Some(path) = explicit {
        return vec![(path.to_path_buf(), true)];
    }

    if no_config {
        return Vec::new();
    }

    kcheck_dirs::system_config_file()
        .into_iter()
        .chain(kcheck_dirs::user_config_file())
        .map(|path| (path, false))
        .collect()
}
