use crate::error::{ErrorKind, Result};
use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use exn::ResultExt;
use ihist_library::{Context, MalformedPolicy, Summary};
use ihist_storage::BackendHandle;
use ihist_storage::backend::{HeaderOnlyBackend, LocalBackend, ReadOnlyBackend};
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ihist",
    version,
    about = "Build the per-version change history of runtime struct definitions",
    long_about = "Reads every <version>.h header in PATH and writes each struct definition to \
                  PATH/PerVersionParsed/<struct>/<version>.h, but only at the versions where it changed."
)]
pub struct Cli {
    /// Directory of versioned header files.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
    /// Anything after the directory is accepted and ignored.
    #[arg(hide = true)]
    pub extra: Vec<String>,
    #[arg(long, help = "Skip headers whose filename is not a version instead of aborting")]
    pub skip_malformed: bool,
    #[arg(long, help = "Build every history but log writes instead of performing them")]
    pub dry_run: bool,
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (repeatable); RUST_LOG takes precedence"
    )]
    pub verbose: u8,
}

impl Cli {
    /// Parses the command line.
    ///
    /// Returns `None` once `--help` or `--version` has been printed. Any other
    /// rejection becomes a usage error so it is reported the same way as a
    /// missing directory.
    pub fn from_args<I, T>(args: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(Some(cli)),
            Err(err) => match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                    let _ = err.print();
                    Ok(None)
                },
                _ => exn::bail!(ErrorKind::InvalidArguments(err.render().to_string().trim_end().to_string())),
            },
        }
    }

    /// Log filter for the verbosity flags, used when `RUST_LOG` is unset.
    pub fn default_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn context(&self) -> Context {
        let policy = if self.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Abort
        };
        Context::default().with_policy(policy)
    }

    /// Opens the headers directory as a storage backend that only sees `.h`
    /// files and, for a dry run, never writes.
    pub fn backend(&self) -> Result<BackendHandle> {
        let Some(path) = self.path.as_deref() else {
            exn::bail!(ErrorKind::MissingPath);
        };
        if !path.is_dir() {
            exn::bail!(ErrorKind::NotADirectory(path.to_path_buf()));
        }
        let root = std::path::absolute(path).or_raise(|| ErrorKind::NotADirectory(path.to_path_buf()))?;
        let local = LocalBackend::new("headers", &root).or_raise(|| ErrorKind::Storage)?;
        let backend: BackendHandle = Arc::new(HeaderOnlyBackend::new(Arc::new(local)));
        if self.dry_run {
            tracing::info!(root = %root.display(), "Dry run; nothing will be written");
            return Ok(Arc::new(ReadOnlyBackend::new(backend)));
        }
        Ok(backend)
    }

    pub async fn execute(&self) -> Result<Summary> {
        let backend = self.backend()?;
        let ctx = self.context();
        ihist_library::run(&backend, &ctx).await.or_raise(|| ErrorKind::Run)
    }
}

pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .try_init();
}
