//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use medihub_commerce::auth::{Authenticator, Session, User};
use medihub_store::MockBackend;
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Credentials given on the command line.
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Backend holding catalog and orders.
    pub backend: MockBackend,
    /// Session of the signed-in user, if any.
    pub session: Session,
}

impl Context {
    /// Load config, open the backend and sign in.
    pub async fn load(
        config_path: Option<&Path>,
        credentials: Option<Credentials>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = match config_path {
            Some(path) => CliConfig::load(path)?,
            None => Self::find_config(&cwd).unwrap_or_default(),
        };
        if let Some(path) = config.store.snapshot_path.take() {
            config.store.snapshot_path = Some(resolve_path(&cwd, &path));
        }
        if let Some(dir) = config.store.snapshot_path.as_deref().and_then(Path::parent) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create state directory: {}", dir.display()))?;
        }

        let backend = MockBackend::open(config.store.clone())
            .await
            .context("Failed to open backend")?;

        let mut session = Session::new(&config.commerce);
        if let Some(credentials) = credentials {
            let user = Authenticator::from_config(&config.commerce)
                .login(&credentials.email, &credentials.password)
                .context("Sign-in failed")?;
            output.debug(&format!("Signed in as {} ({})", user.email, user.role));
            session.sign_in(user);
        }

        Ok(Self {
            config,
            output,
            cwd,
            backend,
            session,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(&config_path) {
                        debug!(path = %config_path.display(), "using config file");
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// The signed-in admin, or an error telling the user how to sign in.
    pub fn require_admin(&self) -> Result<&User> {
        self.session
            .require_admin()
            .context("Sign in with --email and --password as an admin")
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        resolve_path(&self.cwd, path)
    }

    /// Save backend state if a snapshot file is configured.
    pub async fn persist(&self) -> Result<()> {
        self.backend
            .persist()
            .await
            .context("Failed to save store snapshot")
    }
}

fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
