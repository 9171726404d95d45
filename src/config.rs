use std::path::PathBuf;

use clap::Parser;

use crate::auth::AdminPolicy;
use crate::error::ConfigError;
use crate::model::UserId;
use crate::paths::Paths;

/// Team sign-up and random team assignment for group chats.
///
/// Reads one JSON message per line on stdin and writes one JSON reply per
/// recognised command on stdout.
#[derive(Debug, Clone, Parser)]
#[command(name = "teamup", version)]
pub struct Cli {
    /// Directory for persisted state (default: ~/.local/share/teamup)
    #[arg(long, env = "TEAMUP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Explicit state file path (default: <data-dir>/state.json)
    #[arg(long, env = "TEAMUP_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Super-admin user id; repeat or comma-separate for several
    #[arg(long = "admin-id", env = "TEAMUP_ADMIN_IDS", value_delimiter = ',')]
    pub admin_ids: Vec<String>,

    /// Seed the shuffle RNG for reproducible assignments
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: Paths,
    pub admin_ids: Vec<UserId>,
    pub seed: Option<u64>,
}

impl Cli {
    /// Validate and resolve paths. `home` is consulted only when no data
    /// directory was given.
    pub fn into_config(self, home: Option<PathBuf>) -> Result<Config, ConfigError> {
        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => Paths::default_data_dir(&home.ok_or(ConfigError::NoDataDir)?),
        };
        let mut paths = Paths::resolve(&data_dir);
        if let Some(file) = self.state_file {
            paths = paths.with_state_file(file);
        }

        let admin_ids = self
            .admin_ids
            .iter()
            .map(|raw| UserId::parse(raw.as_str()).ok_or(ConfigError::BlankAdminId))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Config {
            paths,
            admin_ids,
            seed: self.seed,
        })
    }
}

impl Config {
    pub fn admin_policy(&self) -> AdminPolicy {
        AdminPolicy::new(self.admin_ids.iter().cloned())
    }
}
