//! The `blurb config` command for configuration management.

use std::path::{Path, PathBuf};

use blurb_core::{Config, ConfigError};
use clap::{Args, Subcommand};

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
///
/// `loaded` is the already loaded config. Only `show` needs it to be valid.
pub fn execute(
    args: ConfigArgs,
    config_path: Option<&Path>,
    loaded: Result<Config, ConfigError>,
) -> anyhow::Result<()> {
    let path = resolve_path(config_path);

    match args.command {
        ConfigCommand::Show => {
            println!("{}", loaded?.to_toml()?);
        }

        ConfigCommand::Path => {
            if let Err(e) = loaded {
                tracing::warn!("Config at this path does not load: {e}");
            }
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            init(&path, force)?;
            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn resolve_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path)
}

/// Write the default config to `path`.
fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, Config::default().to_toml()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        init(&path, false).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output.prefix, "FLEX_ATTRPDB");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine").unwrap();

        let err = init(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        init(&path, true).unwrap();
        assert!(Config::load_from(&path).is_ok());
    }

    #[test]
    fn test_show_reports_load_error() {
        let args = ConfigArgs {
            command: ConfigCommand::Show,
        };
        let loaded = Err(ConfigError::ValidationError("batch.chunk_size must be > 0".into()));
        let err = execute(args, None, loaded).unwrap_err();
        assert!(err.to_string().contains("chunk_size"));
    }

    #[test]
    fn test_path_and_init_work_with_broken_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [valid toml").unwrap();
        let broken = || super::super::load_config(Some(&path));
        assert!(broken().is_err());

        let args = ConfigArgs {
            command: ConfigCommand::Path,
        };
        execute(args, Some(&path), broken()).unwrap();

        let args = ConfigArgs {
            command: ConfigCommand::Init { force: true },
        };
        execute(args, Some(&path), broken()).unwrap();
        assert!(broken().is_ok());
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/blurb.toml");
        assert_eq!(resolve_path(Some(&path)), path);
        assert_eq!(resolve_path(None), Config::default_path());
    }
}
