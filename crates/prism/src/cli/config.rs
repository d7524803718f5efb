//! The `prism config` command.
//!
//! Beyond printing the effective TOML, `show` reports whether the model
//! and catalog files the config points at are actually present, since a
//! missing artifact is the usual reason `classify` fails on a fresh
//! install.

use clap::{Args, Subcommand};
use prism_core::config::CONFIG_ENV_VAR;
use prism_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration and artifact status
    Show,

    /// Show the config file path and where it comes from
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show(),
        ConfigCommand::Path => {
            let source = if std::env::var_os(CONFIG_ENV_VAR).is_some() {
                format!("from ${CONFIG_ENV_VAR}")
            } else {
                "platform default".to_string()
            };
            println!("{} ({source})", Config::default_path().display());
            Ok(())
        }
        ConfigCommand::Init { force } => init(force),
    }
}

/// Print the effective config followed by per-artifact presence checks.
fn show() -> anyhow::Result<()> {
    let config = Config::load()?;
    print!("{}", config.to_toml()?);

    println!();
    for (role, path) in config.artifacts() {
        let status = if path.exists() { "found" } else { "MISSING" };
        println!("# {role}: {} [{status}]", path.display());
    }

    Ok(())
}

/// Write the default configuration to the config path.
fn init(force: bool) -> anyhow::Result<()> {
    let path = Config::default_path();

    if path.exists() && !force {
        anyhow::bail!(
            "Refusing to overwrite {} (pass --force to replace it)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::default().to_toml()?)?;

    println!("Wrote default configuration to {}", path.display());
    println!("Edit model.path and catalog.path to point at your ONNX model and synset file.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // PRISM_CONFIG redirects every path lookup, so the whole init flow can
    // run against a temp directory. Kept as one test because the variable
    // is process-global.
    #[test]
    fn test_init_writes_and_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::env::set_var(CONFIG_ENV_VAR, &path);

        init(false).unwrap();
        assert!(path.exists());
        let written = Config::load_from(&path).unwrap();
        assert_eq!(written.logging.level, "info");

        // Second init without --force must refuse.
        let err = init(false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        // With --force it overwrites.
        init(true).unwrap();

        std::env::remove_var(CONFIG_ENV_VAR);
    }
}
