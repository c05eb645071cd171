//! Command-line argument definitions for the archup CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global options select the configuration file and logging
//! verbosity; the [`Command`] picks what to generate or check.

use clap::{Parser, Subcommand};

/// Command-line arguments for the archup documentation tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the Markdown document described by a project file
    Build {
        /// Path to the project file
        #[arg(short, long, default_value = "./archup.conf")]
        project: String,
    },

    /// Render one workspace document to Markdown
    Render {
        /// Path to the workspace document (YAML)
        input: String,

        /// Path to the output Markdown file; standard output if omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check a workspace document without generating anything
    Validate {
        /// Path to the workspace document (YAML)
        input: String,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_build_defaults() {
        let args = Args::parse_from(["archup", "build"]);

        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
        assert!(matches!(args.command, Command::Build { ref project } if project == "./archup.conf"));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::parse_from([
            "archup", "render", "model.yaml", "-o", "out.md", "--config", "cfg.toml",
            "--log-level", "debug",
        ]);

        assert_eq!(args.config.as_deref(), Some("cfg.toml"));
        assert_eq!(args.log_level, "debug");
        match args.command {
            Command::Render { input, output } => {
                assert_eq!(input, "model.yaml");
                assert_eq!(output.as_deref(), Some("out.md"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
