//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// User identity operator tool
#[derive(Parser, Debug)]
#[command(name = "user-service")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hash a password with the current Argon2id parameters
    HashPassword {
        /// Password to hash; read from stdin when omitted
        #[arg(long, env = "PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Verify a password against an encoded hash
    VerifyPassword {
        /// Encoded `$argon2id$...` hash
        #[arg(long)]
        hash: String,

        /// Password to check; read from stdin when omitted
        #[arg(long, env = "PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Validate and normalize an email address
    CheckEmail {
        email: String,
    },

    /// Validate a username
    CheckUsername {
        username: String,
    },
}
