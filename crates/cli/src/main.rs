//! Cubed CLI - Developer tools.
//!
//! # Usage
//!
//! ```bash
//! # Mint a bearer token for API testing (reads AUTH_TOKEN_SECRET)
//! cubed-cli token -e admin@cubed3d.com.br -r admin
//!
//! # Dump the seeded catalog as JSON
//! cubed-cli catalog
//! ```
//!
//! # Commands
//!
//! - `token` - Mint a development bearer token
//! - `catalog` - Dump the seeded product catalog

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI's job is to print
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cubed-cli")]
#[command(author, version, about = "Cubed CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a development bearer token
    Token {
        /// Email to embed in the token
        #[arg(short, long)]
        email: String,

        /// Display name to embed in the token's user
        #[arg(short, long, default_value = "Dev User")]
        name: String,

        /// Role (`user`, `admin`)
        #[arg(short, long, default_value = "user")]
        role: String,
    },
    /// Dump the seeded product catalog as JSON
    Catalog,
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Token { email, name, role } => commands::token::run(&email, &name, &role),
        Commands::Catalog => commands::catalog::run(),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
