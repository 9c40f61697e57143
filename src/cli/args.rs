// src/cli/args.rs
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::RecordRef;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Tagged portfolio images for wedding-service vendors
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[arg(long = "no-color", help = "disable colored output")]
    pub no_color: bool,

    #[arg(long = "generate-config", help = "print the default configuration as TOML")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// The JSON column holding a record's images
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Table of the record, e.g. services, portfolios, vendors
    pub table: String,
    /// Record id
    pub id: String,
    /// JSON field holding the tagged images
    pub field: String,
}

impl From<&RecordArgs> for RecordRef {
    fn from(args: &RecordArgs) -> Self {
        RecordRef::new(&args.table, &args.id, &args.field)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload images under a tag and add them to the record
    Upload {
        #[command(flatten)]
        record: RecordArgs,
        #[arg(short = 't', long = "tag", help = "tag to file the images under")]
        tag: String,
        #[arg(short = 'f', long = "folder", help = "storage folder prefix")]
        folder: Option<String>,
        /// image files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Remove one image from storage and from the record
    Remove {
        #[command(flatten)]
        record: RecordArgs,
        #[arg(short = 't', long = "tag", help = "tag the image is filed under")]
        tag: String,
        /// public URL of the image
        url: String,
    },
    /// Remove a tag and all of its images
    RemoveTag {
        #[command(flatten)]
        record: RecordArgs,
        /// tag to remove
        tag: String,
    },
    /// Show the tagged images of a record
    Show {
        #[command(flatten)]
        record: RecordArgs,
        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// List the tags of a record with their image counts
    Tags {
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Suggested tags for a vendor category. No input: list categories
    Suggest {
        /// vendor category, e.g. venue, catering, photography
        category: Option<String>,
    },
    /// Check a tag name and print its formatted form
    Validate {
        /// tag name to check
        tag: String,
    },
    /// Generate shell completion scripts
    Completion {
        /// shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}

impl Commands {
    /// Whether the command reads or writes records and storage
    pub fn needs_services(&self) -> bool {
        matches!(
            self,
            Commands::Upload { .. }
                | Commands::Remove { .. }
                | Commands::RemoveTag { .. }
                | Commands::Show { .. }
                | Commands::Tags { .. }
        )
    }
}
