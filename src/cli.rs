//! Command-line interface definitions
//!
//! Arguments are grouped by **functional usage**: each subcommand owns the
//! options it consumes, and the shared groups ([`LinkConfig`],
//! [`OutputConfig`]) are flattened in wherever they apply.

use crate::encoding::Encoding;
use anyhow::Result;
use clap::{Parser, Subcommand};
use fs_xattr::SetMode;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

/// Inspect and edit extended file attributes
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Output and logging configuration
    #[command(flatten)]
    pub output: OutputConfig,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the value of one attribute
    Get(GetArgs),
    /// Create or overwrite an attribute
    Set(SetArgs),
    /// List attribute names, optionally with their values
    List(ListArgs),
    /// Delete an attribute
    Remove(RemoveArgs),
    /// Copy every attribute from one file to another
    Copy(CopyArgs),
}

// ============================================================================
// FUNCTIONAL GROUPS: Organized by what component consumes them
// ============================================================================

/// Symlink handling
///
/// Used by: every single-path command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LinkConfig {
    /// Operate on a symlink itself rather than the file it points to
    #[arg(short = 'P', long)]
    pub no_dereference: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GetArgs {
    /// File to read from
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Attribute name
    #[arg(value_name = "NAME")]
    pub name: OsString,

    #[command(flatten)]
    pub link: LinkConfig,

    /// Value encoding for output
    #[arg(short, long, value_enum, default_value_t = Encoding::Text)]
    pub encoding: Encoding,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SetArgs {
    /// File to modify
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Attribute name
    #[arg(value_name = "NAME")]
    pub name: OsString,

    /// New value: raw text, `"quoted"` with octal escapes, `0x<hex>` or `0s<base64>`
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    #[command(flatten)]
    pub link: LinkConfig,

    /// Fail if the attribute already exists
    #[arg(long, conflicts_with = "replace")]
    pub create: bool,

    /// Fail if the attribute does not exist yet
    #[arg(long)]
    pub replace: bool,
}

impl SetArgs {
    /// Map `--create`/`--replace` to a [`SetMode`]
    #[must_use]
    pub fn mode(&self) -> SetMode {
        match (self.create, self.replace) {
            (true, _) => SetMode::Create,
            (_, true) => SetMode::Replace,
            _ => SetMode::Upsert,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ListArgs {
    /// File to list
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    #[command(flatten)]
    pub link: LinkConfig,

    /// Print each value next to its name
    #[arg(short, long)]
    pub dump: bool,

    /// Value encoding used with --dump
    #[arg(short, long, value_enum, default_value_t = Encoding::Text, requires = "dump")]
    pub encoding: Encoding,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RemoveArgs {
    /// File to modify
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Attribute name
    #[arg(value_name = "NAME")]
    pub name: OsString,

    #[command(flatten)]
    pub link: LinkConfig,
}

/// Attribute copy configuration
///
/// Used by: [`crate::copy::copy_xattrs`]
#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Copy Options")]
pub struct CopyArgs {
    /// File to read attributes from
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// File to write attributes to
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Treat a filesystem without attribute support as having none
    #[arg(long)]
    pub skip_unsupported: bool,
}

/// Output and logging configuration
///
/// Used by: `main()` when installing the tracing subscriber
#[derive(clap::Args, Debug, Clone, Default)]
#[command(next_help_heading = "Output Options")]
pub struct OutputConfig {
    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl OutputConfig {
    /// Log level implied by `-q` / `-v` flags
    #[must_use]
    pub fn level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

impl Args {
    /// Validate arguments that clap cannot check on its own
    ///
    /// # Errors
    ///
    /// Returns an error if an attribute name is empty or contains a NUL
    /// byte, or if `copy` is asked to copy a file onto itself.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Get(GetArgs { name, .. })
            | Command::Set(SetArgs { name, .. })
            | Command::Remove(RemoveArgs { name, .. }) => validate_name(name),
            Command::List(_) => Ok(()),
            Command::Copy(args) => {
                if args.source == args.destination {
                    anyhow::bail!(
                        "Source and destination are the same file: {}",
                        args.source.display()
                    );
                }
                Ok(())
            }
        }
    }
}

fn validate_name(name: &OsStr) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Attribute name must not be empty");
    }
    if name.as_bytes().contains(&0) {
        anyhow::bail!("Attribute name must not contain a NUL byte: {name:?}");
    }
    Ok(())
}
