//! Subcommand implementations
//!
//! Each command writes its normal output to the supplied writer and leaves
//! diagnostics to `tracing`, so `main` can route the two independently.

use crate::cli::{Args, Command, CopyArgs, GetArgs, ListArgs, RemoveArgs, SetArgs};
use crate::copy::copy_xattrs;
use crate::encoding::{decode_value, encode_value};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;

/// Run the command selected on the command line
///
/// # Errors
///
/// Returns an error if the attribute operation fails or output cannot be
/// written.
pub fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    match &args.command {
        Command::Get(get) => run_get(get, out),
        Command::Set(set) => run_set(set),
        Command::List(list) => run_list(list, out),
        Command::Remove(remove) => run_remove(remove),
        Command::Copy(copy) => run_copy(copy),
    }
}

fn run_get(args: &GetArgs, out: &mut impl Write) -> Result<()> {
    let value = if args.link.no_dereference {
        fs_xattr::lget(&args.path, &args.name)?
    } else {
        fs_xattr::get(&args.path, &args.name)?
    };
    tracing::debug!("read {} bytes from {}", value.len(), args.name.to_string_lossy());
    writeln!(out, "{}", encode_value(&value, args.encoding))?;
    Ok(())
}

fn run_set(args: &SetArgs) -> Result<()> {
    let value = decode_value(&args.value)
        .with_context(|| format!("Cannot parse value for {}", args.name.to_string_lossy()))?;
    let mode = args.mode();
    if args.link.no_dereference {
        fs_xattr::lset_with_mode(&args.path, &args.name, &value, mode)?;
    } else {
        fs_xattr::set_with_mode(&args.path, &args.name, &value, mode)?;
    }
    tracing::info!(
        "set {} ({} bytes, {:?}) on {}",
        args.name.to_string_lossy(),
        value.len(),
        mode,
        args.path.display()
    );
    Ok(())
}

fn run_list(args: &ListArgs, out: &mut impl Write) -> Result<()> {
    let names = if args.link.no_dereference {
        fs_xattr::llist(&args.path)?
    } else {
        fs_xattr::list(&args.path)?
    };

    for name in names {
        let shown = name.to_string_lossy();
        if !args.dump {
            writeln!(out, "{shown}")?;
            continue;
        }
        let value = if args.link.no_dereference {
            fs_xattr::lget(&args.path, &name)
        } else {
            fs_xattr::get(&args.path, &name)
        };
        match value {
            Ok(value) => writeln!(out, "{shown}={}", encode_value(&value, args.encoding))?,
            // Removed between listing and reading
            Err(e) if e.is_not_found() => tracing::debug!("skipping {shown}: {e}"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn run_remove(args: &RemoveArgs) -> Result<()> {
    if args.link.no_dereference {
        fs_xattr::lremove(&args.path, &args.name)?;
    } else {
        fs_xattr::remove(&args.path, &args.name)?;
    }
    tracing::info!(
        "removed {} from {}",
        args.name.to_string_lossy(),
        args.path.display()
    );
    Ok(())
}

fn run_copy(args: &CopyArgs) -> Result<()> {
    let src = File::open(&args.source)
        .with_context(|| format!("Cannot open source {}", args.source.display()))?;
    let dst = File::open(&args.destination)
        .with_context(|| format!("Cannot open destination {}", args.destination.display()))?;

    let report = copy_xattrs(&src, &dst, args.skip_unsupported)?;
    tracing::info!(
        "copied {} attributes from {} to {}",
        report.copied,
        args.source.display(),
        args.destination.display()
    );
    if !report.is_complete() {
        anyhow::bail!(
            "{} extended attributes could not be copied to {}",
            report.failed,
            args.destination.display()
        );
    }
    Ok(())
}
