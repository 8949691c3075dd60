use crate::commands::{print_json, Context};
use crate::util::load_contacts;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Raw CRM export (JSON), or `-` for stdin
    pub input: PathBuf,
}

/// Always prints JSON: the output is meant to be fed back into `scan` or `merge`.
pub fn normalize(_ctx: &Context<'_>, args: NormalizeArgs) -> Result<()> {
    let contacts = load_contacts(&args.input, true)?;
    info!(count = contacts.len(), "contacts normalized");
    print_json(&contacts)
}
