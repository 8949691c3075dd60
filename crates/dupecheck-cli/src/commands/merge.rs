use crate::commands::scan::PageArgs;
use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{describe_contact, load_contacts};
use anyhow::{Context as _, Result};
use clap::{ArgAction, Args};
use dupecheck_core::{
    find_duplicates_with, select_default_master, Contact, ContactId, MergeOptions, MergeSelection,
};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Contact export (JSON), or `-` for stdin
    pub input: PathBuf,
    #[arg(long, help = "Input holds raw CRM records that need normalizing first")]
    pub raw: bool,
    #[arg(
        long,
        conflicts_with = "duplicates",
        help = "Merge a group reported by `scan` (same page and limit)"
    )]
    pub group: Option<String>,
    #[arg(
        long,
        help = "Contact to keep; with --group defaults to the most recently active member"
    )]
    pub master: Option<String>,
    #[arg(long = "duplicate", action = ArgAction::Append)]
    pub duplicates: Vec<String>,
    #[arg(long, help = "Fold duplicate tags into the master (defaults to merge.keep_tags)")]
    pub keep_tags: Option<bool>,
    #[arg(long, help = "Append duplicate notes to the master (defaults to merge.keep_notes)")]
    pub keep_notes: Option<bool>,
    #[arg(long, help = "Also fill the master's empty company, position, address and notes")]
    pub preview: bool,
    #[command(flatten)]
    pub pages: PageArgs,
}

struct MergeOutcome {
    merged: Contact,
    removed: Vec<ContactId>,
}

pub fn merge(ctx: &Context<'_>, args: MergeArgs) -> Result<()> {
    let options = MergeOptions {
        keep_tags: args.keep_tags.unwrap_or(ctx.config.merge.keep_tags),
        keep_notes: args.keep_notes.unwrap_or(ctx.config.merge.keep_notes),
    };

    let contacts = load_contacts(&args.input, args.raw)?;
    let outcome = match args.group.as_deref() {
        Some(group_id) => merge_group(ctx, &args, &contacts, group_id, options)?,
        None => merge_explicit(&args, &contacts, options)?,
    };

    info!(
        master = %outcome.merged.id,
        duplicates = outcome.removed.len(),
        keep_tags = options.keep_tags,
        keep_notes = options.keep_notes,
        preview = args.preview,
        "merge resolved"
    );

    if ctx.json {
        return print_json(&outcome.merged);
    }

    let label = if args.preview { "Preview" } else { "Merged" };
    println!(
        "{label}: {} duplicate(s) into {}",
        outcome.removed.len(),
        outcome.merged.id
    );
    print_contact(&outcome.merged);
    let removed: Vec<String> = outcome.removed.iter().map(ToString::to_string).collect();
    println!("Remove after applying: {}", removed.join(", "));
    Ok(())
}

fn merge_group(
    ctx: &Context<'_>,
    args: &MergeArgs,
    contacts: &[Contact],
    group_id: &str,
    options: MergeOptions,
) -> Result<MergeOutcome> {
    let (_, page) = args.pages.paginate(contacts, ctx.config)?;
    let groups = find_duplicates_with(page, &ctx.config.matching);
    let group = groups
        .iter()
        .find(|group| group.id.as_str() == group_id)
        .ok_or_else(|| not_found(format!("duplicate group {group_id}")))?;

    let master_id = match args.master.as_deref() {
        Some(id) => {
            let id = ContactId::from(id);
            if !group.contacts.iter().any(|contact| contact.id == id) {
                return Err(not_found(format!("contact {id} in {group_id}")));
            }
            id
        }
        None => select_default_master(&group.contacts)
            .map(|contact| contact.id.clone())
            .ok_or_else(|| not_found(format!("members of {group_id}")))?,
    };
    debug!(group = group_id, master = %master_id, "master selected");

    let duplicate_ids: Vec<ContactId> = group
        .contacts
        .iter()
        .filter(|contact| contact.id != master_id)
        .map(|contact| contact.id.clone())
        .collect();
    resolve(&group.contacts, &master_id, &duplicate_ids, options, args.preview)
}

fn merge_explicit(
    args: &MergeArgs,
    contacts: &[Contact],
    options: MergeOptions,
) -> Result<MergeOutcome> {
    let master_id = args
        .master
        .as_deref()
        .map(ContactId::from)
        .ok_or_else(|| invalid_input("--master is required unless --group is set"))?;
    let duplicate_ids: Vec<ContactId> = args
        .duplicates
        .iter()
        .map(|id| ContactId::from(id.as_str()))
        .collect();
    resolve(contacts, &master_id, &duplicate_ids, options, args.preview)
}

fn resolve(
    contacts: &[Contact],
    master_id: &ContactId,
    duplicate_ids: &[ContactId],
    options: MergeOptions,
    preview: bool,
) -> Result<MergeOutcome> {
    let selection = MergeSelection::resolve(contacts, master_id, duplicate_ids)
        .with_context(|| format!("resolve merge into {master_id}"))?;
    let merged = if preview {
        selection.preview(options)
    } else {
        selection.merge(options)
    };
    let removed = selection.duplicate_ids().into_iter().cloned().collect();
    Ok(MergeOutcome { merged, removed })
}

fn print_contact(contact: &Contact) {
    println!("  {}", describe_contact(contact));
    let optional = [
        ("company", &contact.company),
        ("position", &contact.position),
        ("address", &contact.address),
    ];
    for (label, value) in optional {
        if !value.is_empty() {
            println!("  {label}: {value}");
        }
    }
    if !contact.tags.is_empty() {
        println!("  tags: {}", contact.tags.join(", "));
    }
    if !contact.notes.is_empty() {
        println!("  notes:");
        for line in contact.notes.lines() {
            println!("    {line}");
        }
    }
}
