use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{describe_contact, load_contacts};
use anyhow::Result;
use clap::Args;
use dupecheck_config::AppConfig;
use dupecheck_core::{find_duplicates_with, Contact, DuplicateGroup, PaginationDto, ScanReportDto};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Contact export (JSON), or `-` for stdin
    pub input: PathBuf,
    #[arg(long, help = "Input holds raw CRM records that need normalizing first")]
    pub raw: bool,
    #[arg(long, help = "Only show groups with a member matching this text")]
    pub search: Option<String>,
    #[command(flatten)]
    pub pages: PageArgs,
}

/// Group ids are positions within the scanned page, so `merge --group` must
/// be given the same page and limit as the `scan` that reported them.
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1, help = "1-based page of the contact list to scan")]
    pub page: usize,
    #[arg(long, help = "Contacts per page (defaults to scan.page_size)")]
    pub limit: Option<usize>,
}

impl PageArgs {
    pub fn paginate<'a>(
        &self,
        contacts: &'a [Contact],
        config: &AppConfig,
    ) -> Result<(PaginationDto, &'a [Contact])> {
        if self.page == 0 {
            return Err(invalid_input("--page starts at 1"));
        }
        let page_size = self.limit.unwrap_or(config.scan.page_size);
        if page_size == 0 {
            return Err(invalid_input("--limit must be greater than 0"));
        }

        let pagination = PaginationDto::new(self.page, page_size, contacts.len());
        let (start, end) = pagination.page_bounds(page_size);
        debug!(start, end, total = contacts.len(), "scanning page");
        Ok((pagination, &contacts[start..end]))
    }
}

pub fn scan(ctx: &Context<'_>, args: ScanArgs) -> Result<()> {
    let contacts = load_contacts(&args.input, args.raw)?;
    let (pagination, page) = args.pages.paginate(&contacts, ctx.config)?;

    let mut groups = find_duplicates_with(page, &ctx.config.matching);
    let found = groups.len();
    if let Some(term) = args.search.as_deref() {
        groups.retain(|group| group.matches_search(term));
    }
    info!(
        scanned = page.len(),
        groups = found,
        shown = groups.len(),
        "scan complete"
    );

    if ctx.json {
        return print_json(&ScanReportDto { groups, pagination });
    }

    if groups.is_empty() {
        println!("No duplicate groups.");
        return Ok(());
    }

    for group in &groups {
        print_group(group);
    }
    println!(
        "{} group(s), page {}/{}, {} contact(s) total",
        groups.len(),
        pagination.current_page,
        pagination.total_pages,
        pagination.total_contacts
    );
    Ok(())
}

fn print_group(group: &DuplicateGroup) {
    println!(
        "{}  {}  {}%  ({} contacts)",
        group.id,
        group.match_type.as_str(),
        group.similarity,
        group.contacts.len()
    );
    for (index, contact) in group.contacts.iter().enumerate() {
        let marker = if index == 0 { "*" } else { " " };
        println!("  {marker} {}", describe_contact(contact));
    }
}
