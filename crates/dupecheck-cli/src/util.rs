use anyhow::{Context as _, Result};
use chrono::DateTime;
use dupecheck_core::time::parse_activity_timestamp;
use dupecheck_core::{Contact, RawContact};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

pub const STDIN_PATH: &str = "-";

// Exports arrive either as a bare array or wrapped the way the CRM list API returns them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Records<T> {
    List(Vec<T>),
    Wrapped { contacts: Vec<T> },
}

impl<T> Records<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Records::List(items) | Records::Wrapped { contacts: items } => items,
        }
    }
}

pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| "read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

pub fn parse_records<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let records: Records<T> =
        serde_json::from_str(text).with_context(|| "parse contact records")?;
    Ok(records.into_vec())
}

/// Loads contacts from a file (or `-` for stdin). `raw` inputs are CRM
/// records that still need normalizing.
pub fn load_contacts(path: &Path, raw: bool) -> Result<Vec<Contact>> {
    let text = read_input(path)?;
    let contacts: Vec<Contact> = if raw {
        parse_records::<RawContact>(&text)?
            .into_iter()
            .map(RawContact::normalize)
            .collect()
    } else {
        parse_records::<Contact>(&text)?
    };
    debug!(count = contacts.len(), raw, "contacts loaded");
    Ok(contacts)
}

pub fn format_activity_date(value: &str) -> String {
    match parse_activity_timestamp(value)
        .ok()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
    {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None if value.is_empty() => "-".to_string(),
        None => value.to_string(),
    }
}

pub fn describe_contact(contact: &Contact) -> String {
    let name = if contact.name.is_empty() {
        "(no name)"
    } else {
        contact.name.as_str()
    };
    let mut parts = vec![format!("{}  {}", contact.id, name)];
    if !contact.email.is_empty() {
        parts.push(format!("<{}>", contact.email));
    }
    if !contact.phone.is_empty() {
        parts.push(contact.phone.clone());
    }
    parts.push(format!(
        "last activity {}",
        format_activity_date(&contact.last_activity)
    ));
    parts.join("  ")
}
