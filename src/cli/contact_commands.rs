use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::cli::context::CliContext;
use crate::model::{ContactSummary, Group};
use crate::ops::{contact_ops, merge_ops};
use crate::queries::{contact_queries, export_queries};
use crate::queries::contact_queries::MatchCase;
use crate::validation;

pub fn list(ctx: &CliContext) {
    let contacts = match contact_queries::list_contacts(&ctx.conn) {
        Ok(contacts) => contacts,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };
    if contacts.is_empty() {
        println!("No contacts yet. Use 'add' to create one.");
        return;
    }

    println!("Contacts ({}):", contacts.len());
    println!();
    for summary in &contacts {
        print_summary(summary);
    }
}

pub fn add(ctx: &CliContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Name (required): ") {
            Some(s) if !s.is_empty() => s,
            _ => {
                println!("Name is required.");
                return;
            }
        }
    };

    let address = ctx.prompt("Address (optional): ").unwrap_or_default();
    let group = prompt_group(ctx, Group::default());
    let phones = prompt_values(ctx, "Phone", validation::is_valid_phone);
    let emails = prompt_values(ctx, "Email", validation::is_valid_email);

    let address_opt = if address.is_empty() {
        None
    } else {
        Some(address.as_str())
    };

    match contact_ops::add_contact(&ctx.conn, &name, address_opt, group, &phones, &emails) {
        Ok(id) => println!("Added contact {} (id {})", name, id),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show(ctx: &CliContext, args: &str) {
    let id = match ctx.parse_contact_id(args, "show <id>") {
        Some(id) => id,
        None => return,
    };

    match contact_queries::get_contact(&ctx.conn, id) {
        Ok(details) => {
            println!("[{}] {}", details.contact.id, details.contact.name);
            println!("  Group:   {}", details.contact.group);
            println!(
                "  Address: {}",
                details.contact.address.as_deref().unwrap_or("-")
            );
            for phone in &details.phones {
                println!("  Phone:   {}", phone.phone);
            }
            for email in &details.emails {
                println!("  Email:   {}", email.email);
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit(ctx: &CliContext, args: &str) {
    let id = match ctx.parse_contact_id(args, "edit <id>") {
        Some(id) => id,
        None => return,
    };

    let details = match contact_queries::get_contact(&ctx.conn, id) {
        Ok(d) => d,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    println!("Editing {} (press Enter to keep the current value)", details.contact.name);

    let name = match ctx.prompt(&format!("Name [{}]: ", details.contact.name)) {
        Some(s) if !s.is_empty() => s,
        Some(_) => details.contact.name.clone(),
        None => return,
    };

    let current_address = details.contact.address.clone().unwrap_or_default();
    let address = match ctx.prompt(&format!("Address [{}]: ", current_address)) {
        Some(s) if !s.is_empty() => s,
        Some(_) => current_address,
        None => return,
    };

    let group = prompt_group(ctx, details.contact.group);

    let current_phones: Vec<String> = details.phones.iter().map(|p| p.phone.clone()).collect();
    let phones = prompt_replacement(ctx, "Phones", &current_phones, validation::is_valid_phone);
    let current_emails: Vec<String> = details.emails.iter().map(|e| e.email.clone()).collect();
    let emails = prompt_replacement(ctx, "Emails", &current_emails, validation::is_valid_email);

    let address_opt = if address.is_empty() {
        None
    } else {
        Some(address.as_str())
    };

    match contact_ops::update_contact(&ctx.conn, id, &name, address_opt, group, &phones, &emails) {
        Ok(()) => println!("Updated contact {}", id),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &CliContext, args: &str) {
    let id = match ctx.parse_contact_id(args, "delete <id>") {
        Some(id) => id,
        None => return,
    };

    let confirm = ctx.prompt("Delete this contact and all its numbers/emails? (y/N): ");
    if !matches!(confirm.as_deref(), Some("y") | Some("Y")) {
        println!("Cancelled.");
        return;
    }

    match contact_ops::delete_contact(&ctx.conn, id) {
        Ok(()) => println!("Deleted contact {}", id),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn find(ctx: &CliContext, args: &str) {
    match contact_queries::search(&ctx.conn, args.trim(), MatchCase::Insensitive) {
        Ok(matches) => {
            if matches.is_empty() {
                println!("No contacts match '{}'.", args.trim());
                return;
            }
            for summary in &matches {
                print_summary(summary);
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn merge(ctx: &CliContext) {
    match merge_ops::merge_duplicates(&ctx.conn) {
        Ok(outcome) if outcome.groups_merged == 0 => {
            println!("No duplicate names found.");
        }
        Ok(outcome) => {
            println!(
                "Merged {} duplicate group(s), removed {} contact(s).",
                outcome.groups_merged, outcome.contacts_removed
            );
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn export(ctx: &CliContext, args: &str) {
    let path = args.trim();
    if path.is_empty() {
        println!("Usage: export <file.csv>");
        return;
    }

    let rows = match export_queries::export_rows(&ctx.conn) {
        Ok(rows) => rows,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    match write_csv(Path::new(path), &rows) {
        Ok(()) => println!("Exported {} contact(s) to {}", rows.len(), path),
        Err(e) => println!("Error writing {}: {}", path, e),
    }
}

fn write_csv(path: &Path, rows: &[export_queries::ExportRow]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "Name,Address,Group,Phones,Emails")?;
    for row in rows {
        let fields: Vec<String> = row.fields().iter().map(|f| csv_field(f)).collect();
        writeln!(out, "{}", fields.join(","))?;
    }
    out.flush()
}

/// Quote a CSV field if it contains the delimiter, quotes, or newlines.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn print_summary(summary: &ContactSummary) {
    let mut line = format!("  [{}] {} ({})", summary.id, summary.name, summary.group);
    if let Some(address) = &summary.address {
        line.push_str(&format!(" - {}", address));
    }
    if !summary.phones.is_empty() {
        line.push_str(&format!(" | {}", summary.phones.join(", ")));
    }
    if !summary.emails.is_empty() {
        line.push_str(&format!(" | {}", summary.emails.join(", ")));
    }
    println!("{}", line);
}

fn prompt_group(ctx: &CliContext, default: Group) -> Group {
    let options: Vec<&str> = Group::ALL.iter().map(|g| g.as_str()).collect();
    let input = ctx
        .prompt(&format!("Group ({}) [{}]: ", options.join("/"), default))
        .unwrap_or_default();
    if input.is_empty() {
        return default;
    }
    match Group::parse(&input) {
        Some(group) => group,
        None => {
            println!("Unknown group '{}', keeping {}.", input, default);
            default
        }
    }
}

/// Collect values one per line until a blank line. Invalid entries are
/// rejected immediately and re-prompted, like the original form widget.
fn prompt_values(ctx: &CliContext, label: &str, valid: fn(&str) -> bool) -> Vec<String> {
    let mut values = Vec::new();
    loop {
        let input = match ctx.prompt(&format!("{} (blank to finish): ", label)) {
            Some(s) => s,
            None => break,
        };
        if input.is_empty() {
            break;
        }
        if valid(&input) {
            values.push(input);
        } else {
            println!("Not a valid {}.", label.to_lowercase());
        }
    }
    values
}

/// Prompt for a comma-separated replacement set. Enter keeps the current
/// values, '-' clears them.
fn prompt_replacement(
    ctx: &CliContext,
    label: &str,
    current: &[String],
    valid: fn(&str) -> bool,
) -> Vec<String> {
    let shown = if current.is_empty() {
        "-".to_string()
    } else {
        current.join(", ")
    };
    let input = ctx
        .prompt(&format!("{} (comma-separated) [{}]: ", label, shown))
        .unwrap_or_default();
    if input.is_empty() {
        return current.to_vec();
    }
    if input == "-" {
        return Vec::new();
    }

    let values: Vec<String> = input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    for value in &values {
        if !valid(value) {
            println!("'{}' is not valid; keeping the current {}.", value, label.to_lowercase());
            return current.to_vec();
        }
    }
    values
}
