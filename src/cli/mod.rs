pub mod context;
pub mod contact_commands;

use std::path::Path;

use rusqlite::Connection;

use crate::db::schema;
use context::CliContext;

/// Run the interactive REPL.
pub fn run(db_path: &Path) {
    println!("Address Book");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let conn = match Connection::open(db_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    if let Err(e) = schema::initialize(&conn) {
        eprintln!("Error initializing database: {}", e);
        return;
    }

    let ctx = CliContext::new(conn);
    repl_loop(&ctx);
}

fn repl_loop(ctx: &CliContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            "list" | "ls" => contact_commands::list(ctx),
            "add" => contact_commands::add(ctx, args),
            "show" | "view" => contact_commands::show(ctx, args),
            "edit" => contact_commands::edit(ctx, args),
            "delete" | "rm" => contact_commands::delete(ctx, args),
            "find" | "search" => contact_commands::find(ctx, args),
            "merge" => contact_commands::merge(ctx),
            "export" => contact_commands::export(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Parse input into command and args.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(
        r#"
COMMANDS:

  list                 List all contacts
  add [name]           Add a new contact (interactive)
  show <id>            Show a contact's details
  edit <id>            Edit a contact (Enter keeps current values)
  delete <id>          Delete a contact and its numbers/emails
  find <text>          Search contacts by name
  merge                Merge contacts that share a name
  export <file.csv>    Export all contacts to a CSV file
  help                 Show this help
  exit                 Quit
"#
    );
}
