use rusqlite::Connection;
use std::io::{self, Write};

use crate::error::AbookError;
use crate::model::{Contact, Id};

pub struct CliContext {
    pub conn: Connection,
}

impl CliContext {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Parse a contact id from command arguments. Prints usage on failure.
    pub fn parse_contact_id(&self, args: &str, usage: &str) -> Option<Id<Contact>> {
        if args.trim().is_empty() {
            println!("Usage: {}", usage);
            return None;
        }
        match Id::parse(args) {
            Ok(id) => Some(id),
            Err(_) => {
                println!("Not a contact id: {}", args.trim());
                None
            }
        }
    }

    pub fn print_error(&self, err: &AbookError) {
        println!("Error: {}", err);
    }
}
