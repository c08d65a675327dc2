use rusqlite::Connection;

use crate::error::AbookResult;

/// One flattened row of the export projection: five text fields, with the
/// distinct phone and email values comma-joined. Writing these to a file or
/// other medium is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub address: String,
    pub group: String,
    pub phones: String,
    pub emails: String,
}

impl ExportRow {
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.name,
            &self.address,
            &self.group,
            &self.phones,
            &self.emails,
        ]
    }
}

/// The same flattened view the listing reads, kept joined for tabular output.
pub fn export_rows(conn: &Connection) -> AbookResult<Vec<ExportRow>> {
    let mut stmt = conn.prepare(
        "SELECT c.name, c.address, c.group_name,
                GROUP_CONCAT(DISTINCT p.phone),
                GROUP_CONCAT(DISTINCT e.email)
         FROM contacts c
         LEFT JOIN phone_numbers p ON c.id = p.contact_id
         LEFT JOIN emails e ON c.id = e.contact_id
         GROUP BY c.id
         ORDER BY c.id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            let address: Option<String> = row.get(1)?;
            let phones: Option<String> = row.get(3)?;
            let emails: Option<String> = row.get(4)?;
            Ok(ExportRow {
                name: row.get(0)?,
                address: address.unwrap_or_default(),
                group: row.get(2)?,
                phones: phones.unwrap_or_default(),
                emails: emails.unwrap_or_default(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}
