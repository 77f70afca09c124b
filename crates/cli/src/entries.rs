use crate::view::EntryRow;
use std::path::Path;
use tabled::{Table, settings::Style};

pub fn run(path: &Path, prefix: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut archive = nestjar_core::open_archive(path)?;

    let rows = {
        let entries = match prefix {
            Some(prefix) => archive.entries_under(prefix)?,
            None => archive.entries()?,
        };
        entries
            .map(|entry| entry.map(EntryRow::from))
            .collect::<Result<Vec<_>, _>>()?
    };

    if rows.is_empty() {
        println!("No entries found.");
    } else {
        println!("{}", Table::new(&rows).with(Style::psql()));
    }

    archive.close()?;
    Ok(())
}
