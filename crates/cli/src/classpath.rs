use crate::ArchiveArgs;
use crate::view::ClasspathRow;
use nestjar_core::ClassPath;
use tabled::{Table, settings::Style};
use tracing::info;

pub fn run(args: &ArchiveArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let launcher = crate::open_launcher(args)?;
    let layout = launcher.layout();

    let mut rows = Vec::new();
    let mut archives = Vec::new();
    let mut pending = launcher.classpath_archives()?;
    while let Some(entry) = pending.remaining().first().cloned() {
        let Some(archive) = pending.next() else {
            break;
        };
        let archive = archive?;
        rows.push(ClasspathRow::new(rows.len(), layout, &entry, archive.as_ref()));
        archives.push(archive);
    }

    let mut class_path = ClassPath::new(archives);
    info!(
        "Resolved {} classpath entries for {}",
        class_path.len(),
        args.path.display()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{}", Table::new(&rows).with(Style::psql()));
    }

    class_path.close()?;
    Ok(())
}
