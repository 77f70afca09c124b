use crate::ArchiveArgs;
use tracing::info;

pub fn run(args: &ArchiveArgs, resource: &str, all: bool) -> Result<(), Box<dyn std::error::Error>> {
    let launcher = crate::open_launcher(args)?;
    let mut class_path = launcher.create_class_loader(launcher.classpath_archives()?)?;

    let found = if all {
        class_path.resources(resource)?
    } else {
        class_path.find_resource(resource)?.into_iter().collect()
    };

    if found.is_empty() {
        info!("{} not found on the classpath of {}", resource, args.path.display());
        println!("Not found: {}", resource);
    }
    for url in &found {
        println!("{}", url);
    }

    class_path.close()?;
    Ok(())
}
