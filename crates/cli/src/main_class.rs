use crate::ArchiveArgs;

pub fn run(args: &ArchiveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut launcher = crate::open_launcher(args)?;
    println!("{}", launcher.main_class()?);
    launcher.close()?;
    Ok(())
}
