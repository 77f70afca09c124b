mod classpath;
mod entries;
mod locate;
mod main_class;
mod view;

use clap::{Parser, Subcommand};
use nestjar_core::{Launcher, LauncherConfig, Layout};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "nestjar",
    version,
    about = "Resolve the classpath of executable jar and war archives",
    long_about = "nestjar inspects an executable archive (packaged or exploded) and resolves the \
                  ordered classpath a class-loading runtime would see, honouring the archive's \
                  classpath index when present."
)]
pub struct Cli {
    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args)]
pub struct ArchiveArgs {
    /// Path to the archive file or exploded directory
    #[arg(value_name = "ARCHIVE")]
    pub path: PathBuf,

    /// Packaging layout (jar or war). Detected from the content when omitted.
    #[arg(long)]
    pub layout: Option<Layout>,

    /// JSON launcher configuration; NESTJAR_* environment variables override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the ordered classpath of an archive
    #[command(
        long_about = "Resolves the classes directory and libraries of the archive and prints \
                            them in classpath order, one URL per entry."
    )]
    Classpath {
        #[command(flatten)]
        archive: ArchiveArgs,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List archive entries
    Entries {
        #[arg(value_name = "ARCHIVE")]
        path: PathBuf,

        /// Only list entries below this prefix
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Print the application start class from the manifest
    MainClass {
        #[command(flatten)]
        archive: ArchiveArgs,
    },
    /// Find which classpath entry provides a resource
    Locate {
        #[command(flatten)]
        archive: ArchiveArgs,

        /// Resource name, e.g. com/example/Application.class
        #[arg(value_name = "RESOURCE")]
        resource: String,

        /// Print every match in classpath order instead of the first
        #[arg(long)]
        all: bool,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = nestjar_core::logging::init_logging("cli", cli.verbose);

    match cli.command {
        Commands::Classpath { archive, json } => classpath::run(&archive, json),
        Commands::Entries { path, prefix } => entries::run(&path, prefix.as_deref()),
        Commands::MainClass { archive } => main_class::run(&archive),
        Commands::Locate {
            archive,
            resource,
            all,
        } => locate::run(&archive, &resource, all),
    }
}

fn load_config(path: Option<&Path>) -> nestjar_core::Result<LauncherConfig> {
    let config = match path {
        Some(path) => LauncherConfig::from_json_file(path)?,
        None => LauncherConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok())
}

pub(crate) fn open_launcher(args: &ArchiveArgs) -> nestjar_core::Result<Launcher> {
    let config = load_config(args.config.as_deref())?;
    nestjar_core::launcher_for_path(&args.path, args.layout, config)
}
