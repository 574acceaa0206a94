use anyhow::Result;
use clap::Parser;
use pkglaunch::commands;
use pkglaunch::config::{BUILD_VERSION, Channel, LauncherConfig};
use std::path::PathBuf;

/// pkglaunch - self-installing package launcher
///
/// Installs itself into a versioned package directory, answers
/// `<scheme>://` links, and starts programs described by launch plans
/// against the packages installed next to it.
///
/// Examples:
///   pkglaunch                          # Install, or show status once installed
///   pkglaunch pkglaunch://rungame/ID   # Handle a link from the browser
///   pkglaunch list                     # List installed packages
#[derive(Parser, Debug)]
#[command(author, version = BUILD_VERSION, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Link handed over by the URI scheme handler (same as `open URI`)
    #[arg(value_name = "URI")]
    uri: Option<String>,

    /// Package repository root (overrides defaults; also via PKGLAUNCH_ROOT)
    #[arg(
        long = "root",
        short = 'r',
        env = "PKGLAUNCH_ROOT",
        value_name = "PATH",
        global = true
    )]
    root: Option<PathBuf>,

    /// Release channel; the debug launcher installs under its own name
    #[arg(
        long,
        value_enum,
        env = "PKGLAUNCH_CHANNEL",
        default_value_t = Channel::Stable,
        global = true
    )]
    channel: Channel,

    /// Override the launcher's package name
    #[arg(long, value_name = "NAME", global = true)]
    package_name: Option<String>,

    /// Override the URI scheme the launcher answers to
    #[arg(long, value_name = "SCHEME", global = true)]
    scheme: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show where the launcher runs from and whether it is installed
    Status,

    /// List installed packages
    List,

    /// Install this launcher into the package repository
    Install(InstallArgs),

    /// Handle a `<scheme>://<command>/<param>` link
    Open(OpenArgs),

    /// Resolve a launch plan against the installed packages
    Plan(PlanArgs),
}

#[derive(clap::Args, Debug)]
struct InstallArgs {
    /// Do not ask for confirmation
    #[arg(short = 'y', long)]
    yes: bool,
}

#[derive(clap::Args, Debug)]
struct OpenArgs {
    #[arg(value_name = "URI")]
    uri: String,
}

#[derive(clap::Args, Debug)]
struct PlanArgs {
    /// Launch plan JSON file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Start the resolved command
    #[arg(long)]
    run: bool,
}

impl Cli {
    fn launcher_config(&self) -> LauncherConfig {
        let mut config = LauncherConfig::for_channel(self.channel);
        if let Some(name) = &self.package_name {
            config = config.with_package_name(name);
        }
        if let Some(scheme) = &self.scheme {
            config = config.with_scheme(scheme);
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = cli.launcher_config();
    let runtime = pkglaunch::runtime::RealRuntime;

    match cli.command {
        Some(Commands::Status) => commands::status(&runtime, &config)?,
        Some(Commands::List) => commands::list(&runtime, cli.root)?,
        Some(Commands::Install(args)) => {
            commands::install(&runtime, &config, cli.root, args.yes)?;
        }
        Some(Commands::Open(args)) => {
            commands::open(&runtime, &config, &args.uri)?;
        }
        Some(Commands::Plan(args)) => {
            commands::plan(&runtime, cli.root, &args.file, args.run)?;
        }
        None => commands::launch(&runtime, &config, cli.root, cli.uri.as_deref())?,
    }
    Ok(())
}
