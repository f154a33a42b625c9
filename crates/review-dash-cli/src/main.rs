use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::context::AppContext;
use commands::{approvals, config, reviews};
use review_dash_config::{Config, PathManager};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reviewdash")]
#[command(about = "ReviewDash - Curate guest reviews and track property performance")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List reviews for the dashboard
    #[command(long_about = "List normalized reviews with filters, sorting and pagination. Host-to-guest reviews are hidden unless --type host-to-guest is given.")]
    Reviews {
        #[command(flatten)]
        args: reviews::ReviewArgs,
    },
    /// Per-property analytics over all reviews
    Analytics {
        /// Merge in Google reviews
        #[arg(long, action = ArgAction::SetTrue)]
        include_google: bool,
    },
    /// Reviews and stats as shown on the public property site
    Public {
        /// Restrict to one listing id
        #[arg(long)]
        listing: Option<String>,
    },
    /// Approve reviews for the public site
    Approve {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },
    /// Remove reviews from the public site
    Unapprove {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },
    /// Show the approved review IDs
    Approvals,
    /// List distinct listings
    Listings,
    /// List distinct booking channels
    Channels,
    /// Fetch and normalize Google reviews for a place
    Google {
        /// Google place id (defaults to google.place_id from the config)
        #[arg(long)]
        place_id: Option<String>,

        /// Listing name to attach to the reviews
        #[arg(long)]
        listing_name: Option<String>,
    },
    /// Manage configuration and credentials
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks secrets)
    Show {
        /// Show secrets unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store API keys in the credentials file
    SetKey {
        #[arg(long)]
        hostaway: Option<String>,

        #[arg(long)]
        google: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let paths = PathManager::default();

    // The log file setting is read before full validation so a broken config still gets logged.
    let log_file = Config::load_or_default(&paths.config_file())
        .ok()
        .and_then(|c| c.logging.file);
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Config { cmd } => config::run_config(cmd, paths, &output),
        Commands::Reviews { args } => reviews::run_reviews(args, &AppContext::load(paths)?, &output).await,
        Commands::Analytics { include_google } => {
            reviews::run_analytics(include_google, &AppContext::load(paths)?, &output).await
        }
        Commands::Public { listing } => reviews::run_public(listing, &AppContext::load(paths)?, &output).await,
        Commands::Approve { ids } => approvals::run_set_approval(ids, true, &AppContext::load(paths)?, &output),
        Commands::Unapprove { ids } => approvals::run_set_approval(ids, false, &AppContext::load(paths)?, &output),
        Commands::Approvals => approvals::run_list_approvals(&AppContext::load(paths)?, &output),
        Commands::Listings => reviews::run_listings(&AppContext::load(paths)?, &output).await,
        Commands::Channels => reviews::run_channels(&AppContext::load(paths)?, &output).await,
        Commands::Google { place_id, listing_name } => {
            reviews::run_google(place_id, listing_name, &AppContext::load(paths)?, &output).await
        }
    }
}
