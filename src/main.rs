//! CLI entry point for devopshub

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devopshub::commands::new::NewPost;
use devopshub::content::Icon;
use devopshub::generator::Generator;
use devopshub::{FilterCriteria, Site};

#[derive(Parser)]
#[command(name = "devopshub")]
#[command(version)]
#[command(about = "Static generator and preview server for the DevOpsHub blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site with the sample posts
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category label
        #[arg(short = 'C', long)]
        category: String,

        /// Tag, may be repeated
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Card icon (container, cloud, shield, git-branch, ...)
        #[arg(short, long)]
        icon: Option<Icon>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Generate, then serve the site locally
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, category, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Filter posts by query and category
    Search {
        /// Case-insensitive text matched against titles and excerpts
        #[arg(default_value = "")]
        query: String,

        /// Exact category label
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "devopshub=debug,info"
    } else {
        "devopshub=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            devopshub::commands::init::init_site(&target_dir)?;
            println!("Initialized DevOpsHub site in {:?}", target_dir);
        }

        Commands::New {
            title,
            category,
            tags,
            icon,
        } => {
            let site = Site::new(&base_dir)?;
            let options = NewPost {
                title: &title,
                category: &category,
                tags: &tags,
                icon,
            };
            let path = devopshub::commands::new::create_post(&site, &options)?;
            println!("Created: {}", path.display());
        }

        Commands::Generate => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip, open } => {
            let site = Site::new(&base_dir)?;

            // Generate first; the same corpus then answers search requests
            tracing::info!("Generating static files...");
            let corpus = site.load_corpus()?;
            Generator::new(&site)?.generate(&corpus)?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            devopshub::server::start(&site, corpus, &ip, port, open).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            devopshub::commands::list::run(&site, &r#type)?;
        }

        Commands::Search {
            query,
            category,
            json,
        } => {
            let site = Site::new(&base_dir)?;
            let criteria = FilterCriteria { query, category };
            devopshub::commands::search::run(&site, &criteria, json)?;
        }

        Commands::Version => {
            println!("devopshub version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
