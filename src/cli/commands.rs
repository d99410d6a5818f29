use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "liveavatar", version, about = "LiveAvatar proxy server and client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file path globally
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,

    /// Base URL of a running proxy, used by the client commands
    #[arg(short, long, global = true, default_value = "http://127.0.0.1:3000")]
    pub server: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP proxy server
    Serve,

    /// Create or list contexts
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Browse public avatars
    Avatars {
        #[command(subcommand)]
        action: AvatarAction,
    },

    /// Open a checkout session for a credits package
    Checkout {
        /// Named pricing tier (Basic, Pro, Enterprise)
        #[arg(short, long, conflicts_with = "price_id")]
        tier: Option<String>,
        /// Provider price identifier
        #[arg(short, long)]
        price_id: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ContextAction {
    /// Create a new context
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        prompt: String,
        #[arg(short, long)]
        opening_text: Option<String>,
        /// Reference link, optionally followed by `::` and an FAQ entry. Repeatable.
        #[arg(short, long = "link")]
        links: Vec<String>,
    },

    /// List contexts
    List {
        #[arg(long, default_value = "1")]
        page: String,
        #[arg(long, default_value = "20")]
        page_size: String,
    },
}

#[derive(Subcommand)]
pub enum AvatarAction {
    /// List public avatars
    List,
}
