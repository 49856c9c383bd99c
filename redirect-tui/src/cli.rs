use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "redirect-tui")]
#[command(about = "Terminal UI for managing URL redirects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the redirect manager
    Run,
    /// Print all redirects and exit
    List,
    /// Store an API token for later sessions
    Login,
    /// Remove the stored API token
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
