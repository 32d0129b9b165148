use clap::{Parser, Subcommand};
use simmer_common::TransformationMethod;

#[derive(Parser)]
#[command(name = "simmer")]
#[command(about = "Reorder your playlists: Simmer (clustering), Bake (shortest path) or Microwave (chaos)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend API root (overrides the saved config)
    #[arg(long, env = "SIMMER_BASE_URL", global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show whether the backend session is logged in
    Status,

    /// Log in through the streaming service's OAuth page, then hand the
    /// browser's session cookie to the terminal
    Login {
        /// Browser session cookie (`session=...` or just the value)
        #[arg(long)]
        session: Option<String>,

        /// Only print the authorization URL
        #[arg(long, conflicts_with = "session")]
        no_wait: bool,
    },

    /// Log out and forget the saved session
    Logout,

    /// Show the current user's profile
    Me,

    /// List your playlists
    Playlists,

    /// List the tracks of one playlist
    Tracks {
        #[arg(required = true)]
        playlist_id: String,
    },

    /// Reorder playlists. Without ids, pick them interactively
    Cook {
        /// Playlist ids
        playlist_ids: Vec<String>,

        /// Method (simmer/bake/microwave)
        #[arg(short, long, default_value = "simmer")]
        method: TransformationMethod,

        /// Write the new order back to the streaming service
        #[arg(long)]
        to_spotify: bool,
    },

    /// Show or set the active playlist id
    Active {
        /// Playlist id to make active
        #[arg(long)]
        set: Option<String>,
    },

    /// Show or edit settings
    Config {
        /// Set the backend API root
        #[arg(long)]
        set_base_url: Option<String>,

        /// Save a session cookie (`name=value`)
        #[arg(long)]
        set_session: Option<String>,

        /// Forget the saved session cookie
        #[arg(long)]
        clear_session: bool,

        /// Print the settings
        #[arg(long)]
        show: bool,
    },
}
