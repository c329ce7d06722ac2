//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// CraftSwap - switch between Minecraft instances with a symlink
#[derive(Parser, Debug)]
#[command(name = "craftswap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new instance, seeded from the current Minecraft directory
    Create {
        /// Name of the instance to create
        name: String,
    },

    /// Switch to an instance
    ///
    /// Backs up the current Minecraft directory (if it is a real directory)
    /// and points the Minecraft path at the instance via a symlink.
    Switch {
        /// Name of the instance to activate
        name: String,
    },

    /// List all instances with their mod/config/save counts
    List,

    /// Show the categorized contents of an instance
    Info {
        /// Name of the instance to inspect
        name: String,
    },

    /// Restore the original Minecraft directory
    ///
    /// Removes the instance symlink and moves the backup back into place.
    Restore,

    /// Delete an instance permanently
    ///
    /// The active instance cannot be deleted; switch away first.
    Delete {
        /// Name of the instance to delete
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Get or set configuration values
    ///
    /// Examples:
    ///   craftswap config show
    ///   craftswap config minecraft-path
    ///   craftswap config minecraft-path /home/user/.minecraft
    ///   craftswap config instances-path ~/my-instances
    Config {
        /// Config key (minecraft-path, instances-path, backup-path) or "show"
        #[arg(default_value = "show")]
        key: String,

        /// New value; omit to print the current one
        value: Option<String>,
    },
}
