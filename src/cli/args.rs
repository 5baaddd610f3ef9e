//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Virtual route trees: synthesize routes, preview mutations and resolve layouts
#[derive(Parser, Debug)]
#[command(name = "routetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the entry tree of the app directory
    Tree {
        /// App directory (default: <project_dir>/<app_dir>)
        #[arg(value_hint = ValueHint::DirPath)]
        app_dir: Option<PathBuf>,
    },

    /// Print the synthesized route table
    Routes {
        /// App directory (default: <project_dir>/<app_dir>)
        #[arg(value_hint = ValueHint::DirPath)]
        app_dir: Option<PathBuf>,
    },

    /// Print the layout chain wrapping a page, outermost first
    Layouts {
        /// Page route path, e.g. /dashboard
        page: String,
        /// App directory (default: <project_dir>/<app_dir>)
        #[arg(value_hint = ValueHint::DirPath)]
        app_dir: Option<PathBuf>,
    },

    /// Check a route path typed by a user
    Validate {
        /// Route path, e.g. /blog/my-post
        path: String,
    },

    /// Preview creating a route (nothing is written)
    Create {
        /// Route path to create
        path: String,
        #[arg(value_hint = ValueHint::DirPath)]
        app_dir: Option<PathBuf>,
    },

    /// Preview deleting a route (nothing is written)
    Delete {
        /// Route path to delete
        path: String,
        #[arg(value_hint = ValueHint::DirPath)]
        app_dir: Option<PathBuf>,
    },

    /// Preview adding a page-bearing segment below a route (nothing is written)
    Segment {
        /// Route path of the parent directory
        parent: String,
        /// Segment name (default: new-segment)
        #[arg(short, long)]
        name: Option<String>,
        #[arg(value_hint = ValueHint::DirPath)]
        app_dir: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}
