use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "veil")]
#[command(about = "Blur faces, sensitive text or whole images", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "VEIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for uploads and the history database
    #[arg(long, global = true, env = "VEIL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Redact a single image file
    Redact {
        /// Image to process
        path: PathBuf,

        /// full, face or text
        #[arg(long, default_value = "face")]
        mode: String,

        /// Blur strength, 1 (light) to 3 (strong)
        #[arg(long, default_value = "2")]
        blur: i64,
    },

    /// Show recent processing history
    History {
        /// Number of records (at most 50)
        #[arg(long, default_value = "50")]
        limit: u32,
    },
}
