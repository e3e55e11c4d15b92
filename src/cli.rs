// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "mesh-picking")]
#[command(about = "Replay pointer events against a scene of click-tracking meshes", long_about = None)]
pub struct Cli {
    /// JSON scene script to replay
    pub script: PathBuf,

    /// Attach pick results to pointer move events
    #[arg(long = "pick-on-move", default_value = "false")]
    pub pick_on_move: bool,

    /// Print the final mesh states as JSON
    #[arg(long = "json", default_value = "false")]
    pub json: bool,
}
