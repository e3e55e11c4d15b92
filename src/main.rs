use anyhow::Result;
use clap::Parser;
use log::info;

use mesh_picking::cli::Cli;
use mesh_picking::script::{load_script, replay};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut script = load_script(&cli.script)?;
    if cli.pick_on_move {
        script.pick_on_move = true;
    }

    info!("Loaded {:?}: {} mesh(es), {} event(s)", cli.script, script.meshes.len(), script.events.len());
    let outcome = replay(&script)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for mesh in &outcome.meshes {
            println!("{:<24} rotating={}", mesh.name, mesh.rotating);
        }
    }

    Ok(())
}
