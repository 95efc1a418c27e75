use clap::Parser;
use spinning_mesh::config::{Cli, Command};
use spinning_mesh::geometry::pack_mesh_blob;
use spinning_mesh::logging::{init_logging, LoggingConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log_filter.clone(),
        ..LoggingConfig::default()
    });

    match &cli.command {
        Some(Command::Pack { output }) => {
            let path = output.as_ref().unwrap_or(&cli.asset);
            pack_mesh_blob(path, &cli.layout())?;
        }
        None => spinning_mesh::run(cli.demo_config())?,
    }
    Ok(())
}
