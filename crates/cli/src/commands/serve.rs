//! `deskrail serve`: start the HTTP gateway.

use deskrail_config::AppConfig;

pub async fn run(
    mut config: AppConfig,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("Deskrail gateway");
    println!("  listening:  {}:{}", config.gateway.host, config.gateway.port);
    println!("  generation: {}", config.generation.backend);
    println!("  retrieval:  {}", config.retrieval.backend);
    println!("  docs:       {}", config.gateway.docs_dir);

    deskrail_gateway::serve(&config).await?;

    Ok(())
}
