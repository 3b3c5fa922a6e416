use ripple_sssp::web::server::{start_server, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut config = ServerConfig::default();
    if let Some(port) = args.get(1) {
        config.port = port.parse()?;
    }
    if let Some(static_dir) = args.get(2) {
        config.static_dir = static_dir.clone();
    }

    println!("Starting ripple_sssp web server");
    println!("   Port: {}", config.port);
    println!("   Static files: {}", config.static_dir);
    println!("   CORS enabled: {}", config.enable_cors);
    println!("   Max sessions: {}", config.max_sessions);
    println!("   Max nodes per graph: {}", config.max_nodes);

    start_server(config).await?;

    Ok(())
}
