use anyhow::Context;
use colored::Colorize;
use nslink_server::{NslinkServer, ServerConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Config(args) => cmd_config(args, &cli.format),
    }
}

/// Config file (or defaults) with command-line overrides applied.
pub fn effective_config(source: &ConfigSource) -> anyhow::Result<ServerConfig> {
    let mut config = match &source.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = source.bind {
        config.bind_addr = bind;
    }
    config.domains.extend(source.domains.iter().cloned());
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = effective_config(&args.source)?;
    let server = NslinkServer::new(config).context("starting server")?;

    println!(
        "{} nslink server on {}",
        "✓".green().bold(),
        server.config().bind_addr.to_string().bold()
    );
    for domain in server.config().startup_domains() {
        println!("  domain: {}", domain.cyan());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_config(args: ConfigArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = effective_config(&args.source)?;
    let text = match format {
        OutputFormat::Text => toml::to_string_pretty(&config)?,
        OutputFormat::Json => serde_json::to_string_pretty(&config)?,
    };
    println!("{}", text.trim_end());
    Ok(())
}
