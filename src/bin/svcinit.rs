use anyhow::{bail, Result};
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use svcinit::service::NoopRunner;
use svcinit::{config, Action, Registry};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let registry = Registry::system();

    match args[1].as_str() {
        "detect" => detect(&registry),
        "list" => list(&registry),
        "describe" => describe(&registry, &args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"svcinit - Init system detection

Usage:
    svcinit detect             Print the init system managing this host
    svcinit list               Probe every known init system
    svcinit describe <config>  Show where and how a service would be managed
    svcinit help               Show this help message

Config files may be YAML, JSON or TOML. Set RUST_LOG=debug to trace probes.
"#
    );
}

fn detect(registry: &Registry) -> Result<()> {
    let backend = registry.resolve()?;
    tracing::info!("resolved init system {}", backend.name());

    println!("{}", backend.name());
    match backend.try_interactive() {
        Ok(interactive) => println!("interactive: {}", interactive),
        Err(e) => println!("interactive: unknown ({})", e),
    }

    Ok(())
}

fn list(registry: &Registry) -> Result<()> {
    let active = registry.resolve()?.name().to_string();

    for (name, detected) in registry.probe_all() {
        let marker = if name == active { "*" } else { " " };
        let state = if detected { "detected" } else { "-" };
        println!("{} {:<20} {}", marker, name, state);
    }

    Ok(())
}

fn describe(registry: &Registry, args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        bail!("svcinit describe requires a config file. Usage: svcinit describe <config>");
    };

    let config = config::load(Path::new(path))?;
    let service = registry.resolve()?.construct(Arc::new(NoopRunner), config)?;

    println!("service:    {}", service);
    println!("executable: {}", service.executable().display());
    println!("definition: {}", service.definition_path().display());
    for action in Action::ALL {
        println!("{:<11} {}", format!("{}:", action), service.control_command(action).join(" "));
    }

    Ok(())
}
