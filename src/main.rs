mod cli;

use mediaforge::{config, server};
use mediaforge_av::{from_params, MediaKind};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    // Load config
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Mediaforge server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );
    tracing::info!("Writing converted files to {:?}", config.media.output_dir);

    if let Err(e) = mediaforge_av::require_tool(mediaforge_av::FFMPEG) {
        tracing::warn!("{}; conversions will fail until it is installed", e);
    }

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediaforge=trace,mediaforge_av=trace,tower_http=debug".to_string()
        } else {
            "mediaforge=info,mediaforge_av=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Convert {
            input,
            kind,
            out_dir,
            name,
            gif,
            dry_run,
            params,
        } => convert_file(
            &input,
            cli.config.as_deref(),
            ConvertOptions {
                kind,
                out_dir,
                name,
                gif,
                dry_run,
                params: params.into_iter().collect(),
            },
        ),
        Commands::CheckTools => check_tools(),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("mediaforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

struct ConvertOptions {
    kind: Option<String>,
    out_dir: Option<PathBuf>,
    name: Option<String>,
    gif: bool,
    dry_run: bool,
    params: BTreeMap<String, String>,
}

fn convert_file(input: &Path, config_path: Option<&Path>, opts: ConvertOptions) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    let kind = match opts.kind.as_deref() {
        Some(kind) => kind.parse::<MediaKind>()?,
        None => config.media.default_kind,
    };
    let out_dir = opts.out_dir.unwrap_or(config.media.output_dir);
    let name = match opts.name {
        Some(name) => name,
        None => input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .context("Cannot derive an output name from the input path")?,
    };

    let (converter, warnings) = from_params(&opts.params, kind, input);
    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }
    converter.validate()?;

    if opts.dry_run {
        let args = if opts.gif {
            converter.gif_args(&converter.gif_output_path(&out_dir, &name))
        } else {
            converter.convert_args(&converter.output_path(&out_dir, &name))
        };
        println!("{} {}", mediaforge_av::FFMPEG, args.join(" "));
        return Ok(());
    }

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    tracing::info!("Converting {:?} as {}", input, kind);
    let output = if opts.gif {
        converter.to_gif(&out_dir, &name)?
    } else {
        converter.convert(&out_dir, &name)?
    };

    println!("Output: {}", output.display());
    Ok(())
}

fn check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = mediaforge_av::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable conversions.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Output directory: {}", config.media.output_dir.display());
    println!("  Default kind: {}", config.media.default_kind);

    Ok(())
}
