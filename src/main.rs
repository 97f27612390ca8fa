use clap::Parser;
use crosswars_gen::domain::ports::GeneratorConfig;
use crosswars_gen::utils::{logger, validation::Validate};
use crosswars_gen::{CliConfig, FileConfig, GeneratorEngine, LocalStorage, OpenAiTextGenerator};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse().with_default_themes();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting crosswars-gen");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let api_key = match cli.api_key.clone().or_else(|| std::env::var("OPENAI_API_KEY").ok()) {
        Some(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("❌ No API key: pass --api-key or set OPENAI_API_KEY");
            std::process::exit(1);
        }
    };

    let modes = cli.modes();
    let theme_override = cli.theme.clone();

    // A TOML file takes over tuning and catalog; mode/theme/verbosity stay
    // on the command line.
    match &cli.config {
        Some(path) => {
            let config = FileConfig::from_file(path)?.resolve();
            run(&config, &api_key, &modes, theme_override.as_deref()).await
        }
        None => run(&cli, &api_key, &modes, theme_override.as_deref()).await,
    }
}

async fn run<C: GeneratorConfig + Validate>(
    config: &C,
    api_key: &str,
    modes: &[crosswars_gen::Mode],
    theme_override: Option<&str>,
) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let provider = OpenAiTextGenerator::new(
        config.api_base(),
        api_key,
        config.model(),
        Duration::from_secs(config.request_timeout_secs()),
    )?;
    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = GeneratorEngine::new(&provider, &storage, config);

    match engine.run_all(modes, theme_override).await {
        Ok(artifacts) => {
            tracing::info!("✅ Generation completed successfully!");
            for artifact in &artifacts {
                tracing::info!("📁 Puzzle saved to: {}/{}", config.output_path(), artifact);
                println!("✅ {}/{}", config.output_path(), artifact);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Generation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
