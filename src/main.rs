use anyhow::{Context, Result};
use clap::Parser;

use shikisync::cli::{self, Cli, Command};
use shikisync::domain::value_objects::ListSource;
use shikisync::infrastructure::config::{self, Config};
use shikisync::shared::utils::init_logger;
use shikisync::SyncService;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logger();

    let args = Cli::parse();

    if let Command::Template = args.command {
        cli::print_template_help();
        return Ok(());
    }

    let config_dir = config::config_dir(args.config.as_deref())
        .context("Failed to resolve the config directory")?;
    let config = Config::load_or_init(&config_dir).context("Failed to load configuration")?;
    let mut service =
        SyncService::new(&config, &config_dir).context("Failed to initialize clients")?;

    let result = match args.command {
        Command::List { source } => {
            let source: ListSource = source.parse()?;
            service.fetch(source).await?
        }
        Command::Delta { reverse } => {
            let base = if reverse {
                ListSource::MyAnimeList
            } else {
                ListSource::Shikimori
            };
            service.delta(base).await?
        }
        Command::Template => unreachable!("handled above"),
    };

    cli::emit(&result, args.template.as_deref(), args.json)?;
    Ok(())
}
