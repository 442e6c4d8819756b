use clap::Parser;
use rent_scout::app::TerminalObserver;
use rent_scout::utils::{logger, validation::Validate};
use rent_scout::{
    CliConfig, NominatimGeocoder, OverpassClient, ScoutError, SearchOrchestrator, SearchOutcome,
    SearchSession, TomlConfig,
};

fn fail(e: &ScoutError) -> ! {
    tracing::error!("❌ {} (exit code {})", e, e.exit_code());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match TomlConfig::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            fail(&e);
        }
    };
    if let Err(e) = settings.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        fail(&e);
    }

    let request = cli.search_form().normalize();
    let orchestrator = SearchOrchestrator::new(
        NominatimGeocoder::new(&settings)?,
        OverpassClient::new(&settings)?,
    );
    let session = SearchSession::new(orchestrator, TerminalObserver::new(!cli.json));

    match session.submit(request).await {
        SearchOutcome::Current(Ok(result)) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            tracing::debug!(
                "Search finished with {} provider links and {} nearby places",
                result.provider_links.len(),
                result.nearby.len()
            );
        }
        // The observer has already printed the status line.
        SearchOutcome::Current(Err(e)) => fail(&e),
        SearchOutcome::Superseded => {}
    }

    Ok(())
}
