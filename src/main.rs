use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use picfetch::application::{BatchSummary, ResolveUrlsUseCase};
use picfetch::domain::ports::RecordStorePort;
use picfetch::infrastructure::{
    AppConfig, CliArgs, ConfigLoader, DiskRecordStore, MemoryRecordStore, build_registry,
};
use picfetch::presentation::{OutputFormat, render_reports, render_services};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let loader = ConfigLoader::new()?;
    let mut config = loader.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn RecordStorePort>> {
    if !config.store.persist {
        debug!("Record store persistence disabled");
        return Ok(Arc::new(MemoryRecordStore::new()));
    }

    let store = match &config.store.path {
        Some(path) => DiskRecordStore::new(path.clone()).await?,
        None => DiskRecordStore::default_location().await?,
    };
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = picfetch::VERSION, "Starting picfetch");

    let store = open_store(&config).await?;
    let registry = Arc::new(build_registry(&config, store)?);
    let use_case = ResolveUrlsUseCase::new(registry.clone(), config.http.max_concurrent_lookups);

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    if args.list_services {
        render_services(&use_case.services(), format, &mut std::io::stdout().lock())?;
        return Ok(ExitCode::SUCCESS);
    }

    let reports = use_case.execute(&args.urls).await;
    render_reports(
        &reports,
        args.size.sizes(),
        format,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;

    for service in registry.services() {
        if let Some(adapter) = registry.adapter(&service.id) {
            debug!(service = %service.id, memo = %adapter.memo().stats(), "Memo statistics");
        }
    }

    let summary = BatchSummary::from_reports(&reports);
    Ok(if summary.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
