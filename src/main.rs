use clap::Parser;
use learning_recorder::config::{Cli, Command, Config, default_config_path};
use learning_recorder::handler::AppState;
use learning_recorder::routes::routes;
use learning_recorder::{PageContext, RecorderContext, SpRestClient, on_init, unpack_error};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = args
        .config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(default_config_path);

    let cfg = Config::new(&config_path.to_string_lossy()).unwrap_or_else(|e| {
        tracing::error!(error = %e, path = ?config_path, "failed to load config file");
        std::process::exit(1);
    });

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg).await,
        Command::Record { web_url, page_url } => record(cfg, &web_url, &page_url).await,
    }
}

async fn record(cfg: Config, web_url: &str, page_url: &str) {
    let page = PageContext::new(web_url, page_url).unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid page");
        std::process::exit(2);
    });
    let http = SpRestClient::new(reqwest::Client::new(), cfg.sharepoint.token());
    let ctx = RecorderContext::new(http, page, cfg.recorder);

    match on_init(&ctx).await {
        Ok(outcome) => tracing::info!(outcome = ?outcome, "page load handled"),
        Err(e) => {
            tracing::error!(error = %unpack_error(&e), "page load hook failed");
            std::process::exit(1);
        }
    }
}

async fn serve(cfg: Config) {
    tracing::info!("learning-recorder.svc starting");

    let address = format!("0.0.0.0:{}", cfg.app.get_port());
    let tenant_origin = cfg.sharepoint.tenant_origin().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid sharepoint.tenant_url");
        std::process::exit(1);
    });
    if cfg.sharepoint.token().is_some() {
        tracing::warn!("sharepoint.access_token is only used by `record`; serve forwards caller tokens");
    }

    let app = routes(AppState {
        client: reqwest::Client::new(),
        properties: cfg.recorder,
        tenant_origin,
    });

    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("learning-recorder.svc running on {}", &address);
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "server stopped");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("ctrl+c signal received, preparing to shutdown");
        }
    }

    tracing::info!("learning-recorder.svc going off, graceful shutdown complete");
}
