use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use courier::adapters::peer_client::PeerClient;
use courier::agents::handler::RequestHandler;
use courier::agents::leaf::LeafAgent;
use courier::agents::llm::CompletionChain;
use courier::agents::router::{RouterAgent, RoutingTable};
use courier::cli::Cli;
use courier::config::{AgentMode, Settings};
use courier::domain::AgentCard;
use courier::persistence::SqliteRequestLog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("starting {} on {}:{}", settings.agent.name, host, port);

    let chain = CompletionChain::from_settings(&settings.llm);
    let card = AgentCard::advertised(
        settings.advertised_url(),
        &settings.agent.name,
        &settings.agent.description,
    );

    let handler: Arc<dyn RequestHandler> = match settings.agent.mode {
        AgentMode::Leaf => {
            let log = SqliteRequestLog::connect(&settings.database.url).await?;
            Arc::new(LeafAgent::new(
                Arc::new(log),
                chain,
                settings.agent.reply_prefix.clone(),
            ))
        }
        AgentMode::Router => {
            let table =
                RoutingTable::from_targets(&settings.routing.targets, &settings.advertised_url())?;
            Arc::new(RouterAgent::new(
                table,
                settings.routing.policy,
                chain,
                PeerClient::new(),
            ))
        }
    };

    let app = courier::create_app(handler, card);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
