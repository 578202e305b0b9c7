//! mcp-browser-use server binary
//!
//! Runs the Model Context Protocol (MCP) server for browser automation over
//! stdio (default), SSE, or streamable HTTP.

use clap::{Parser, ValueEnum};
use mcp_browser_use::browser::{browser_available, ConnectionOptions, LaunchOptions};
use mcp_browser_use::mcp::BrowserServer;
use rmcp::{ServiceExt, transport::stdio};
use rmcp::transport::{
    sse_server::{SseServer, SseServerConfig},
    streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// Server-Sent Events transport
    Sse,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "mcp-browser-use")]
#[command(version)]
#[command(about = "Browser automation MCP server", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<String>,

    /// WebSocket endpoint of an already-running browser to attach to
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Disable the browser sandbox (needed in some containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for SSE or HTTP transport (default: 3000)
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// SSE endpoint path (default: /sse)
    #[arg(long, default_value = "/sse")]
    sse_path: String,

    /// SSE POST path for messages (default: /message)
    #[arg(long, default_value = "/message")]
    sse_post_path: String,

    /// HTTP streamable endpoint path (default: /mcp)
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

fn launch_options_from(cli: &Cli) -> LaunchOptions {
    // Environment (including .env) provides defaults; flags win
    let mut options = LaunchOptions::from_env();
    options.headless = !cli.headed;

    if let Some(ref path) = cli.executable_path {
        options.chrome_path = Some(path.into());
    }

    if let Some(ref dir) = cli.user_data_dir {
        options.user_data_dir = Some(dir.into());
    }

    if cli.no_sandbox {
        options.sandbox = false;
    }

    options
}

fn build_server(
    ws_endpoint: &Option<String>,
    options: &LaunchOptions,
) -> mcp_browser_use::Result<BrowserServer> {
    match ws_endpoint {
        Some(url) => BrowserServer::with_connection(ConnectionOptions::new(url.clone())),
        None => BrowserServer::with_options(options.clone()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // The driver library is chatty at info level; its noise would drown the
    // server's own logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("headless_chrome", log::LevelFilter::Warn)
        .filter_module("tungstenite", log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();

    // A remote browser needs no local executable
    if cli.ws_endpoint.is_none() && !browser_available() {
        log::error!("No Chrome/Chromium-family browser found. Install one or set CHROME_PATH. Exiting.");
        std::process::exit(1);
    }

    let options = launch_options_from(&cli);

    eprintln!("mcp-browser-use MCP Server v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "Browser mode: {}",
        if options.headless { "headless" } else { "headed" }
    );

    if let Some(ref path) = options.chrome_path {
        eprintln!("Browser executable: {}", path.display());
    }

    if let Some(ref dir) = options.user_data_dir {
        eprintln!("User data directory: {}", dir.display());
    }

    if let Some(ref endpoint) = cli.ws_endpoint {
        eprintln!("WebSocket endpoint: {}", endpoint);
    }

    // Route to appropriate transport
    match cli.transport {
        Transport::Stdio => {
            eprintln!("Transport: stdio");
            eprintln!("Ready to accept MCP connections via stdio");

            let service = build_server(&cli.ws_endpoint, &options)
                .map_err(|e| format!("Failed to create browser server: {}", e))?;
            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            eprintln!("Server quit with reason: {:?}", quit_reason);

            // Give a small delay for destructors to complete
            tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
            eprintln!("Cleanup complete, exiting...");
        }
        Transport::Sse => {
            eprintln!("Transport: SSE");
            eprintln!("Port: {}", cli.port);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let config = SseServerConfig {
                bind: bind_addr.parse()?,
                sse_path: cli.sse_path.clone(),
                post_path: cli.sse_post_path.clone(),
                ct: CancellationToken::new(),
                sse_keep_alive: None,
            };

            let (sse_server, router) = SseServer::new(config);

            eprintln!(
                "Ready to accept MCP connections at http://{}{}",
                bind_addr, cli.sse_path
            );

            // Register service factory for each connection
            let ws_endpoint = cli.ws_endpoint.clone();
            let _cancellation_token = sse_server.with_service(move || {
                build_server(&ws_endpoint, &options).expect("Failed to create browser server")
            });

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, router.into_make_service()).await?;
        }
        Transport::Http => {
            eprintln!("Transport: HTTP streamable");
            eprintln!("Port: {}", cli.port);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let ws_endpoint = cli.ws_endpoint.clone();
            let service_factory = move || {
                build_server(&ws_endpoint, &options)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
            };

            let http_service = StreamableHttpService::new(
                service_factory,
                LocalSessionManager::default().into(),
                Default::default(),
            );

            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            eprintln!(
                "Ready to accept MCP connections at http://{}{}",
                bind_addr, cli.http_path
            );

            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
