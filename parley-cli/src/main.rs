use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use parley_core::Token;
use parley_core::utils::{
    DEFAULT_CHANNEL_LABEL, DEFAULT_SIGNALING_HOST, DEFAULT_SIGNALING_PORT, DEFAULT_STUN_HOST,
    DEFAULT_STUN_PORT, DEFAULT_TOKEN_LENGTH,
};
use parley_peer::{
    ChannelSettings, ClientConfig, PeerClient, PeerError, ProxyServer, RtcConnector,
    SignalingClient, SignalingEndpoint, SignalingOutput, TransportConfig,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Exchange data channel messages with peers met over a signaling server")]
struct Cli {
    /// STUN server host
    #[arg(short = 's', long, default_value = DEFAULT_STUN_HOST)]
    stun_server: String,

    /// STUN server port
    #[arg(short = 't', long, default_value_t = DEFAULT_STUN_PORT)]
    stun_port: u16,

    /// Use no STUN server
    #[arg(short = 'n', long)]
    no_stun: bool,

    /// HTTP proxy host
    #[arg(long)]
    proxy_server: Option<String>,

    /// HTTP proxy port
    #[arg(long, default_value_t = 8080)]
    proxy_port: u16,

    /// Signaling server host
    #[arg(short = 'w', long, default_value = DEFAULT_SIGNALING_HOST)]
    signaling_server: String,

    /// Signaling server port
    #[arg(short = 'x', long, default_value_t = DEFAULT_SIGNALING_PORT)]
    signaling_port: u16,

    /// Echo received messages back instead of printing them
    #[arg(short = 'e', long)]
    echo: bool,

    /// Only send local candidates that mention the signaling server (experimental)
    #[arg(long)]
    filter_candidates: bool,

    /// Label of data channels opened by this peer
    #[arg(long, default_value = DEFAULT_CHANNEL_LABEL)]
    label: String,

    /// Length of the generated local ID
    #[arg(long, default_value_t = DEFAULT_TOKEN_LENGTH)]
    token_length: usize,

    /// Send a zero-filled binary message of this many bytes after each greeting
    #[arg(long)]
    binary_greeting: Option<usize>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut transport = if self.no_stun {
            TransportConfig::without_stun()
        } else {
            TransportConfig::with_stun(&self.stun_server, self.stun_port)
        };
        transport.proxy = self.proxy_server.as_ref().map(|host| ProxyServer {
            host: host.clone(),
            port: self.proxy_port,
        });

        ClientConfig {
            local_token: Token::generate(self.token_length),
            transport,
            signaling: SignalingEndpoint::new(&self.signaling_server, self.signaling_port),
            channel: ChannelSettings {
                echo: self.echo,
                binary_greeting: self.binary_greeting,
            },
            filter_candidates: self.filter_candidates,
            channel_label: self.label.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.client_config();
    print_setup(&config);

    let connector =
        Arc::new(RtcConnector::new(&config.transport).context("Failed to set up WebRTC")?);

    let url = config.signaling.url(&config.local_token);
    info!("Url is {}", url);
    println!("{}", "Waiting for signaling to be connected...".yellow());

    let (signaling, inbox) = SignalingClient::connect(&url).await?;
    let output: Arc<dyn SignalingOutput> = signaling;
    let client = PeerClient::new(&config, connector, Arc::downgrade(&output));

    let dispatcher = client.dispatcher();
    let dispatch_task = tokio::spawn(async move { dispatcher.run(inbox).await });

    let result = prompt_loop(&client).await;

    println!("{}", "Cleaning up...".dimmed());
    dispatch_task.abort();
    client.shutdown().await;

    result
}

fn print_setup(config: &ClientConfig) {
    match config.transport.ice_servers.first() {
        Some(stun) => info!("Stun server is {}", stun),
        None => warn!(
            "No STUN server is configured. Only local hosts and public IP addresses supported."
        ),
    }
    if let Some(proxy) = &config.transport.proxy {
        info!("Proxy server is {}", proxy);
    }
    if config.filter_candidates {
        warn!(
            "Candidate filtering is experimental; only candidates naming {} are sent",
            config.signaling.host_name()
        );
    }
    println!(
        "The local ID is: {}",
        config.local_token.as_str().green().bold()
    );
    info!(
        "Received data channel messages will be {}",
        if config.channel.echo {
            "echoed back to sender"
        } else {
            "printed to stdout"
        }
    );
}

/// Read remote IDs until an empty line or end of input.
async fn prompt_loop(client: &PeerClient) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("{}", "Enter a remote ID to send an offer:".bold());
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let id = line.trim();
        if id.is_empty() {
            break;
        }

        match client.offer(&Token::from(id)).await {
            Ok(_) => {}
            Err(PeerError::SelfTarget(_)) => continue,
            Err(e @ PeerError::SessionActive(_)) => println!("{}", e.to_string().yellow()),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
