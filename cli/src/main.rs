use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use frames::lifecycle::{DEFAULT_BASE_DELAY, DEFAULT_KEEPALIVE_INTERVAL, DEFAULT_MAX_ATTEMPTS, ReconnectPolicy};
use frames::{Inbound, NotificationPayload, Outbound};
use futures_util::{SinkExt, StreamExt};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, ORIGIN};
use serde_json::Value;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;

mod feed;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

const SESSION_COOKIE: &str = "sessionid";
const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "x-csrftoken";
const PUSH_PATH: &str = "/ws/notifications/";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing session; pass --session-id or set APPROVAL_SESSION_ID")]
    MissingSession,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("websocket failed: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("timed out waiting for pong")]
    Timeout,
    #[error("server returned {status} for {what}: {message}")]
    ServerError { what: String, status: u16, message: String },
    #[error("push channel gave up after {0} attempts")]
    RetriesExhausted(u32),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<tokio_tungstenite::tungstenite::Error> for CliError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Ws(Box::new(error))
    }
}

#[derive(Parser, Debug)]
#[command(name = "approval-cli", about = "Application review notification CLI")]
struct Cli {
    #[arg(long, env = "APPROVAL_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Session cookie value of a logged-in user.
    #[arg(long, env = "APPROVAL_SESSION_ID")]
    session_id: Option<String>,

    #[arg(long, env = "APPROVAL_CSRF_TOKEN")]
    csrf_token: Option<String>,

    /// Log at debug level.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    session_id: Option<String>,
    csrf_token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Round-trip a keep-alive on the push channel.
    Ping,
    /// Tail notifications and board updates, reconnecting on drop.
    Watch(WatchArgs),
    /// List unread notifications.
    Unread {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Mark one notification read.
    MarkRead { notification_id: u64 },
    /// Mark every notification read.
    MarkAllRead,
}

#[derive(Args, Debug, Clone)]
struct WatchArgs {
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    #[arg(long, default_value_t = duration_ms(DEFAULT_BASE_DELAY))]
    base_delay_ms: u64,

    #[arg(long, default_value_t = DEFAULT_KEEPALIVE_INTERVAL.as_secs())]
    keepalive_secs: u64,

    /// Print raw JSON messages instead of one-line summaries.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl WatchArgs {
    fn policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_attempts: self.max_attempts,
            keepalive_interval: Duration::from_secs(self.keepalive_secs.max(1)),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .init();

    let ctx = CliContext {
        base_url: cli.base_url,
        session_id: cli.session_id,
        csrf_token: cli.csrf_token,
    };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Watch(args) => feed::run_watch(&ctx, &args).await,
        Command::Unread { json } => run_unread(&ctx, json).await,
        Command::MarkRead { notification_id } => {
            let path = format!("/api/notifications/{notification_id}/read/");
            api_request(&ctx, reqwest::Method::POST, &path).await?;
            println!("marked {notification_id} read");
            Ok(())
        }
        Command::MarkAllRead => {
            api_request(&ctx, reqwest::Method::POST, "/api/notifications/mark-all-read/").await?;
            println!("marked all read");
            Ok(())
        }
    }
}

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    let (mut stream, _) = tokio_tungstenite::connect_async(push_request(ctx)?).await?;
    stream
        .send(Message::Text(frames::encode_outbound(&Outbound::Ping).into()))
        .await?;

    let wait = async {
        loop {
            let Some(message) = stream.next().await else {
                return Err(CliError::WsClosed);
            };
            match message? {
                Message::Text(text) => match frames::decode_inbound(&text) {
                    Ok(Inbound::Pong) => return Ok(()),
                    Ok(other) => tracing::debug!(?other, "skipping message while waiting for pong"),
                    Err(error) => tracing::warn!(%error, "dropping push message"),
                },
                Message::Close(_) => return Err(CliError::WsClosed),
                _ => {}
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .map_err(|_| CliError::Timeout)??;

    let _ = stream.close(None).await;
    println!("pong");
    Ok(())
}

async fn run_unread(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let body = api_request(ctx, reqwest::Method::GET, "/api/notifications/unread/").await?;
    let items = unread_items(&body)?;
    if items.is_empty() {
        eprintln!("no unread notifications");
    }
    for item in &items {
        if json {
            println!("{}", serde_json::to_string(item)?);
        } else {
            println!("{}", feed::format_notification(item));
        }
    }
    Ok(())
}

fn unread_items(body: &Value) -> Result<Vec<NotificationPayload>, CliError> {
    match body.get("results") {
        Some(results) => Ok(serde_json::from_value(results.clone())?),
        None => Ok(Vec::new()),
    }
}

async fn api_request(ctx: &CliContext, method: reqwest::Method, path: &str) -> Result<Value, CliError> {
    let cookie = cookie_header(ctx.session_id.as_deref(), ctx.csrf_token.as_deref())
        .ok_or(CliError::MissingSession)?;

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);
    if let Some(token) = ctx.csrf_token.as_deref() {
        headers.insert(CSRF_HEADER, HeaderValue::from_str(token)?);
    }
    headers.insert(reqwest::header::REFERER, HeaderValue::from_str(&ctx.base_url)?);

    let client = reqwest::Client::builder().default_headers(headers).build()?;
    let url = api_url(&ctx.base_url, path);
    tracing::debug!(%method, %url, "api request");

    let response = client.request(method, &url).send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError {
            what: path.to_owned(),
            status: status.as_u16(),
            message: value.to_string(),
        });
    }
    Ok(value)
}

fn api_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// `Cookie` header for the session, or `None` without a session id.
fn cookie_header(session_id: Option<&str>, csrf_token: Option<&str>) -> Option<String> {
    let session_id = session_id.filter(|s| !s.is_empty())?;
    Some(match csrf_token.filter(|t| !t.is_empty()) {
        Some(token) => format!("{SESSION_COOKIE}={session_id}; {CSRF_COOKIE}={token}"),
        None => format!("{SESSION_COOKIE}={session_id}"),
    })
}

fn ws_url(base_url: &str) -> Result<String, CliError> {
    let base = base_url.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("http://") {
        return Ok(format!("ws://{rest}{PUSH_PATH}"));
    }
    if let Some(rest) = base.strip_prefix("https://") {
        return Ok(format!("wss://{rest}{PUSH_PATH}"));
    }
    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}

/// Handshake request for the push channel, carrying the session cookie.
fn push_request(ctx: &CliContext) -> Result<Request, CliError> {
    let mut request = ws_url(&ctx.base_url)?.into_client_request()?;
    let headers = request.headers_mut();
    if let Some(cookie) = cookie_header(ctx.session_id.as_deref(), ctx.csrf_token.as_deref()) {
        headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);
    } else {
        tracing::warn!("no session; the server may refuse the push channel");
    }
    headers.insert(ORIGIN, HeaderValue::from_str(ctx.base_url.trim_end_matches('/'))?);
    Ok(request)
}
