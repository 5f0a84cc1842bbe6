//! Exchange engine for the model backend
//!
//! This module implements the retry-wrapped request/response exchange with
//! the backend's `/api/generate` endpoint. Every failure path resolves to a
//! displayable agent-shaped turn; the engine never propagates an error past
//! its boundary, so callers need no separate error-handling path for the
//! exchange itself.

use crate::chat::{render_prompt, Turn};
use crate::config::BackendConfig;
use crate::error::{Result, SolaceError};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Reply text used when the backend answers successfully but with an empty body
const EMPTY_REPLY_FALLBACK: &str = "I apologize, but I couldn't generate a response.";

/// Classified cause of a failed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend host could not be reached (connection refused, DNS)
    Unreachable,
    /// The request exceeded the per-attempt timeout
    Timeout,
    /// The backend answered with a non-success HTTP status
    Status(u16),
    /// Anything else that went wrong during the exchange
    Unexpected(String),
}

impl FailureKind {
    /// User-visible message shown in place of an agent reply
    pub fn user_message(&self, host: &str) -> String {
        match self {
            Self::Unreachable => format!(
                "Error: Cannot connect to the model backend. Please ensure it is running at {}",
                host
            ),
            Self::Timeout => "Error: Request timed out. Please try again.".to_string(),
            Self::Status(code) => {
                format!("Error: Unable to reach the AI service (Status: {})", code)
            }
            Self::Unexpected(description) => format!("Error: {}", description),
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "connection failed"),
            Self::Timeout => write!(f, "request timed out"),
            Self::Status(code) => write!(f, "status {}", code),
            Self::Unexpected(description) => write!(f, "unexpected: {}", description),
        }
    }
}

/// Delay strategy applied between retry attempts
///
/// Injectable so tests run with zero delay. `attempt` is 1-based and names
/// the attempt that just failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backoff {
    /// No delay between attempts
    None,
    /// The same delay after every failed attempt
    Fixed(Duration),
    /// Delay doubles after each failed attempt
    Exponential { base: Duration },
}

impl Backoff {
    /// Delay to apply after the given failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(delay) => *delay,
            Self::Exponential { base } => {
                let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
                base.saturating_mul(factor)
            }
        }
    }
}

/// Outcome of one exchange: a reply, or an absorbed failure
///
/// Both variants carry an agent turn so the presentation layer can display
/// the result uniformly; `Failure` additionally carries the classification.
#[derive(Debug, Clone)]
pub enum ExchangeResult {
    /// The backend produced a reply
    Reply(Turn),
    /// All attempts failed; the turn holds the user-visible error text
    Failure { turn: Turn, kind: FailureKind },
}

impl ExchangeResult {
    /// The turn to append and display, regardless of outcome
    pub fn into_turn(self) -> Turn {
        match self {
            Self::Reply(turn) => turn,
            Self::Failure { turn, .. } => turn,
        }
    }

    /// Whether the exchange produced a real reply
    pub fn is_reply(&self) -> bool {
        matches!(self, Self::Reply(_))
    }
}

/// Request body for the backend's generate endpoint
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

/// Fixed decoding parameters sent with every request
#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
}

/// Response body from the backend's generate endpoint
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Retry-wrapped client for the backend generate endpoint
///
/// # Examples
///
/// ```no_run
/// use solace::chat::{ExchangeEngine, Turn};
/// use solace::config::BackendConfig;
///
/// # tokio_test::block_on(async {
/// let engine = ExchangeEngine::new(&BackendConfig::default()).unwrap();
/// let history = vec![Turn::user("Hello")];
/// let turn = engine.respond("mistral:latest", &history).await.into_turn();
/// println!("{}", turn.text);
/// # });
/// ```
pub struct ExchangeEngine {
    client: Client,
    host: String,
    temperature: f32,
    top_p: f32,
    max_retries: u32,
    backoff: Backoff,
}

impl ExchangeEngine {
    /// Create an engine from the backend configuration
    ///
    /// The per-attempt timeout and the retry delay come from the config;
    /// a zero `retry_delay_ms` disables backoff entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("solace/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SolaceError::Backend(format!("Failed to create HTTP client: {}", e)))?;

        let backoff = if config.retry_delay_ms == 0 {
            Backoff::None
        } else {
            Backoff::Fixed(Duration::from_millis(config.retry_delay_ms))
        };

        tracing::info!(
            "Initialized exchange engine: host={}, retries={}, timeout={}s",
            config.host,
            config.max_retries,
            config.timeout_seconds
        );

        Ok(Self {
            client,
            host: config.host.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_retries: config.max_retries.max(1),
            backoff,
        })
    }

    /// Replace the delay strategy
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// The configured backend host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Exchange the conversation history for the agent's next turn
    ///
    /// Renders the prompt, submits it as a non-streaming completion request,
    /// and retries on connection failure, timeout, non-success status, and
    /// unexpected errors alike, up to the configured attempt limit. On
    /// exhaustion the final failure is absorbed into an agent-shaped turn
    /// whose text names the failure kind.
    pub async fn respond(&self, model: &str, history: &[Turn]) -> ExchangeResult {
        let prompt = render_prompt(history);
        let mut last_failure = FailureKind::Unexpected("no attempts were made".to_string());

        for attempt in 1..=self.max_retries {
            tracing::debug!(
                "Backend attempt {}/{} for model {}",
                attempt,
                self.max_retries,
                model
            );

            match self.attempt(model, &prompt).await {
                Ok(text) => {
                    let text = if text.is_empty() {
                        EMPTY_REPLY_FALLBACK.to_string()
                    } else {
                        text
                    };
                    return ExchangeResult::Reply(Turn::agent(text));
                }
                Err(kind) => {
                    tracing::warn!("Backend attempt {} failed: {}", attempt, kind);
                    last_failure = kind;
                    if attempt < self.max_retries {
                        let delay = self.backoff.delay_for(attempt);
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                    }
                }
            }
        }

        tracing::error!(
            "Backend unavailable after {} attempts: {}",
            self.max_retries,
            last_failure
        );
        let turn = Turn::agent(last_failure.user_message(&self.host));
        ExchangeResult::Failure {
            turn,
            kind: last_failure,
        }
    }

    /// Send a minimal single-turn exchange and report reachability
    ///
    /// The probe turn never enters conversation history.
    pub async fn probe(&self, model: &str) -> bool {
        let history = [Turn::user("Hello")];
        self.respond(model, &history).await.is_reply()
    }

    /// One request/response attempt against the generate endpoint
    async fn attempt(&self, model: &str, prompt: &str) -> std::result::Result<String, FailureKind> {
        let url = format!("{}/api/generate", self.host);
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                top_p: self.top_p,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FailureKind::Status(status.as_u16()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| FailureKind::Unexpected(format!("Failed to parse response: {}", e)))?;

        Ok(body.response)
    }
}

/// Map a transport-level error onto the failure taxonomy
fn classify_transport_error(error: reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_connect() {
        FailureKind::Unreachable
    } else {
        FailureKind::Unexpected(error.to_string())
    }
}
