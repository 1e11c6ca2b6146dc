//! Horoscope bridge: the language-model collaborator contract and an OpenAI-compatible client.
//!
//! The core only depends on [`HoroscopeClient`]. [`ChatHoroscopeClient`] talks to any
//! `/chat/completions` endpoint (Groq by default) and expects the model to answer with a
//! JSON object carrying a `horoscope` string, possibly wrapped in other text.

use crate::config::AstroConfig;
use crate::error::HoroscopeError;
use crate::zodiac::ZodiacSign;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Structured payload returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horoscope {
    pub horoscope: String,
}

/// Language-model collaborator: given a name and sign, returns a horoscope paragraph.
#[async_trait::async_trait]
pub trait HoroscopeClient: Send + Sync {
    async fn request(&self, name: &str, sign: ZodiacSign) -> Result<Horoscope, HoroscopeError>;
}

// OpenAI-compatible request/response
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// Outermost `{ ... }` span, across lines.
static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid JSON span pattern"));

/// Extracts the horoscope payload from free-form model output.
///
/// Models often wrap the JSON in prose or reasoning tags; the greedy span from the first
/// `{` to the last `}` is parsed.
pub fn parse_horoscope(raw: &str) -> Result<Horoscope, HoroscopeError> {
    let span = JSON_OBJECT
        .find(raw)
        .ok_or_else(|| HoroscopeError::Unparsable("no JSON object in reply".to_string()))?;
    serde_json::from_str::<Horoscope>(span.as_str().trim())
        .map_err(|e| HoroscopeError::Unparsable(e.to_string()))
}

/// Renders the prompt template for one subject.
pub fn render_prompt(template: &str, name: &str, sign: ZodiacSign) -> String {
    template
        .replace("{name}", name)
        .replace("{zodiac}", sign.english())
}

/// Horoscope client over an OpenAI-compatible chat completions endpoint.
pub struct ChatHoroscopeClient {
    api_key: String,
    api_base: String,
    model: String,
    prompt: String,
    temperature: f32,
    max_retries: u32,
    client: reqwest::Client,
}

impl ChatHoroscopeClient {
    /// Build from config. Fails when no API key is configured.
    pub fn from_config(config: &AstroConfig) -> Result<Self, HoroscopeError> {
        let key = config.api_key().ok_or(HoroscopeError::MissingApiKey)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            api_key: key.to_string(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            prompt: config.prompt.clone(),
            temperature: config.temperature,
            max_retries: config.max_retries,
            client,
        })
    }

    async fn complete_once(&self, prompt: &str) -> Result<String, HoroscopeError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(HoroscopeError::Api { status, body });
        }

        let parsed: ChatResponse = res.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| HoroscopeError::Unparsable("empty completion".to_string()))
    }

    async fn complete(&self, prompt: &str) -> Result<String, HoroscopeError> {
        let mut attempt = 0;
        loop {
            match self.complete_once(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.max_retries && is_retryable(&e) => {
                    attempt += 1;
                    tracing::warn!(
                        target: "astro::horoscope",
                        attempt,
                        error = %e,
                        "LLM call failed; retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(250 * u64::from(attempt))).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn is_retryable(e: &HoroscopeError) -> bool {
    match e {
        HoroscopeError::Request(_) => true,
        HoroscopeError::Api { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

#[async_trait::async_trait]
impl HoroscopeClient for ChatHoroscopeClient {
    async fn request(&self, name: &str, sign: ZodiacSign) -> Result<Horoscope, HoroscopeError> {
        let prompt = render_prompt(&self.prompt, name, sign);
        let raw = self.complete(&prompt).await?;
        let horoscope = parse_horoscope(&raw)?;
        tracing::info!(
            target: "astro::horoscope",
            sign = %sign,
            model = %self.model,
            "horoscope received"
        );
        Ok(horoscope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_wrapped_in_prose() {
        let raw = "<think>\nLet me write it.\n</think>\nHere you go:\n{\n  \"horoscope\": \"A calm day.\"\n}\nEnjoy!";
        assert_eq!(parse_horoscope(raw).unwrap().horoscope, "A calm day.");
    }

    #[test]
    fn no_object_is_unparsable() {
        assert!(matches!(
            parse_horoscope("just prose"),
            Err(HoroscopeError::Unparsable(_))
        ));
    }

    #[test]
    fn wrong_shape_is_unparsable() {
        assert!(matches!(
            parse_horoscope("{\"forecast\": \"x\"}"),
            Err(HoroscopeError::Unparsable(_))
        ));
    }

    #[test]
    fn prompt_substitutes_name_and_english_sign() {
        let p = render_prompt("For {name} the {zodiac}.", "Meera", ZodiacSign::Pisces);
        assert_eq!(p, "For Meera the Pisces.");
    }

    #[test]
    fn client_requires_api_key() {
        let cfg = AstroConfig::default();
        assert!(matches!(
            ChatHoroscopeClient::from_config(&cfg),
            Err(HoroscopeError::MissingApiKey)
        ));
    }

    #[test]
    fn retry_policy() {
        assert!(is_retryable(&HoroscopeError::Api { status: 503, body: String::new() }));
        assert!(is_retryable(&HoroscopeError::Api { status: 429, body: String::new() }));
        assert!(!is_retryable(&HoroscopeError::Api { status: 401, body: String::new() }));
        assert!(!is_retryable(&HoroscopeError::Unparsable(String::new())));
    }

    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const CALM: &str = r#"{"choices":[{"message":{"content":"ok {\"horoscope\": \"calm\"} done"}}]}"#;

    /// Serves one canned `(status, body)` reply per connection, in order, and records
    /// each request body.
    async fn serve(replies: Vec<(u16, &'static str)>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        tokio::spawn(async move {
            for (status, body) in replies {
                let (mut sock, _) = listener.accept().await.unwrap();
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                let head_end = loop {
                    let n = sock.read(&mut chunk).await.unwrap();
                    assert!(n > 0, "client closed before sending headers");
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(i) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                        break i + 4;
                    }
                };
                let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                while buf.len() < head_end + len {
                    let n = sock.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }
                log.lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&buf[head_end..]).into_owned());

                let reply = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                sock.write_all(reply.as_bytes()).await.unwrap();
                sock.shutdown().await.ok();
            }
        });
        (format!("http://{}", addr), seen)
    }

    fn client_for(api_base: String) -> ChatHoroscopeClient {
        let cfg = AstroConfig {
            api_key: Some("test-key".to_string()),
            api_base,
            timeout_secs: 5,
            max_retries: 2,
            ..AstroConfig::default()
        };
        ChatHoroscopeClient::from_config(&cfg).unwrap()
    }

    #[tokio::test]
    async fn unavailable_then_ok_is_retried_and_parsed() {
        let (base, seen) = serve(vec![(503, "{}"), (200, CALM)]).await;
        let client = client_for(base);

        let h = client.request("Meera", ZodiacSign::Pisces).await.unwrap();
        assert_eq!(h.horoscope, "calm");

        let bodies = seen.lock().unwrap().clone();
        assert_eq!(bodies.len(), 2);
        let sent: serde_json::Value = serde_json::from_str(&bodies[1]).unwrap();
        assert_eq!(sent["model"], crate::config::DEFAULT_MODEL);
        assert_eq!(sent["messages"][0]["role"], "user");
        let content = sent["messages"][0]["content"].as_str().unwrap();
        assert!(content.contains("Meera") && content.contains("Pisces"), "{}", content);
    }

    #[tokio::test]
    async fn server_errors_stop_after_max_retries() {
        let (base, seen) = serve(vec![(503, "busy"), (503, "busy"), (503, "busy")]).await;
        let client = client_for(base);

        match client.request("Meera", ZodiacSign::Pisces).await {
            Err(HoroscopeError::Api { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "busy");
            }
            other => panic!("expected 503 Api error, got {:?}", other.map(|h| h.horoscope)),
        }
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unauthorized_is_not_retried() {
        let (base, seen) = serve(vec![(401, "bad key"), (200, CALM)]).await;
        let client = client_for(base);

        match client.request("Meera", ZodiacSign::Pisces).await {
            Err(HoroscopeError::Api { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("expected 401 Api error, got {:?}", other.map(|h| h.horoscope)),
        }
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_choices_is_unparsable() {
        let (base, _seen) = serve(vec![(200, r#"{"choices":[]}"#)]).await;
        let client = client_for(base);
        assert!(matches!(
            client.request("Meera", ZodiacSign::Pisces).await,
            Err(HoroscopeError::Unparsable(_))
        ));
    }
}
