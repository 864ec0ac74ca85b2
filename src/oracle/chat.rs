//! Chat-completions oracle
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint (Gemini
//! exposes one). The model is asked for a small JSON object holding the word
//! and a short explanation; plain-text replies are still accepted.

use super::{Oracle, OracleError, OracleRequest, OracleSuggestion};
use crate::config::OracleConfig;
use crate::core::to_symbols;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;
use tracing::debug;

/// Longest error body kept in `OracleError::Status`
const MAX_ERROR_BODY: usize = 200;

/// Oracle backed by a hosted language model
pub struct ChatOracle {
    config: OracleConfig,
    client: reqwest::blocking::Client,
}

impl ChatOracle {
    /// Create an oracle with its own HTTP client
    ///
    /// # Errors
    /// Returns `OracleError::Transport` if the client cannot be built.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| OracleError::Transport(e.to_string()))?;
        Ok(Self::with_client(config, client))
    }

    #[must_use]
    pub const fn with_client(config: OracleConfig, client: reqwest::blocking::Client) -> Self {
        Self { config, client }
    }

    #[must_use]
    pub const fn config(&self) -> &OracleConfig {
        &self.config
    }
}

impl Oracle for ChatOracle {
    fn suggest(&self, request: &OracleRequest<'_>) -> Result<OracleSuggestion, OracleError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: format!(
                        "You are an expert Wordle player. The game is in {}.",
                        request.language.name()
                    ),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(request),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            endpoint = %self.config.endpoint,
            candidates = request.candidates.len(),
            "querying oracle"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .map_err(|e| transport_error(&e, request.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().unwrap_or_default();
            truncate_at_char_boundary(&mut body, MAX_ERROR_BODY);
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = response.json().map_err(|e| {
            if e.is_timeout() {
                OracleError::Timeout(request.timeout)
            } else {
                OracleError::MalformedResponse(e.to_string())
            }
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OracleError::MalformedResponse("no message content".to_string()))?;

        let suggestion = parse_content(&content, request.word_length)?;
        debug!(word = %suggestion.word, "oracle answered");
        Ok(suggestion)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn transport_error(error: &reqwest::Error, timeout: Duration) -> OracleError {
    if error.is_timeout() {
        OracleError::Timeout(timeout)
    } else {
        OracleError::Transport(error.to_string())
    }
}

fn truncate_at_char_boundary(text: &mut String, max: usize) {
    if text.len() > max {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
}

/// User prompt for one round
fn build_prompt(request: &OracleRequest<'_>) -> String {
    let mut prompt = format!(
        "We are playing Wordle in {} with {}-letter words.\n",
        request.language.name(),
        request.word_length
    );

    if request.history.is_empty() {
        prompt.push_str("No guesses yet.\n");
    } else {
        prompt.push_str("Guesses so far (G = right place, Y = wrong place, - = absent):\n");
        for record in request.history {
            let _ = writeln!(
                prompt,
                "- {} {}",
                record.guess(),
                to_symbols(record.feedback())
            );
        }
    }

    let _ = writeln!(prompt, "What we know:\n{}", request.constraints);
    let _ = writeln!(
        prompt,
        "Best remaining candidates: {}",
        request.candidates.join(", ")
    );
    prompt.push_str(
        "Choose the word most likely to find the answer. Reply with a JSON object \
         {\"word\": \"...\", \"explanation\": \"...\"} where the explanation is one \
         short sentence.",
    );
    prompt
}

/// JSON shape the model is asked to reply with
#[derive(Deserialize)]
struct Reply {
    word: String,
    #[serde(default)]
    explanation: String,
}

/// Drop a surrounding markdown code fence and its language tag
fn strip_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Language tag runs to the end of the opening line
    match inner.split_once('\n') {
        Some((tag, body)) if !tag.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}

/// Split a model reply into the suggested word and its explanation
///
/// A `{"word": ..., "explanation": ...}` object is preferred, bare or inside
/// a code fence. Anything else falls back to plain text: the first
/// whitespace-separated token is the word, with surrounding punctuation
/// (markdown emphasis, quotes) stripped.
///
/// # Errors
/// Returns `OracleError::MalformedResponse` if the word is not a word of
/// `word_length` letters.
pub fn parse_content(content: &str, word_length: usize) -> Result<OracleSuggestion, OracleError> {
    let body = strip_fence(content);
    let (token, explanation) = match serde_json::from_str::<Reply>(body) {
        Ok(reply) => (reply.word, reply.explanation.trim().to_string()),
        Err(_) => {
            let mut parts = body.splitn(2, char::is_whitespace);
            let token = parts.next().unwrap_or_default().to_string();
            let explanation = parts
                .next()
                .unwrap_or_default()
                .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ':' | '*'))
                .trim()
                .to_string();
            (token, explanation)
        }
    };

    let word = token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    if word.is_empty() {
        return Err(OracleError::MalformedResponse("empty reply".to_string()));
    }
    if !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(OracleError::MalformedResponse(format!(
            "'{word}' is not a word"
        )));
    }
    if word.len() != word_length {
        return Err(OracleError::MalformedResponse(format!(
            "'{word}' has {} letters, expected {word_length}",
            word.len()
        )));
    }

    Ok(OracleSuggestion { word, explanation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LetterStatus, Word};
    use crate::oracle::Language;
    use crate::solver::{ConstraintModel, GuessRecord};

    #[test]
    fn parse_word_and_explanation() {
        let suggestion = parse_content("CRANE\nCovers the most common letters.", 5).unwrap();
        assert_eq!(suggestion.word, "crane");
        assert_eq!(suggestion.explanation, "Covers the most common letters.");
    }

    #[test]
    fn parse_strips_markdown() {
        let suggestion = parse_content("**slate** - keeps s and t in play", 5).unwrap();
        assert_eq!(suggestion.word, "slate");
        assert_eq!(suggestion.explanation, "keeps s and t in play");
    }

    #[test]
    fn parse_word_only() {
        let suggestion = parse_content("  irate  ", 5).unwrap();
        assert_eq!(suggestion.word, "irate");
        assert!(suggestion.explanation.is_empty());
    }

    #[test]
    fn parse_json_reply() {
        let reply = r#"{"word": "Slate", "explanation": " Tests s and t. "}"#;
        let suggestion = parse_content(reply, 5).unwrap();
        assert_eq!(suggestion.word, "slate");
        assert_eq!(suggestion.explanation, "Tests s and t.");
    }

    #[test]
    fn parse_fenced_json_reply() {
        let reply = "```json\n{\"word\": \"irate\", \"explanation\": \"Five common letters.\"}\n```";
        let suggestion = parse_content(reply, 5).unwrap();
        assert_eq!(suggestion.word, "irate");
        assert_eq!(suggestion.explanation, "Five common letters.");

        let bare_fence = "```\n{\"word\": \"crane\"}\n```";
        let suggestion = parse_content(bare_fence, 5).unwrap();
        assert_eq!(suggestion.word, "crane");
        assert!(suggestion.explanation.is_empty());
    }

    #[test]
    fn parse_json_reply_checks_word() {
        assert!(matches!(
            parse_content(r#"{"word": "cranes", "explanation": "x"}"#, 5),
            Err(OracleError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_content(r#"{"word": ""}"#, 5),
            Err(OracleError::MalformedResponse(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_words() {
        assert!(matches!(
            parse_content("", 5),
            Err(OracleError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_content("cranes are birds", 5),
            Err(OracleError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_content("cr4ne", 5),
            Err(OracleError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_content("crâne", 5),
            Err(OracleError::MalformedResponse(_))
        ));
    }

    #[test]
    fn prompt_mentions_history_constraints_and_candidates() {
        let guess = Word::new("crane").unwrap();
        let feedback = vec![
            LetterStatus::Absent,
            LetterStatus::Absent,
            LetterStatus::Correct,
            LetterStatus::Absent,
            LetterStatus::Correct,
        ];
        let mut model = ConstraintModel::new(5);
        model.update(&guess, &feedback).unwrap();
        let summary = model.summary();
        let history = vec![GuessRecord::new(guess, feedback)];
        let candidates = vec!["slate".to_string(), "plate".to_string()];

        let prompt = build_prompt(&OracleRequest {
            candidates: &candidates,
            constraints: &summary,
            history: &history,
            language: Language::Fr,
            word_length: 5,
            timeout: Duration::from_secs(1),
        });

        assert!(prompt.contains("French"));
        assert!(prompt.contains("crane --G-G"));
        assert!(prompt.contains("__a_e"));
        assert!(prompt.contains("slate, plate"));
    }

    #[test]
    fn error_body_truncation_respects_char_boundaries() {
        let mut body = "é".repeat(150);
        truncate_at_char_boundary(&mut body, 201);
        assert_eq!(body.len(), 200);
    }

    // The blocking client must not run on an async worker thread
    fn suggest_blocking(
        endpoint: String,
        timeout: Duration,
    ) -> Result<OracleSuggestion, OracleError> {
        let oracle = ChatOracle::new(OracleConfig::new("test-key").with_endpoint(endpoint))?;
        let summary = ConstraintModel::new(5).summary();
        let candidates = vec!["crane".to_string(), "slate".to_string()];
        oracle.suggest(&OracleRequest {
            candidates: &candidates,
            constraints: &summary,
            history: &[],
            language: Language::En,
            word_length: 5,
            timeout,
        })
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn suggest_parses_completion() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/v1/chat/completions"))
            .and(wiremock::matchers::header("authorization", "Bearer test-key"))
            .and(wiremock::matchers::body_partial_json(serde_json::json!({
                "model": crate::config::DEFAULT_ORACLE_MODEL,
                "temperature": 0.2,
                "max_tokens": 96
            })))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "choices": [
                        { "message": {
                            "role": "assistant",
                            "content": "```json\n{\"word\": \"Slate\", \"explanation\": \"Tests s, l and t.\"}\n```"
                        } }
                    ]
                })),
            )
            .mount(&server)
            .await;

        let endpoint = format!("{}/v1/chat/completions", server.uri());
        let suggestion =
            tokio::task::spawn_blocking(move || suggest_blocking(endpoint, Duration::from_secs(5)))
                .await
                .unwrap()
                .unwrap();

        assert_eq!(suggestion.word, "slate");
        assert_eq!(suggestion.explanation, "Tests s, l and t.");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn suggest_reports_http_status() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(wiremock::ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let endpoint = format!("{}/v1/chat/completions", server.uri());
        let result =
            tokio::task::spawn_blocking(move || suggest_blocking(endpoint, Duration::from_secs(5)))
                .await
                .unwrap();

        assert_eq!(
            result,
            Err(OracleError::Status {
                status: 500,
                body: "boom".to_string()
            })
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn suggest_missing_content_is_malformed() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let endpoint = format!("{}/v1/chat/completions", server.uri());
        let result =
            tokio::task::spawn_blocking(move || suggest_blocking(endpoint, Duration::from_secs(5)))
                .await
                .unwrap();

        assert!(matches!(result, Err(OracleError::MalformedResponse(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn slow_oracle_times_out() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(2))
                    .set_body_json(serde_json::json!({
                        "choices": [{ "message": { "content": "crane" } }]
                    })),
            )
            .mount(&server)
            .await;

        let endpoint = format!("{}/v1/chat/completions", server.uri());
        let timeout = Duration::from_millis(100);
        let result = tokio::task::spawn_blocking(move || suggest_blocking(endpoint, timeout))
            .await
            .unwrap();

        assert_eq!(result, Err(OracleError::Timeout(timeout)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unreachable_endpoint_is_transport_error() {
        let result = tokio::task::spawn_blocking(|| {
            suggest_blocking(
                "http://127.0.0.1:9/v1/chat/completions".to_string(),
                Duration::from_secs(2),
            )
        })
        .await
        .unwrap();

        assert!(matches!(
            result,
            Err(OracleError::Transport(_) | OracleError::Timeout(_))
        ));
    }
}
