use super::fallback::FallbackTemplates;
use super::prompt::{
    build_copywriting_prompt, build_description_prompt, build_synthesis_prompt, length_feedback,
    DESCRIPTION_SYSTEM_PROMPT, SYNTHESIS_SYSTEM_PROMPT,
};
use super::synthesis::{parse_synthesis, strip_reasoning, SongSynthesis, SynthesisError};
use super::window::{char_len, cleaned_length, fit, force, FitError, LengthWindow, ShortTextPolicy};
use super::{DescriptionError, SongDetails};
use crate::config::DescriptionSettings;
use crate::llm::{CompletionOptions, LlmProvider, Message};
use crate::server::metrics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const SYNTHESIS_TEMPERATURE: f32 = 0.5;
const SYNTHESIS_MAX_TOKENS: u32 = 500;

/// Parameters of the generate-fit-retry loop.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStrategy {
    pub window: LengthWindow,
    pub max_attempts: u32,
    pub short_text: ShortTextPolicy,
    /// Fallback for direct generation.
    pub templates: FallbackTemplates,
    /// Fallback for editorial generation.
    pub synthesis_templates: FallbackTemplates,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for GenerationStrategy {
    fn default() -> Self {
        Self {
            window: LengthWindow::default(),
            max_attempts: 3,
            short_text: ShortTextPolicy::default(),
            templates: FallbackTemplates::song(),
            synthesis_templates: FallbackTemplates::synthesis(),
            temperature: 0.85,
            max_tokens: 400,
            timeout: Duration::from_secs(60),
        }
    }
}

impl From<&DescriptionSettings> for GenerationStrategy {
    fn from(settings: &DescriptionSettings) -> Self {
        Self {
            window: settings.window,
            max_attempts: settings.max_attempts,
            short_text: settings.short_text,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            timeout: Duration::from_secs(settings.timeout_sec),
            ..Default::default()
        }
    }
}

/// Direct asks for the description straight away. Editorial first has the
/// model interpret the song as structured JSON, then writes copy from that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Direct,
    Editorial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DescriptionSource {
    Generated { attempt: u32 },
    Fallback,
}

/// One model call and what came of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationAttempt {
    pub attempt: u32,
    /// Cleaned length of the raw output, `None` when the call failed.
    pub length: Option<usize>,
    /// Whether the raw output already sat inside the window.
    pub in_window: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalDescription {
    pub text: String,
    pub length: usize,
    pub source: DescriptionSource,
    /// Mode that produced the text. Editorial degrades to direct when the
    /// synthesis step fails.
    pub mode: GenerationMode,
    pub attempts: Vec<GenerationAttempt>,
}

pub struct DescriptionGenerator {
    provider: Arc<dyn LlmProvider>,
    strategy: GenerationStrategy,
}

impl DescriptionGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, strategy: GenerationStrategy) -> Self {
        Self { provider, strategy }
    }

    pub fn strategy(&self) -> &GenerationStrategy {
        &self.strategy
    }

    /// Generate a description inside the strategy's window.
    pub async fn generate(
        &self,
        details: &SongDetails,
        mode: GenerationMode,
    ) -> Result<FinalDescription, DescriptionError> {
        self.generate_within(details, mode, self.strategy.window).await
    }

    /// Generate a description inside `window`.
    ///
    /// Only invalid input is an error. Model failures end in the fallback.
    pub async fn generate_within(
        &self,
        details: &SongDetails,
        mode: GenerationMode,
        window: LengthWindow,
    ) -> Result<FinalDescription, DescriptionError> {
        details.validate()?;

        let description = match mode {
            GenerationMode::Direct => self.generate_direct(details, window).await,
            GenerationMode::Editorial => match self.synthesize(details).await {
                Ok(synthesis) => {
                    debug!(?synthesis, "Synthesized song information");
                    let prompt = build_copywriting_prompt(details, &synthesis, window);
                    let fallback = self
                        .strategy
                        .synthesis_templates
                        .render_synthesis(details, &synthesis);
                    self.run_attempts(prompt, window, fallback, GenerationMode::Editorial)
                        .await
                }
                Err(e) => {
                    warn!(error = %e, "Synthesis failed, falling back to direct generation");
                    self.generate_direct(details, window).await
                }
            },
        };

        Ok(description)
    }

    async fn generate_direct(&self, details: &SongDetails, window: LengthWindow) -> FinalDescription {
        let prompt = build_description_prompt(details, window);
        let fallback = self.strategy.templates.render_song(details);
        self.run_attempts(prompt, window, fallback, GenerationMode::Direct).await
    }

    async fn synthesize(&self, details: &SongDetails) -> Result<SongSynthesis, SynthesisError> {
        let messages = [
            Message::system(SYNTHESIS_SYSTEM_PROMPT),
            Message::user(build_synthesis_prompt(details)),
        ];
        let options = CompletionOptions {
            temperature: SYNTHESIS_TEMPERATURE,
            max_tokens: Some(SYNTHESIS_MAX_TOKENS),
            timeout: self.strategy.timeout,
        };
        let response = self.provider.complete(&messages, &options).await?;
        parse_synthesis(&response.message.content)
    }

    fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: self.strategy.temperature,
            max_tokens: Some(self.strategy.max_tokens),
            timeout: self.strategy.timeout,
        }
    }

    async fn run_attempts(
        &self,
        prompt: String,
        window: LengthWindow,
        fallback: String,
        mode: GenerationMode,
    ) -> FinalDescription {
        let options = self.completion_options();
        let mut attempts = Vec::new();
        let mut feedback: Option<String> = None;

        for attempt in 1..=self.strategy.max_attempts {
            let mut content = prompt.clone();
            if let Some(feedback) = &feedback {
                content.push_str(feedback);
            }
            let messages = [
                Message::system(DESCRIPTION_SYSTEM_PROMPT),
                Message::user(content),
            ];

            let raw = match self.provider.complete(&messages, &options).await {
                Ok(response) => strip_reasoning(&response.message.content).into_owned(),
                Err(e) => {
                    warn!(attempt, error = %e, provider = self.provider.name(), "Description request failed");
                    metrics::record_description_attempt("error");
                    attempts.push(GenerationAttempt {
                        attempt,
                        length: None,
                        in_window: false,
                        error: Some(e.to_string()),
                    });
                    continue;
                }
            };

            let raw_length = cleaned_length(&raw);
            match fit(&raw, window, self.strategy.short_text) {
                Ok(text) => {
                    let length = char_len(&text);
                    info!(attempt, raw_length, length, "Description attempt accepted");
                    metrics::record_description_attempt("accepted");
                    metrics::record_description_result("generated");
                    attempts.push(GenerationAttempt {
                        attempt,
                        length: Some(raw_length),
                        in_window: window.contains(raw_length),
                        error: None,
                    });
                    return FinalDescription {
                        text,
                        length,
                        source: DescriptionSource::Generated { attempt },
                        mode,
                        attempts,
                    };
                }
                Err(e) => {
                    info!(attempt, raw_length, reason = %e, "Description attempt rejected");
                    metrics::record_description_attempt(match e {
                        FitError::Empty => "empty",
                        FitError::TooShort { .. } => "too_short",
                    });
                    if let FitError::TooShort { length } = e {
                        if self.strategy.short_text == ShortTextPolicy::Elaborate {
                            feedback = Some(length_feedback(length, window));
                        }
                    }
                    attempts.push(GenerationAttempt {
                        attempt,
                        length: Some(raw_length),
                        in_window: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let text = force(&fallback, window);
        let length = char_len(&text);
        warn!(
            attempts = attempts.len(),
            length, "All description attempts failed, using fallback template"
        );
        metrics::record_description_result("fallback");
        FinalDescription {
            text,
            length,
            source: DescriptionSource::Fallback,
            mode,
            attempts,
        }
    }
}
