//! The question → translate → answer → back-translate → synthesis round trip.

use crate::config::{Config, Env, LanguageDescriptor};
use crate::invoker::ModelInvoker;
use crate::mock;
use crate::openai::{Message, OpenAiClient};
use crate::prompts;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::info;

/// One language's leg of the round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageBlock {
    pub language: String,
    pub code: String,
    pub question_translated: String,
    pub answer_in_language: String,
    pub answer_back_to_english: String,
}

#[derive(Debug, Clone)]
pub struct RunMetadata {
    pub timestamp: DateTime<Tz>,
    pub timezone: Tz,
    pub models_tried: Vec<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub question_en: String,
    pub meta: RunMetadata,
    pub blocks: Vec<LanguageBlock>,
    pub synthesis_en: String,
}

/// Where replies come from for this run.
#[derive(Debug)]
enum Responder {
    Live(ModelInvoker),
    DryRun,
}

#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    responder: Responder,
}

impl Pipeline {
    /// Build a pipeline for one run.
    ///
    /// Dry-run mode is on when either `dry_run` or the `DRY_RUN` environment
    /// flag is set. Otherwise an API key is required and the HTTP client is
    /// created here, once, for every call of the run.
    pub fn new(config: Config, env: &Env, dry_run: bool) -> Result<Self> {
        let responder = if dry_run || env.dry_run {
            Responder::DryRun
        } else {
            let api_key = env.require_api_key()?;
            let client = OpenAiClient::new(api_key, env.openai_api_url.as_str());
            Responder::Live(ModelInvoker::new(client, config.models()))
        };

        Ok(Self { config, responder })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self.responder, Responder::DryRun)
    }

    async fn invoke(invoker: &ModelInvoker, messages: Vec<Message>) -> Result<String> {
        Ok(invoker.invoke(&messages).await?)
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        match &self.responder {
            Responder::DryRun => Ok(mock::translate(text, target_language)),
            Responder::Live(invoker) => {
                let messages = prompts::conversation(
                    prompts::translator_system_prompt(
                        target_language,
                        &self.config.tone.translation_style,
                    ),
                    text.to_string(),
                );
                Self::invoke(invoker, messages).await
            }
        }
    }

    async fn ask_in_language(&self, code: &str, question: &str) -> Result<String> {
        match &self.responder {
            Responder::DryRun => Ok(mock::answer(code).to_string()),
            Responder::Live(invoker) => {
                let messages = prompts::conversation(
                    prompts::counselor_system_prompt(&self.config.tone.counselor_style),
                    prompts::counselor_user_prompt(code, question),
                );
                Self::invoke(invoker, messages).await
            }
        }
    }

    /// Run the round trip for a single language.
    pub async fn process_language(
        &self,
        language: &LanguageDescriptor,
        question_en: &str,
    ) -> Result<LanguageBlock> {
        info!("[{}] Translating question", language.code);
        let question_translated = self
            .translate(question_en, &language.name)
            .await
            .with_context(|| format!("Failed to translate question into {}", language.name))?;

        info!("[{}] Asking counselor", language.code);
        let answer_in_language = self
            .ask_in_language(&language.code, &question_translated)
            .await
            .with_context(|| format!("Failed to get an answer in {}", language.name))?;

        // English answers are already English
        let answer_back_to_english = if language.code == "en" {
            answer_in_language.clone()
        } else {
            info!("[{}] Translating answer back to English", language.code);
            self.translate(&answer_in_language, "English")
                .await
                .with_context(|| {
                    format!("Failed to translate the {} answer to English", language.name)
                })?
        };

        Ok(LanguageBlock {
            language: language.name.clone(),
            code: language.code.clone(),
            question_translated,
            answer_in_language,
            answer_back_to_english,
        })
    }

    /// Compare the back-translated answers in a short English summary.
    pub async fn synthesize(&self, blocks: &[LanguageBlock]) -> Result<String> {
        match &self.responder {
            Responder::DryRun => Ok(mock::SYNTHESIS.to_string()),
            Responder::Live(invoker) => {
                let messages = prompts::conversation(
                    prompts::SYNTHESIS_SYSTEM_PROMPT.to_string(),
                    prompts::synthesis_user_prompt(
                        blocks
                            .iter()
                            .map(|b| (b.language.as_str(), b.answer_back_to_english.as_str())),
                    ),
                );
                Self::invoke(invoker, messages)
                    .await
                    .context("Failed to synthesize answers")
            }
        }
    }

    /// Process every enabled language in configuration order, then synthesize.
    ///
    /// The first failing language aborts the run.
    pub async fn run(&self, question_en: &str) -> Result<RunResult> {
        let mut blocks = Vec::new();
        for language in self.config.enabled_languages() {
            blocks.push(self.process_language(language, question_en).await?);
        }

        info!("Synthesizing {} answers", blocks.len());
        let synthesis_en = self.synthesize(&blocks).await?;

        let timezone = self.config.timezone;
        Ok(RunResult {
            question_en: question_en.to_string(),
            meta: RunMetadata {
                timestamp: Utc::now().with_timezone(&timezone),
                timezone,
                models_tried: self.config.models(),
                dry_run: self.is_dry_run(),
            },
            blocks,
            synthesis_en,
        })
    }
}
