use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// A target language and whether it takes part in a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageDescriptor {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
}

impl LanguageDescriptor {
    fn new(code: &str, name: &str, enabled: bool) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            enabled,
        }
    }
}

/// Persona strings injected into the counselor and translator prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tone {
    pub counselor_style: String,
    pub translation_style: String,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            counselor_style: "philosophical counselor; existential and meaning-centered; clear, concrete, non-therapeutic.".to_string(),
            translation_style: "faithful, clear, natural; preserve core terminology; avoid over-simplification.".to_string(),
        }
    }
}

/// Partial tone read from the config file; missing keys keep the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToneOverrides {
    pub counselor_style: Option<String>,
    pub translation_style: Option<String>,
}

/// The config file as written by the user. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub timezone: Option<String>,
    pub languages: Option<Vec<LanguageDescriptor>>,
    pub model_primary: Option<String>,
    pub model_fallbacks: Option<Vec<String>>,
    pub tone: Option<ToneOverrides>,
}

impl ConfigOverrides {
    /// Read overrides from a YAML file. A missing file means "no overrides".
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub timezone: Tz,
    pub languages: Vec<LanguageDescriptor>,
    pub model_primary: String,
    pub model_fallbacks: Vec<String>,
    pub tone: Tone,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("journal"),
            timezone: chrono_tz::Asia::Seoul,
            languages: vec![
                LanguageDescriptor::new("en", "English", true),
                LanguageDescriptor::new("de", "German", true),
                LanguageDescriptor::new("fr", "French", true),
                LanguageDescriptor::new("ja", "Japanese", false),
                LanguageDescriptor::new("ru", "Russian", false),
            ],
            model_primary: "gpt-5".to_string(),
            model_fallbacks: vec!["gpt-4.1".to_string(), "gpt-4o-mini".to_string()],
            tone: Tone::default(),
        }
    }
}

impl Config {
    /// Merge user overrides onto the defaults.
    ///
    /// Top-level keys replace the default wholesale; `tone` is merged key by key.
    pub fn from_overrides(overrides: ConfigOverrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(output_dir) = overrides.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(timezone) = overrides.timezone {
            config.timezone = timezone
                .parse::<Tz>()
                .map_err(|_| anyhow::anyhow!("Unknown timezone '{}'", timezone))?;
        }
        if let Some(languages) = overrides.languages {
            config.languages = languages;
        }
        if let Some(model_primary) = overrides.model_primary {
            config.model_primary = model_primary;
        }
        if let Some(model_fallbacks) = overrides.model_fallbacks {
            config.model_fallbacks = model_fallbacks;
        }
        if let Some(tone) = overrides.tone {
            if let Some(counselor_style) = tone.counselor_style {
                config.tone.counselor_style = counselor_style;
            }
            if let Some(translation_style) = tone.translation_style {
                config.tone.translation_style = translation_style;
            }
        }

        if config.model_primary.trim().is_empty() {
            bail!("model_primary must not be empty");
        }

        Ok(config)
    }

    /// Load `path` (if it exists) and merge it onto the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_overrides(ConfigOverrides::load(path)?)
    }

    /// Enable every language with `code` for this run only.
    ///
    /// Returns `false` when no configured language has that code.
    pub fn force_enable(&mut self, code: &str) -> bool {
        let mut found = false;
        for language in self.languages.iter_mut().filter(|l| l.code == code) {
            language.enabled = true;
            found = true;
        }
        found
    }

    pub fn enabled_languages(&self) -> impl Iterator<Item = &LanguageDescriptor> {
        self.languages.iter().filter(|l| l.enabled)
    }

    /// Primary model followed by the fallbacks, in attempt order.
    pub fn models(&self) -> Vec<String> {
        std::iter::once(self.model_primary.clone())
            .chain(self.model_fallbacks.iter().cloned())
            .collect()
    }
}

/// Settings taken from the process environment.
#[derive(Debug, Clone)]
pub struct Env {
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub dry_run: bool,
}

impl Env {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            dry_run: std::env::var("DRY_RUN")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// The API key, or a configuration error explaining how to provide one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .context("OPENAI_API_KEY not set. Put it in .env or your environment, or use --dry-run.")
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
