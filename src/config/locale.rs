use super::Config;

/// Locales with a translation file under `locales/`.
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "fr"];

fn detect_system_locale() -> Option<String> {
    std::env::var("LANG")
        .or_else(|_| std::env::var("LC_MESSAGES"))
        .ok()
        .map(|lang| lang.trim().to_lowercase())
        .filter(|lang| !lang.is_empty())
}

/// Detect locale: `NEWSROOM_LANG` env -> config value -> system `LANG` -> `"en"`.
/// An explicit env value wins even when it is `"en"`. Unsupported languages
/// fall back to `"en"`.
fn detect_locale(config_locale: &str) -> String {
    let config_locale = config_locale.trim().to_lowercase();

    let candidate = if let Ok(lang) = std::env::var("NEWSROOM_LANG")
        && !lang.trim().is_empty()
    {
        normalise_locale(&lang.trim().to_lowercase())
    } else if !config_locale.is_empty() && config_locale != "en" {
        normalise_locale(&config_locale)
    } else if let Some(system_locale) = detect_system_locale() {
        normalise_locale(&system_locale)
    } else {
        "en".into()
    };

    if SUPPORTED_LOCALES.contains(&candidate.as_str()) {
        candidate
    } else {
        "en".into()
    }
}

/// Normalise `"fr_FR.UTF-8"` -> `"fr"`, `"en_US"` -> `"en"`, passthrough `"fr"`.
fn normalise_locale(raw: &str) -> String {
    let base = raw.split('.').next().unwrap_or(raw);
    let lang = base.split(['_', '-']).next().unwrap_or(base);
    lang.to_string()
}

impl Config {
    /// Resolve the UI locale, then set `rust_i18n::set_locale`.
    pub fn apply_locale(&self) -> String {
        let locale = detect_locale(&self.locale);
        rust_i18n::set_locale(&locale);
        locale
    }
}
