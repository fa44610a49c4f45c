//! Locale resolution and the phrase tables used to build conversation queries.
//!
//! A [`LocaleTable`] is an explicit value handed to the client at
//! construction. Resolution never fails: unknown tags come back as
//! [`LocaleResolution::Unsupported`] and phrase lookup falls back to the
//! table's default locale.

use std::collections::HashMap;
use std::fmt;

use crate::error::DomainError;

/// Locale used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

const APP_NAME_SLOT: &str = "{app_name}";
const PROMPT_SLOT: &str = "{prompt}";

// ============================================================================
// Phrases
// ============================================================================

/// Localized phrase set for one canonical locale.
///
/// `talk_to` is a template with an `{app_name}` slot. `about` is a whole
/// sentence template with `{app_name}` and `{prompt}` slots so each
/// language can order the words its own way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrases {
    talk_to: String,
    about: String,
    cancel: String,
    my_test_app: String,
}

impl Phrases {
    pub fn new(
        talk_to: impl Into<String>,
        about: impl Into<String>,
        cancel: impl Into<String>,
        my_test_app: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let phrases = Self {
            talk_to: talk_to.into(),
            about: about.into(),
            cancel: cancel.into(),
            my_test_app: my_test_app.into(),
        };
        if !phrases.talk_to.contains(APP_NAME_SLOT) {
            return Err(DomainError::validation(format!(
                "talk-to phrase must contain {APP_NAME_SLOT}"
            )));
        }
        if !phrases.about.contains(APP_NAME_SLOT) || !phrases.about.contains(PROMPT_SLOT) {
            return Err(DomainError::validation(format!(
                "about phrase must contain {APP_NAME_SLOT} and {PROMPT_SLOT}"
            )));
        }
        if phrases.cancel.is_empty() || phrases.my_test_app.is_empty() {
            return Err(DomainError::validation(
                "cancel and test app phrases cannot be empty",
            ));
        }
        Ok(phrases)
    }

    /// "Talk to {app_name}"
    pub fn talk_to(&self, app_name: &str) -> String {
        self.talk_to.replace(APP_NAME_SLOT, app_name)
    }

    /// "Talk to {app_name} about {prompt}"
    pub fn about(&self, app_name: &str, prompt: &str) -> String {
        self.about
            .replace(APP_NAME_SLOT, app_name)
            .replace(PROMPT_SLOT, prompt)
    }

    pub fn cancel(&self) -> &str {
        &self.cancel
    }

    /// Localized name of the developer's own test app.
    pub fn my_test_app(&self) -> &str {
        &self.my_test_app
    }

    /// Builds the query that opens a conversation with `app_name`, optionally
    /// jumping straight to `prompt`. An empty prompt counts as no prompt.
    pub fn start_conversation(&self, app_name: &str, prompt: Option<&str>) -> String {
        match prompt.filter(|p| !p.is_empty()) {
            Some(prompt) => self.about(app_name, prompt),
            None => self.talk_to(app_name),
        }
    }
}

// ============================================================================
// LocaleResolution
// ============================================================================

/// Outcome of resolving a locale tag against a [`LocaleTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleResolution {
    /// The tag is a supported canonical locale.
    Supported(String),
    /// The tag is a known alias of a canonical locale.
    Alias { alias: String, canonical: String },
    /// Unknown tag, passed through unchanged.
    Unsupported(String),
}

impl LocaleResolution {
    /// The tag to put on the wire.
    pub fn locale(&self) -> &str {
        match self {
            Self::Supported(tag) | Self::Unsupported(tag) => tag,
            Self::Alias { canonical, .. } => canonical,
        }
    }

    pub fn into_locale(self) -> String {
        match self {
            Self::Supported(tag) | Self::Unsupported(tag) => tag,
            Self::Alias { canonical, .. } => canonical,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl fmt::Display for LocaleResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supported(tag) => write!(f, "{tag}"),
            Self::Alias { alias, canonical } => write!(f, "{alias} (using {canonical})"),
            Self::Unsupported(tag) => write!(f, "Unsupported locale '{tag}'"),
        }
    }
}

// ============================================================================
// LocaleTable
// ============================================================================

/// Locale to phrase mapping plus alias fallbacks.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    default_locale: String,
    default_phrases: Phrases,
    phrases: HashMap<String, Phrases>,
    aliases: HashMap<String, String>,
}

impl LocaleTable {
    /// Creates a table from explicit phrase sets.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `default_locale` has no phrase set
    /// or an alias points at a locale that has none.
    pub fn new(
        default_locale: impl Into<String>,
        phrases: HashMap<String, Phrases>,
        aliases: HashMap<String, String>,
    ) -> Result<Self, DomainError> {
        let default_locale = default_locale.into();
        let default_phrases = phrases.get(&default_locale).cloned().ok_or_else(|| {
            DomainError::validation(format!(
                "Default locale '{default_locale}' has no phrase set"
            ))
        })?;
        if let Some((alias, target)) = aliases.iter().find(|(_, t)| !phrases.contains_key(*t)) {
            return Err(DomainError::validation(format!(
                "Alias '{alias}' points at unknown locale '{target}'"
            )));
        }
        Ok(Self {
            default_locale,
            default_phrases,
            phrases,
            aliases,
        })
    }

    /// The phrase tables shipped with the tool.
    pub fn builtin() -> Self {
        let phrases = BUILTIN_PHRASES
            .iter()
            .map(|(tag, talk_to, about, cancel, my_test_app)| {
                (
                    (*tag).to_string(),
                    Phrases {
                        talk_to: (*talk_to).to_string(),
                        about: (*about).to_string(),
                        cancel: (*cancel).to_string(),
                        my_test_app: (*my_test_app).to_string(),
                    },
                )
            })
            .collect::<HashMap<_, _>>();
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|(alias, canonical)| ((*alias).to_string(), (*canonical).to_string()))
            .collect();
        let default_phrases = phrases
            .get(DEFAULT_LOCALE)
            .cloned()
            .unwrap_or_else(|| Phrases {
                talk_to: "Talk to {app_name}".to_string(),
                about: "Talk to {app_name} about {prompt}".to_string(),
                cancel: "cancel".to_string(),
                my_test_app: "my test app".to_string(),
            });
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            default_phrases,
            phrases,
            aliases,
        }
    }

    /// Maps any tag to the locale that should be used for it.
    pub fn resolve(&self, tag: &str) -> LocaleResolution {
        if self.phrases.contains_key(tag) {
            return LocaleResolution::Supported(tag.to_string());
        }
        match self.aliases.get(tag) {
            Some(canonical) => LocaleResolution::Alias {
                alias: tag.to_string(),
                canonical: canonical.clone(),
            },
            None => LocaleResolution::Unsupported(tag.to_string()),
        }
    }

    /// Phrase set for `locale`, or the default locale's set if there is none.
    pub fn phrases_for(&self, locale: &str) -> &Phrases {
        self.phrases.get(locale).unwrap_or(&self.default_phrases)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.phrases.contains_key(locale)
    }

    /// Supported canonical locales, sorted.
    pub fn supported_locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.phrases.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// (locale, talk_to, about, cancel, my_test_app)
const BUILTIN_PHRASES: &[(&str, &str, &str, &str, &str)] = &[
    (
        "en-US",
        "Talk to {app_name}",
        "Talk to {app_name} about {prompt}",
        "cancel",
        "my test app",
    ),
    (
        "fr-FR",
        "Parler avec {app_name}",
        "Parler avec {app_name} de {prompt}",
        "annuler",
        "mon application test",
    ),
    (
        "ja-JP",
        "{app_name}につないで",
        "{app_name}につないで{prompt}について",
        "キャンセル",
        "テスト用アプリ",
    ),
    (
        "de-DE",
        "Mit {app_name} sprechen",
        "Mit {app_name} über {prompt} sprechen",
        "abbrechen",
        "meiner Test-App",
    ),
    (
        "ko-KR",
        "{app_name} 연결해 줘",
        "{app_name}에 {prompt} 물어봐",
        "취소",
        "내 테스트 앱",
    ),
    (
        "es-ES",
        "Hablar con {app_name}",
        "Hablar con {app_name} sobre {prompt}",
        "cancelar",
        "mi aplicación de prueba",
    ),
    (
        "pt-BR",
        "Falar com {app_name}",
        "Falar com {app_name} sobre {prompt}",
        "cancelar",
        "meu aplicativo de teste",
    ),
    (
        "it-IT",
        "Parla con {app_name}",
        "Parla con {app_name} di {prompt}",
        "annulla",
        "la mia app di prova",
    ),
    (
        "ru-RU",
        "Поговорить с {app_name}",
        "Поговорить с {app_name} о {prompt}",
        "отмена",
        "моим тестовым приложением",
    ),
    (
        "hi-IN",
        "{app_name} से बात करें",
        "{app_name} से {prompt} के बारे में बात करें",
        "रद्द करें",
        "मेरा टेस्ट ऐप",
    ),
    (
        "th-TH",
        "คุยกับ {app_name}",
        "คุยกับ {app_name} เกี่ยวกับ {prompt}",
        "ยกเลิก",
        "แอปทดสอบของฉัน",
    ),
    (
        "id-ID",
        "Bicara dengan {app_name}",
        "Bicara dengan {app_name} tentang {prompt}",
        "batal",
        "aplikasi uji saya",
    ),
    (
        "da-DK",
        "Tal med {app_name}",
        "Tal med {app_name} om {prompt}",
        "annuller",
        "min testapp",
    ),
    (
        "no-NO",
        "Snakk med {app_name}",
        "Snakk med {app_name} om {prompt}",
        "avbryt",
        "testappen min",
    ),
    (
        "nl-NL",
        "Praat met {app_name}",
        "Praat met {app_name} over {prompt}",
        "annuleren",
        "mijn test-app",
    ),
    (
        "sv-SE",
        "Prata med {app_name}",
        "Prata med {app_name} om {prompt}",
        "avbryt",
        "min testapp",
    ),
];

/// (alias, canonical)
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("en-GB", "en-US"),
    ("en-AU", "en-US"),
    ("en-SG", "en-US"),
    ("en-CA", "en-US"),
    ("fr-CA", "fr-FR"),
    ("es-419", "es-ES"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_supports_sixteen_locales() {
        let table = LocaleTable::builtin();
        assert_eq!(table.supported_locales().len(), 16);
        assert_eq!(table.default_locale(), "en-US");
    }

    #[test]
    fn supported_locale_resolves_to_itself() {
        let table = LocaleTable::builtin();
        assert_eq!(
            table.resolve("ja-JP"),
            LocaleResolution::Supported("ja-JP".to_string())
        );
    }

    #[test]
    fn alias_resolves_to_canonical_locale() {
        let table = LocaleTable::builtin();
        let resolution = table.resolve("en-GB");
        assert_eq!(resolution.locale(), "en-US");
        assert!(resolution.is_supported());
        assert_eq!(table.resolve("fr-CA").into_locale(), "fr-FR");
        assert_eq!(table.resolve("es-419").into_locale(), "es-ES");
    }

    #[test]
    fn unknown_locale_passes_through() {
        let table = LocaleTable::builtin();
        let resolution = table.resolve("xx-YY");
        assert!(!resolution.is_supported());
        assert_eq!(resolution.locale(), "xx-YY");
        assert_eq!(resolution.to_string(), "Unsupported locale 'xx-YY'");
    }

    #[test]
    fn phrases_fall_back_to_default_locale() {
        let table = LocaleTable::builtin();
        assert_eq!(table.phrases_for("xx-YY").cancel(), "cancel");
        assert_eq!(table.phrases_for("fr-FR").cancel(), "annuler");
    }

    #[test]
    fn start_conversation_queries() {
        let table = LocaleTable::builtin();
        let en = table.phrases_for("en-US");
        assert_eq!(
            en.start_conversation(en.my_test_app(), None),
            "Talk to my test app"
        );
        assert_eq!(
            en.start_conversation("number genie", Some("guessing")),
            "Talk to number genie about guessing"
        );
        assert_eq!(
            en.start_conversation("number genie", Some("")),
            "Talk to number genie"
        );

        let fr = table.phrases_for("fr-FR");
        assert_eq!(
            fr.start_conversation(fr.my_test_app(), None),
            "Parler avec mon application test"
        );
    }

    #[test]
    fn about_template_controls_word_order() {
        let table = LocaleTable::builtin();
        let de = table.phrases_for("de-DE");
        assert_eq!(de.about("Zahlen", "Raten"), "Mit Zahlen über Raten sprechen");
    }

    #[test]
    fn custom_table_requires_default_phrases() {
        let result = LocaleTable::new("en-US", HashMap::new(), HashMap::new());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn custom_table_rejects_dangling_alias() {
        let phrases = HashMap::from([(
            "en-US".to_string(),
            Phrases::new("Talk to {app_name}", "Ask {app_name} {prompt}", "stop", "app")
                .expect("valid phrases"),
        )]);
        let aliases = HashMap::from([("en-GB".to_string(), "de-DE".to_string())]);
        assert!(LocaleTable::new("en-US", phrases, aliases).is_err());
    }

    #[test]
    fn phrases_require_template_slots() {
        assert!(Phrases::new("Talk to", "Ask {app_name} {prompt}", "stop", "app").is_err());
        assert!(Phrases::new("Talk to {app_name}", "Ask {app_name}", "stop", "app").is_err());
    }
}
