use super::Language;
use std::collections::HashMap;

const EN_TRANSLATIONS: &str = include_str!("locales/en.toml");
const ES_TRANSLATIONS: &str = include_str!("locales/es.toml");

#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    translations: HashMap<String, String>,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        let content = match language {
            Language::En => EN_TRANSLATIONS,
            Language::Es => ES_TRANSLATIONS,
        };

        Self {
            language,
            translations: parse_translations(content),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut result = self.get(key);
        for (name, value) in args {
            result = result.replace(&format!("{{{}}}", name), value);
        }
        result
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

fn parse_translations(content: &str) -> HashMap<String, String> {
    let mut result = HashMap::new();

    let parsed: toml::Value =
        toml::from_str(content).unwrap_or(toml::Value::Table(Default::default()));

    if let toml::Value::Table(sections) = parsed {
        for (section, values) in sections {
            if let toml::Value::Table(entries) = values {
                for (key, value) in entries {
                    if let toml::Value::String(text) = value {
                        result.insert(format!("{}.{}", section, key), text);
                    }
                }
            }
        }
    }

    result
}
