use anyhow::{Context, Result};
use ludo_core::{Config, Language, Translator};

pub fn execute(language: Option<String>) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let translator = Translator::new(config.general.language);

    match language {
        Some(code) => set_language(config, &code),
        None => {
            println!("{}", describe_languages(config.general.language, &translator));
            Ok(())
        }
    }
}

fn set_language(mut config: Config, code: &str) -> Result<()> {
    let language: Language = code.parse()?;

    config.general.language = language;
    config.save().context("failed to save configuration")?;

    let translator = Translator::new(language);
    println!(
        "{}",
        translator.format("lang.changed", &[("name", language.display_name())])
    );
    Ok(())
}

fn describe_languages(current: Language, translator: &Translator) -> String {
    let mut lines = vec![
        translator.format(
            "lang.current",
            &[("name", current.display_name()), ("code", current.code())],
        ),
        String::new(),
        translator.get("lang.available"),
    ];

    for language in Language::available_languages() {
        let marker = if *language == current { "●" } else { " " };
        lines.push(format!(
            "  {} {}  {}",
            marker,
            language.code(),
            language.display_name()
        ));
    }

    lines.join("\n")
}
