use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Context, Result};
use dialoguer::{Input, Select};
use ludo_adapters::SqliteProfileStore;
use ludo_core::domain::validate_name;
use ludo_core::{AppState, Config, Language, ProfileRepository, Translator};
use ludo_protocol::{Request, Response};

pub async fn execute(name: Option<String>, language: Option<Language>) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    let translator = Translator::new(config.general.language);

    println!("{}\n", translator.get("init.welcome"));

    let language = match language {
        Some(language) => language,
        None => prompt_language(config.general.language, &translator)?,
    };
    let translator = Translator::new(language);

    let name = match name {
        Some(raw) => match validate_name(&raw) {
            Ok(name) => name,
            Err(_) => bail!(translator.get("init.name_invalid")),
        },
        None => prompt_name(&translator)?,
    };

    config.general.language = language;
    config.save().context("failed to save configuration")?;

    let mut state = AppState::load();
    state
        .login(&name)
        .map_err(|_| anyhow::anyhow!(translator.get("init.name_invalid")))?;
    state.save().context("failed to save the active player")?;

    let store = SqliteProfileStore::new(&Config::database_path())
        .context("failed to open the profile database")?;
    let profile = store.ensure(&name)?;

    switch_running_daemon(&name).await?;

    let chips = profile.chips.to_string();
    println!(
        "\n{}",
        translator.format(
            "init.done",
            &[("name", profile.name.as_str()), ("chips", chips.as_str())]
        )
    );

    Ok(())
}

fn prompt_language(current: Language, translator: &Translator) -> Result<Language> {
    let languages = Language::available_languages();
    let default = languages
        .iter()
        .position(|language| *language == current)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt(translator.get("init.language_prompt"))
        .items(languages)
        .default(default)
        .interact()?;

    Ok(languages[selection])
}

fn prompt_name(translator: &Translator) -> Result<String> {
    let invalid = translator.get("init.name_invalid");

    let raw: String = Input::new()
        .with_prompt(translator.get("init.name_prompt"))
        .validate_with(|input: &String| -> Result<(), String> {
            validate_name(input).map(|_| ()).map_err(|_| invalid.clone())
        })
        .interact_text()?;

    Ok(validate_name(&raw)?)
}

/// Points a running daemon at the new player. A stopped daemon picks the
/// player up from the saved state when it starts.
pub(super) async fn switch_running_daemon(name: &str) -> Result<()> {
    let request = Request::SwitchPlayer {
        name: name.to_string(),
    };

    match DaemonClient::new().send(&request).await {
        Ok(Response::Ok) | Err(ClientError::DaemonNotRunning) => Ok(()),
        Ok(Response::Error { message }) => bail!(message),
        Ok(_) => Ok(()),
        Err(error) => Err(error.into()),
    }
}
