use super::init::switch_running_daemon;
use super::translator;
use anyhow::{Context, Result};
use ludo_core::{AppState, GUEST_PLAYER};

pub async fn execute() -> Result<()> {
    let translator = translator();
    let mut state = AppState::load();

    if !state.is_logged_in() {
        println!("{}", translator.get("logout.not_logged_in"));
        return Ok(());
    }

    let name = state.player_name().to_string();
    state.logout();
    state.save().context("failed to save the active player")?;

    switch_running_daemon(GUEST_PLAYER).await?;

    println!(
        "{}",
        translator.format("logout.done", &[("name", name.as_str())])
    );
    Ok(())
}
