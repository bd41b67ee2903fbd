use super::translator;
use anyhow::{Context, Result};
use ludo_adapters::SqliteProfileStore;
use ludo_core::domain::EntryKind;
use ludo_core::{AppState, Config, LedgerEntry, Profile, ProfileRepository, Translator};

pub fn execute(toggle_theme: bool, limit: u32) -> Result<()> {
    let translator = translator();
    let state = AppState::load();

    let store = SqliteProfileStore::new(&Config::database_path())
        .context("failed to open the profile database")?;

    println!(
        "{}",
        show(&store, state.player_name(), toggle_theme, limit, &translator)?
    );

    if !state.is_logged_in() {
        println!("\n{}", translator.get("profile.guest"));
    }

    Ok(())
}

fn show(
    store: &dyn ProfileRepository,
    name: &str,
    toggle_theme: bool,
    limit: u32,
    translator: &Translator,
) -> Result<String> {
    let mut profile = store.ensure(name)?;
    let mut lines = Vec::new();

    if toggle_theme {
        profile.theme = profile.theme.toggled();
        store.set_theme(&profile.name, profile.theme)?;
        lines.push(translator.format(
            "profile.theme_changed",
            &[("theme", profile.theme.as_str())],
        ));
    }

    lines.push(render_profile(&profile, translator));

    let entries = store.recent_entries(&profile.name, limit)?;
    lines.push(render_entries(&entries, translator));

    Ok(lines.join("\n\n"))
}

fn render_profile(profile: &Profile, translator: &Translator) -> String {
    let chips = profile.chips.to_string();
    [
        translator.format("profile.name", &[("name", profile.name.as_str())]),
        translator.format("profile.chips", &[("chips", chips.as_str())]),
        translator.format("profile.theme", &[("theme", profile.theme.as_str())]),
    ]
    .join("\n")
}

fn render_entries(entries: &[LedgerEntry], translator: &Translator) -> String {
    if entries.is_empty() {
        return translator.get("profile.no_entries");
    }

    let mut lines = vec![translator.get("profile.recent")];
    for entry in entries {
        let key = match entry.kind {
            EntryKind::Debit => "profile.entry_debit",
            EntryKind::Credit => "profile.entry_credit",
        };
        let amount = entry.amount.to_string();
        let balance = entry.balance_after.to_string();
        let time = entry
            .recorded_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        lines.push(format!(
            "  {}",
            translator.format(
                key,
                &[
                    ("amount", amount.as_str()),
                    ("balance", balance.as_str()),
                    ("time", time.as_str()),
                ],
            )
        ));
    }

    lines.join("\n")
}
