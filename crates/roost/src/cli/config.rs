use dotenvy::dotenv;
use eyre::Result;
use roost_core::preferences::Preferences;
use std::path::PathBuf;

use super::Cli;

pub fn load_env() -> Result<()> {
    dotenv().ok();
    Ok(())
}

/// The preferences file named by `--config`, or the default location
pub fn preferences_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(Preferences::config_path()?),
    }
}

/// Load preferences from `--config` or the default location
pub fn load_preferences(cli: &Cli) -> Result<Preferences> {
    Ok(Preferences::load_from(&preferences_path(cli)?)?)
}

/// Command-line flags take precedence over the preferences file
pub fn apply_overrides(prefs: &mut Preferences, cli: &Cli) {
    if let Some(delay_ms) = cli.delay_ms {
        prefs.classifier.delay_ms = delay_ms;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        prefs.classifier.timeout_ms = timeout_ms;
    }
    if let Some(keyword) = &cli.keyword {
        prefs.classifier.search_keyword = keyword.clone();
    }
    if let Some(reply) = &cli.reply {
        prefs.classifier.chat_reply = reply.clone();
    }
    prefs.classifier.warn_if_unreachable();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn flags_override_preferences() {
        let cli = Cli::try_parse_from(["roost", "--timeout-ms", "250", "--reply", "Hey"]).unwrap();
        let mut prefs = Preferences::default();
        apply_overrides(&mut prefs, &cli);

        assert_eq!(prefs.classifier.timeout_ms, 250);
        assert_eq!(prefs.classifier.chat_reply, "Hey");
        assert_eq!(prefs.classifier.delay_ms, 1000);
        assert_eq!(prefs.classifier.search_keyword, "search_properties");
    }

    #[test]
    fn delay_override_past_default_timeout_is_flagged() {
        let cli = Cli::try_parse_from(["roost", "--delay-ms", "6000"]).unwrap();
        let mut prefs = Preferences::default();
        apply_overrides(&mut prefs, &cli);

        assert_eq!(prefs.classifier.delay_ms, 6000);
        assert!(prefs.classifier.delay_outlasts_timeout());
    }

    #[test]
    fn explicit_config_path_is_used() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        std::fs::write(&path, "[classifier]\nsearch_keyword = \"listings\"\n").unwrap();

        let cli = Cli::try_parse_from(["roost", "--config", path.to_str().unwrap()]).unwrap();
        let prefs = load_preferences(&cli).unwrap();
        assert_eq!(prefs.classifier.search_keyword, "listings");
    }
}
