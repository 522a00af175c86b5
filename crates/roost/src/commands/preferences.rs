use super::Command;
use crate::error::Error;
use async_trait::async_trait;
use eyre::Result;
use std::io::Write;
use std::path::PathBuf;
use roost_core::preferences::Preferences;

pub struct PreferencesCommand {
    pub action: PreferencesAction,
    /// File the action reads or writes
    pub path: PathBuf,
}

pub enum PreferencesAction {
    /// Print the path and the given effective preferences
    Show(Preferences),
    Init,
    Reset,
}

#[async_trait]
impl Command for PreferencesCommand {
    async fn execute(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        match &self.action {
            PreferencesAction::Show(prefs) => self.show(prefs, &mut stdout).map_err(Into::into),
            PreferencesAction::Init => self.init(&mut stdout).map_err(Into::into),
            PreferencesAction::Reset => self.reset(&mut stdout).map_err(Into::into),
        }
    }
}

impl PreferencesCommand {
    fn show(&self, prefs: &Preferences, out: &mut impl Write) -> std::result::Result<(), Error> {
        writeln!(out, "Preferences file: {}", self.path.display())?;
        writeln!(out, "\n{}", toml::to_string_pretty(prefs)?)?;
        Ok(())
    }

    fn init(&self, out: &mut impl Write) -> std::result::Result<(), Error> {
        if self.path.exists() {
            writeln!(out, "Preferences file already exists: {}", self.path.display())?;
            return Ok(());
        }
        Preferences::default().save_to(&self.path)?;
        writeln!(out, "Wrote default preferences to {}", self.path.display())?;
        Ok(())
    }

    fn reset(&self, out: &mut impl Write) -> std::result::Result<(), Error> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            writeln!(out, "Preferences reset to defaults")?;
        } else {
            writeln!(out, "No preferences file found")?;
        }
        Ok(())
    }
}
