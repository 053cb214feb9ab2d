use clap::Subcommand;
use focusboard_core::widgets::{load_theme, save_theme, toggle_theme};
use focusboard_core::{Database, Theme};

use super::CmdResult;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set { theme: Theme },
}

pub fn run(action: ThemeAction) -> CmdResult {
    let db = Database::open()?;
    let theme = match action {
        ThemeAction::Show => load_theme(&db)?,
        ThemeAction::Toggle => toggle_theme(&db)?,
        ThemeAction::Set { theme } => {
            save_theme(&db, theme)?;
            theme
        }
    };
    println!("{theme} (toggle: {})", theme.toggle_icon());
    Ok(())
}
