use std::path::{Path, PathBuf};

use inquire::{Confirm, CustomType, Text};
use weatherdash_core::Config;

/// Walk through the editable settings and save them to `path`.
pub fn run(mut config: Config, path: &Path) -> anyhow::Result<()> {
    config.language = Text::new("Geocoder language:")
        .with_default(&config.language)
        .with_help_message("Two-letter code, e.g. en, de, fr")
        .prompt()?;

    let current_dir = config.resolved_data_dir()?;
    let data_dir = Text::new("Where should the city list be stored?")
        .with_default(&current_dir.display().to_string())
        .prompt()?;
    config.data_dir = normalize_data_dir(&data_dir, &current_dir, config.data_dir.take());

    config.display.fade_out_ms = CustomType::<u64>::new("Card fade-out (ms):")
        .with_default(config.display.fade_out_ms)
        .with_error_message("Please enter a whole number of milliseconds")
        .prompt()?;

    config.display.color = Confirm::new("Use colors?").with_default(config.display.color).prompt()?;

    config.save_to(path)?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

/// Keep the override unset when the answer is just the current location.
fn normalize_data_dir(answer: &str, current: &Path, previous: Option<PathBuf>) -> Option<PathBuf> {
    let answer = answer.trim();
    if answer.is_empty() || Path::new(answer) == current {
        previous
    } else {
        Some(PathBuf::from(answer))
    }
}
