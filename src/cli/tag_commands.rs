// src/cli/tag_commands.rs
use crossterm::style::Color;

use crate::application::RecordRef;
use crate::cli::args::RecordArgs;
use crate::cli::display::{format_tag_counts, paint, stdout_color};
use crate::cli::error::{CliError, CliResult};
use crate::domain::suggested_tags::{get_suggested_tags, known_categories};
use crate::domain::tag::{format_tag_name, Tag};
use crate::infrastructure::di::ServiceContainer;

pub fn show_tags(services: &ServiceContainer, record: &RecordArgs) -> CliResult<()> {
    let record = RecordRef::from(record);
    let tags = services.tagged_asset_service.list_tags(&record)?;

    if tags.is_empty() {
        eprintln!("No tags found on {}", paint(&record, Color::Blue));
    } else {
        eprintln!("Tags on {}:", paint(&record, Color::Blue));
        print!("{}", format_tag_counts(&tags, stdout_color()));
    }
    Ok(())
}

pub fn suggest(category: Option<&str>) -> CliResult<()> {
    match category {
        Some(category) => {
            eprintln!("Suggested tags for '{}':", paint(category, Color::Blue));
            for tag in get_suggested_tags(category) {
                println!("{}", tag);
            }
        }
        None => {
            eprintln!("Known categories:");
            for category in known_categories() {
                println!("{}", category);
            }
        }
    }
    Ok(())
}

pub fn validate(input: &str) -> CliResult<()> {
    match Tag::new(input) {
        Ok(tag) => {
            if tag.value() != input {
                eprintln!("Formatted as '{}'", paint(tag.value(), Color::Green));
            }
            println!("{}", tag);
            Ok(())
        }
        Err(e) => Err(CliError::InvalidInput(format!(
            "'{}' is not a valid tag ({})",
            format_tag_name(input),
            e
        ))),
    }
}
