// src/cli/asset_commands.rs
use crossterm::style::Color;
use std::path::PathBuf;
use tracing::{debug, instrument};

use crate::application::{RecordRef, RemovalOutcome};
use crate::cli::args::RecordArgs;
use crate::cli::display::{format_images, paint, stdout_color};
use crate::cli::error::{CliError, CliResult};
use crate::domain::persisted::convert_for_database;
use crate::domain::upload::AssetFile;
use crate::infrastructure::di::ServiceContainer;

fn read_files(paths: &[PathBuf]) -> CliResult<Vec<AssetFile>> {
    paths
        .iter()
        .map(|path| {
            if !path.is_file() {
                return Err(CliError::InvalidInput(format!(
                    "not a file: {}",
                    path.display()
                )));
            }
            AssetFile::from_path(path).map_err(CliError::from)
        })
        .collect()
}

#[instrument(skip(services, files), level = "debug")]
pub fn upload(
    services: &ServiceContainer,
    record: &RecordArgs,
    tag: &str,
    folder: Option<&str>,
    files: &[PathBuf],
) -> CliResult<()> {
    let record = RecordRef::from(record);
    let files = read_files(files)?;
    debug!("Read {} files", files.len());

    let before = services.tagged_asset_service.load_images(&record)?;
    let images = services
        .tagged_asset_service
        .add_images(&record, tag, &files, folder)?;

    let is_new = |url: &&String| {
        before
            .as_ref()
            .map_or(true, |before| before.iter().all(|(_, urls)| !urls.contains(*url)))
    };
    let added: Vec<&String> = images
        .iter()
        .flat_map(|(_, urls)| urls.iter())
        .filter(is_new)
        .collect();
    let limits = services.tagged_asset_service.limits();

    eprintln!(
        "Uploaded {} image(s) to {} ({} of {} total)",
        files.len(),
        paint(&record, Color::Blue),
        images.total_count(),
        limits.max_total
    );
    for url in added {
        println!("{}", url);
    }
    Ok(())
}

fn report_removal(outcome: &RemovalOutcome) {
    for error in &outcome.storage_errors {
        eprintln!("{} {}", paint("Warning: storage cleanup failed:", Color::Yellow), error);
    }
}

#[instrument(skip(services), level = "debug")]
pub fn remove(services: &ServiceContainer, record: &RecordArgs, tag: &str, url: &str) -> CliResult<()> {
    let record = RecordRef::from(record);
    let outcome = services
        .tagged_asset_service
        .remove_image(&record, tag, url)?;
    report_removal(&outcome);
    eprintln!("Removed image from '{}' on {}", paint(tag, Color::Green), paint(&record, Color::Blue));
    Ok(())
}

#[instrument(skip(services), level = "debug")]
pub fn remove_tag(services: &ServiceContainer, record: &RecordArgs, tag: &str) -> CliResult<()> {
    let record = RecordRef::from(record);
    let outcome = services.tagged_asset_service.remove_tag(&record, tag)?;
    report_removal(&outcome);
    eprintln!("Removed tag '{}' from {}", paint(tag, Color::Green), paint(&record, Color::Blue));
    if outcome.images.is_none() {
        eprintln!("{} has no images left", record);
    }
    Ok(())
}

#[instrument(skip(services), level = "debug")]
pub fn show(services: &ServiceContainer, record: &RecordArgs, is_json: bool) -> CliResult<()> {
    let record = RecordRef::from(record);
    let images = services.tagged_asset_service.load_images(&record)?;

    if is_json {
        let json = serde_json::to_string_pretty(&convert_for_database(images.as_ref()))
            .map_err(|e| CliError::CommandFailed(format!("Failed to serialize images: {}", e)))?;
        println!("{}", json);
        return Ok(());
    }

    match images.as_ref().filter(|images| images.total_count() > 0) {
        Some(images) => print!("{}", format_images(Some(images), stdout_color())),
        None => eprintln!("No images on {}", paint(&record, Color::Blue)),
    }
    Ok(())
}
