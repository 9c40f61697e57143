// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::di::ServiceContainer;

pub mod args;
pub mod asset_commands;
pub mod completion;
pub mod display;
pub mod error;
pub mod tag_commands;

/// Runs commands that work without records or storage.
///
/// Returns `Ok(false)` when the command needs the service container.
pub fn execute_command(cli: &Cli) -> CliResult<bool> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(true);
    }
    match cli.command.as_ref() {
        Some(Commands::Suggest { category }) => tag_commands::suggest(category.as_deref())?,
        Some(Commands::Validate { tag }) => tag_commands::validate(tag)?,
        Some(Commands::Completion { shell }) => handle_completion(shell)?,
        Some(command) if command.needs_services() => return Ok(false),
        _ => {}
    }
    Ok(true)
}

pub fn execute_command_with_services(cli: &Cli, services: &ServiceContainer) -> CliResult<()> {
    match cli.command.as_ref() {
        Some(Commands::Upload {
            record,
            tag,
            folder,
            files,
        }) => asset_commands::upload(services, record, tag, folder.as_deref(), files),
        Some(Commands::Remove { record, tag, url }) => {
            asset_commands::remove(services, record, tag, url)
        }
        Some(Commands::RemoveTag { record, tag }) => {
            asset_commands::remove_tag(services, record, tag)
        }
        Some(Commands::Show { record, is_json }) => asset_commands::show(services, record, *is_json),
        Some(Commands::Tags { record }) => tag_commands::show_tags(services, record),
        _ => Ok(()),
    }
}

fn handle_completion(shell: &str) -> CliResult<()> {
    match shell.to_lowercase().as_str() {
        "bash" => {
            eprintln!("# Outputting bash completion script for tagfolio");
            eprintln!("# To use: eval \"$(tagfolio completion bash)\"");
        }
        "zsh" => {
            eprintln!("# Outputting zsh completion script for tagfolio");
            eprintln!("# To use: tagfolio completion zsh > ~/.zfunc/_tagfolio");
        }
        "fish" => {
            eprintln!("# Outputting fish completion script for tagfolio");
            eprintln!("# To use: tagfolio completion fish | source");
        }
        _ => {}
    }

    completion::generate_completion(shell)
        .map_err(|e| CliError::CommandFailed(format!("Failed to generate completion: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn given_record_command_when_execute_command_then_deferred_to_services() {
        let cli = Cli::parse_from(["tagfolio", "show", "vendors", "7", "portfolio_images"]);
        assert!(!execute_command(&cli).unwrap());
    }

    #[test]
    fn given_standalone_command_when_execute_command_then_handled() {
        let cli = Cli::parse_from(["tagfolio", "validate", "Exterior"]);
        assert!(execute_command(&cli).unwrap());

        let cli = Cli::parse_from(["tagfolio", "validate", "bad!"]);
        assert!(execute_command(&cli).is_err());
    }
}
