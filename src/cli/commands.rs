//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::RouteService;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, project_config_path, Settings};
use crate::domain::{validate_route_path, RouteTree, TreeDisplay};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `routetree --help`".to_string(),
        ));
    };

    match command {
        Commands::Validate { path } => cmd_validate(path),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => {
            let project_dir = project_dir(cli)?;
            cmd_config(command, &project_dir)
        }
        Commands::Tree { app_dir } => cmd_tree(&service(cli)?, app_dir.as_deref()),
        Commands::Routes { app_dir } => cmd_routes(&service(cli)?, app_dir.as_deref()),
        Commands::Layouts { page, app_dir } => {
            cmd_layouts(&service(cli)?, page, app_dir.as_deref())
        }
        Commands::Create { path, app_dir } => cmd_create(&service(cli)?, path, app_dir.as_deref()),
        Commands::Delete { path, app_dir } => cmd_delete(&service(cli)?, path, app_dir.as_deref()),
        Commands::Segment {
            parent,
            name,
            app_dir,
        } => cmd_segment(&service(cli)?, parent, name.as_deref(), app_dir.as_deref()),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().map_err(|e| {
            CliError::from(ApplicationError::OperationFailed {
                context: "resolve current directory".to_string(),
                source: Box::new(e),
            })
        }),
    }
}

fn service(cli: &Cli) -> CliResult<RouteService> {
    let project_dir = project_dir(cli)?;
    let settings = Settings::load(Some(project_dir.as_path()))?;
    debug!("project_dir: {}", project_dir.display());
    Ok(RouteService::new(settings, project_dir))
}

fn print_tree(tree: &RouteTree) {
    output::info(&tree.to_tree_string());
}

#[instrument]
fn cmd_validate(path: &str) -> CliResult<()> {
    validate_route_path(path).map_err(|source| CliError::InvalidPath {
        path: path.to_string(),
        source,
    })?;
    output::success(&format!("{} is a valid route path", path));
    Ok(())
}

#[instrument(skip(service))]
fn cmd_tree(service: &RouteService, app_dir: Option<&Path>) -> CliResult<()> {
    let tree = service.load_tree(app_dir)?;
    print_tree(&tree);
    Ok(())
}

#[instrument(skip(service))]
fn cmd_routes(service: &RouteService, app_dir: Option<&Path>) -> CliResult<()> {
    let table = service.routes(app_dir)?;
    if table.is_empty() {
        output::warning("no routes: no directory carries a page marker");
        return Ok(());
    }
    output::info(&table.to_tree_string());
    Ok(())
}

#[instrument(skip(service))]
fn cmd_layouts(service: &RouteService, page: &str, app_dir: Option<&Path>) -> CliResult<()> {
    let layouts = service.layouts(page, app_dir)?;
    if layouts.is_empty() {
        output::warning(&format!("no layouts wrap {}", page));
        return Ok(());
    }
    output::header(&format!("Layouts for {} (outermost first)", page));
    for layout in layouts {
        output::detail(&layout);
    }
    Ok(())
}

#[instrument(skip(service))]
fn cmd_create(service: &RouteService, path: &str, app_dir: Option<&Path>) -> CliResult<()> {
    let preview = service.preview_create(path, app_dir)?;
    if preview.outcome.is_noop() {
        output::info(&format!("route {} already exists", path));
        return Ok(());
    }
    output::header(&format!("Creating {} would add:", path));
    for id in &preview.outcome.created {
        if let Some(raw) = preview.tree.raw_path(*id) {
            output::diff_add(&raw);
        }
    }
    print_tree(&preview.tree);
    Ok(())
}

#[instrument(skip(service))]
fn cmd_delete(service: &RouteService, path: &str, app_dir: Option<&Path>) -> CliResult<()> {
    let preview = service.preview_delete(path, app_dir)?;
    if !preview.outcome {
        output::warning(&format!("no route at {}", path));
        return Ok(());
    }
    output::header(&format!("Tree after deleting {}:", path));
    print_tree(&preview.tree);
    Ok(())
}

#[instrument(skip(service))]
fn cmd_segment(
    service: &RouteService,
    parent: &str,
    name: Option<&str>,
    app_dir: Option<&Path>,
) -> CliResult<()> {
    let preview = service.preview_segment(parent, name, app_dir)?;
    let Some(segment) = preview.outcome else {
        return Err(CliError::InvalidArgs(format!("no directory at {}", parent)));
    };
    if let Some(raw) = preview.tree.raw_path(segment.id) {
        output::diff_add(&raw);
    }
    print_tree(&preview.tree);
    Ok(())
}

fn cmd_config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let describe = |path: &Path| {
                if path.exists() {
                    format!("{} (exists)", path.display())
                } else {
                    format!("{} (not found)", path.display())
                }
            };
            match global_config_path() {
                Some(global) => output::detail(&format!("global:  {}", describe(&global))),
                None => output::detail("global:  (no config directory)"),
            }
            output::detail(&format!(
                "project: {}",
                describe(&project_config_path(project_dir))
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let blog = temp.path().join("app").join("blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(blog.join("page.tsx"), "").unwrap();
        temp
    }

    fn run(args: &[&str]) -> CliResult<()> {
        execute_command(&Cli::parse_from(args))
    }

    #[test]
    fn given_no_command_when_executing_then_usage_error() {
        let err = run(&["routetree"]).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }

    #[test]
    fn given_invalid_path_when_validating_then_dataerr() {
        let err = run(&["routetree", "validate", "/bad name"]).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert!(run(&["routetree", "validate", "/blog/post"]).is_ok());
    }

    #[test]
    fn given_project_when_running_read_commands_then_ok() {
        let temp = project();
        let dir = temp.path().to_str().unwrap();
        assert!(run(&["routetree", "-C", dir, "tree"]).is_ok());
        assert!(run(&["routetree", "-C", dir, "routes"]).is_ok());
        assert!(run(&["routetree", "-C", dir, "layouts", "/blog"]).is_ok());
        assert!(run(&["routetree", "-C", dir, "create", "/blog/post"]).is_ok());
        assert!(run(&["routetree", "-C", dir, "delete", "/blog"]).is_ok());
        assert!(run(&["routetree", "-C", dir, "segment", "/blog"]).is_ok());
    }

    #[test]
    fn given_missing_parent_when_adding_segment_then_usage_error() {
        let temp = project();
        let dir = temp.path().to_str().unwrap();
        let err = run(&["routetree", "-C", dir, "segment", "/nope"]).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }

    #[test]
    fn given_missing_app_dir_when_listing_routes_then_noinput() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_str().unwrap();
        let err = run(&["routetree", "-C", dir, "routes"]).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_create_with_bad_path_when_previewing_then_dataerr_and_disk_untouched() {
        let temp = project();
        let dir = temp.path().to_str().unwrap();
        let err = run(&["routetree", "-C", dir, "create", "blog"]).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert!(!temp.path().join("app").join("blog").join("post").exists());
    }
}
