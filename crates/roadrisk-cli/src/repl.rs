//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Keeps one form open across commands; `submit` scores it with the active
//! profile's client.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use roadrisk_client::{PredictionClient, RiskWorkflow};
use roadrisk_domain::field::FieldKind;
use roadrisk_domain::{FormField, FormInput};
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive REPL.
pub async fn run_repl(config: &mut Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Roadrisk REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    // Initialize readline editor
    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut workflow = RiskWorkflow::with_form(active_client(config)?, FormInput::with_defaults());

    loop {
        let prompt = if workflow.is_complete() {
            "roadrisk [complete]> "
        } else {
            "roadrisk [incomplete]> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut workflow, config, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Set(String, String),
    Adjust(String, i64),
    Clear(String),
    Reset,
    Show,
    Submit,
    Status,
    Profile(ProfileAction),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "set" => {
            if parts.len() < 3 {
                return Err(CliError::InvalidInput("Usage: set <field> <value>".to_string()));
            }
            Ok(ReplCommand::Set(parts[1].to_string(), parts[2..].join(" ")))
        }
        "inc" | "dec" => {
            let field = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput(format!("Usage: {} <field> [amount]", parts[0])))?;
            let amount = match parts.get(2) {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| CliError::InvalidInput(format!("Invalid amount: {}", raw)))?,
                None => 1,
            };
            let amount = i64::from(amount);
            let delta = if parts[0] == "dec" { -amount } else { amount };
            Ok(ReplCommand::Adjust(field.to_string(), delta))
        }
        "clear" => match parts.get(1) {
            Some(field) => Ok(ReplCommand::Clear(field.to_string())),
            None => Err(CliError::InvalidInput("Usage: clear <field>".to_string())),
        },
        "reset" => Ok(ReplCommand::Reset),
        "show" => Ok(ReplCommand::Show),
        "submit" => Ok(ReplCommand::Submit),
        "status" => Ok(ReplCommand::Status),
        "profile" => parse_profile_command(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

fn parse_profile_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Ok(ReplCommand::Profile(ProfileAction::Show));
    }

    let action = match args[0] {
        "list" => ProfileAction::List,
        "show" => ProfileAction::Show,
        "switch" => {
            if args.len() < 2 {
                return Err(CliError::InvalidInput("Usage: profile switch <name>".to_string()));
            }
            ProfileAction::Switch {
                name: args[1].to_string(),
            }
        }
        _ => return Err(CliError::InvalidInput(format!("Unknown profile action: {}", args[0]))),
    };

    Ok(ReplCommand::Profile(action))
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: ReplCommand,
    workflow: &mut RiskWorkflow<PredictionClient>,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Set(name, value) => {
            let field = workflow.set_named(&name, value)?;
            println!("{}", formatter.success(&format!("{} = {}", field.as_str(), workflow.form().get(field))));
        }
        ReplCommand::Adjust(name, delta) => {
            let value = workflow.adjust_named(&name, delta)?;
            println!("{}", formatter.success(&format!("{} = {}", name, value)));
        }
        ReplCommand::Clear(name) => {
            let field = FormField::parse(&name)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown field: {}", name)))?;
            workflow.clear_field(field);
            println!("{}", formatter.success(&format!("{} cleared", field.as_str())));
        }
        ReplCommand::Reset => {
            workflow.replace_form(FormInput::with_defaults());
            println!("{}", formatter.success("Form reset to defaults"));
        }
        ReplCommand::Show => {
            println!("{}", formatter.format_form(workflow.form())?);
        }
        ReplCommand::Submit => {
            println!("{}", formatter.info(&format!("Submitting to {}", workflow.scorer().predict_url())));
            let assessment = workflow.submit().await?;
            println!("{}", formatter.format_assessment(&assessment)?);
        }
        ReplCommand::Status => print_status(workflow, formatter)?,
        ReplCommand::Profile(action) => {
            let switching = matches!(action, ProfileAction::Switch { .. });
            commands::execute_profile(ProfileArgs { action }, config, formatter)?;
            if switching {
                // Keep the form, rebuild the client for the new profile
                let form = workflow.form().clone();
                *workflow = RiskWorkflow::with_form(active_client(config)?, form);
                debug!(profile = config.active_profile_name(), "Rebuilt prediction client");
            }
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

fn print_status(workflow: &RiskWorkflow<PredictionClient>, formatter: &Formatter) -> Result<()> {
    println!("State: {}", workflow.state().as_str());
    println!("Endpoint: {}", workflow.scorer().predict_url());

    let missing = workflow.form().missing_fields();
    if missing.is_empty() {
        println!("{}", formatter.success("Form complete"));
    } else {
        let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
        println!("{}", formatter.warning(&format!("Missing: {}", names.join(", "))));
    }

    if let Some(assessment) = workflow.assessment() {
        println!("{}", formatter.format_assessment(assessment)?);
    } else if let Some(message) = workflow.last_error() {
        println!("{}", formatter.error(message));
    }
    Ok(())
}

fn active_client(config: &Config) -> Result<PredictionClient> {
    config.get_active_profile()?.client()
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let roadrisk_dir = home.join(".roadrisk");
    std::fs::create_dir_all(&roadrisk_dir)?;
    Ok(roadrisk_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  set <field> <value>          - Set a field's value");
    println!("  inc <field> [n]              - Increase a counter field (num_lanes, num_reported_accidents)");
    println!("  dec <field> [n]              - Decrease a counter field");
    println!("  clear <field>                - Empty a field");
    println!("  reset                        - Restore default values");
    println!("  show                         - Show the form");
    println!("  submit                       - Score the form");
    println!("  status                       - Show submission state and latest outcome");
    println!("  profile [list|show|switch]   - Manage profiles");
    println!("  help, ?                      - Show this help");
    println!("  exit, quit, q                - Exit REPL");
    println!();
    println!("Fields:");
    for field in FormField::ALL {
        let hint = match field.kind() {
            FieldKind::Choice(values) => values.join("|"),
            FieldKind::Counter { min } => format!("integer >= {}", min),
            FieldKind::Numeric => "number".to_string(),
            FieldKind::Flag => "true|false".to_string(),
        };
        println!("  {:<24} {:<28} {}", field.as_str(), field.label(), hint);
    }
    println!();
}
