//! Profile command implementation.

use crate::cli::{EncodingArg, ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use roadrisk_client::BooleanEncoding;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            url,
            timeout_secs,
            encoding,
        } => set_profile(config, name, url, timeout_secs, encoding, formatter),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

fn print_profile(profile: &Profile, indent: &str) {
    println!("{}URL: {}", indent, profile.endpoint_base_url);
    println!("{}Timeout: {}s", indent, profile.timeout_secs);
    println!(
        "{}Booleans: {}",
        indent,
        match profile.boolean_encoding {
            BooleanEncoding::Boolean => "boolean",
            BooleanEncoding::Integer => "integer",
        }
    );
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == config.active_profile_name() {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(config.active_profile_name()));
    print_profile(profile, "  ");

    Ok(())
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!("{}", formatter.success(&format!("Switched to profile '{}'", name)));
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    url: String,
    timeout_secs: Option<u64>,
    encoding: Option<EncodingArg>,
    formatter: &Formatter,
) -> Result<()> {
    // Unspecified settings keep the existing profile's values
    let mut profile = config
        .profiles
        .get(&name)
        .cloned()
        .unwrap_or_else(|| Profile::new(url.clone()));
    profile.endpoint_base_url = url;
    if let Some(timeout_secs) = timeout_secs {
        profile.timeout_secs = timeout_secs;
    }
    if let Some(encoding) = encoding {
        profile.boolean_encoding = encoding.into();
    }
    profile.validate()?;

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!("{}", formatter.success(&format!("{} profile '{}'", action, name)));

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile || name == config.active_profile_name() {
        return Err(CliError::NotPermitted("Cannot delete the active profile".to_string()));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!("{}", formatter.success(&format!("Deleted profile '{}'", name)));
    } else {
        println!("{}", formatter.warning(&format!("Profile '{}' does not exist", name)));
    }

    Ok(())
}
