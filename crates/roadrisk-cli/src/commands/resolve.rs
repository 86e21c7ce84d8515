//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;
use roadrisk_client::endpoint::{is_loopback_host, predict_url, select_base_url};

/// Execute the resolve command.
///
/// Without `--origin`, a non-loopback host is assumed to be served over https.
pub fn execute_resolve(args: ResolveArgs, config: &mut Config, formatter: &Formatter) -> Result<String> {
    let origin = args
        .origin
        .clone()
        .unwrap_or_else(|| format!("https://{}", args.host.trim()));
    let base_url = select_base_url(&args.host, &origin);
    let url = predict_url(&base_url)?;

    let source = if is_loopback_host(&args.host) {
        "development server"
    } else {
        "serving origin"
    };
    println!("{}", formatter.info(&format!("{} ({})", url, source)));

    if let Some(profile_name) = args.save_as {
        let profile = match config.profiles.get(&profile_name) {
            Some(existing) => Profile {
                endpoint_base_url: base_url.clone(),
                ..existing.clone()
            },
            None => Profile::new(base_url.clone()),
        };
        config.set_profile(profile_name.clone(), profile);
        config.save()?;
        println!("{}", formatter.success(&format!("Profile '{}' saved", profile_name)));
    }

    Ok(base_url)
}
