//! Predict command implementation.

use crate::cli::PredictArgs;
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;
use roadrisk_client::{PredictionError, RiskWorkflow};
use roadrisk_domain::{Assessment, FormInput, RiskScorer};
use tracing::debug;

/// Execute the predict command.
pub async fn execute_predict(args: PredictArgs, config: &Config, formatter: &Formatter) -> Result<Assessment> {
    let profile = effective_profile(&args, config)?;
    debug!(endpoint = %profile.endpoint_base_url, timeout_secs = profile.timeout_secs, "Resolved scoring profile");

    let client = profile.client()?;
    predict_with(client, &args, formatter).await
}

/// Active profile with the command's endpoint and timeout overrides applied.
pub fn effective_profile(args: &PredictArgs, config: &Config) -> Result<Profile> {
    let mut profile = config.get_active_profile()?.clone();
    if let Some(endpoint) = &args.endpoint {
        profile.endpoint_base_url = endpoint.clone();
    }
    if let Some(timeout_secs) = args.timeout_secs {
        profile.timeout_secs = timeout_secs;
    }
    profile.validate()?;
    Ok(profile)
}

/// Fill a default form from `args` and submit it once through `scorer`.
pub async fn predict_with<S>(scorer: S, args: &PredictArgs, formatter: &Formatter) -> Result<Assessment>
where
    S: RiskScorer<Error = PredictionError>,
{
    let mut form = FormInput::with_defaults();
    for (field, value) in args.assignments() {
        form.set_field(field, value);
    }

    let mut workflow = RiskWorkflow::with_form(scorer, form);
    let assessment = workflow.submit().await?;
    println!("{}", formatter.format_assessment(&assessment)?);
    Ok(assessment)
}
