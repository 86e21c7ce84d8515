//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use roadrisk_domain::{PredictionResult, RiskTier};

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, formatter: &Formatter) -> Result<RiskTier> {
    let result = PredictionResult::new(args.probability).ok_or_else(|| {
        CliError::InvalidInput(format!("probability {} must be between 0 and 1", args.probability))
    })?;
    let tier = result.tier();
    println!("{}", formatter.format_classification(result.accident_risk(), tier)?);
    Ok(tier)
}
