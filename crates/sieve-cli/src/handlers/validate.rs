//! Validation command handler

use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ValidationReport};
use sieve_schemas::RuleLoader;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(data = %args.data.display(), rule = ?args.rule))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &args.data.display().to_string());

    let rules_path = args
        .rules
        .or_else(|| config.rules.default_rules.clone())
        .ok_or_else(|| {
            Error::invalid_args("no rule document given; pass --rules or set rules.default_rules")
        })?;
    let rule = args.rule.or_else(|| config.rules.default_rule.clone());

    for path in [&rules_path, &args.data] {
        if !path.exists() {
            return Err(Error::FileNotFound { path: path.clone() });
        }
    }

    output.info(&format!(
        "Validating {} against {}",
        args.data.display(),
        rules_path.display()
    ))?;

    let loader = RuleLoader::new();
    let rules = {
        let _load_timer = Timer::new("rule_loading");
        loader.load_rules(&rules_path)?
    };
    debug!(definitions = ?rules.definition_names(), "Rule document built");

    let validator = rules.select(rule.as_deref())?;
    let data = loader.load_data(&args.data)?;

    let result = {
        let _validation_timer = Timer::new("validation");
        validator.validate(data)
    };
    let report = ValidationReport::from_context(&result, &args.data, &rules_path, rule.as_deref());

    if report.valid {
        info!("Validation completed successfully");
        if output.format() == OutputFormat::Human {
            output.success(&format!("✓ {} is valid", args.data.display()))?;
        } else {
            output.validation_result(&result, &report)?;
        }
        return Ok(());
    }

    warn!(errors = report.errors.len(), "Validation failed");
    output.error(&format!("✗ {} is invalid", args.data.display()))?;
    output.validation_result(&result, &report)?;

    Err(Error::ValidationFailed {
        errors: report.errors.len(),
    })
}
