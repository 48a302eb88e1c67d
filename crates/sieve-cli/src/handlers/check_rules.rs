//! Rule document check handler

use crate::cli::{CheckRulesArgs, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{OutputWriter, RulesSummary};
use sieve_schemas::RuleLoader;
use tracing::{info, instrument};

/// Handle the check-rules command
#[instrument(skip(_config, output), fields(rules = %args.rules.display()))]
pub fn handle_check_rules(args: CheckRulesArgs, _config: &Config, output: &mut OutputWriter) -> Result<()> {
    if !args.rules.exists() {
        return Err(Error::FileNotFound { path: args.rules });
    }

    let rules = RuleLoader::new().load_rules(&args.rules)?;
    let summary = RulesSummary {
        rules: args.rules.display().to_string(),
        has_root_rule: rules.root().is_some(),
        definitions: rules.definition_names(),
    };
    info!(definitions = summary.definitions.len(), "Rule document is valid");

    if output.format() != OutputFormat::Human {
        return output.data(&summary);
    }

    output.success(&format!("✓ {} builds", summary.rules))?;
    if !summary.has_root_rule {
        output.info("No root rule; select a definition with --rule")?;
    }
    if !summary.definitions.is_empty() {
        output.section("Definitions")?;
        for name in &summary.definitions {
            output.writeln(&format!("  • {}", name))?;
        }
    }
    Ok(())
}
