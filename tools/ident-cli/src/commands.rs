//! Command implementations. Output goes to any `Write` so the commands can
//! be exercised without a terminal.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use ident_core::{
    Base32H, IdInspector, IdentGenerator, IdentGeneratorApi, IdentValidator, IdentValidatorApi,
    SnowflakeLayout,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::CliConfig;

/// Which keys a `validate` run must have configured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Requirement {
    /// Use whatever keys are configured
    #[default]
    None,
    /// Sign key must be configured
    Sign,
    /// Verify key must be configured
    Verify,
    /// Both keys must be configured
    Both,
}

/// Build the validator for `requirement`.
pub fn build_validator(config: &CliConfig, requirement: Requirement) -> Result<IdentValidator> {
    let settings = config.validator_config();
    let validator = match requirement {
        Requirement::None => IdentValidator::new(settings),
        Requirement::Sign => IdentValidator::require_sign(settings)?,
        Requirement::Verify => IdentValidator::require_verify(settings)?,
        Requirement::Both => IdentValidator::require_both(settings)?,
    };
    Ok(validator)
}

/// Print `count` fresh idents, one per line.
pub fn generate<W: Write>(config: &CliConfig, count: usize, out: &mut W) -> Result<()> {
    let mut generator = IdentGenerator::new(config.generator_config()?, config.snowflake)?;
    for _ in 0..count {
        let ident = generator.next_ident()?;
        writeln!(out, "{}", ident)?;
    }
    info!("[ident] generated {} ident(s) on node {}", count, config.snowflake.node);
    Ok(())
}

/// Print a verdict per ident. Returns whether every ident was valid.
pub fn validate<W: Write>(
    config: &CliConfig,
    idents: &[String],
    requirement: Requirement,
    out: &mut W,
) -> Result<bool> {
    let validator = build_validator(config, requirement)?;
    debug!("[ident] validating with {:?}", validator.trust_mode());

    let mut all_valid = true;
    for ident in idents {
        match validator.check(ident) {
            Ok(_) => writeln!(out, "{}: valid", ident)?,
            Err(reason) => {
                all_valid = false;
                writeln!(out, "{}: invalid ({})", ident, reason)?;
            }
        }
    }
    Ok(all_valid)
}

/// Decoded view of one ident.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    /// Input as given
    pub ident: String,
    /// Whether the input is in generator output form
    pub canonical: bool,
    /// Raw 64-bit id
    pub id: u64,
    /// Milliseconds since the configured epoch
    pub timestamp: u64,
    /// Timestamp as Unix milliseconds
    pub unix_ms: u64,
    /// Issuing node
    pub node: u16,
    /// Per-tick sequence
    pub sequence: u16,
    /// Whether the id is structurally valid
    pub id_valid: bool,
    /// Random padding, hex
    pub random: String,
    /// Verify tag, hex
    pub verify_tag: String,
    /// Sign tag, hex
    pub sign_tag: String,
    /// Keys the verdict was reached with
    pub trust_mode: String,
    /// Whether the ident validates under the configured keys
    pub valid: bool,
    /// Why it did not validate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
}

/// Decode `ident` and report its fields.
pub fn inspect_report(config: &CliConfig, ident: &str) -> Result<InspectReport> {
    let validator = build_validator(config, Requirement::None)?;
    let envelope = validator
        .decode_envelope(ident)
        .with_context(|| format!("cannot decode {:?}", ident))?;
    let exploded = SnowflakeLayout.explode(envelope.id());
    let verdict = validator.check(ident);

    Ok(InspectReport {
        ident: ident.to_string(),
        canonical: Base32H::is_canonical(ident),
        id: envelope.id(),
        timestamp: exploded.timestamp,
        unix_ms: exploded.timestamp.saturating_add(config.snowflake.epoch_ms),
        node: exploded.node,
        sequence: exploded.sequence,
        id_valid: exploded.valid,
        random: hex::encode(envelope.random()),
        verify_tag: hex::encode(envelope.verify_tag()),
        sign_tag: hex::encode(envelope.sign_tag()),
        trust_mode: format!("{:?}", validator.trust_mode()),
        valid: verdict.is_ok(),
        rejection: verdict.err().map(|r| r.to_string()),
    })
}

/// Print the inspection report as pretty JSON.
pub fn inspect<W: Write>(config: &CliConfig, ident: &str, out: &mut W) -> Result<()> {
    let report = inspect_report(config, ident)?;
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ident_core::{IdentKey, SnowflakeOptions};

    const HISTORIC: &str = "XY1A4ZG0000BP53W24CP33MKZ0VJN2ANDE";

    fn keyed() -> CliConfig {
        CliConfig {
            sign_key: Some(IdentKey::from("apple1")),
            verify_key: Some(IdentKey::from("banana1")),
            snowflake: SnowflakeOptions::default(),
        }
    }

    #[test]
    fn test_generate_then_validate() {
        let config = keyed();
        let mut out = Vec::new();
        generate(&config, 3, &mut out).unwrap();
        let idents: Vec<String> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(idents.len(), 3);

        let mut out = Vec::new();
        assert!(validate(&config, &idents, Requirement::Both, &mut out).unwrap());
    }

    #[test]
    fn test_generate_without_sign_key_fails() {
        let mut out = Vec::new();
        assert!(generate(&CliConfig::default(), 1, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_validate_reports_reasons() {
        let mut config = keyed();
        config.sign_key = Some(IdentKey::from("wrong"));
        let mut out = Vec::new();
        let idents = vec![HISTORIC.to_string(), "!!".to_string()];
        assert!(!validate(&config, &idents, Requirement::None, &mut out).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("invalid (sign tag mismatch)"));
        assert!(text.contains("!!: invalid (not alphanumeric)"));
    }

    #[test]
    fn test_validate_requirement_enforced() {
        let mut out = Vec::new();
        let result = validate(
            &CliConfig::default(),
            &[HISTORIC.to_string()],
            Requirement::Sign,
            &mut out,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_inspect_historic_ident() {
        let report = inspect_report(&keyed(), HISTORIC).unwrap();
        assert!(report.canonical);
        assert!(report.valid);
        assert!(report.id_valid);
        assert_eq!(report.node, 0);
        assert_eq!(report.sequence, 2);
        assert_eq!(report.timestamp, 32_146_527_216);
        assert_eq!(report.verify_tag.len(), 4);
        assert_eq!(report.sign_tag.len(), 8);
        assert_eq!(report.trust_mode, "Both");
        assert!(report.rejection.is_none());
    }

    #[test]
    fn test_inspect_lowercase_is_not_canonical() {
        let report = inspect_report(&keyed(), &HISTORIC.to_lowercase()).unwrap();
        assert!(!report.canonical);
        assert!(report.valid);
    }

    #[test]
    fn test_inspect_json() {
        let mut out = Vec::new();
        inspect(&CliConfig::default(), HISTORIC, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["trust_mode"], "Open");
        assert!(json.get("rejection").is_none());
    }

    #[test]
    fn test_inspect_undecodable() {
        assert!(inspect_report(&keyed(), "not-an-ident").is_err());
    }
}
