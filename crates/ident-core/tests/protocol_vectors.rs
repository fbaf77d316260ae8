//! # Protocol Vector Tests
//!
//! Fixed idents that must keep validating across releases. Any change to
//! the envelope layout, codec or tag derivation breaks these.

use ident_core::{
    FixedClock, FixedRandom, GeneratorConfig, IdInspector, IdentGenerator, IdentGeneratorApi,
    IdentValidator, IdentValidatorApi, Rejection, SnowflakeLayout, SnowflakeOptions, TrustMode,
    ValidatorConfig,
};

// =============================================================================
// TEST HELPERS
// =============================================================================

const HISTORIC: [&str; 11] = [
    "XY1A4ZG0000BP53W24CP33MKZ0VJN2ANDE",
    "XY1A4ZH000025MXXG3271X5KYX07GDGY1Q",
    "XY1A4ZH0000673BM8M0K18YFF24KV7ZG44",
    "XY1A4ZJ0000330CH8DM2N09BA4M9D2L7NL",
    "XY1A4ZK000027EDEGKMEHMZ1KYTHVWNE55",
    "XY1A4ZL00003B1HWMB93QYWGMHENVBW4KW",
    "XY1A4PZ00003880Z6WPNDGY2HYBQQB7VQ3",
    "XY1A4PZ00006TE4A2GJQYZY629T090Q1P1",
    "XY1A4Q0000038PKWJF5Z4TKPFJ9AETYF3J",
    "XY1A4J00000509ZT4V3XXCVHGAZBK5GVT3",
    "XY1A4J100003W7A5MHCAAWENFQ3G2ZJ7Q1",
];

fn historic_validator() -> IdentValidator {
    IdentValidator::require_both(ValidatorConfig::both("apple1", "banana1")).unwrap()
}

fn all_validators(sign: &str, verify: &str) -> Vec<IdentValidator> {
    vec![
        IdentValidator::new(ValidatorConfig::default()),
        IdentValidator::new(ValidatorConfig::verify_only(verify)),
        IdentValidator::new(ValidatorConfig::sign_only(sign)),
        IdentValidator::new(ValidatorConfig::both(sign, verify)),
    ]
}

// =============================================================================
// HISTORIC COMPATIBILITY
// =============================================================================

#[test]
fn test_historic_idents_validate() {
    let validator = historic_validator();
    for ident in HISTORIC {
        assert!(validator.validate(ident), "{ident} should validate");
    }
}

#[test]
fn test_historic_idents_validate_lowercase() {
    let validator = historic_validator();
    for ident in HISTORIC {
        assert!(validator.validate(&ident.to_lowercase()));
    }
}

#[test]
fn test_historic_idents_use_default_epoch() {
    let validator = historic_validator();
    for ident in HISTORIC {
        let envelope = validator.check(ident).unwrap();
        let exploded = SnowflakeLayout.explode(envelope.id());
        assert!(exploded.valid);
        assert_eq!(exploded.node, 0);
        // Issued in early January 2022 against the 2021-01-01 epoch.
        assert!((32_146_526_000..32_146_528_000).contains(&exploded.timestamp));
    }
}

#[test]
fn test_historic_idents_reject_other_keys() {
    let validator = IdentValidator::new(ValidatorConfig::both("apple2", "banana1"));
    for ident in HISTORIC {
        assert_eq!(validator.check(ident).err(), Some(Rejection::SignMismatch));
    }
}

// =============================================================================
// ROUND TRIPS
// =============================================================================

#[test]
fn test_round_trip_in_every_trust_mode() {
    let config = GeneratorConfig::new("apple1").with_verify_key("banana1");
    let generator = IdentGenerator::new(config, SnowflakeOptions::with_node(17)).unwrap();
    let validators = all_validators("apple1", "banana1");
    let modes: Vec<TrustMode> = validators.iter().map(|v| v.trust_mode()).collect();
    assert_eq!(
        modes,
        vec![
            TrustMode::Open,
            TrustMode::VerifyOnly,
            TrustMode::SignOnly,
            TrustMode::Both
        ]
    );

    for ident in generator.take(500) {
        let ident = ident.unwrap();
        for validator in &validators {
            assert!(validator.validate(&ident), "{ident} rejected");
        }
    }
}

#[test]
fn test_node_survives_round_trip() {
    let options = SnowflakeOptions {
        node: 1023,
        epoch_ms: 0,
    };
    let mut generator = IdentGenerator::with_clock(
        GeneratorConfig::new("k"),
        options,
        FixedClock::new(77),
        FixedRandom::new(0x11),
    )
    .unwrap();
    let ident = generator.next_ident().unwrap();
    let envelope = historic_validator().decode_envelope(&ident).unwrap();
    let exploded = SnowflakeLayout.explode(envelope.id());
    assert_eq!((exploded.timestamp, exploded.node, exploded.sequence), (77, 1023, 0));
    assert_eq!(envelope.random(), &[0x11; 8]);
}

#[test]
fn test_generation_is_deterministic_with_fixed_providers() {
    let make = || {
        IdentGenerator::with_clock(
            GeneratorConfig::new("s").with_verify_key("v"),
            SnowflakeOptions {
                node: 3,
                epoch_ms: 0,
            },
            FixedClock::new(1_000),
            FixedRandom::new(0x42),
        )
        .unwrap()
    };
    let a: Vec<String> = make().take(20).map(Result::unwrap).collect();
    let b: Vec<String> = make().take(20).map(Result::unwrap).collect();
    assert_eq!(a, b);
}

// =============================================================================
// MALFORMED INPUT
// =============================================================================

#[test]
fn test_rejections_never_panic() {
    let validators = all_validators("apple1", "banana1");
    let inputs = [
        "",
        "0",
        "000000000000",
        "!!!",
        "XY1A4ZG0000BP53W24CP33MKZ0VJN2AND\u{e9}",
        "XY1A4ZG0000BP53W24CP33MKZ0VJN2ANDEXY1A4ZG0000BP53W24CP33MKZ0VJN2ANDE",
        "\u{0}\u{0}",
        "ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ",
    ];
    for validator in &validators {
        for input in inputs {
            assert!(!validator.validate(input), "{input:?} accepted");
        }
    }
}
