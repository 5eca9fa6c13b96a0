//! Tests for the build-time pass: diagnostics, configuration, artifacts.

use sigbridge::{
    Artifact, CandidateParameter, CandidateSignal, DiagnosticSink, Diagnostics, GeneratorConfig,
    Location, ManagedType, MethodFlags, RefKind, ShapeViolation, SignalGenerator,
    ValidationError,
};

fn generate_with(
    config: GeneratorConfig,
    candidates: &[CandidateSignal],
) -> (sigbridge::GeneratedSignals, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let generated = SignalGenerator::new(config).generate(candidates, &mut diagnostics);
    (generated, diagnostics)
}

#[test]
fn test_every_violation_reported_with_location() {
    let location = Location::member("Player", "Broken").at("player.rs", 14, 1);
    let candidate = CandidateSignal::new("Player", "Broken")
        .with_parameter(
            CandidateParameter::new("out", ManagedType::Int32).with_ref_kind(RefKind::Out),
        )
        .with_parameter(CandidateParameter::new("list", ManagedType::other("Vec<i32>")))
        .with_returns_void(false)
        .with_location(location.clone());

    let (generated, diagnostics) = generate_with(GeneratorConfig::default(), &[candidate]);

    let codes: Vec<_> = diagnostics.iter().map(|d| d.code()).collect();
    assert_eq!(codes, ["SIG0001", "SIG0002", "SIG0002", "SIG0003"]);
    assert!(diagnostics.iter().all(|d| d.location == location));
    assert!(generated.table("Player").unwrap().is_empty());

    let rendered = diagnostics.to_string();
    assert!(rendered.starts_with("player.rs:14:1: Player::Broken: error[SIG0001]"));
    assert_eq!(rendered.lines().count(), 4);
}

#[test]
fn test_bad_candidate_does_not_stop_others() {
    let (generated, diagnostics) = generate_with(
        GeneratorConfig::default(),
        &[
            CandidateSignal::new("Player", "ReadyEventHandler"),
            CandidateSignal::new("Player", "HitEventHandler")
                .with_parameter(CandidateParameter::new("big", ManagedType::UInt64)),
            CandidateSignal::new("Enemy", "SpawnedEventHandler"),
            CandidateSignal::new("Enemy", "Oops").with_returns_void(false),
        ],
    );

    assert_eq!(diagnostics.count(), 3);
    assert_eq!(diagnostics.for_type("Player").count(), 1);
    assert_eq!(diagnostics.for_type("Enemy").count(), 2);

    let player = generated.table("Player").unwrap();
    assert!(player.has_signal("Ready"));
    assert!(!player.has_signal("Hit"));
    assert!(generated.table("Enemy").unwrap().has_signal("Spawned"));

    let first = diagnostics.iter().next().unwrap();
    assert_eq!(
        first.error,
        ValidationError::UnsupportedParameterShape {
            signal: "Hit".into(),
            parameter: "big".into(),
            reason: ShapeViolation::Unclassifiable(ManagedType::UInt64),
        }
    );
}

#[test]
fn test_closure_diagnostic_sink() {
    let mut messages = Vec::new();
    {
        let mut sink = |error: ValidationError, location: Location| {
            messages.push(format!("{}: {}", location, error));
        };
        let sink: &mut dyn DiagnosticSink = &mut sink;
        SignalGenerator::new(GeneratorConfig::default())
            .generate(&[CandidateSignal::new("Door", "Opened")], sink);
    }
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Door::Opened: "));
}

#[test]
fn test_configured_flags_reach_descriptors() {
    let config = GeneratorConfig::default().with_method_flags(MethodFlags::NORMAL | MethodFlags::EDITOR);
    let (generated, _) = generate_with(config, &[CandidateSignal::new("T", "AEventHandler")]);
    let method = &generated.table("T").unwrap().method_descriptors()[0];
    assert_eq!(method.flags.bits(), 3);
}

#[test]
fn test_artifacts_one_per_type() {
    let config = GeneratorConfig::default().with_pretty(false);
    let (generated, _) = generate_with(
        config,
        &[
            CandidateSignal::new("Wallet", "ChangedEventHandler")
                .with_parameter(CandidateParameter::new("amount", ManagedType::Int32)),
            CandidateSignal::new("Door", "OpenedEventHandler"),
        ],
    );

    let mut artifacts: Vec<Artifact> = Vec::new();
    let count = generated.emit_artifacts(&mut artifacts).unwrap();
    assert_eq!(count, 2);

    let names: Vec<_> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(names, ["Door.signals.json", "Wallet.signals.json"]);

    let wallet: serde_json::Value = serde_json::from_str(&artifacts[1].contents).unwrap();
    let changed = &wallet["signals"][0];
    assert_eq!(changed["name"], "Changed");
    assert_eq!(changed["flags"], 1);
    assert_eq!(changed["returnDescriptor"]["type"], 0);
    assert_eq!(changed["returnDescriptor"]["usageFlags"], 1 << 17);
    assert_eq!(changed["arguments"][0]["name"], "amount");
    assert_eq!(changed["arguments"][0]["type"], 2);
    assert_eq!(changed["arguments"][0]["usageFlags"], 0);
    assert_eq!(changed["arguments"][0]["exported"], false);
    assert!(changed.get("defaultArguments").is_none());

    let door: serde_json::Value = serde_json::from_str(&artifacts[0].contents).unwrap();
    assert!(door["signals"][0].get("arguments").is_none());
}

#[test]
fn test_config_from_json_drives_generation() {
    let config = GeneratorConfig::from_json(
        r#"{ "signal_suffix": "Signal", "artifact_extension": "sig", "pretty": false }"#,
    )
    .unwrap();
    let (generated, diagnostics) = generate_with(
        config,
        &[
            CandidateSignal::new("Door", "OpenedSignal"),
            CandidateSignal::new("Door", "ClosedEventHandler"),
        ],
    );
    assert_eq!(diagnostics.count(), 1);
    assert!(matches!(
        diagnostics.iter().next().unwrap().error,
        ValidationError::MissingSuffix { .. }
    ));

    let mut names = Vec::new();
    generated
        .emit_artifacts(&mut |artifact: Artifact| names.push(artifact.file_name))
        .unwrap();
    assert_eq!(names, ["Door.sig"]);
}
