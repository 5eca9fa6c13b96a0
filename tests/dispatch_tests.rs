//! End-to-end tests: declarations through dispatch.

use std::sync::{Arc, Mutex};

use sigbridge::{
    CandidateParameter, CandidateSignal, Diagnostics, Dispatch, DispatchChain, DispatchError,
    DispatchOutcome, GeneratedSignals, GeneratorConfig, Handler, HandlerError, ManagedType,
    MarshalType, ObjectId, SignalGenerator, SignalSet, StringName, Value, Variant, VariantType,
    project,
};

fn generate(candidates: &[CandidateSignal]) -> GeneratedSignals {
    let mut diagnostics = Diagnostics::new();
    let generated =
        SignalGenerator::new(GeneratorConfig::default()).generate(candidates, &mut diagnostics);
    assert!(diagnostics.is_empty(), "unexpected diagnostics:\n{}", diagnostics);
    generated
}

type Calls = Arc<Mutex<Vec<Vec<Value>>>>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn recording_handler(calls: &Calls) -> Handler {
    let calls = Arc::clone(calls);
    Handler::new(move |args| {
        calls.lock().unwrap().push(args.values().to_vec());
        Ok(())
    })
}

#[test]
fn test_ready_zero_parameters() {
    init_tracing();
    let generated = generate(&[CandidateSignal::new("Node", "ReadyEventHandler")]);
    let table = generated.table("Node").unwrap();

    let ready = table.get("Ready").unwrap();
    assert!(ready.parameters.is_empty());

    let calls = Calls::default();
    let mut node = SignalSet::new(Arc::clone(table));
    node.connect("Ready", recording_handler(&calls)).unwrap();

    assert_eq!(node.dispatch("Ready", &[]).unwrap(), DispatchOutcome::Handled);
    assert_eq!(*calls.lock().unwrap(), vec![Vec::<Value>::new()]);
}

#[test]
fn test_changed_with_amount() {
    let generated = generate(&[CandidateSignal::new("Wallet", "ChangedEventHandler")
        .with_parameter(CandidateParameter::new("amount", ManagedType::Int32))]);
    let table = generated.table("Wallet").unwrap();

    let method = &table.method_descriptors()[0];
    let arguments = method.arguments.as_ref().unwrap();
    assert_eq!(arguments.len(), 1);
    assert_eq!(arguments[0].name, "amount");
    assert_eq!(arguments[0].ty, VariantType::Int);

    let calls = Calls::default();
    let mut wallet = SignalSet::new(Arc::clone(table));
    wallet.connect("Changed", recording_handler(&calls)).unwrap();

    let outcome = wallet.dispatch("Changed", &[Variant::Int(42)]).unwrap();
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(*calls.lock().unwrap(), vec![vec![Value::Int32(42)]]);
}

#[test]
fn test_unknown_signal_has_no_side_effect() {
    let generated = generate(&[CandidateSignal::new("T", "BarEventHandler")]);
    let calls = Calls::default();
    let mut set = SignalSet::new(Arc::clone(generated.table("T").unwrap()));
    set.connect("Bar", recording_handler(&calls)).unwrap();

    assert_eq!(set.dispatch("Foo", &[]).unwrap(), DispatchOutcome::NotMatched);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_arity_guard() {
    let generated = generate(&[CandidateSignal::new("T", "FooEventHandler")
        .with_parameter(CandidateParameter::new("a", ManagedType::Int32))
        .with_parameter(CandidateParameter::new("b", ManagedType::Bool))]);
    let calls = Calls::default();
    let mut set = SignalSet::new(Arc::clone(generated.table("T").unwrap()));
    set.connect("Foo", recording_handler(&calls)).unwrap();

    let outcome = set.dispatch("Foo", &[Variant::Int(1)]).unwrap();
    assert_eq!(outcome, DispatchOutcome::NotMatched);
    assert!(calls.lock().unwrap().is_empty());

    let outcome = set
        .dispatch("Foo", &[Variant::Int(1), Variant::Bool(true)])
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Handled);
}

#[test]
fn test_handlers_run_in_subscription_order() {
    let generated = generate(&[CandidateSignal::new("T", "TickEventHandler")]);
    let mut set = SignalSet::new(Arc::clone(generated.table("T").unwrap()));

    let order = Arc::new(Mutex::new(Vec::new()));
    let make = |tag: &'static str| {
        let order = Arc::clone(&order);
        Handler::new(move |_| {
            order.lock().unwrap().push(tag);
            Ok(())
        })
    };
    let (h1, h2, h3) = (make("h1"), make("h2"), make("h3"));
    for h in [&h1, &h2, &h3] {
        set.connect("Tick", h.clone()).unwrap();
    }

    set.dispatch("Tick", &[]).unwrap();
    assert_eq!(*order.lock().unwrap(), ["h1", "h2", "h3"]);

    order.lock().unwrap().clear();
    assert!(set.disconnect("Tick", &h2).unwrap());
    set.dispatch("Tick", &[]).unwrap();
    assert_eq!(*order.lock().unwrap(), ["h1", "h3"]);
}

#[test]
fn test_mixed_parameter_shapes() {
    let generated = generate(&[CandidateSignal::new("Player", "HitEventHandler")
        .with_parameter(CandidateParameter::new("damage", ManagedType::Float32))
        .with_parameter(CandidateParameter::new("source", ManagedType::object("Node")))
        .with_parameter(CandidateParameter::new("tag", ManagedType::StringName))
        .with_parameter(CandidateParameter::new("extra", ManagedType::Variant))]);
    let table = generated.table("Player").unwrap();
    let types: Vec<_> = table.get("Hit").unwrap().parameter_types().collect();
    assert_eq!(
        types,
        [
            MarshalType::Float32,
            MarshalType::Object,
            MarshalType::StringName,
            MarshalType::Variant
        ]
    );

    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let mut player = SignalSet::new(Arc::clone(table));
    player
        .connect(
            "Hit",
            Handler::new(move |args| {
                let damage: f32 = args.get(0)?;
                let source: Option<ObjectId> = args.get(1)?;
                let tag: StringName = args.get(2)?;
                let extra: Variant = args.get(3)?;
                *sink.lock().unwrap() = Some((damage, source, tag, extra));
                Ok(())
            }),
        )
        .unwrap();

    let args = [
        Variant::Float(12.5),
        Variant::Object(ObjectId(7)),
        Variant::StringName(StringName::new("fire")),
        Variant::Nil,
    ];
    assert!(player.dispatch("Hit", &args).unwrap().is_handled());
    assert_eq!(
        seen.lock().unwrap().take(),
        Some((12.5, Some(ObjectId(7)), StringName::new("fire"), Variant::Nil))
    );

    // Null object handle
    let args = [
        Variant::Float(1.0),
        Variant::Nil,
        Variant::StringName(StringName::new("ice")),
        Variant::Int(3),
    ];
    assert!(player.dispatch("Hit", &args).unwrap().is_handled());
    let (_, source, _, extra) = seen.lock().unwrap().take().unwrap();
    assert_eq!(source, None);
    assert_eq!(extra, Variant::Int(3));
}

#[test]
fn test_handler_error_stops_and_propagates() {
    let generated = generate(&[CandidateSignal::new("T", "TickEventHandler")]);
    let mut set = SignalSet::new(Arc::clone(generated.table("T").unwrap()));
    let calls = Calls::default();

    set.connect("Tick", Handler::new(|_| Err(HandlerError::new("refused"))))
        .unwrap();
    set.connect("Tick", recording_handler(&calls)).unwrap();

    let err = set.dispatch("Tick", &[]).unwrap_err();
    match err {
        DispatchError::Handler { signal, source } => {
            assert_eq!(signal, "Tick");
            assert_eq!(source.message(), "refused");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_chain_probes_derived_then_base() {
    init_tracing();
    // Unlinked tables: the chain alone supplies the layering.
    let generated = generate(&[
        CandidateSignal::new("Actor", "SpawnedEventHandler"),
        CandidateSignal::new("Actor", "DiedEventHandler"),
        CandidateSignal::new("Player", "DiedEventHandler")
            .with_parameter(CandidateParameter::new("cause", ManagedType::String)),
        CandidateSignal::new("Player", "LeveledEventHandler"),
    ]);

    let actor_calls = Calls::default();
    let player_calls = Calls::default();

    let mut actor = SignalSet::new(Arc::clone(generated.table("Actor").unwrap()));
    actor.connect("Spawned", recording_handler(&actor_calls)).unwrap();
    actor.connect("Died", recording_handler(&actor_calls)).unwrap();

    let mut player = SignalSet::new(Arc::clone(generated.table("Player").unwrap()));
    player.connect("Died", recording_handler(&player_calls)).unwrap();

    let mut chain = DispatchChain::new();
    chain.push(&player).push(&actor);

    // Only the base declares it.
    assert!(chain.dispatch("Spawned", &[]).unwrap().is_handled());
    assert_eq!(actor_calls.lock().unwrap().len(), 1);

    // Derived layer handles it; base is never probed.
    let cause = [Variant::from("lava")];
    assert!(chain.dispatch("Died", &cause).unwrap().is_handled());
    assert_eq!(
        *player_calls.lock().unwrap(),
        vec![vec![Value::String("lava".into())]]
    );
    assert_eq!(actor_calls.lock().unwrap().len(), 1);

    // Same name, different arity falls through to the base.
    assert!(chain.dispatch("Died", &[]).unwrap().is_handled());
    assert_eq!(actor_calls.lock().unwrap().len(), 2);

    assert_eq!(
        chain.dispatch("Missing", &[]).unwrap(),
        DispatchOutcome::NotMatched
    );
}

#[test]
fn test_linked_set_carries_inherited_signals() {
    let mut generated = generate(&[
        CandidateSignal::new("Actor", "SpawnedEventHandler"),
        CandidateSignal::new("Actor", "DiedEventHandler"),
        CandidateSignal::new("Player", "DiedEventHandler")
            .with_parameter(CandidateParameter::new("cause", ManagedType::String)),
    ]);
    assert!(generated.link("Player", "Actor"));
    let table = generated.table("Player").unwrap();
    assert!(table.has_signal("Spawned"));

    let calls = Calls::default();
    let mut player = SignalSet::new(Arc::clone(table));
    player.connect("Spawned", recording_handler(&calls)).unwrap();
    player.connect("Died", recording_handler(&calls)).unwrap();

    assert!(player.dispatch("Spawned", &[]).unwrap().is_handled());
    assert!(player.dispatch("Died", &[Variant::from("lava")]).unwrap().is_handled());
    // The inherited zero-argument Died has no handlers but still matches.
    assert!(player.dispatch("Died", &[]).unwrap().is_handled());
    assert_eq!(
        *calls.lock().unwrap(),
        vec![vec![], vec![Value::String("lava".into())]]
    );

    let mut sent = Vec::new();
    let mut host = |name: &StringName, _: &[Variant]| -> Result<(), sigbridge::HostError> {
        sent.push(name.clone());
        Ok(())
    };
    player.emit(&mut host, "Spawned", &[]).unwrap();
    assert_eq!(sent, [StringName::new("Spawned")]);
}

#[test]
fn test_projection_matches_parameter_count() {
    let candidates = [
        CandidateSignal::new("T", "AEventHandler"),
        CandidateSignal::new("T", "BEventHandler")
            .with_parameter(CandidateParameter::new("x", ManagedType::Int8))
            .with_parameter(CandidateParameter::new("y", ManagedType::UInt16))
            .with_parameter(CandidateParameter::new("z", ManagedType::Float64)),
    ];
    let generated = generate(&candidates);
    let table = generated.table("T").unwrap();

    for (candidate, signal) in candidates.iter().zip(table.iter()) {
        let method = project(signal);
        assert_eq!(method.arity(), candidate.parameters.len());
        let names: Vec<_> = method
            .arguments
            .iter()
            .flatten()
            .map(|arg| arg.name.to_string())
            .collect();
        let expected: Vec<_> = candidate.parameters.iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, expected);
    }
}

#[test]
fn test_emit_reaches_host_in_boundary_form() {
    let generated = generate(&[CandidateSignal::new("Wallet", "ChangedEventHandler")
        .with_parameter(CandidateParameter::new("amount", ManagedType::Int16))
        .with_parameter(CandidateParameter::new("reason", ManagedType::String))]);
    let wallet = SignalSet::new(Arc::clone(generated.table("Wallet").unwrap()));

    let mut sent = Vec::new();
    let mut host = |name: &StringName, args: &[Variant]| -> Result<(), sigbridge::HostError> {
        sent.push((name.clone(), args.to_vec()));
        Ok(())
    };
    wallet
        .emit(
            &mut host,
            "Changed",
            &[Value::Int16(-5), Value::String("fee".into())],
        )
        .unwrap();

    assert_eq!(
        sent,
        [(
            StringName::new("Changed"),
            vec![Variant::Int(-5), Variant::String("fee".into())]
        )]
    );
}
