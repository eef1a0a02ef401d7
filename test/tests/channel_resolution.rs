/// INTEGRATION TESTS: channel resolution
///
/// Every (role, kind, name) resolves to exactly one backing object, no matter
/// how many times or through which facade method it is reached.

use std::{sync::Barrier, thread};

use simple_shared::{args, BackingObject, ChannelKind, Inbound, RemoteEvent, SimpleShared};
use simple_test::{assert_same_object, Recorder, TestHarness};

#[test]
fn resolving_twice_returns_the_same_object() {
    let harness = TestHarness::new(0);
    let registry = harness.server.registry();

    for kind in ChannelKind::ALL {
        let first = registry.resolve(kind, "score");
        let second = registry.resolve(kind, "score");
        assert_same_object!(first, second);
        assert_eq!(first.kind(), kind);
        assert_eq!(first.name(), "score");
    }
}

#[test]
fn kinds_are_separate_namespaces() {
    let harness = TestHarness::new(0);
    let registry = harness.server.registry();

    let event = registry.resolve(ChannelKind::Event, "shared");
    let function = registry.resolve(ChannelKind::Function, "shared");
    let bindable = registry.resolve(ChannelKind::Bindable, "shared");

    assert!(!event.same_object(&function));
    assert!(!event.same_object(&bindable));
    assert!(!function.same_object(&bindable));
}

#[test]
fn subscribing_and_firing_through_different_resolutions_delivers() {
    let harness = TestHarness::new(1);
    let received = Recorder::new();

    // the first resolution happens inside `on`, the second inside `fire`
    let sink = received.clone();
    harness
        .server
        .on("ping", move |inbound: &Inbound| sink.record(inbound.clone()));
    harness.client(0).fire("ping", (), args!["hello"]);

    assert_eq!(
        received.entries(),
        vec![Inbound {
            origin: Some(harness.participant(0)),
            args: args!["hello"],
        }]
    );
}

#[test]
fn server_and_client_share_replicated_objects() {
    let harness = TestHarness::new(1);

    let on_client = harness
        .client(0)
        .registry()
        .resolve(ChannelKind::Event, "round_started");
    let on_server = harness
        .server
        .registry()
        .resolve(ChannelKind::Event, "round_started");

    assert_same_object!(on_client, on_server);
}

#[test]
fn bindables_stay_local_to_each_endpoint() {
    let harness = TestHarness::new(1);
    let server_side = Recorder::new();
    let client_side = Recorder::new();

    let sink = server_side.clone();
    harness
        .server
        .on_bindable("local", move |args| sink.record(args.clone()));
    let sink = client_side.clone();
    harness
        .client(0)
        .on_bindable("local", move |args| sink.record(args.clone()));

    harness.server.fire_bindable("local", args![1]);

    assert_eq!(server_side.entries(), vec![args![1]]);
    assert!(client_side.is_empty());
    assert!(!harness
        .server
        .registry()
        .resolve(ChannelKind::Bindable, "local")
        .same_object(&harness.client(0).registry().resolve(ChannelKind::Bindable, "local")));
}

#[test]
fn registry_records_what_it_resolved() {
    let harness = TestHarness::new(0);
    let registry = harness.server.registry();

    assert!(!registry.contains(ChannelKind::Event, "lazy"));
    harness.server.on("lazy", |_| {});
    assert!(registry.contains(ChannelKind::Event, "lazy"));
    assert!(!registry.contains(ChannelKind::Function, "lazy"));
}

#[test]
fn concurrent_first_resolutions_agree_on_one_object() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 50;

    let harness = TestHarness::new(1);

    for round in 0..ROUNDS {
        let name = format!("race_{round}");
        let barrier = Barrier::new(THREADS);

        let resolved: Vec<BackingObject> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|index| {
                    let registry = if index % 2 == 0 {
                        harness.server.registry()
                    } else {
                        harness.client(0).registry()
                    };
                    let barrier = &barrier;
                    let name = name.as_str();
                    scope.spawn(move || {
                        barrier.wait();
                        registry.resolve(ChannelKind::Event, name)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("resolver thread panicked"))
                .collect()
        });

        for object in &resolved[1..] {
            assert_same_object!(resolved[0], object.clone());
        }
    }
}

#[test]
fn host_namespace_holds_what_the_registries_created() {
    let harness = TestHarness::new(1);

    assert!(harness.host.namespace().find::<RemoteEvent>("spawned").is_none());
    harness.client(0).on("spawned", |_| {});

    let found = harness
        .host
        .namespace()
        .find::<RemoteEvent>("spawned")
        .expect("event created on first use");
    assert_same_object!(
        BackingObject::Event(found.clone()),
        harness.server.registry().resolve(ChannelKind::Event, "spawned")
    );
}
