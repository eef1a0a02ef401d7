/// INTEGRATION TESTS: typed local signals
///
/// `BindableRef` never touches a registry: identity comes from the value
/// itself, and clones share it.
use simple_shared::{BindableRef, SimpleShared};
use simple_test::{init_logging, Recorder, TestHarness};

#[test]
fn separately_constructed_refs_are_isolated() {
    init_logging();
    let first = BindableRef::<(i64, String)>::new();
    let second = BindableRef::<(i64, String)>::new();
    let received = Recorder::new();

    let sink = received.clone();
    first.connect(move |value| sink.record(value.clone()));
    let sink = received.clone();
    second.connect(move |_| sink.record((-1, "wrong ref".to_string())));

    first.fire((5, "foo".to_string()));

    assert_eq!(received.entries(), vec![(5, "foo".to_string())]);
}

#[test]
fn clones_share_one_signal() {
    let original = BindableRef::<u8>::default();
    let handed_out = original.clone();
    let received = Recorder::new();

    let sink = received.clone();
    handed_out.connect(move |value| sink.record(*value));
    original.fire(3);

    assert_eq!(received.entries(), vec![3]);
    assert_eq!(original.connection_count(), 1);
}

#[test]
fn callbacks_run_in_connection_order() {
    let signal = BindableRef::<&'static str>::new();
    let order = Recorder::new();

    for label in ["a", "b", "c"] {
        let sink = order.clone();
        signal.connect(move |value| sink.record(format!("{label}:{value}")));
    }
    signal.fire("go");

    assert_eq!(order.entries(), vec!["a:go", "b:go", "c:go"]);
}

#[test]
fn once_runs_for_the_next_firing_only() {
    let signal = BindableRef::<i64>::new();
    let received = Recorder::new();

    let sink = received.clone();
    let connection = signal.once(move |value| sink.record(*value));
    signal.fire(1);
    signal.fire(2);

    assert_eq!(received.entries(), vec![1]);
    assert!(!connection.is_connected());
    assert_eq!(signal.connection_count(), 0);
}

#[test]
fn disconnected_callback_is_skipped() {
    let signal = BindableRef::<()>::new();
    let received = Recorder::new();

    let sink = received.clone();
    let connection = signal.connect(move |_| sink.record(()));
    signal.fire(());
    connection.disconnect();
    connection.disconnect();
    signal.fire(());

    assert_eq!(received.len(), 1);
}

#[test]
fn typed_refs_do_not_reach_named_bindables() {
    let harness = TestHarness::new(0);
    let named = Recorder::new();
    let typed = BindableRef::<i64>::new();

    let sink = named.clone();
    harness.server.on_bindable("score", move |args| sink.record(args.clone()));
    typed.fire(10);

    assert!(named.is_empty());
}

#[test]
fn once_bindable_fires_once() {
    let harness = TestHarness::new(0);
    let received = Recorder::new();

    let sink = received.clone();
    harness
        .server
        .once_bindable("reset", move |args| sink.record(args.clone()));
    harness.server.fire_bindable("reset", simple_shared::args![1]);
    harness.server.fire_bindable("reset", simple_shared::args![2]);

    assert_eq!(received.entries(), vec![simple_shared::args![1]]);
}
