/// PROPERTY-BASED TESTS: Channel resolution invariants
///
/// Uses proptest to verify resolution properties hold across random names.
///
/// Key invariants:
/// 1. Resolving a (kind, name) pair any number of times yields one object
/// 2. Different kinds never share an object, even under the same name
/// 3. Preregistration succeeds exactly once per (kind, name)
use proptest::prelude::*;
use simple_shared::{ChannelKind, Host, RegistryError, Registry, Role};

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,15}"
}

fn kind_strategy() -> impl Strategy<Value = ChannelKind> {
    prop_oneof![
        Just(ChannelKind::Event),
        Just(ChannelKind::Function),
        Just(ChannelKind::Bindable),
    ]
}

proptest! {
    #[test]
    fn prop_resolution_is_idempotent(
        lookups in prop::collection::vec((kind_strategy(), name_strategy()), 1..40),
    ) {
        let registry = Registry::new(Role::Server, Host::default());

        let first: Vec<_> = lookups
            .iter()
            .map(|(kind, name)| registry.resolve(*kind, name))
            .collect();

        for ((kind, name), earlier) in lookups.iter().zip(&first) {
            let again = registry.resolve(*kind, name);
            prop_assert!(again.same_object(earlier));
            prop_assert_eq!(again.kind(), *kind);
            prop_assert_eq!(again.name(), name.as_str());
        }
    }

    #[test]
    fn prop_kinds_never_share_objects(name in name_strategy()) {
        let host = Host::default();
        let registry = Registry::new(Role::Client, host);

        let objects: Vec<_> = ChannelKind::ALL
            .into_iter()
            .map(|kind| registry.resolve(kind, &name))
            .collect();

        for (i, left) in objects.iter().enumerate() {
            for right in &objects[i + 1..] {
                prop_assert!(!left.same_object(right));
            }
        }
    }

    #[test]
    fn prop_replicated_objects_agree_across_roles(
        kind in prop_oneof![Just(ChannelKind::Event), Just(ChannelKind::Function)],
        name in name_strategy(),
    ) {
        let host = Host::default();
        let server = Registry::new(Role::Server, host.clone());
        let client = Registry::new(Role::Client, host);

        let from_client = client.resolve(kind, &name);
        let from_server = server.resolve(kind, &name);

        prop_assert!(from_client.same_object(&from_server));
    }

    #[test]
    fn prop_preregistration_succeeds_once(kind in kind_strategy(), name in name_strategy()) {
        let registry = Registry::new(Role::Server, Host::default());

        prop_assert!(registry.preregister(kind, &name).is_ok());
        let duplicate = registry.preregister(kind, &name).map(|_| ());
        prop_assert_eq!(
            duplicate,
            Err(RegistryError::DuplicateChannel { kind, name: name.clone() })
        );
    }
}
