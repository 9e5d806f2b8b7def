//! Property tests for descriptor construction and alias resolution.

use cortex_cores::{from_input, AliasTable, CoreDescriptor, CoreError, CoreOptions};
use proptest::prelude::*;

fn builtin_alias() -> impl Strategy<Value = String> {
    let aliases: Vec<String> = AliasTable::builtin().aliases().map(String::from).collect();
    proptest::sample::select(aliases)
}

proptest! {
    #[test]
    fn construct_without_fpu_never_fails(name in "\\PC{0,24}", trustzone in any::<bool>()) {
        let core = CoreDescriptor::construct(name.as_str(), CoreOptions::default().trustzone(trustzone))
            .unwrap();
        prop_assert!(core.fpu().is_none());
        prop_assert_eq!(core.dsp(), name == "Cortex-M4");
        prop_assert_eq!(core.trustzone(), trustzone);
        prop_assert_eq!(core.name(), name.as_str());
    }

    #[test]
    fn explicit_dsp_always_wins(name in "\\PC{0,24}", dsp in any::<bool>()) {
        let core = CoreDescriptor::construct(name, CoreOptions::default().dsp(dsp)).unwrap();
        prop_assert_eq!(core.dsp(), dsp);
    }

    #[test]
    fn alias_resolution_is_idempotent(alias in builtin_alias()) {
        let first = from_input(&alias.as_str().into()).unwrap();
        let second = from_input(&alias.as_str().into()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unknown_aliases_are_rejected(alias in "[a-z0-9_-]{1,16}") {
        prop_assume!(!AliasTable::builtin().contains(&alias));
        let err = from_input(&alias.as_str().into()).unwrap_err();
        prop_assert!(matches!(err, CoreError::UnknownAlias { .. }), "got {:?}", err);
    }
}
