#![cfg(test)]

// Property tests for TokenTable kept inside the crate so they can reach the
// slot store and the probe helpers directly.

use crate::config::{LookupMode, TableConfig};
use crate::table::{Placement, TokenTable};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum Op {
    Insert(usize),
    Contains(usize),
    Miss(String),
}

// Pool-indexed operations so shrinking walks toward earlier tokens.
fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{1,8}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => idx.clone().prop_map(Op::Insert),
            2 => idx.clone().prop_map(Op::Contains),
            1 => "[A-Z]{1,6}".prop_map(Op::Miss),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: the default table behaves like a set when the caller queries
// before inserting, the way the loader does.
// - every inserted token is found, never-inserted tokens are not
// - no insert walks more than the probe bound
// - entries reachable from the slots equal the number of inserts
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_query_then_insert_matches_set((pool, ops) in arb_scenario()) {
        let mut sut = TokenTable::new();
        let mut model: BTreeSet<String> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(i) => {
                    let k = &pool[i];
                    if sut.contains(k) {
                        prop_assert!(model.contains(k), "false positive for {:?}", k);
                        continue;
                    }
                    prop_assert!(!model.contains(k), "lost {:?}", k);
                    let ins = sut.insert(k).expect("insert");
                    prop_assert!(ins.probes <= sut.probe_bound());
                    prop_assert_eq!(sut.token(ins.handle), Some(k.as_str()));
                    model.insert(k.clone());
                }
                Op::Contains(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.contains(k), model.contains(k));
                    prop_assert_eq!(sut.count(k), usize::from(model.contains(k)));
                }
                Op::Miss(s) => {
                    prop_assert!(!sut.contains(&s));
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.store().reachable(), sut.len());
        }
    }
}

// Property: inserting blindly, duplicates included, never loses an entry and
// never probes past the bound, in either lookup mode and any table size.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_blind_inserts_stay_reachable(
        tokens in proptest::collection::vec("[a-c]{1,3}", 1..200),
        slots in 1usize..80,
        faithful in any::<bool>(),
    ) {
        let lookup = if faithful { LookupMode::Faithful } else { LookupMode::Redirected };
        let cfg = TableConfig::new().with_slots(slots).with_lookup(lookup);
        let mut sut = TokenTable::with_config(cfg).expect("valid config");

        for (n, k) in tokens.iter().enumerate() {
            let ins = sut.insert(k).expect("insert");
            prop_assert!(ins.probes <= sut.probe_bound());
            match ins.placement {
                Placement::Primary => prop_assert_eq!(ins.slot, sut.home_slot(k)),
                Placement::Relocated { home } => {
                    prop_assert_eq!(home, sut.home_slot(k));
                    prop_assert!(sut.redirects(home).contains(&ins.slot));
                }
                Placement::Chained => {
                    prop_assert_eq!(ins.slot, sut.home_slot(k));
                    prop_assert_eq!(ins.probes, sut.probe_bound());
                }
            }
            prop_assert_eq!(sut.len(), n + 1);
            prop_assert_eq!(sut.store().reachable(), n + 1);
        }

        if !faithful {
            for k in &tokens {
                prop_assert!(sut.contains(k), "redirected lookup lost {:?}", k);
            }
        }
    }
}
