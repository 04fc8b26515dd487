use proptest::prelude::*;

use crate::tests::PointModel;
use crate::IntervalMap;

#[derive(Clone, Debug)]
enum Op {
    Add(i64, i64),
    Remove(i64),
    Clear,
}

fn range_strategy() -> impl Strategy<Value = (i64, i64)> {
    (0i64..990, 1i64..=60).prop_map(|(from, width)| (from, (from + width).min(1000)))
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        70 => range_strategy().prop_map(|(from, to)| Op::Add(from, to)),
        28 => (-5i64..1005).prop_map(Op::Remove),
        2 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=300)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_partition_matches_point_model(ops in ops_strategy()) {
        let mut map: IntervalMap<u32> = IntervalMap::new();
        let mut model = PointModel::new();

        for (v, op) in (0u32..).zip(ops) {
            match op {
                Op::Add(from, to) => {
                    let covered_before = (from..to).any(|p| map.contains(p));
                    let overlap = map.add(from, to, v).unwrap();
                    prop_assert_eq!(overlap, covered_before);
                    model.add(from, to, v);
                }
                Op::Remove(key) => {
                    let span = map.get_entry(key).map(|e| (e.from(), e.to()));
                    let removed = map.remove_range(key);
                    prop_assert_eq!(span.is_some(), removed.is_some());
                    if let Some((from, to)) = span {
                        model.clear(from, to);
                    }
                }
                Op::Clear => {
                    map.clear();
                    model.clear(0, 1000);
                }
            }
        }

        map.check_rb_properties();
        map.check_partition();
        model.assert_matches(&map);
    }

    #[test]
    fn prop_disjoint_inserts_never_split(starts in prop::collection::btree_set(0i64..10_000, 0..200)) {
        let mut map = IntervalMap::new();
        for &from in &starts {
            let overlap = map.add(from * 3, from * 3 + 2, from).unwrap();
            prop_assert!(!overlap);
        }
        prop_assert_eq!(map.len(), starts.len());
        let froms: Vec<_> = map.iter().map(|e| e.from() / 3).collect();
        let expected: Vec<_> = starts.into_iter().collect();
        prop_assert_eq!(froms, expected);
        prop_assert_eq!(map.overlapping_ranges().count(), 0);
    }
}
