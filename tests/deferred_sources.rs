use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fixture_sampler::{
    BoolSequence, BoolSequenceConfig, Constant, FixtureError, FixtureRng, LazyValue, Maybe,
    MemoryTable, RecordSource, get_random_instances, random_instance, related_or_random,
};

#[derive(Clone, Debug, PartialEq)]
struct Status {
    name: &'static str,
    content_types: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
struct Group {
    name: String,
}

fn status(name: &'static str, content_types: &[&'static str]) -> Status {
    Status {
        name,
        content_types: content_types.to_vec(),
    }
}

#[test]
fn deferred_source_sees_rows_created_after_declaration() {
    let statuses: MemoryTable<Status> = MemoryTable::new("status");
    let calls = Arc::new(AtomicUsize::new(0));
    let device_status = {
        let statuses = statuses.clone();
        let calls = Arc::clone(&calls);
        random_instance(
            RecordSource::<Status>::deferred("statuses for device", move || {
                calls.fetch_add(1, Ordering::SeqCst);
                statuses
                    .filter("applies to device", |s| s.content_types.contains(&"device"))
                    .into()
            }),
            false,
        )
    };
    let mut rng = FixtureRng::new(10);

    assert!(matches!(
        device_status.evaluate(&mut rng),
        Err(FixtureError::EmptyCollection { .. })
    ));

    statuses.extend([
        status("active", &["device", "site"]),
        status("retired", &["site"]),
    ]);
    for _ in 0..10 {
        let picked = device_status.evaluate(&mut rng).unwrap().unwrap();
        assert_eq!(picked.name, "active");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 11);
}

#[test]
fn deferred_kind_resolves_to_every_record() {
    let groups: MemoryTable<Group> = MemoryTable::new("group");
    let source = {
        let groups = groups.clone();
        RecordSource::<Group>::deferred("all groups", move || groups.clone().into())
    };
    groups.extend((0..4).map(|idx| Group {
        name: format!("group-{idx}"),
    }));
    let mut rng = FixtureRng::new(4);
    let picked = get_random_instances(&source, 4, None, &mut rng).unwrap();
    assert_eq!(picked.len(), 4);
}

#[test]
fn maybe_with_bool_sequence_sets_optional_relation() {
    let groups: MemoryTable<Group> = MemoryTable::new("group");
    groups.insert(Group {
        name: "core".into(),
    });
    let mut rng = FixtureRng::new(6);
    let mut has_group = BoolSequence::new(&BoolSequenceConfig::default(), &mut rng).unwrap();
    let group = Maybe::new(random_instance(groups, true), Constant(None::<Group>));

    let assigned: Vec<Option<Group>> = (0..8)
        .map(|_| {
            let decided = has_group.next_value().unwrap();
            group.evaluate_with(decided, &mut rng).unwrap()
        })
        .collect();
    assert_eq!(assigned.iter().filter(|g| g.is_some()).count(), 4);
    assert!(assigned.iter().flatten().all(|g| g.name == "core"));
}

#[test]
fn lazy_instances_can_be_stored_as_trait_objects() {
    let groups: MemoryTable<Group> = MemoryTable::new("group");
    let fields: Vec<Box<dyn LazyValue<Option<Group>>>> = vec![
        Box::new(random_instance(groups.clone(), true)),
        Box::new(Constant(None::<Group>)),
    ];
    groups.insert(Group {
        name: "edge".into(),
    });
    let mut rng = FixtureRng::new(1);
    let values: Vec<Option<Group>> = fields
        .iter()
        .map(|field| field.evaluate(&mut rng).unwrap())
        .collect();
    assert_eq!(values[0].as_ref().map(|g| g.name.as_str()), Some("edge"));
    assert_eq!(values[1], None);
}

#[test]
fn explicit_related_records_skip_sampling() {
    let groups: MemoryTable<Group> = MemoryTable::new("group");
    let source = RecordSource::from(groups.clone());
    let mut rng = FixtureRng::new(1);
    let explicit = vec![Group {
        name: "manual".into(),
    }];
    assert_eq!(
        related_or_random(Some(explicit.clone()), &source, &mut rng).unwrap(),
        explicit
    );
    assert!(related_or_random(None, &source, &mut rng).unwrap().is_empty());
}
