use std::collections::HashSet;

use fixture_sampler::{Elements, FixtureError, FixtureRng, Ipv6Network, UniqueGenerator, Uuid4};

#[test]
fn uuid_draws_are_pairwise_distinct() {
    let mut rng = FixtureRng::new(17);
    let mut ids = UniqueGenerator::new(Uuid4);
    let drawn: Vec<_> = (0..500).map(|_| ids.generate(&mut rng).unwrap()).collect();
    let distinct: HashSet<_> = drawn.iter().collect();
    assert_eq!(distinct.len(), drawn.len());
    assert_eq!(ids.seen("en_US"), 500);
}

#[test]
fn small_pool_yields_every_value_once_then_runs_out() {
    let mut rng = FixtureRng::new(3);
    let mut colors = UniqueGenerator::new(Elements::new("color", ["red", "green", "blue"]));
    let mut drawn: Vec<&str> = (0..3).map(|_| colors.generate(&mut rng).unwrap()).collect();
    drawn.sort();
    assert_eq!(drawn, vec!["blue", "green", "red"]);

    match colors.generate(&mut rng) {
        Err(FixtureError::OutOfValues {
            generator,
            attempts,
        }) => {
            assert_eq!(generator, "color");
            assert_eq!(attempts, 1000);
        }
        other => panic!("expected OutOfValues, got {other:?}"),
    }
}

#[test]
fn clear_allows_values_to_repeat() {
    let mut rng = FixtureRng::new(3);
    let mut colors =
        UniqueGenerator::new(Elements::new("color", ["red", "green"])).with_max_retries(50);
    colors.generate(&mut rng).unwrap();
    colors.generate(&mut rng).unwrap();
    assert!(colors.generate(&mut rng).is_err());

    colors.clear("en_US");
    assert!(colors.generate(&mut rng).is_ok());
    assert_eq!(colors.seen("en_US"), 1);
}

#[test]
fn ipv6_networks_are_unique_and_well_formed() {
    let mut rng = FixtureRng::new(8);
    let mut networks = UniqueGenerator::new(Ipv6Network).with_locale("en_GB");
    let drawn: Vec<String> = (0..64).map(|_| networks.generate(&mut rng).unwrap()).collect();
    let distinct: HashSet<&String> = drawn.iter().collect();
    assert_eq!(distinct.len(), 64);
    for network in &drawn {
        let (address, prefix) = network.split_once('/').unwrap();
        assert!(address.parse::<std::net::Ipv6Addr>().is_ok());
        assert!((1..=128).contains(&prefix.parse::<u8>().unwrap()));
    }
    assert_eq!(networks.seen("en_GB"), 64);
}
