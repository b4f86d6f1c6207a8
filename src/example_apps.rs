use std::error::Error;

use clap::{Parser, error::ErrorKind};
use uuid::Uuid;

use crate::config::{BoolSequenceConfig, FixtureConfig};
use crate::fake::{Ipv6Network, Uuid4};
use crate::lazy::{Constant, Maybe};
use crate::sampler::{get_random_instances, random_instance, related_or_random};
use crate::source::{MemoryTable, RecordSource};
use crate::{BoolSequence, FixtureError, UniqueGenerator};

#[derive(Debug, Parser)]
#[command(
    name = "fixture_demo",
    disable_help_subcommand = true,
    about = "Build sample device fixtures from an in-memory store",
    long_about = "Seed status, location, and tag tables, then build device fixtures using random picks, biased boolean sequences, and unique ids."
)]
struct FixtureDemoCli {
    #[arg(long, help = "Deterministic seed override")]
    seed: Option<u64>,
    #[arg(
        long,
        default_value_t = 6,
        value_parser = parse_positive_usize,
        help = "Number of device fixtures to build"
    )]
    devices: usize,
    #[arg(
        long,
        default_value_t = 5,
        help = "Number of tags seeded before devices are built"
    )]
    tags: usize,
    #[arg(long = "max-tags", help = "Upper bound on tags assigned per device")]
    max_tags: Option<usize>,
    #[arg(
        long = "location-chance",
        default_value_t = 50,
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Percentage of devices that get a location"
    )]
    location_chance: u8,
    #[arg(long, help = "Locale used for unique id memory")]
    locale: Option<String>,
}

#[derive(Clone, Debug)]
struct Status {
    name: &'static str,
    for_devices: bool,
}

#[derive(Clone, Debug)]
struct Location {
    id: Uuid,
    name: String,
}

#[derive(Clone, Debug)]
struct Tag {
    name: String,
}

#[derive(Debug)]
struct Device {
    id: Uuid,
    status: &'static str,
    location: Option<String>,
    tags: Vec<String>,
    management_prefix: String,
}

/// Run the fixture demo with CLI-style arguments (program name excluded).
pub fn run_fixture_demo<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<FixtureDemoCli, _>(
        std::iter::once("fixture_demo".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let mut config = FixtureConfig::default();
    config.seed = cli.seed.unwrap_or(config.seed);
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    config.bool_sequence = BoolSequenceConfig {
        chance_of_getting_true: cli.location_chance,
        ..BoolSequenceConfig::default()
    };
    config.validate()?;

    let mut rng = config.rng();
    let mut ids = UniqueGenerator::from_config(Uuid4, &config);
    let mut prefixes = UniqueGenerator::from_config(Ipv6Network, &config);

    let statuses = MemoryTable::new("status");
    statuses.extend([
        Status {
            name: "active",
            for_devices: true,
        },
        Status {
            name: "planned",
            for_devices: true,
        },
        Status {
            name: "deprecated",
            for_devices: false,
        },
    ]);
    let locations: MemoryTable<Location> = MemoryTable::new("location");
    let tags: MemoryTable<Tag> = MemoryTable::new("tag");

    // Field declarations happen before any location exists.
    let device_status = {
        let statuses = statuses.clone();
        random_instance(
            RecordSource::<Status>::deferred("statuses for devices", move || {
                statuses.filter("for devices", |status| status.for_devices).into()
            }),
            false,
        )
    };
    let device_location = Maybe::new(
        random_instance(locations.clone(), true),
        Constant(None::<Location>),
    );
    let tag_source = RecordSource::from(tags.clone());
    let mut has_location = BoolSequence::new(&config.bool_sequence, &mut rng)?;

    for name in ["ams01", "fra02", "lhr03"] {
        locations.insert(Location {
            id: ids.generate(&mut rng)?,
            name: name.to_string(),
        });
    }
    for idx in 0..cli.tags {
        tags.insert(Tag {
            name: format!("tag-{idx}"),
        });
    }

    println!(
        "Seeded {} statuses, {} locations, {} tags (seed={}).",
        statuses.len(),
        locations.len(),
        tags.len(),
        config.seed
    );

    for _ in 0..cli.devices {
        let status = device_status
            .evaluate(&mut rng)?
            .ok_or_else(|| FixtureError::Store("required status resolved to nothing".into()))?;
        let location = device_location.evaluate_with(has_location.next_value()?, &mut rng)?;
        let assigned = match cli.max_tags {
            Some(max) => get_random_instances(&tag_source, 0, Some(max), &mut rng)?,
            None => related_or_random(None, &tag_source, &mut rng)?,
        };
        let device = Device {
            id: ids.generate(&mut rng)?,
            status: status.name,
            location: location
                .map(|location: Location| format!("{} ({})", location.name, location.id)),
            tags: assigned.into_iter().map(|tag| tag.name).collect(),
            management_prefix: prefixes.generate(&mut rng)?,
        };
        print_device(&device);
    }

    Ok(())
}

fn print_device(device: &Device) {
    println!("device {}", device.id);
    println!("  status   : {}", device.status);
    println!(
        "  location : {}",
        device.location.as_deref().unwrap_or("<none>")
    );
    if device.tags.is_empty() {
        println!("  tags     : <none>");
    } else {
        println!("  tags     : {}", device.tags.join(", "));
    }
    println!("  prefix   : {}", device.management_prefix);
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw.parse::<usize>().map_err(|_| {
        format!(
            "Could not parse --devices value '{}' as a positive integer",
            raw
        )
    })?;
    if parsed == 0 {
        return Err("--devices must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
