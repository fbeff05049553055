//! Line-oriented input format.
//!
//! A count line is followed by that many base lines, then another count line
//! and that many queries:
//!
//! ```text
//! 3
//! Stop Tolstopaltsevo: 55.611087, 37.20829, 3900m to Marushkino
//! Stop Marushkino: 55.595884, 37.209755
//! Bus 750: Tolstopaltsevo - Marushkino
//! 2
//! Bus 750
//! Stop Marushkino
//! ```
//!
//! `A > B > A` declares a ring bus and `A - B` a pendulum bus.

use std::{
    io::{self, BufRead},
    str::FromStr,
};

use anyhow::{Context, Result, bail};

use crate::adapters::{BusRecord, CatalogueAdapter, DistanceRecord, StopRecord};

#[derive(Debug, PartialEq)]
pub enum Command {
    Stop {
        stop: StopRecord,
        distances: Vec<DistanceRecord>,
    },
    Bus(BusRecord),
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, description) = s
            .split_once(':')
            .with_context(|| format!("missing ':' in {s}"))?;
        let (kind, name) = head
            .trim()
            .split_once(' ')
            .with_context(|| format!("missing name in {s}"))?;
        let name = name.trim().to_owned();

        match kind {
            "Stop" => parse_stop(name, description),
            "Bus" => Ok(Command::Bus(parse_bus(name, description))),
            _ => bail!("unexpected command: {kind}"),
        }
    }
}

fn parse_stop(name: String, description: &str) -> Result<Command> {
    let mut parts = description.split(',').map(str::trim);

    let lat: f64 = parts
        .next()
        .context("missing latitude")?
        .parse()
        .with_context(|| format!("invalid latitude in {description}"))?;
    let lon: f64 = parts
        .next()
        .with_context(|| format!("missing longitude in {description}"))?
        .parse()
        .with_context(|| format!("invalid longitude in {description}"))?;

    let distances = parts
        .map(|part| parse_distance(&name, part))
        .collect::<Result<Vec<_>>>()?;

    Ok(Command::Stop {
        stop: StopRecord::new(name, lat, lon),
        distances,
    })
}

fn parse_distance(from: &str, s: &str) -> Result<DistanceRecord> {
    let (meters, to) = s
        .split_once("m to ")
        .with_context(|| format!("invalid distance: {s}"))?;
    let meters: u32 = meters
        .trim()
        .parse()
        .with_context(|| format!("invalid meters in distance: {s}"))?;

    Ok(DistanceRecord {
        from: from.to_owned(),
        to: to.trim().to_owned(),
        meters,
    })
}

fn parse_bus(name: String, description: &str) -> BusRecord {
    let (delimiter, is_roundtrip) = if description.contains('>') {
        ('>', true)
    } else {
        ('-', false)
    };

    let stops = description
        .split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();

    BusRecord {
        name,
        stops,
        is_roundtrip,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextQuery {
    Bus(String),
    Stop(String),
}

impl FromStr for TextQuery {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, name) = s
            .trim()
            .split_once(' ')
            .with_context(|| format!("missing name in query: {s}"))?;
        let name = name.trim().to_owned();

        Ok(match kind {
            "Bus" => TextQuery::Bus(name),
            "Stop" => TextQuery::Stop(name),
            _ => bail!("unexpected query: {kind}"),
        })
    }
}

#[derive(Debug, Default)]
pub struct TextAdapter {
    stops: Vec<StopRecord>,
    distances: Vec<DistanceRecord>,
    buses: Vec<BusRecord>,
}

impl TextAdapter {
    pub fn from_commands(commands: Vec<Command>) -> Self {
        let mut adapter = Self::default();
        for command in commands {
            match command {
                Command::Stop { stop, distances } => {
                    adapter.stops.push(stop);
                    adapter.distances.extend(distances);
                }
                Command::Bus(bus) => adapter.buses.push(bus),
            }
        }
        adapter
    }
}

impl CatalogueAdapter for TextAdapter {
    type Error = anyhow::Error;

    fn stops(&self) -> Result<Vec<StopRecord>> {
        Ok(self.stops.clone())
    }

    fn distances(&self) -> Result<Vec<DistanceRecord>> {
        Ok(self.distances.clone())
    }

    fn buses(&self) -> Result<Vec<BusRecord>> {
        Ok(self.buses.clone())
    }
}

pub struct TextInput {
    pub adapter: TextAdapter,
    pub queries: Vec<TextQuery>,
}

pub fn read_text_input<R: BufRead>(reader: R) -> Result<TextInput> {
    let mut lines = reader.lines();

    let base_count = read_count(&mut lines).context("reading base request count")?;
    let commands = (0..base_count)
        .map(|_| next_line(&mut lines)?.parse())
        .collect::<Result<Vec<Command>>>()?;

    let query_count = read_count(&mut lines).context("reading query count")?;
    let queries = (0..query_count)
        .map(|_| next_line(&mut lines)?.parse())
        .collect::<Result<Vec<TextQuery>>>()?;

    Ok(TextInput {
        adapter: TextAdapter::from_commands(commands),
        queries,
    })
}

fn next_line<I: Iterator<Item = io::Result<String>>>(lines: &mut I) -> Result<String> {
    Ok(lines.next().context("unexpected end of input")??)
}

fn read_count<I: Iterator<Item = io::Result<String>>>(lines: &mut I) -> Result<usize> {
    let line = next_line(lines)?;
    line.trim()
        .parse()
        .with_context(|| format!("invalid count: {line}"))
}
