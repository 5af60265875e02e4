//! Token Resolution
//!
//! Turns a mixed list of callsigns and locators into stations with entity
//! data and positions. A locator directly after a callsign is taken to be
//! that station's grid and refines its position.

use serde::Serialize;

use crate::cty::{callsign_area, AbbreviationIndex, AreaRecord, AreaTable, CallsignLookup, Database};
use crate::geodesy::{Geodesy, GreatCircle};
use crate::locator::is_valid_locator;

/// How a command line token was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Callsign,
    Locator,
}

pub fn classify(token: &str) -> TokenKind {
    if is_valid_locator(token) {
        TokenKind::Locator
    } else {
        TokenKind::Callsign
    }
}

/// One resolved station: a callsign (optionally with its grid) or a bare locator
#[derive(Debug, Clone, Serialize)]
pub struct Station {
    pub token: String,
    pub kind: TokenKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup: Option<CallsignLookup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaRecord>,
    /// (longitude, latitude), East and North positive
    pub position: Option<(f64, f64)>,
    /// Path from the previous positioned station, when distances are requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<GreatCircle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Station {
    fn new(token: &str, kind: TokenKind) -> Self {
        Station {
            token: token.to_string(),
            kind,
            lookup: None,
            locator: None,
            abbreviation: None,
            area: None,
            position: None,
            path: None,
            errors: Vec::new(),
        }
    }

    /// A callsign station that has not been given a grid yet
    fn awaits_locator(&self) -> bool {
        self.kind == TokenKind::Callsign && self.locator.is_none()
    }
}

/// Reference data and geodesy used while resolving tokens
pub struct Resolver<'a, G: Geodesy> {
    pub db: &'a Database,
    pub abbreviations: Option<&'a AbbreviationIndex>,
    pub areas: Option<&'a AreaTable>,
    pub geodesy: &'a G,
}

impl<G: Geodesy> Resolver<'_, G> {
    pub fn resolve_tokens<S: AsRef<str>>(&self, tokens: &[S], with_distance: bool) -> Vec<Station> {
        let mut stations: Vec<Station> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }

            match classify(token) {
                TokenKind::Locator => match stations.last_mut() {
                    Some(previous) if previous.awaits_locator() => {
                        self.attach_locator(previous, token)
                    }
                    _ => stations.push(self.resolve_locator(token)),
                },
                TokenKind::Callsign => stations.push(self.resolve_callsign(token)),
            }
        }

        if with_distance {
            self.add_paths(&mut stations);
        }
        stations
    }

    fn resolve_callsign(&self, token: &str) -> Station {
        let mut station = Station::new(token, TokenKind::Callsign);
        let lookup = self.db.lookup(token);

        if !lookup.is_unknown() {
            station.position = Some((lookup.country.longitude, lookup.country.latitude));
            station.abbreviation = self
                .abbreviations
                .and_then(|index| index.for_country(&lookup.country))
                .map(str::to_string);
            station.area = self.areas.and_then(|areas| {
                let digit = callsign_area(&lookup.callsign)?;
                let prefix = format!("{}{}", lookup.country.primary_prefix, digit);
                areas.by_prefix(&prefix).cloned()
            });
        }

        station.lookup = Some(lookup);
        station
    }

    fn resolve_locator(&self, token: &str) -> Station {
        let mut station = Station::new(token, TokenKind::Locator);
        station.locator = Some(token.to_string());
        match self.geodesy.locator_to_coordinates(token) {
            Ok(position) => station.position = Some(position),
            Err(e) => station.errors.push(e.to_string()),
        }
        station
    }

    /// Use the locator as the callsign's actual position. Zones and entity
    /// data from the lookup are left untouched.
    fn attach_locator(&self, station: &mut Station, locator: &str) {
        station.locator = Some(locator.to_string());
        match self.geodesy.locator_to_coordinates(locator) {
            Ok((lon, lat)) => {
                station.position = Some((lon, lat));
                if let Some(lookup) = station.lookup.as_mut() {
                    lookup.refine_position(lon, lat);
                }
            }
            Err(e) => {
                log::warn!("No refined position for {}: {}", station.token, e);
                station.errors.push(e.to_string());
            }
        }
    }

    fn add_paths(&self, stations: &mut [Station]) {
        let mut previous: Option<(f64, f64)> = None;

        for station in stations.iter_mut() {
            let Some((lon, lat)) = station.position else {
                continue;
            };
            if let Some((prev_lon, prev_lat)) = previous {
                match self.geodesy.great_circle(prev_lon, prev_lat, lon, lat) {
                    Ok(path) => station.path = Some(path),
                    Err(e) => station.errors.push(e.to_string()),
                }
            }
            previous = Some((lon, lat));
        }
    }
}
