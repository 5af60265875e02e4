//! Text and JSON rendering of resolved stations

use std::fmt::Write;

use super::lookup::{Station, TokenKind};
use crate::cty::MatchSource;

/// Which optional sections to print
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub show_prefixes: bool,
    pub show_distance: bool,
}

fn format_latitude(lat: f64) -> String {
    format!("{:.2}{}", lat.abs(), if lat < 0.0 { 'S' } else { 'N' })
}

fn format_longitude(lon: f64) -> String {
    format!("{:.2}{}", lon.abs(), if lon < 0.0 { 'W' } else { 'E' })
}

fn source_label(source: MatchSource) -> &'static str {
    match source {
        MatchSource::Exception => "exception",
        MatchSource::ExactPrefix => "exact prefix",
        MatchSource::LongestPrefix => "longest prefix",
        MatchSource::Miss => "no match",
    }
}

/// Human-readable block for one station; every line ends with a newline
pub fn render_text(station: &Station, options: OutputOptions) -> String {
    let mut out = String::new();

    match (station.kind, station.lookup.as_ref()) {
        (TokenKind::Callsign, Some(lookup)) if lookup.is_unknown() => {
            let _ = writeln!(out, "{}: unknown country", lookup.callsign);
        }
        (TokenKind::Callsign, Some(lookup)) => {
            let country = &lookup.country;
            let _ = write!(out, "{}: {}", lookup.callsign, country.name);
            if let Some(abbreviation) = &station.abbreviation {
                let _ = write!(out, " ({})", abbreviation);
            }
            let _ = writeln!(
                out,
                ", CQ {:02}, ITU {:02}, {}, {} {}, {}",
                country.cq_zone,
                country.itu_zone,
                country.continent,
                format_latitude(country.latitude),
                format_longitude(country.longitude),
                country.utc_offset_label(),
            );
            if let Some(locator) = &station.locator {
                let _ = writeln!(out, "  locator: {}", locator);
            }
            if let Some(area) = &station.area {
                let _ = writeln!(
                    out,
                    "  area: {} ({}), CQ {:02}, ITU {:02}",
                    area.name, area.prefix, area.cq_zone, area.itu_zone
                );
            }
            if options.show_prefixes {
                let _ = writeln!(
                    out,
                    "  prefix: {} by {}, primary {}{}",
                    lookup.matched,
                    source_label(lookup.source),
                    country.primary_prefix,
                    if lookup.overridden { ", zones overridden" } else { "" },
                );
                let _ = writeln!(out, "  aliases: {}", country.raw_exceptions);
            }
        }
        _ => match station.position {
            Some((lon, lat)) => {
                let _ = writeln!(
                    out,
                    "{}: locator, {} {}",
                    station.token,
                    format_latitude(lat),
                    format_longitude(lon)
                );
            }
            None => {
                let _ = writeln!(out, "{}: locator", station.token);
            }
        },
    }

    if options.show_distance {
        if let Some(path) = &station.path {
            let long = path.long_path();
            let _ = writeln!(
                out,
                "  path: {:.0} km, {:.0} deg (long path {:.0} km, {:.0} deg)",
                path.distance_km, path.azimuth, long.distance_km, long.azimuth
            );
        }
    }

    for error in &station.errors {
        let _ = writeln!(out, "  error: {}", error);
    }

    out
}

/// One JSON object per station
pub fn render_json(station: &Station) -> serde_json::Result<String> {
    serde_json::to_string(station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::lookup::Resolver;
    use crate::cty::{AbbreviationIndex, Database};
    use crate::geodesy::SphericalEarth;

    const SAMPLE: &str = "\
United States:            05:  08:  NA:   37.53:    91.67:     5.0:  K:
    AA,K,N,W;
England:                  14:  27:  EU:   52.77:     1.47:     0.0:  G:
    2E,G,M;
";

    fn stations(tokens: &[&str], with_distance: bool) -> Vec<Station> {
        let db = Database::parse(SAMPLE);
        let abbreviations = AbbreviationIndex::parse("USA\tUnited States\n");
        let resolver = Resolver {
            db: &db,
            abbreviations: Some(&abbreviations),
            areas: None,
            geodesy: &SphericalEarth,
        };
        resolver.resolve_tokens(tokens, with_distance)
    }

    #[test]
    fn test_text_callsign() {
        let station = &stations(&["w1aw"], false)[0];
        let text = render_text(station, OutputOptions::default());
        assert_eq!(
            text,
            "W1AW: United States (USA), CQ 05, ITU 08, NA, 37.53N 91.67W, UTC-5.0\n"
        );
    }

    #[test]
    fn test_text_prefixes() {
        let station = &stations(&["W1AW"], false)[0];
        let options = OutputOptions { show_prefixes: true, show_distance: false };
        let text = render_text(station, options);
        assert!(text.contains("  prefix: W by longest prefix, primary K\n"), "{}", text);
        assert!(text.contains("  aliases: AA,K,N,W\n"), "{}", text);
    }

    #[test]
    fn test_text_unknown() {
        let station = &stations(&["QQ1ABC"], false)[0];
        assert_eq!(render_text(station, OutputOptions::default()), "QQ1ABC: unknown country\n");
    }

    #[test]
    fn test_text_path() {
        let list = stations(&["JO01", "FN31"], true);
        let options = OutputOptions { show_prefixes: false, show_distance: true };
        assert!(!render_text(&list[0], options).contains("path"));
        let text = render_text(&list[1], options);
        assert!(text.starts_with("FN31: locator, 41.50N 73.00W\n"), "{}", text);
        assert!(text.contains("  path: "), "{}", text);
        assert!(text.contains("long path"), "{}", text);
    }

    #[test]
    fn test_json() {
        let station = &stations(&["G4XYZ"], false)[0];
        let json = render_json(station).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "callsign");
        assert_eq!(value["lookup"]["country"]["name"], "England");
        assert_eq!(value["lookup"]["country"]["continent"], "EU");
        assert!(value.get("path").is_none());
    }
}
