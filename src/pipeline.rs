//! End-to-end runs: read a whole request document, answer it, write the
//! answers.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    adapters::{json::JsonAdapter, text::read_text_input},
    catalogue::TransportCatalogue,
    request_handler::RequestHandler,
    requests::InputDocument,
};

pub fn run_json<R: BufRead, W: Write>(reader: R, mut writer: W, pretty: bool) -> Result<()> {
    let document: InputDocument =
        serde_json::from_reader(reader).context("parsing JSON request document")?;
    info!(
        base_requests = document.base_requests.len(),
        stat_requests = document.stat_requests.len(),
        routing = document.routing_settings.is_some(),
        "Read request document"
    );

    let catalogue = TransportCatalogue::from_adapter(&JsonAdapter::new(&document.base_requests))?;
    let handler = RequestHandler::new(&catalogue, document.routing_settings)?;
    let answers = handler.answer_json(&document.stat_requests)?;

    if pretty {
        serde_json::to_writer_pretty(&mut writer, &answers)?;
    } else {
        serde_json::to_writer(&mut writer, &answers)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn run_text<R: BufRead, W: Write>(reader: R, mut writer: W) -> Result<()> {
    let input = read_text_input(reader)?;
    info!(queries = input.queries.len(), "Read text input");

    let catalogue = TransportCatalogue::from_adapter(&input.adapter)?;
    let handler = RequestHandler::new(&catalogue, None)?;
    for query in &input.queries {
        writeln!(writer, "{}", handler.answer_text(query))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_compact_output_is_one_line() {
        let input = r#"{
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0},
                {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 0.01,
                 "road_distances": {"A": 1000}},
                {"type": "Bus", "name": "7", "stops": ["A", "B"], "is_roundtrip": false}
            ],
            "stat_requests": [
                {"id": 1, "type": "Stop", "name": "A"}
            ]
        }"#;

        let mut out = Vec::new();
        run_json(input.as_bytes(), &mut out, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[{\"buses\":[\"7\"],\"request_id\":1}]\n"
        );
    }

    #[test]
    fn json_unknown_stop_in_bus_fails() {
        let input = r#"{
            "base_requests": [
                {"type": "Bus", "name": "7", "stops": ["A"], "is_roundtrip": false}
            ]
        }"#;
        assert!(run_json(input.as_bytes(), Vec::new(), false).is_err());
    }

    #[test]
    fn text_answers_each_query() {
        let input = "\
3
Stop A: 0.0, 0.0, 1000m to B
Stop B: 0.0, 0.01
Bus 7: A - B
3
Bus 7
Stop B
Bus 8
";
        let mut out = Vec::new();
        run_text(input.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Bus 7: 3 stops on route, 2 unique stops, 2000 route length, "));
        assert_eq!(lines[1], "Stop B: buses 7");
        assert_eq!(lines[2], "Bus 8: not found");
    }
}
