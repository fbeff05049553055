use approx::assert_relative_eq;
use serde_json::{Value, json};

use transport_catalogue::pipeline::{run_json, run_text};

const RING_DOCUMENT: &str = r#"{
    "base_requests": [
        {
            "type": "Bus",
            "name": "1",
            "stops": ["A", "B", "C", "A"],
            "is_roundtrip": true
        },
        {
            "type": "Stop",
            "name": "A",
            "latitude": 0.0,
            "longitude": 0.0,
            "road_distances": {"B": 1000}
        },
        {
            "type": "Stop",
            "name": "B",
            "latitude": 0.0,
            "longitude": 1.0,
            "road_distances": {"C": 1000}
        },
        {
            "type": "Stop",
            "name": "C",
            "latitude": 0.0,
            "longitude": 2.0,
            "road_distances": {"A": 1000}
        }
    ],
    "routing_settings": {"bus_wait_time": 2, "bus_velocity": 36},
    "stat_requests": [
        {"id": 1, "type": "Bus", "name": "1"},
        {"id": 2, "type": "Stop", "name": "B"},
        {"id": 3, "type": "Route", "from": "A", "to": "C"},
        {"id": 4, "type": "Stop", "name": "Nowhere"},
        {"id": 5, "type": "Bus", "name": "2"},
        {"id": 6, "type": "Route", "from": "A", "to": "Nowhere"},
        {"id": 7, "type": "Map"},
        {"id": 8, "type": "Route", "from": "B", "to": "B"}
    ]
}"#;

fn answers(document: &str, pretty: bool) -> Vec<Value> {
    let mut out = Vec::new();
    run_json(document.as_bytes(), &mut out, pretty).unwrap();
    let value: Value = serde_json::from_slice(&out).unwrap();
    value.as_array().unwrap().clone()
}

#[test]
fn ring_bus_document() {
    let answers = answers(RING_DOCUMENT, false);
    // the Map request gets no answer
    assert_eq!(answers.len(), 7);

    let bus = &answers[0];
    assert_eq!(bus["request_id"], 1);
    assert_eq!(bus["stop_count"], 4);
    assert_eq!(bus["unique_stop_count"], 3);
    assert_eq!(bus["route_length"], 3000);
    // roughly 111 km per degree against 3 km of road
    let curvature = bus["curvature"].as_f64().unwrap();
    assert!(curvature > 0.0 && curvature < 0.02, "{curvature}");

    assert_eq!(answers[1], json!({"request_id": 2, "buses": ["1"]}));

    let route = &answers[2];
    assert_eq!(route["request_id"], 3);
    assert_relative_eq!(route["total_time"].as_f64().unwrap(), 2.0 + 2000.0 / 600.0, epsilon = 1e-9);
    let items = route["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], json!({"type": "Wait", "stop_name": "A", "time": 2.0}));
    assert_eq!(items[1]["type"], "Bus");
    assert_eq!(items[1]["bus"], "1");
    assert_eq!(items[1]["span_count"], 2);
    assert_relative_eq!(items[1]["time"].as_f64().unwrap(), 2000.0 / 600.0, epsilon = 1e-9);

    for (answer, id) in answers[3..6].iter().zip([4, 5, 6]) {
        assert_eq!(answer, &json!({"request_id": id, "error_message": "not found"}));
    }

    assert_eq!(
        answers[6],
        json!({"request_id": 8, "total_time": 0.0, "items": []})
    );
}

#[test]
fn pretty_output_parses_to_the_same_answers() {
    assert_eq!(answers(RING_DOCUMENT, true), answers(RING_DOCUMENT, false));
}

#[test]
fn route_request_needs_routing_settings() {
    let document = r#"{
        "base_requests": [
            {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0}
        ],
        "stat_requests": [
            {"id": 1, "type": "Route", "from": "A", "to": "A"}
        ]
    }"#;
    assert!(run_json(document.as_bytes(), Vec::new(), false).is_err());
}

#[test]
fn unclosed_ring_is_rejected() {
    let document = r#"{
        "base_requests": [
            {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0},
            {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 1.0},
            {"type": "Bus", "name": "1", "stops": ["A", "B"], "is_roundtrip": true}
        ]
    }"#;
    assert!(run_json(document.as_bytes(), Vec::new(), false).is_err());
}

#[test]
fn text_document() {
    let input = "\
11
Stop Tolstopaltsevo: 55.611087, 37.208290, 3900m to Marushkino
Stop Marushkino: 55.595884, 37.209755, 9900m to Rasskazovka
Bus 256: Biryulyovo Zapadnoye > Biryusinka > Universam > Biryulyovo Tovarnaya > Biryulyovo Passazhirskaya > Biryulyovo Zapadnoye
Bus 750: Tolstopaltsevo - Marushkino - Rasskazovka
Stop Rasskazovka: 55.632761, 37.333324
Stop Biryulyovo Zapadnoye: 55.574371, 37.651700, 1800m to Biryusinka, 2400m to Universam
Stop Biryusinka: 55.581065, 37.648390, 750m to Universam
Stop Universam: 55.587655, 37.645687, 900m to Biryulyovo Tovarnaya
Stop Biryulyovo Tovarnaya: 55.592028, 37.653656, 1300m to Biryulyovo Passazhirskaya
Stop Biryulyovo Passazhirskaya: 55.580999, 37.659164, 1200m to Biryulyovo Zapadnoye
Stop Prazhskaya: 55.611678, 37.603831
6
Bus 256
Bus 750
Bus 751
Stop Samara
Stop Prazhskaya
Stop Biryulyovo Zapadnoye
";

    let mut out = Vec::new();
    run_text(input.as_bytes(), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    let lines: Vec<_> = out.lines().collect();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("Bus 256: 6 stops on route, 5 unique stops, 5950 route length, "));
    // return legs fall back to the reverse declarations
    assert!(lines[1].starts_with("Bus 750: 5 stops on route, 3 unique stops, 27600 route length, "));
    assert_eq!(lines[2], "Bus 751: not found");
    assert_eq!(lines[3], "Stop Samara: not found");
    assert_eq!(lines[4], "Stop Prazhskaya: no buses");
    assert_eq!(lines[5], "Stop Biryulyovo Zapadnoye: buses 256");
}
