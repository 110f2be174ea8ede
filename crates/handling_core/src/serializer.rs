//! Handling file writer
//!
//! Records first, in parse order, then every opaque line in input order.
//! Floats are always written with two decimals, so untouched numbers are
//! normalized too (`1700.0` → `1700.00`).

use crate::schema::{FieldValue, Vehicle};
use std::fmt::Write;

/// Render one field the way the game expects it
pub fn format_field(field: FieldValue<'_>) -> String {
    match field {
        FieldValue::Text(s) => s.to_string(),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Float(v) => format!("{:.2}", v),
    }
}

/// One record line, without the newline
pub fn format_vehicle(vehicle: &Vehicle) -> String {
    let mut parts: Vec<String> = vehicle.fields().into_iter().map(format_field).collect();
    parts.extend(vehicle.tail().map(str::to_string));
    parts.join(" ")
}

/// Full output text: records, then opaque lines, each newline-terminated.
pub fn write_document(vehicles: &[Vehicle], opaque_lines: &[String]) -> String {
    let mut out = String::with_capacity(vehicles.len() * 200 + opaque_lines.len() * 80);

    for vehicle in vehicles {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", format_vehicle(vehicle));
    }
    for line in opaque_lines {
        let _ = writeln!(out, "{}", line);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_document, ParseMode};

    const CHEETAH: &str = "CHEETAH 1500.0 6.0 75.0 0.0 0.0 0.0 0.3 5 0.35 9.0 150.0 0.5 0.55 0.5 35.0 \
        1.1 0.9 0.85 0.15 0.5 1.5 0.1 0.15 0.25 -0.1 0.0 0.5 1.0 1.0 1.0 1.0 0.35 105000 \
        40002004 200000 1";

    #[test]
    fn test_format_field() {
        assert_eq!(format_field(FieldValue::Text("0x4000")), "0x4000");
        assert_eq!(format_field(FieldValue::Int(105000)), "105000");
        assert_eq!(format_field(FieldValue::Int(-3)), "-3");
        assert_eq!(format_field(FieldValue::Float(0.35)), "0.35");
        assert_eq!(format_field(FieldValue::Float(1500.0)), "1500.00");
        assert_eq!(format_field(FieldValue::Float(-0.1)), "-0.10");
        // Never scientific notation
        assert_eq!(format_field(FieldValue::Float(1.0e7)), "10000000.00");
        assert_eq!(format_field(FieldValue::Float(1.0e-7)), "0.00");
    }

    #[test]
    fn test_format_vehicle() {
        let doc = parse_document(CHEETAH, ParseMode::Permissive).unwrap();
        assert_eq!(
            format_vehicle(&doc.vehicles[0]),
            "CHEETAH 1500.00 6.00 75.00 0.00 0.00 0.00 0.30 5 0.35 9.00 150.00 0.50 0.55 0.50 \
             35.00 1.10 0.90 0.85 0.15 0.50 1.50 0.10 0.15 0.25 -0.10 0.00 0.50 1.00 1.00 1.00 \
             1.00 0.35 105000 40002004 200000 1"
        );
    }

    #[test]
    fn test_opaque_lines_go_last() {
        let content = format!("! BIKE 1\n{CHEETAH}\n% BOAT 2\n{}\n", CHEETAH.replacen("CHEETAH", "BANSHEE", 1));
        let doc = parse_document(&content, ParseMode::Permissive).unwrap();

        let out = write_document(&doc.vehicles, &doc.opaque_lines);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("CHEETAH "));
        assert!(lines[1].starts_with("BANSHEE "));
        assert_eq!(lines[2], "! BIKE 1");
        assert_eq!(lines[3], "% BOAT 2");
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(write_document(&[], &[]), "");
    }
}
