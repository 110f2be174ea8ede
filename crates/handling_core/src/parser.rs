//! Handling file parser
//!
//! Text → classified lines → `Vec<Vehicle>` + opaque lines.
//!
//! Parsing is permissive by default: a candidate line with too few tokens is
//! skipped, and a numeric token that does not parse becomes zero. Both cases
//! are logged and counted in [`ParseStats`] but never abort the file.
//! [`ParseMode::Strict`] turns either case into a [`HandlingError::MalformedRecord`].

use crate::classify::{classify, LineKind};
use crate::error::{HandlingError, Result};
use crate::schema::{position, Vehicle, FIELD_COUNT, FIELD_NAMES, REQUIRED_TOKENS};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Skip short lines, substitute zero for bad numbers
    #[default]
    Permissive,
    /// Fail on the first short line or bad number
    Strict,
}

/// Line and field counters for one parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub total_lines: u32,
    /// Blank and comment lines
    pub empty_lines: u32,
    pub opaque_lines: u32,
    pub parsed: u32,
    /// Candidate lines dropped for having fewer than 36 tokens
    pub skipped_short: u32,
    /// Numeric fields that failed to parse and were set to zero
    pub defaulted_fields: u32,
}

/// Result of parsing one loaded file.
///
/// Owns the opaque lines, so every parse starts from an empty accumulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub vehicles: Vec<Vehicle>,
    pub opaque_lines: Vec<String>,
    pub stats: ParseStats,
}

/// Parse a whole handling file.
pub fn parse_document(content: &str, mode: ParseMode) -> Result<ParsedDocument> {
    let mut doc = ParsedDocument::default();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        doc.stats.total_lines += 1;

        match classify(line) {
            LineKind::Empty => {
                doc.stats.empty_lines += 1;
            }
            LineKind::Opaque => {
                doc.stats.opaque_lines += 1;
                doc.opaque_lines.push(line.to_string());
            }
            LineKind::Candidate => {
                if let Some(vehicle) = parse_vehicle_line(line, line_no, mode, &mut doc.stats)? {
                    doc.vehicles.push(vehicle);
                    doc.stats.parsed += 1;
                }
            }
        }
    }

    log::debug!(
        "Parsed {} vehicles, {} opaque lines ({} short lines skipped, {} fields defaulted)",
        doc.stats.parsed,
        doc.stats.opaque_lines,
        doc.stats.skipped_short,
        doc.stats.defaulted_fields
    );

    Ok(doc)
}

/// Parse a single candidate line.
///
/// Returns `Ok(None)` when the line is too short and `mode` is permissive.
pub fn parse_vehicle_line(
    line: &str,
    line_no: usize,
    mode: ParseMode,
    stats: &mut ParseStats,
) -> Result<Option<Vehicle>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() < REQUIRED_TOKENS {
        if mode == ParseMode::Strict {
            return Err(HandlingError::MalformedRecord {
                line: line_no,
                reason: format!(
                    "{} fields (expected at least {})",
                    tokens.len(),
                    REQUIRED_TOKENS
                ),
            });
        }
        stats.skipped_short += 1;
        log::warn!(
            "Line {} has {} fields (expected at least {}), skipping",
            line_no,
            tokens.len(),
            REQUIRED_TOKENS
        );
        return Ok(None);
    }

    let mut reader = FieldReader {
        tokens: &tokens,
        line_no,
        mode,
        defaulted: 0,
    };

    let vehicle = Vehicle {
        name: reader.text(position::NAME),
        mass: reader.float(1)?,
        drag_mult: reader.float(position::DRAG_MULT)?,
        percent_submerged: reader.float(3)?,
        centre_of_mass: [reader.float(4)?, reader.float(5)?, reader.float(6)?],
        drive_bias: reader.float(7)?,
        drive_gears: reader.int(position::DRIVE_GEARS)?,
        drive_force: reader.float(position::DRIVE_FORCE)?,
        drive_inertia: reader.float(10)?,
        max_velocity: reader.float(position::MAX_VELOCITY)?,
        brake_force: reader.float(position::BRAKE_FORCE)?,
        brake_bias: reader.float(13)?,
        brake_aux: reader.float(14)?,
        steering_lock: reader.float(15)?,
        traction_curve_max: reader.float(16)?,
        traction_curve_min: reader.float(position::TRACTION_CURVE_MIN)?,
        traction_curve_lateral: reader.float(18)?,
        traction_spring_delta_max: reader.float(19)?,
        traction_bias: reader.float(20)?,
        suspension_force: reader.float(21)?,
        suspension_comp_damp: reader.float(22)?,
        suspension_rebound_damp: reader.float(23)?,
        suspension_upper_limit: reader.float(24)?,
        suspension_lower_limit: reader.float(25)?,
        suspension_raise: reader.float(26)?,
        suspension_bias: reader.float(27)?,
        collision_damage_mult: reader.float(28)?,
        weapon_damage_mult: reader.float(29)?,
        deformation_damage_mult: reader.float(30)?,
        engine_damage_mult: reader.float(31)?,
        seat_offset_dist: reader.float(32)?,
        monetary_value: reader.int(position::MONETARY_VALUE)?,
        model_flags: reader.text(position::MODEL_FLAGS),
        handling_flags: reader.text(position::HANDLING_FLAGS),
        anim_group: tokens.get(position::ANIM_GROUP).map(|t| t.to_string()),
        trailing: tokens
            .get(FIELD_COUNT..)
            .unwrap_or_default()
            .iter()
            .map(|t| t.to_string())
            .collect(),
    };

    stats.defaulted_fields += reader.defaulted;
    Ok(Some(vehicle))
}

/// Positional token access with the zero-substitution policy applied.
struct FieldReader<'a, 'b> {
    tokens: &'b [&'a str],
    line_no: usize,
    mode: ParseMode,
    defaulted: u32,
}

impl FieldReader<'_, '_> {
    fn text(&self, idx: usize) -> String {
        self.tokens[idx].to_string()
    }

    fn float(&mut self, idx: usize) -> Result<f64> {
        match self.tokens[idx].parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => self.fallback(idx),
        }
    }

    fn int<T: FromStr + Default>(&mut self, idx: usize) -> Result<T> {
        match self.tokens[idx].parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => self.fallback(idx),
        }
    }

    fn fallback<T: Default>(&mut self, idx: usize) -> Result<T> {
        let name = FIELD_NAMES[idx];
        let token = self.tokens[idx];
        if self.mode == ParseMode::Strict {
            return Err(HandlingError::MalformedRecord {
                line: self.line_no,
                reason: format!("invalid {} value '{}'", name, token),
            });
        }
        self.defaulted += 1;
        log::debug!(
            "Line {} - Invalid {} value: '{}', using 0",
            self.line_no,
            name,
            token
        );
        Ok(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHEETAH: &str = "CHEETAH 1500.0 6.0 75.0 0.0 0.0 0.0 0.3 5 0.35 9.0 150.0 0.5 0.55 0.5 35.0 \
        1.1 0.9 0.85 0.15 0.5 1.5 0.1 0.15 0.25 -0.1 0.0 0.5 1.0 1.0 1.0 1.0 0.35 105000 \
        40002004 200000 1";

    #[test]
    fn test_parse_full_line() {
        let mut stats = ParseStats::default();
        let vehicle = parse_vehicle_line(CHEETAH, 1, ParseMode::Permissive, &mut stats)
            .unwrap()
            .unwrap();

        assert_eq!(vehicle.name, "CHEETAH");
        assert_eq!(vehicle.mass, 1500.0);
        assert_eq!(vehicle.drag_mult, 6.0);
        assert_eq!(vehicle.drive_gears, 5);
        assert_eq!(vehicle.drive_force, 0.35);
        assert_eq!(vehicle.max_velocity, 150.0);
        assert_eq!(vehicle.brake_force, 0.5);
        assert_eq!(vehicle.brake_aux, 0.5);
        assert_eq!(vehicle.traction_curve_min, 0.9);
        assert_eq!(vehicle.suspension_lower_limit, -0.1);
        assert_eq!(vehicle.monetary_value, 105000);
        assert_eq!(vehicle.model_flags, "40002004");
        assert_eq!(vehicle.handling_flags, "200000");
        assert_eq!(vehicle.anim_group.as_deref(), Some("1"));
        assert!(vehicle.trailing.is_empty());
        assert_eq!(stats.defaulted_fields, 0);
    }

    #[test]
    fn test_short_line_is_skipped() {
        let short: Vec<&str> = CHEETAH.split_whitespace().take(35).collect();
        let line = short.join(" ");
        let mut stats = ParseStats::default();

        let result = parse_vehicle_line(&line, 7, ParseMode::Permissive, &mut stats).unwrap();
        assert!(result.is_none());
        assert_eq!(stats.skipped_short, 1);
    }

    #[test]
    fn test_36_tokens_has_no_anim_group() {
        let tokens: Vec<&str> = CHEETAH.split_whitespace().take(36).collect();
        let mut stats = ParseStats::default();

        let vehicle = parse_vehicle_line(&tokens.join(" "), 1, ParseMode::Permissive, &mut stats)
            .unwrap()
            .unwrap();
        assert_eq!(vehicle.handling_flags, "200000");
        assert!(vehicle.anim_group.is_none());
    }

    #[test]
    fn test_trailing_tokens_are_kept() {
        let line = format!("{} 4 FOO", CHEETAH);
        let mut stats = ParseStats::default();
        let vehicle = parse_vehicle_line(&line, 1, ParseMode::Permissive, &mut stats)
            .unwrap()
            .unwrap();
        assert_eq!(vehicle.trailing, vec!["4".to_string(), "FOO".to_string()]);
    }

    #[test]
    fn test_bad_numbers_default_to_zero() {
        let line = CHEETAH
            .replacen("1500.0", "heavy", 1)
            .replacen(" 5 ", " 5.0 ", 1)
            .replacen("105000", "nan", 1);
        let mut stats = ParseStats::default();

        let vehicle = parse_vehicle_line(&line, 1, ParseMode::Permissive, &mut stats)
            .unwrap()
            .unwrap();
        assert_eq!(vehicle.mass, 0.0);
        // Integer fields reject fractional text
        assert_eq!(vehicle.drive_gears, 0);
        assert_eq!(vehicle.monetary_value, 0);
        assert_eq!(stats.defaulted_fields, 3);
    }

    #[test]
    fn test_non_finite_float_defaults_to_zero() {
        let line = CHEETAH.replacen("150.0", "inf", 1);
        let mut stats = ParseStats::default();
        let vehicle = parse_vehicle_line(&line, 1, ParseMode::Permissive, &mut stats)
            .unwrap()
            .unwrap();
        assert_eq!(vehicle.max_velocity, 0.0);
        assert!(vehicle.is_finite());
    }

    #[test]
    fn test_strict_mode_reports_field() {
        let line = CHEETAH.replacen("0.35", "fast", 1);
        let mut stats = ParseStats::default();

        let err = parse_vehicle_line(&line, 12, ParseMode::Strict, &mut stats).unwrap_err();
        match err {
            HandlingError::MalformedRecord { line, reason } => {
                assert_eq!(line, 12);
                assert!(reason.contains("drive_force"), "reason was: {}", reason);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_document_buckets_lines() {
        let content = format!(
            "; header comment\n\n{CHEETAH}\n% PREDATOR 0.79\nBROKEN 1 2 3\n  ! PIZZABOY 0 0  \n{}\n",
            CHEETAH.replacen("CHEETAH", "INFERNUS", 1)
        );

        let doc = parse_document(&content, ParseMode::Permissive).unwrap();
        assert_eq!(doc.vehicles.len(), 2);
        assert_eq!(doc.vehicles[0].name, "CHEETAH");
        assert_eq!(doc.vehicles[1].name, "INFERNUS");
        assert_eq!(doc.opaque_lines, vec!["% PREDATOR 0.79", "! PIZZABOY 0 0"]);
        assert_eq!(
            doc.stats,
            ParseStats {
                total_lines: 7,
                empty_lines: 2,
                opaque_lines: 2,
                parsed: 2,
                skipped_short: 1,
                defaulted_fields: 0,
            }
        );
    }

    #[test]
    fn test_crlf_input() {
        let content = format!("# c\r\n{CHEETAH}\r\n$ DODO 1\r\n");
        let doc = parse_document(&content, ParseMode::Permissive).unwrap();
        assert_eq!(doc.vehicles.len(), 1);
        assert_eq!(doc.vehicles[0].anim_group.as_deref(), Some("1"));
        assert_eq!(doc.opaque_lines, vec!["$ DODO 1"]);
    }
}
