/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of eco-compare.
 *
 * eco-compare is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * eco-compare is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with eco-compare. If not, see <https://www.gnu.org/licenses/>.
 */


/// Rounds to the given number of decimal places.
pub fn round_float_to(float: f64, decimal_places: u32) -> f64 {
    let precision_base: u64 = 10;
    let precision_factor = precision_base.pow(decimal_places) as f64;
    (float * precision_factor).round() / precision_factor
}

/// Rounds to the nearest integer with ties going towards positive infinity.
///
/// `f64::round` sends -2.5 to -3.0 whereas the figures shown in the UI expect -2.0,
/// so anything that ends up as a displayed whole number goes through here.
pub fn round_half_up(val: f64) -> f64 {
    (val + 0.5).floor()
}

/// Rounds to `decimal_places` with ties going away from zero, so the value prints
/// the way a decimal reading of it would round.
pub fn round_half_away_to(val: f64, decimal_places: u32) -> f64 {
    let precision_factor = 10u64.pow(decimal_places) as f64;
    let magnitude = round_half_up(val.abs() * precision_factor) / precision_factor;
    if magnitude == 0.0 { 0.0 } else { magnitude.copysign(val) }
}

pub fn clamp_percentage(val: i64) -> u8 {
    val.clamp(0, 100) as u8
}

/// Share of `part` in `part + other` as a whole percentage, or `None` when the
/// sum gives nothing to divide by.
pub fn percentage_share(part: f64, other: f64) -> Option<u8> {
    let sum = part + other;
    if !(sum > 0.0) {
        return None;
    }
    Some(clamp_percentage(round_half_up(part / sum * 100.0) as i64))
}

pub fn is_valid_percentage(val: i32) -> bool {
    if val >= 0 && val <= 100 {
        return true;
    }
    false
}

/// Parses user input that must be empty or a finite, non-negative number.
/// Returns `Ok(None)` for empty input.
pub fn parse_non_negative(val: &str) -> Result<Option<f64>, String> {
    let trimmed = val.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        Ok(_) => Err(format!("'{}' must be zero or more", trimmed)),
        Err(_) => Err(format!("'{}' is not a number", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use crate::numeric::{clamp_percentage, is_valid_percentage, parse_non_negative, percentage_share, round_float_to, round_half_away_to, round_half_up};

    #[test]
    fn round_to_places_tests() {
        assert_eq!(round_float_to(4.6999999, 1), 4.7);
        assert_eq!(round_float_to(2.845, 0), 3.0);
        assert_eq!(round_float_to(0.0, 3), 0.0);
    }

    #[test]
    fn round_half_up_tests() {
        assert_eq!(round_half_up(14.0), 14.0);
        assert_eq!(round_half_up(14.5), 15.0);
        assert_eq!(round_half_up(14.49), 14.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
    }

    #[test]
    fn clamp_percentage_tests() {
        assert_eq!(clamp_percentage(-10), 0);
        assert_eq!(clamp_percentage(0), 0);
        assert_eq!(clamp_percentage(57), 57);
        assert_eq!(clamp_percentage(100), 100);
        assert_eq!(clamp_percentage(250), 100);
    }

    #[test]
    fn percentage_share_tests() {
        assert_eq!(percentage_share(0.0, 0.0), None);
        assert_eq!(percentage_share(1.0, 0.0), Some(100));
        assert_eq!(percentage_share(0.0, 3.0), Some(0));
        assert_eq!(percentage_share(1.0, 1.0), Some(50));
        assert_eq!(percentage_share(1.0, 2.0), Some(33));
        assert_eq!(percentage_share(2.0, 1.0), Some(67));
        assert_eq!(percentage_share(f64::NAN, 1.0), None);
    }

    #[test]
    fn valid_percentage_tests()  {
        assert_eq!(is_valid_percentage(-1), false);
        assert_eq!(is_valid_percentage(0), true);
        assert_eq!(is_valid_percentage(100), true);
        assert_eq!(is_valid_percentage(101), false);
    }

    #[test]
    fn parse_non_negative_tests() {
        assert_eq!(parse_non_negative(""), Ok(None));
        assert_eq!(parse_non_negative("  "), Ok(None));
        assert_eq!(parse_non_negative("42"), Ok(Some(42.0)));
        assert_eq!(parse_non_negative(" 12.5 "), Ok(Some(12.5)));
        assert!(parse_non_negative("-1").is_err());
        assert!(parse_non_negative("ten").is_err());
        assert!(parse_non_negative("inf").is_err());
    }

    #[test]
    fn half_away_rounding() {
        assert_eq!(round_half_away_to(0.25, 1), 0.3);
        assert_eq!(round_half_away_to(0.75, 1), 0.8);
        assert_eq!(round_half_away_to(-0.25, 1), -0.3);
        assert_eq!(round_half_away_to(4.6999999, 1), 4.7);
        assert_eq!(round_half_away_to(2.5, 0), 3.0);
        assert_eq!(round_half_away_to(-0.01, 1), 0.0);
        assert!(round_half_away_to(-0.01, 1).is_sign_positive());
    }
}
