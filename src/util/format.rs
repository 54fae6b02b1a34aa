/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::config::config_file::Display;
use crate::util::date::Date;
use anyhow::{bail, Error};
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Placeholder printed wherever an optional value is absent.
pub const PLACEHOLDER: &str = "-";

/// Presentation rules shared by every reporter. Built once from the display
/// section of the config; all methods are pure.
pub struct Format {
	currency: String,
	group_separator: String,
	month_names: Vec<String>,
}

impl Format {
	pub fn new(display: &Display) -> Result<Self, Error> {
		if display.month_names.len() != 12 {
			bail!(
				"display.month_names must list 12 months, found {}",
				display.month_names.len()
			);
		}

		Ok(Self {
			currency: display.currency.clone(),
			group_separator: display.group_separator.clone(),
			month_names: display.month_names.clone(),
		})
	}

	/// Groups digits in threes, e.g. 3000000 -> "3 000 000".
	pub fn number(&self, n: u64) -> String {
		let digits = n.to_string();
		let mut out = String::with_capacity(digits.len() * 2);
		for (i, c) in digits.chars().enumerate() {
			if i > 0 && (digits.len() - i) % 3 == 0 {
				out.push_str(&self.group_separator);
			}
			out.push(c);
		}
		out
	}

	/// Whole amount with grouping and the currency suffix. No decimals are
	/// ever shown.
	pub fn currency(&self, amount: u64) -> String {
		format!("{} {}", self.number(amount), self.currency)
	}

	pub fn optional_currency(&self, amount: Option<u64>) -> String {
		match amount {
			Some(a) => self.currency(a),
			None => PLACEHOLDER.to_string(),
		}
	}

	pub fn date(&self, date: &Date) -> String {
		format!(
			"{} {} {}",
			date.day(),
			self.month_name(date.month() as u32),
			date.year()
		)
	}

	pub fn datetime(&self, ts: &NaiveDateTime) -> String {
		format!(
			"{} {} {}, {:02}:{:02}",
			ts.day(),
			self.month_name(ts.month()),
			ts.year(),
			ts.hour(),
			ts.minute()
		)
	}

	pub fn optional_datetime(&self, ts: Option<&NaiveDateTime>) -> String {
		match ts {
			Some(ts) => self.datetime(ts),
			None => PLACEHOLDER.to_string(),
		}
	}

	fn month_name(&self, month: u32) -> &str {
		// month is 1-based and always in range for validated dates
		self.month_names
			.get(month.saturating_sub(1) as usize)
			.map(|s| s.as_str())
			.unwrap_or(PLACEHOLDER)
	}
}

/// Seconds as M:SS. Zero and absent durations both print the placeholder.
pub fn duration(seconds: Option<u32>) -> String {
	match seconds {
		None | Some(0) => PLACEHOLDER.to_string(),
		Some(s) => format!("{}:{:02}", s / 60, s % 60),
	}
}

pub fn percent(rate: u32) -> String {
	format!("{}%", rate)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fmt() -> Format {
		Format::new(&Display::default()).unwrap()
	}

	#[test]
	fn test_number_grouping() {
		let f = fmt();
		assert_eq!(f.number(0), "0");
		assert_eq!(f.number(999), "999");
		assert_eq!(f.number(1000), "1 000");
		assert_eq!(f.number(250000), "250 000");
		assert_eq!(f.number(10000000), "10 000 000");
	}

	#[test]
	fn test_currency() {
		let f = fmt();
		assert_eq!(f.currency(3000000), "3 000 000 so'm");
		assert_eq!(f.optional_currency(None), "-");
	}

	#[test]
	fn test_custom_display() {
		let display = Display {
			currency: "UZS".to_string(),
			group_separator: ",".to_string(),
			..Default::default()
		};
		let f = Format::new(&display).unwrap();
		assert_eq!(f.currency(1234567), "1,234,567 UZS");
	}

	#[test]
	fn test_rejects_short_month_list() {
		let display = Display {
			month_names: vec!["a".to_string()],
			..Default::default()
		};
		assert!(Format::new(&display).is_err());
	}

	#[test]
	fn test_dates() {
		let f = fmt();
		let d = Date::from_str("2024-02-15").unwrap();
		assert_eq!(f.date(&d), "15 fev 2024");

		let ts = NaiveDateTime::parse_from_str(
			"2024-01-20T10:05:00",
			"%Y-%m-%dT%H:%M:%S",
		)
		.unwrap();
		assert_eq!(f.datetime(&ts), "20 yan 2024, 10:05");
		assert_eq!(f.optional_datetime(None), "-");
	}

	#[test]
	fn test_duration() {
		assert_eq!(duration(None), "-");
		assert_eq!(duration(Some(0)), "-");
		assert_eq!(duration(Some(5)), "0:05");
		assert_eq!(duration(Some(45)), "0:45");
		assert_eq!(duration(Some(125)), "2:05");
		assert_eq!(duration(Some(600)), "10:00");
	}
}
