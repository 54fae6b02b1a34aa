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
use anyhow::{bail, Error};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A calendar date with no time component, as used for due dates, payment
/// dates and the bounds of a filter's date range.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(NaiveDate);

impl Date {
	/// Constructor to parse a string in the "YYYY-mm-dd" format
	pub fn from_str(date_str: &str) -> Result<Date, Error> {
		let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
			bail!("Date must be a valid YYYY-MM-DD: {}", date_str);
		};
		if date.year() < 1 {
			bail!("Invalid date: {}", date_str);
		}

		Ok(Date(date))
	}

	pub fn from_naive(date: NaiveDate) -> Date {
		Date(date)
	}

	pub fn today() -> Date {
		Date(Local::now().date_naive())
	}

	pub fn year(&self) -> u32 {
		self.0.year().max(0) as u32
	}

	pub fn month(&self) -> u8 {
		self.0.month() as u8
	}

	pub fn day(&self) -> u8 {
		self.0.day() as u8
	}

	/// Whole days from earlier to this date; negative when earlier is later.
	pub fn days_since(&self, earlier: &Date) -> i64 {
		(self.0 - earlier.0).num_days()
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.format("%Y-%m-%d"))
	}
}

impl<'de> Deserialize<'de> for Date {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Date::from_str(&s).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_days_since() {
		let a = Date::from_str("2024-01-15").unwrap();
		let b = Date::from_str("2024-02-15").unwrap();
		assert_eq!(b.days_since(&a), 31);
		assert_eq!(a.days_since(&b), -31);
		assert_eq!(a.days_since(&a), 0);
	}

	#[test]
	fn test_leap_year() {
		let a = Date::from_str("2024-02-28").unwrap();
		let b = Date::from_str("2024-03-01").unwrap();
		assert_eq!(b.days_since(&a), 2);

		let c = Date::from_str("2023-02-28").unwrap();
		let d = Date::from_str("2023-03-01").unwrap();
		assert_eq!(d.days_since(&c), 1);
	}

	#[test]
	fn test_ordering() {
		let a = Date::from_str("2024-11-15").unwrap();
		let b = Date::from_str("2025-01-02").unwrap();
		assert!(a < b);
		assert_eq!((a.year(), a.month(), a.day()), (2024, 11, 15));
	}

	#[test]
	fn test_rejects_malformed() {
		assert!(Date::from_str("2024-02-30").is_err());
		assert!(Date::from_str("2024-13-01").is_err());
		assert!(Date::from_str("0000-01-01").is_err());
		assert!(Date::from_str("20240101").is_err());
		assert!(Date::from_str("2024-1x-01").is_err());
	}

	#[test]
	fn test_from_naive_matches_parse() {
		let naive = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
		assert_eq!(
			Date::from_naive(naive),
			Date::from_str("2024-03-09").unwrap()
		);
	}

	#[test]
	fn test_deserialize() {
		let d: Date = serde_json::from_str("\"2024-02-15\"").unwrap();
		assert_eq!(d.to_string(), "2024-02-15");
		assert!(serde_json::from_str::<Date>("\"15.02.2024\"").is_err());
	}
}
