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
use crate::comms::kinds::CommType;
use crate::util::date::Date;
use chrono::NaiveDateTime;

/// Inclusive calendar range. A timestamp is inside when its date is on or
/// after the start day (from 00:00:00) and on or before the end day (up to
/// 23:59:59.999). Missing bounds impose nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
	pub begin: Option<Date>,
	pub end: Option<Date>,
}

impl DateRange {
	pub fn new(begin: Option<Date>, end: Option<Date>) -> Self {
		Self { begin, end }
	}

	pub fn contains(&self, ts: &NaiveDateTime) -> bool {
		let day = Date::from_naive(ts.date());
		if let Some(begin) = &self.begin {
			if day < *begin {
				return false;
			}
		}
		if let Some(end) = &self.end {
			if day > *end {
				return false;
			}
		}
		true
	}

	pub fn is_open(&self) -> bool {
		self.begin.is_none() && self.end.is_none()
	}
}

/// What the user has narrowed a log view down to. None in a categorical
/// field means "all".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState<S> {
	pub query: String,
	pub status: Option<S>,
	pub comm_type: Option<CommType>,
	pub range: DateRange,
}

impl<S> Default for FilterState<S> {
	fn default() -> Self {
		Self {
			query: String::new(),
			status: None,
			comm_type: None,
			range: DateRange::default(),
		}
	}
}

impl<S> FilterState<S> {
	pub fn with_query(mut self, query: &str) -> Self {
		self.query = query.to_string();
		self
	}

	pub fn with_status(mut self, status: S) -> Self {
		self.status = Some(status);
		self
	}

	pub fn with_type(mut self, comm_type: CommType) -> Self {
		self.comm_type = Some(comm_type);
		self
	}

	pub fn with_range(mut self, range: DateRange) -> Self {
		self.range = range;
		self
	}
}
