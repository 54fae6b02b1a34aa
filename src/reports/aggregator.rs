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
use crate::comms::kinds::Month;
use crate::comms::report::{Figures, MonthlyBucket};
use crate::util::date::Date;
use std::collections::BTreeSet;

/// part as a whole-number percentage of whole, rounded half up. Zero when
/// whole is zero, whatever part is.
pub fn pct(part: u64, whole: u64) -> u32 {
	if whole == 0 {
		return 0;
	}
	let scaled = (part as u128 * 200 + whole as u128) / (whole as u128 * 2);
	u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Field-wise sum of a set of buckets, with the derived rates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
	pub figures: Figures,
}

impl Totals {
	/// Sums saturate at u64::MAX rather than wrap.
	pub fn of<'a>(buckets: impl IntoIterator<Item = &'a MonthlyBucket>) -> Self {
		let mut figures = Figures::default();
		for b in buckets {
			let f = &b.figures;
			figures.needed = figures.needed.saturating_add(f.needed);
			figures.sent = figures.sent.saturating_add(f.sent);
			figures.not_sent = figures.not_sent.saturating_add(f.not_sent);
			figures.successful = figures.successful.saturating_add(f.successful);
			figures.unsuccessful =
				figures.unsuccessful.saturating_add(f.unsuccessful);
		}
		Self { figures }
	}

	pub fn send_rate(&self) -> u32 {
		send_rate(&self.figures)
	}

	pub fn not_sent_rate(&self) -> u32 {
		pct(self.figures.not_sent, self.figures.needed)
	}

	pub fn success_rate(&self) -> u32 {
		pct(self.figures.successful, self.figures.sent)
	}
}

pub fn send_rate(figures: &Figures) -> u32 {
	pct(figures.sent, figures.needed)
}

/// A year and either one month or the whole year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
	pub year: u32,
	pub month: Option<Month>,
}

/// The monthly buckets of one channel, and the ways of picking from them.
pub struct ReportIndex<'a> {
	buckets: &'a [MonthlyBucket],
}

impl<'a> ReportIndex<'a> {
	pub fn new(buckets: &'a [MonthlyBucket]) -> Self {
		Self { buckets }
	}

	/// Distinct years, newest first
	pub fn available_years(&self) -> Vec<u32> {
		let years: BTreeSet<u32> = self.buckets.iter().map(|b| b.year).collect();
		years.into_iter().rev().collect()
	}

	/// Months present in the year, in calendar order
	pub fn available_months(&self, year: u32) -> Vec<Month> {
		let months: BTreeSet<Month> = self
			.buckets
			.iter()
			.filter(|b| b.year == year)
			.map(|b| b.month)
			.collect();
		months.into_iter().collect()
	}

	/// The bucket for today's month when there is one, otherwise the latest
	/// bucket. None when there are no buckets at all.
	pub fn default_selection(&self, today: &Date) -> Option<Selection> {
		let current = Month::from_number(today.month() as u32);
		if let Some(month) = current {
			if self.available_months(today.year()).contains(&month) {
				return Some(Selection {
					year: today.year(),
					month: Some(month),
				});
			}
		}

		self.buckets
			.iter()
			.map(|b| (b.year, b.month))
			.max()
			.map(|(year, month)| Selection {
				year,
				month: Some(month),
			})
	}

	/// Buckets matching the selection, ordered by month.
	pub fn select(&self, selection: &Selection) -> Vec<&'a MonthlyBucket> {
		let mut selected: Vec<&MonthlyBucket> = self
			.buckets
			.iter()
			.filter(|b| b.year == selection.year)
			.filter(|b| selection.month.map_or(true, |m| b.month == m))
			.collect();
		selected.sort_by_key(|b| b.month);
		selected
	}
}
