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
use crate::comms::kinds::{Channel, Keyed};
use crate::comms::report::MonthlyBucket;
use crate::reports::aggregator::{
	send_rate, ReportIndex, Selection, Totals,
};
use crate::reports::table::Table;
use crate::util::format::{percent, Format};

/// Monthly campaign report for one channel: summary figures for the
/// selection, then a row per month.
pub struct CampaignReporter<'a> {
	channel: Channel,
	fmt: &'a Format,
}

impl<'a> CampaignReporter<'a> {
	pub fn new(channel: Channel, fmt: &'a Format) -> Self {
		Self { channel, fmt }
	}

	/// Calls report made/not made where the other channels say sent/not sent
	fn column_names(&self) -> (&'static str, &'static str) {
		match self.channel {
			Channel::Call => ("Made", "Not made"),
			Channel::Sms | Channel::Mail => ("Sent", "Not sent"),
		}
	}

	pub fn print(&self, index: &ReportIndex, selection: &Selection) {
		let buckets = index.select(selection);
		let period = match selection.month {
			Some(month) => format!("{} {}", month, selection.year),
			None => selection.year.to_string(),
		};

		println!("{} report: {}", self.channel.label(), period);

		if buckets.is_empty() {
			let years: Vec<String> = index
				.available_years()
				.iter()
				.map(|y| y.to_string())
				.collect();
			println!(
				"No data for {} (available: {})",
				period,
				years.join(", ")
			);
			return;
		}

		self.summary_table(&buckets).print();
		self.month_table(&buckets).print();
	}

	pub fn summary_table(&self, buckets: &[&MonthlyBucket]) -> Table {
		let totals = Totals::of(buckets.iter().copied());
		let f = &totals.figures;
		let (sent, not_sent) = self.column_names();

		let mut table = Table::new(3);
		table.right_align(vec![1, 2]);
		table.add_row(vec![
			"Needed".to_string(),
			self.fmt.number(f.needed),
			String::new(),
		]);
		table.add_row(vec![
			sent.to_string(),
			self.fmt.number(f.sent),
			percent(totals.send_rate()),
		]);
		table.add_row(vec![
			not_sent.to_string(),
			self.fmt.number(f.not_sent),
			percent(totals.not_sent_rate()),
		]);
		table.add_row(vec![
			"Successful".to_string(),
			self.fmt.number(f.successful),
			percent(totals.success_rate()),
		]);
		table.add_row(vec![
			"Unsuccessful".to_string(),
			self.fmt.number(f.unsuccessful),
			String::new(),
		]);
		table
	}

	pub fn month_table(&self, buckets: &[&MonthlyBucket]) -> Table {
		let (sent, not_sent) = self.column_names();

		let mut table = Table::new(8);
		table.add_header(vec![
			"Year",
			"Month",
			"Needed",
			sent,
			not_sent,
			"Successful",
			"Unsuccessful",
			"Rate",
		]);
		table.add_separator();
		table.right_align(vec![2, 3, 4, 5, 6, 7]);

		for b in buckets {
			let f = &b.figures;
			table.add_row(vec![
				b.year.to_string(),
				b.month.to_string(),
				self.fmt.number(f.needed),
				self.fmt.number(f.sent),
				self.fmt.number(f.not_sent),
				self.fmt.number(f.successful),
				self.fmt.number(f.unsuccessful),
				percent(send_rate(f)),
			]);
		}
		table
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::comms::kinds::Month;
	use crate::comms::report::Figures;
	use crate::config::config_file::Display;

	#[test]
	fn test_call_columns() {
		let fmt = Format::new(&Display::default()).unwrap();
		let reporter = CampaignReporter::new(Channel::Call, &fmt);
		let bucket = MonthlyBucket {
			month: Month::Yanvar,
			year: 2024,
			figures: Figures {
				needed: 1500,
				sent: 1200,
				not_sent: 300,
				successful: 450,
				unsuccessful: 750,
			},
		};

		let summary = reporter.summary_table(&[&bucket]).render();
		assert!(summary.contains("Made"));
		assert!(summary.contains("1 200"));
		assert!(summary.contains("80%"));
		assert!(summary.contains("38%"));

		let months = reporter.month_table(&[&bucket]).render();
		assert!(months.contains("Not made"));
		assert!(months.contains("Yanvar"));
	}
}
