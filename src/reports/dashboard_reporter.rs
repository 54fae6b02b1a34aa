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
use crate::reports::dashboard::{ChannelSet, Dashboard};
use crate::reports::table::Table;
use crate::util::format::Format;

pub struct DashboardReporter<'a> {
	fmt: &'a Format,
}

impl<'a> DashboardReporter<'a> {
	pub fn new(fmt: &'a Format) -> Self {
		Self { fmt }
	}

	pub fn print(&self, dashboard: &Dashboard) {
		if dashboard.rows.is_empty() {
			println!("No data");
			return;
		}
		self.table(dashboard).print();
	}

	/// One row per month, newest first, with a subtotal after each year and
	/// the overall total at the bottom.
	pub fn table(&self, dashboard: &Dashboard) -> Table {
		let mut table = Table::new(7);
		let mut header = vec!["Period"];
		header.extend(Channel::ALL.iter().map(|c| c.label()));
		header.extend(["Total", "Successful", "Unsuccessful"]);
		table.add_header(header);
		table.add_separator();
		table.right_align(vec![1, 2, 3, 4, 5, 6]);

		let numeric = vec![1, 2, 3, 4, 5, 6];
		let mut rows = dashboard.rows.iter().peekable();
		while let Some(row) = rows.next() {
			table.add_row(self.cells(
				format!("{} {}", row.month, row.year),
				&row.counts,
			));

			let year_ends = rows.peek().map_or(true, |next| next.year != row.year);
			if year_ends {
				if let Some(subtotal) = dashboard.year_totals.get(&row.year) {
					table.add_partial_separator(numeric.clone());
					table.add_row(self.cells(row.year.to_string(), subtotal));
				}
			}
		}

		table.add_separator();
		table.add_row(self.cells("Total".to_string(), &dashboard.overall));
		table
	}

	fn cells(&self, period: String, counts: &ChannelSet) -> Vec<String> {
		let combined = counts.combined();
		let mut cells = vec![period];
		for channel in Channel::ALL {
			cells.push(self.fmt.number(counts.get(*channel).total));
		}
		cells.push(self.fmt.number(combined.total));
		cells.push(self.fmt.number(combined.successful));
		cells.push(self.fmt.number(combined.unsuccessful));
		cells
	}
}
