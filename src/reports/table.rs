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
/// Plain-text table for the log, report and dashboard screens. Every row is
/// a single line; column widths fit the widest cell.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
	PartialSeparator(Vec<bool>), // indicates columns by index
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	pub fn add_row(&mut self, row: Vec<String>) {
		self.rows.push(Row::Data(row));
	}

	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Adds a separator drawn under the selected columns only.
	pub fn add_partial_separator(&mut self, indices: Vec<usize>) {
		let mut cols = vec![false; self.column_count];
		for i in indices {
			if i < self.column_count {
				cols[i] = true;
			}
		}
		self.rows.push(Row::PartialSeparator(cols));
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			if col < self.column_count {
				self.right_align[col] = true;
			}
		}
	}

	pub fn print(&self) {
		println!();
		print!("{}", self.render());
	}

	pub fn render(&self) -> String {
		let mut max_widths = vec![0; self.column_count];

		for row in &self.rows {
			if let Row::Data(cells) | Row::Header(cells) = row {
				for (i, value) in cells.iter().enumerate().take(self.column_count)
				{
					max_widths[i] = max_widths[i].max(width(value));
				}
			}
		}

		let mut out = String::new();
		for row in &self.rows {
			let line = match row {
				Row::Header(cells) => self.centered_row(&max_widths, cells),
				Row::Data(cells) => self.data_row(&max_widths, cells),
				Row::Separator => self.separator(&max_widths),
				Row::PartialSeparator(cols) => {
					self.partial_separator(&max_widths, cols)
				},
			};
			out.push_str(line.trim_end());
			out.push('\n');
		}
		out
	}

	fn data_row(&self, max_widths: &[usize], cells: &[String]) -> String {
		let padded: Vec<String> = cells
			.iter()
			.take(self.column_count)
			.enumerate()
			.map(|(i, value)| {
				let pad = " ".repeat(max_widths[i] - width(value));
				if self.right_align[i] {
					format!("{}{}", pad, value)
				} else {
					format!("{}{}", value, pad)
				}
			})
			.collect();
		padded.join("   ")
	}

	fn centered_row(&self, max_widths: &[usize], cells: &[String]) -> String {
		let padded: Vec<String> = cells
			.iter()
			.take(self.column_count)
			.enumerate()
			.map(|(i, value)| Table::center_align(value, max_widths[i]))
			.collect();
		padded.join(" | ")
	}

	fn separator(&self, max_widths: &[usize]) -> String {
		let total_width: usize = max_widths.iter().sum::<usize>()
			+ (3 * self.column_count.saturating_sub(1));
		"-".repeat(total_width)
	}

	fn partial_separator(&self, max_widths: &[usize], cols: &[bool]) -> String {
		let parts: Vec<String> = cols
			.iter()
			.enumerate()
			.map(|(i, draw)| {
				let c = if *draw { "-" } else { " " };
				c.repeat(max_widths[i])
			})
			.collect();
		parts.join("   ")
	}

	fn center_align(value: &str, width_: usize) -> String {
		let len = width(value);
		if len >= width_ {
			return value.to_string();
		}
		let total_padding = width_ - len;
		let left_padding = total_padding / 2;
		let right_padding = total_padding - left_padding;

		format!(
			"{}{}{}",
			" ".repeat(left_padding),
			value,
			" ".repeat(right_padding)
		)
	}
}

/// Display width in characters; labels are not all ASCII.
fn width(s: &str) -> usize {
	s.chars().count()
}
