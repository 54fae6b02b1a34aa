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
use crate::comms::call::Call;
use crate::comms::debtor::Debtor;
use crate::comms::kinds::Keyed;
use crate::comms::mail::Mail;
use crate::comms::sms::Sms;
use crate::reports::table::Table;
use crate::reports::view::LogView;
use crate::util::format::{duration, Format, PLACEHOLDER};

/// Prints the filtered log screens: one table per channel, and the debtor
/// list. Each table is followed by the "Showing X of Y" line.
pub struct LogReporter<'a> {
	fmt: &'a Format,
}

impl<'a> LogReporter<'a> {
	pub fn new(fmt: &'a Format) -> Self {
		Self { fmt }
	}

	pub fn print_sms(&self, view: &LogView<Sms>) {
		self.sms_table(view).print();
		println!("\n{}", view.summary());
	}

	pub fn print_calls(&self, view: &LogView<Call>) {
		self.call_table(view).print();
		println!("\n{}", view.summary());
	}

	pub fn print_mail(&self, view: &LogView<Mail>) {
		self.mail_table(view).print();
		println!("\n{}", view.summary());
	}

	pub fn print_debtors(&self, view: &LogView<Debtor>) {
		self.debtor_table(view).print();
		println!("\n{}", view.summary());
	}

	pub fn sms_table(&self, view: &LogView<Sms>) -> Table {
		let mut table = Table::new(8);
		table.add_header(vec![
			"ID", "Recipient", "Phone", "Type", "Status", "Sent", "Delivered",
			"Amount",
		]);
		table.add_separator();
		table.right_align(vec![7]);

		for s in &view.rows {
			table.add_row(vec![
				s.id.clone(),
				s.recipient_name.clone(),
				s.recipient_phone.clone(),
				s.typ.label().to_string(),
				s.status.label().to_string(),
				self.fmt.datetime(&s.sent_date),
				self.fmt.optional_datetime(s.delivered_date.as_ref()),
				self.fmt.optional_currency(s.amount),
			]);
		}
		table
	}

	pub fn call_table(&self, view: &LogView<Call>) -> Table {
		let mut table = Table::new(8);
		table.add_header(vec![
			"ID", "Recipient", "Phone", "Type", "Status", "Called", "Duration",
			"Amount",
		]);
		table.add_separator();
		table.right_align(vec![6, 7]);

		for c in &view.rows {
			table.add_row(vec![
				c.id.clone(),
				c.recipient_name.clone(),
				c.recipient_phone.clone(),
				c.typ.label().to_string(),
				c.status.label().to_string(),
				self.fmt.datetime(&c.call_date),
				duration(c.duration),
				self.fmt.optional_currency(c.amount),
			]);
		}
		table
	}

	pub fn mail_table(&self, view: &LogView<Mail>) -> Table {
		let mut table = Table::new(9);
		table.add_header(vec![
			"ID",
			"Recipient",
			"Address",
			"Type",
			"Status",
			"Sent",
			"Delivered",
			"Tracking",
			"Amount",
		]);
		table.add_separator();
		table.right_align(vec![8]);

		for m in &view.rows {
			table.add_row(vec![
				m.id.clone(),
				m.recipient_name.clone(),
				m.recipient_address.clone(),
				m.typ.label().to_string(),
				m.status.label().to_string(),
				self.fmt.datetime(&m.sent_date),
				self.fmt.optional_datetime(m.delivered_date.as_ref()),
				m.tracking_number
					.clone()
					.unwrap_or_else(|| PLACEHOLDER.to_string()),
				self.fmt.optional_currency(m.amount),
			]);
		}
		table
	}

	pub fn debtor_table(&self, view: &LogView<Debtor>) -> Table {
		let mut table = Table::new(8);
		table.add_header(vec![
			"ID",
			"Name",
			"Contract",
			"Total",
			"Paid",
			"Remaining",
			"Status",
			"Due",
		]);
		table.add_separator();
		table.right_align(vec![3, 4, 5]);

		for d in &view.rows {
			table.add_row(vec![
				d.id.clone(),
				d.name.clone(),
				d.contract_number.clone(),
				self.fmt.currency(d.total_debt),
				self.fmt.currency(d.paid_amount),
				self.fmt.currency(d.remaining_debt),
				d.status.label().to_string(),
				self.fmt.date(&d.due_date),
			]);
		}
		table
	}
}
