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
use crate::reports::aggregator::pct;
use crate::reports::log_reporter::LogReporter;
use crate::reports::table::Table;
use crate::reports::view::{successes, DebtorDetail, LogView};
use crate::util::format::{percent, Format};

pub struct DebtorReporter<'a> {
	fmt: &'a Format,
}

impl<'a> DebtorReporter<'a> {
	pub fn new(fmt: &'a Format) -> Self {
		Self { fmt }
	}

	/// Per channel: communications sent, how many reached the debtor and
	/// that share as a percentage.
	pub fn counts_table(&self, detail: &DebtorDetail) -> Table {
		let rows = [
			(Channel::Sms, detail.sms.len(), successes(&detail.sms)),
			(Channel::Call, detail.calls.len(), successes(&detail.calls)),
			(Channel::Mail, detail.mail.len(), successes(&detail.mail)),
		];

		let mut counts = Table::new(4);
		counts.add_header(vec!["Channel", "Sent", "Reached", "Rate"]);
		counts.add_separator();
		counts.right_align(vec![1, 2, 3]);
		for (channel, sent, reached) in rows {
			counts.add_row(vec![
				channel.label().to_string(),
				sent.to_string(),
				reached.to_string(),
				percent(pct(reached as u64, sent as u64)),
			]);
		}
		counts
	}

	pub fn print_detail(&self, detail: &DebtorDetail) {
		let d = detail.debtor;

		let mut card = Table::new(2);
		let fields = [
			("Name", d.name.clone()),
			("Contract", d.contract_number.clone()),
			("Status", d.status.label().to_string()),
			("Phone", d.phone.clone()),
			("Email", d.email.clone()),
			("Address", d.address.clone()),
			("Total debt", self.fmt.currency(d.total_debt)),
			("Paid", self.fmt.currency(d.paid_amount)),
			("Remaining", self.fmt.currency(d.remaining_debt)),
			("Last payment", self.fmt.date(&d.last_payment_date)),
			("Due", self.fmt.date(&d.due_date)),
			("Days overdue", detail.days_overdue.to_string()),
		];
		for (name, value) in fields {
			card.add_row(vec![name.to_string(), value]);
		}
		card.print();

		self.counts_table(detail).print();

		// Linked communications reuse the log tables; totals are the
		// debtor's own records.
		let logs = LogReporter::new(self.fmt);
		if !detail.sms.is_empty() {
			logs.sms_table(&LogView {
				rows: detail.sms.clone(),
				total: detail.sms.len(),
			})
			.print();
		}
		if !detail.calls.is_empty() {
			logs.call_table(&LogView {
				rows: detail.calls.clone(),
				total: detail.calls.len(),
			})
			.print();
		}
		if !detail.mail.is_empty() {
			logs.mail_table(&LogView {
				rows: detail.mail.clone(),
				total: detail.mail.len(),
			})
			.print();
		}
	}
}
