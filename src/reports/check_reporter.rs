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
use crate::comms::record::Communication;
use crate::comms::template::TemplateBook;
use crate::data::dataset::Dataset;
use std::collections::HashMap;

/// Data-quality findings that do not stop a dataset from loading. Report
/// figures that do not reconcile, communications addressed to someone other
/// than their debtor, balances kept under --lenient and undeclared template
/// placeholders all show up here.
pub struct CheckReporter<'a> {
	data: &'a Dataset,
}

impl<'a> CheckReporter<'a> {
	pub fn new(data: &'a Dataset) -> Self {
		Self { data }
	}

	pub fn findings(&self) -> Vec<String> {
		let mut found = vec![];

		for channel in Channel::ALL {
			for bucket in self.data.reports(*channel) {
				for problem in bucket.inconsistencies() {
					found.push(format!(
						"{} report {} {}: {}",
						channel.label(),
						bucket.month,
						bucket.year,
						problem
					));
				}
			}
		}

		for d in &self.data.debtors {
			if let Some(expected) = d.balance_mismatch() {
				found.push(format!(
					"debtor {}: remaining debt {} but total minus paid is {}",
					d.id, d.remaining_debt, expected
				));
			}
		}

		let names: HashMap<&str, &str> = self
			.data
			.debtors
			.iter()
			.map(|d| (d.id.as_str(), d.name.as_str()))
			.collect();
		self.links(&self.data.sms, &names, &mut found);
		self.links(&self.data.calls, &names, &mut found);
		self.links(&self.data.mail, &names, &mut found);

		for channel in Channel::ALL {
			let book = TemplateBook::new(
				*channel,
				self.data.templates(*channel).to_vec(),
			);
			for t in book.list(None) {
				let Some(content) = &t.content else {
					continue;
				};
				for p in book.placeholders(content) {
					if !t.variables.contains(&p) {
						found.push(format!(
							"{} template {}: {} is not a declared variable",
							channel.label(),
							t.id,
							p
						));
					}
				}
			}
		}

		found
	}

	/// Every communication must point at a known debtor, and should be
	/// addressed to them by name.
	fn links<C: Communication>(
		&self,
		list: &[C],
		names: &HashMap<&str, &str>,
		found: &mut Vec<String>,
	) {
		for c in list {
			match names.get(c.debtor_id()) {
				None => found.push(format!(
					"{} {}: unknown debtor {}",
					C::CHANNEL.label(),
					c.id(),
					c.debtor_id()
				)),
				Some(name) if !name.eq_ignore_ascii_case(c.recipient()) => {
					found.push(format!(
						"{} {}: addressed to {} but debtor {} is {}",
						C::CHANNEL.label(),
						c.id(),
						c.recipient(),
						c.debtor_id(),
						name
					))
				},
				Some(_) => {},
			}
		}
	}

	pub fn print(&self) {
		for finding in self.findings() {
			println!("{}", finding);
		}
		println!("Done");
	}
}
