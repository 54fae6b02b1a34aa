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
use crate::comms::kinds::Channel;
use crate::comms::mail::Mail;
use crate::comms::record::{Communication, Record};
use crate::comms::report::MonthlyBucket;
use crate::comms::sms::Sms;
use crate::comms::template::Template;
use crate::data::error::DataError;
use crate::data::filesystem::Filesystem;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Everything read from one dataset directory. Loaded once at start-up and
/// never modified; views are derived from it.
#[derive(Debug, Default)]
pub struct Dataset {
	pub debtors: Vec<Debtor>,
	pub sms: Vec<Sms>,
	pub calls: Vec<Call>,
	pub mail: Vec<Mail>,
	pub sms_reports: Vec<MonthlyBucket>,
	pub call_reports: Vec<MonthlyBucket>,
	pub mail_reports: Vec<MonthlyBucket>,
	pub sms_templates: Vec<Template>,
	pub call_templates: Vec<Template>,
	pub mail_templates: Vec<Template>,
}

impl Dataset {
	/// Reads and validates every dataset file under dir. With lenient set,
	/// debtors whose balances do not add up are kept with a warning instead
	/// of failing the load.
	pub fn load(dir: &Path, lenient: bool) -> Result<Dataset, DataError> {
		let fs = Filesystem::new(dir);
		debug!("loading dataset from {}", fs.root().display());

		let dataset = Dataset {
			debtors: fs.read_list("debtors.json")?,
			sms: fs.read_list("sms.json")?,
			calls: fs.read_list("calls.json")?,
			mail: fs.read_list("mail.json")?,
			sms_reports: fs.read_list(report_file(Channel::Sms))?,
			call_reports: fs.read_list(report_file(Channel::Call))?,
			mail_reports: fs.read_list(report_file(Channel::Mail))?,
			sms_templates: fs.read_list(template_file(Channel::Sms))?,
			call_templates: fs.read_list(template_file(Channel::Call))?,
			mail_templates: fs.read_list(template_file(Channel::Mail))?,
		};

		dataset.validate(&fs, lenient)?;

		debug!(
			"loaded {} debtors, {} sms, {} calls, {} mail",
			dataset.debtors.len(),
			dataset.sms.len(),
			dataset.calls.len(),
			dataset.mail.len()
		);

		Ok(dataset)
	}

	fn validate(&self, fs: &Filesystem, lenient: bool) -> Result<(), DataError> {
		let path = |name: &str| fs.root().join(name).display().to_string();

		unique(&path("debtors.json"), self.debtors.iter().map(|d| d.id.clone()))?;
		unique(&path("sms.json"), self.sms.iter().map(|r| r.id().to_string()))?;
		unique(
			&path("calls.json"),
			self.calls.iter().map(|r| r.id().to_string()),
		)?;
		unique(&path("mail.json"), self.mail.iter().map(|r| r.id().to_string()))?;

		for channel in [Channel::Sms, Channel::Call, Channel::Mail] {
			unique(
				&path(report_file(channel)),
				self.reports(channel)
					.iter()
					.map(|b| format!("{} {}", b.month, b.year)),
			)?;
			unique(
				&path(template_file(channel)),
				self.templates(channel).iter().map(|t| t.id.clone()),
			)?;
		}

		for debtor in &self.debtors {
			if debtor.balance_mismatch().is_none() {
				continue;
			}

			let err = DataError::Balance {
				id: debtor.id.clone(),
				total: debtor.total_debt,
				paid: debtor.paid_amount,
				remaining: debtor.remaining_debt,
			};

			if !lenient {
				return Err(err);
			}
			warn!("{}", err);
		}

		Ok(())
	}

	pub fn reports(&self, channel: Channel) -> &[MonthlyBucket] {
		match channel {
			Channel::Sms => &self.sms_reports,
			Channel::Call => &self.call_reports,
			Channel::Mail => &self.mail_reports,
		}
	}

	pub fn templates(&self, channel: Channel) -> &[Template] {
		match channel {
			Channel::Sms => &self.sms_templates,
			Channel::Call => &self.call_templates,
			Channel::Mail => &self.mail_templates,
		}
	}

	pub fn debtor(&self, id: &str) -> Option<&Debtor> {
		self.debtors.iter().find(|d| d.id == id)
	}
}

/// Communications in list that belong to the given debtor.
pub fn linked<'a, C: Communication>(list: &'a [C], debtor_id: &str) -> Vec<&'a C> {
	list.iter().filter(|c| c.debtor_id() == debtor_id).collect()
}

fn report_file(channel: Channel) -> &'static str {
	match channel {
		Channel::Sms => "sms_reports.json",
		Channel::Call => "call_reports.json",
		Channel::Mail => "mail_reports.json",
	}
}

fn template_file(channel: Channel) -> &'static str {
	match channel {
		Channel::Sms => "sms_templates.json",
		Channel::Call => "call_templates.json",
		Channel::Mail => "mail_templates.json",
	}
}

fn unique(path: &str, keys: impl Iterator<Item = String>) -> Result<(), DataError> {
	let mut seen = HashSet::new();
	for key in keys {
		if !seen.insert(key.clone()) {
			return Err(DataError::Duplicate {
				path: path.to_string(),
				key,
			});
		}
	}
	Ok(())
}
