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
use crate::comms::kinds::{CallStatus, Channel, CommType};
use crate::comms::record::{Communication, Record};
use chrono::NaiveDateTime;
use serde::Deserialize;

/// An automated voice call.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
	pub id: String,
	pub recipient_name: String,
	pub recipient_phone: String,
	pub status: CallStatus,
	pub call_date: NaiveDateTime,
	pub answered_date: Option<NaiveDateTime>,

	/// Seconds; zero when nobody picked up
	pub duration: Option<u32>,

	#[serde(rename = "type")]
	pub typ: CommType,

	pub debtor_id: String,
	pub contract_number: String,
	pub amount: Option<u64>,
	pub template_id: Option<String>,
}

impl Record for Call {
	type Status = CallStatus;

	fn id(&self) -> &str {
		&self.id
	}

	fn status(&self) -> CallStatus {
		self.status
	}

	fn comm_type(&self) -> Option<CommType> {
		Some(self.typ)
	}

	fn timestamp(&self) -> Option<&NaiveDateTime> {
		Some(&self.call_date)
	}

	fn search_fields(&self) -> Vec<&str> {
		vec![
			self.recipient_name.as_str(),
			self.recipient_phone.as_str(),
			self.contract_number.as_str(),
		]
	}
}

impl Communication for Call {
	const CHANNEL: Channel = Channel::Call;

	fn debtor_id(&self) -> &str {
		&self.debtor_id
	}

	fn recipient(&self) -> &str {
		&self.recipient_name
	}

	fn is_success(&self) -> bool {
		matches!(self.status, CallStatus::Completed | CallStatus::Answered)
	}
}
