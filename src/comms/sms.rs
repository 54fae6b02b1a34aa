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
use crate::comms::kinds::{Channel, CommType, SmsStatus};
use crate::comms::record::{Communication, Record};
use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sms {
	pub id: String,
	pub recipient_name: String,
	pub recipient_phone: String,
	pub message: String,
	pub status: SmsStatus,
	pub sent_date: NaiveDateTime,
	pub delivered_date: Option<NaiveDateTime>,

	#[serde(rename = "type")]
	pub typ: CommType,

	pub debtor_id: String,
	pub contract_number: String,
	pub amount: Option<u64>,
}

impl Record for Sms {
	type Status = SmsStatus;

	fn id(&self) -> &str {
		&self.id
	}

	fn status(&self) -> SmsStatus {
		self.status
	}

	fn comm_type(&self) -> Option<CommType> {
		Some(self.typ)
	}

	fn timestamp(&self) -> Option<&NaiveDateTime> {
		Some(&self.sent_date)
	}

	fn search_fields(&self) -> Vec<&str> {
		vec![
			self.recipient_name.as_str(),
			self.recipient_phone.as_str(),
			self.message.as_str(),
			self.contract_number.as_str(),
		]
	}
}

impl Communication for Sms {
	const CHANNEL: Channel = Channel::Sms;

	fn debtor_id(&self) -> &str {
		&self.debtor_id
	}

	fn recipient(&self) -> &str {
		&self.recipient_name
	}

	fn is_success(&self) -> bool {
		self.status == SmsStatus::Delivered
	}
}
