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
use anyhow::{bail, Error};
use serde::Deserialize;
use std::fmt;

/// A closed set of values with a wire key and a display label. Every
/// implementor lists all of its variants in ALL, and key() / label() are
/// exhaustive matches, so no value can be shown without a label.
pub trait Keyed: Sized + Copy + 'static {
	const ALL: &'static [Self];

	/// The key as it appears in datasets and on the command line
	fn key(&self) -> &'static str;

	fn label(&self) -> &'static str;

	/// Parses a key, failing loudly on anything not in ALL.
	fn parse(s: &str) -> Result<Self, Error> {
		match Self::ALL.iter().find(|v| v.key() == s) {
			Some(v) => Ok(*v),
			None => {
				let keys: Vec<&str> = Self::ALL.iter().map(|v| v.key()).collect();
				bail!("unknown value '{}'; expected one of: {}", s, keys.join(", "))
			},
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsStatus {
	Sent,
	Delivered,
	Failed,
	Pending,
}

impl Keyed for SmsStatus {
	const ALL: &'static [Self] = &[
		SmsStatus::Sent,
		SmsStatus::Delivered,
		SmsStatus::Failed,
		SmsStatus::Pending,
	];

	fn key(&self) -> &'static str {
		match self {
			SmsStatus::Sent => "sent",
			SmsStatus::Delivered => "delivered",
			SmsStatus::Failed => "failed",
			SmsStatus::Pending => "pending",
		}
	}

	fn label(&self) -> &'static str {
		match self {
			SmsStatus::Sent => "Yuborilgan",
			SmsStatus::Delivered => "Yetkazilgan",
			SmsStatus::Failed => "Xatolik",
			SmsStatus::Pending => "Kutilmoqda",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
	Completed,
	Answered,
	NoAnswer,
	Busy,
	Failed,
	Pending,
}

impl Keyed for CallStatus {
	const ALL: &'static [Self] = &[
		CallStatus::Completed,
		CallStatus::Answered,
		CallStatus::NoAnswer,
		CallStatus::Busy,
		CallStatus::Failed,
		CallStatus::Pending,
	];

	fn key(&self) -> &'static str {
		match self {
			CallStatus::Completed => "completed",
			CallStatus::Answered => "answered",
			CallStatus::NoAnswer => "no_answer",
			CallStatus::Busy => "busy",
			CallStatus::Failed => "failed",
			CallStatus::Pending => "pending",
		}
	}

	fn label(&self) -> &'static str {
		match self {
			CallStatus::Completed => "Yakunlangan",
			CallStatus::Answered => "Javob berilgan",
			CallStatus::NoAnswer => "Javob berilmagan",
			CallStatus::Busy => "Band",
			CallStatus::Failed => "Xatolik",
			CallStatus::Pending => "Kutilmoqda",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailStatus {
	Sent,
	Delivered,
	Returned,
	Failed,
	Pending,
}

impl Keyed for MailStatus {
	const ALL: &'static [Self] = &[
		MailStatus::Sent,
		MailStatus::Delivered,
		MailStatus::Returned,
		MailStatus::Failed,
		MailStatus::Pending,
	];

	fn key(&self) -> &'static str {
		match self {
			MailStatus::Sent => "sent",
			MailStatus::Delivered => "delivered",
			MailStatus::Returned => "returned",
			MailStatus::Failed => "failed",
			MailStatus::Pending => "pending",
		}
	}

	fn label(&self) -> &'static str {
		match self {
			MailStatus::Sent => "Yuborilgan",
			MailStatus::Delivered => "Yetkazilgan",
			MailStatus::Returned => "Qaytarilgan",
			MailStatus::Failed => "Xatolik",
			MailStatus::Pending => "Kutilmoqda",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtorStatus {
	Active,
	Overdue,
	Paid,
	Pending,
}

impl Keyed for DebtorStatus {
	const ALL: &'static [Self] = &[
		DebtorStatus::Active,
		DebtorStatus::Overdue,
		DebtorStatus::Paid,
		DebtorStatus::Pending,
	];

	fn key(&self) -> &'static str {
		match self {
			DebtorStatus::Active => "active",
			DebtorStatus::Overdue => "overdue",
			DebtorStatus::Paid => "paid",
			DebtorStatus::Pending => "pending",
		}
	}

	fn label(&self) -> &'static str {
		match self {
			DebtorStatus::Active => "Faol",
			DebtorStatus::Overdue => "Muddati o'tgan",
			DebtorStatus::Paid => "To'langan",
			DebtorStatus::Pending => "Kutilmoqda",
		}
	}
}

/// The purpose of a single communication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommType {
	PaymentReminder,
	OverdueNotice,
	PaymentConfirmation,
	General,
}

impl Keyed for CommType {
	const ALL: &'static [Self] = &[
		CommType::PaymentReminder,
		CommType::OverdueNotice,
		CommType::PaymentConfirmation,
		CommType::General,
	];

	fn key(&self) -> &'static str {
		match self {
			CommType::PaymentReminder => "payment_reminder",
			CommType::OverdueNotice => "overdue_notice",
			CommType::PaymentConfirmation => "payment_confirmation",
			CommType::General => "general",
		}
	}

	fn label(&self) -> &'static str {
		match self {
			CommType::PaymentReminder => "To'lov eslatmasi",
			CommType::OverdueNotice => "Muddati o'tgan",
			CommType::PaymentConfirmation => "To'lov tasdiqi",
			CommType::General => "Umumiy",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
	Sms,
	Call,
	Mail,
}

impl Keyed for Channel {
	const ALL: &'static [Self] = &[Channel::Sms, Channel::Call, Channel::Mail];

	fn key(&self) -> &'static str {
		match self {
			Channel::Sms => "sms",
			Channel::Call => "calls",
			Channel::Mail => "mail",
		}
	}

	fn label(&self) -> &'static str {
		match self {
			Channel::Sms => "SMS",
			Channel::Call => "Avtozvon",
			Channel::Mail => "Pochta",
		}
	}
}

/// Month of a report bucket. Datasets name months in Uzbek, which is also
/// the order-defining list: declaration order is calendar order.
#[derive(
	Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize,
)]
pub enum Month {
	Yanvar,
	Fevral,
	Mart,
	Aprel,
	May,
	Iyun,
	Iyul,
	Avgust,
	Sentabr,
	Oktyabr,
	Noyabr,
	Dekabr,
}

impl Month {
	/// Month by 1-based calendar index
	pub fn from_number(n: u32) -> Option<Month> {
		Month::ALL.get((n as usize).checked_sub(1)?).copied()
	}
}

impl Keyed for Month {
	const ALL: &'static [Self] = &[
		Month::Yanvar,
		Month::Fevral,
		Month::Mart,
		Month::Aprel,
		Month::May,
		Month::Iyun,
		Month::Iyul,
		Month::Avgust,
		Month::Sentabr,
		Month::Oktyabr,
		Month::Noyabr,
		Month::Dekabr,
	];

	fn key(&self) -> &'static str {
		self.label()
	}

	fn label(&self) -> &'static str {
		match self {
			Month::Yanvar => "Yanvar",
			Month::Fevral => "Fevral",
			Month::Mart => "Mart",
			Month::Aprel => "Aprel",
			Month::May => "May",
			Month::Iyun => "Iyun",
			Month::Iyul => "Iyul",
			Month::Avgust => "Avgust",
			Month::Sentabr => "Sentabr",
			Month::Oktyabr => "Oktyabr",
			Month::Noyabr => "Noyabr",
			Month::Dekabr => "Dekabr",
		}
	}
}

impl fmt::Display for Month {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.label())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	/// Keys and labels must be present and keys unique for every variant.
	fn check_closed<T: Keyed>() {
		let keys: HashSet<&str> = T::ALL.iter().map(|v| v.key()).collect();
		assert_eq!(keys.len(), T::ALL.len());
		for v in T::ALL {
			assert!(!v.label().is_empty());
			assert_eq!(T::parse(v.key()).unwrap().key(), v.key());
		}
	}

	#[test]
	fn test_every_enum_is_covered() {
		check_closed::<SmsStatus>();
		check_closed::<CallStatus>();
		check_closed::<MailStatus>();
		check_closed::<DebtorStatus>();
		check_closed::<CommType>();
		check_closed::<Channel>();
		check_closed::<Month>();
	}

	#[test]
	fn test_parse_rejects_unknown() {
		let err = SmsStatus::parse("bounced").unwrap_err();
		assert!(err.to_string().contains("sent, delivered, failed, pending"));
		assert!(CommType::parse("all").is_err());
	}

	#[test]
	fn test_serde_keys_match() {
		let s: CallStatus = serde_json::from_str("\"no_answer\"").unwrap();
		assert_eq!(s, CallStatus::NoAnswer);
		assert_eq!(s.key(), "no_answer");
		assert!(serde_json::from_str::<MailStatus>("\"lost\"").is_err());
	}

	#[test]
	fn test_month_order() {
		assert_eq!(Month::from_number(1), Some(Month::Yanvar));
		assert_eq!(Month::from_number(12), Some(Month::Dekabr));
		assert!(Month::Mart < Month::Aprel);
		assert_eq!(Month::from_number(2), Some(Month::Fevral));
		assert_eq!(Month::from_number(0), None);
		assert_eq!(Month::from_number(13), None);
	}
}
