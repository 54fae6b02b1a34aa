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
use crate::comms::kinds::{CommType, DebtorStatus};
use crate::comms::record::Record;
use crate::util::date::Date;
use chrono::NaiveDateTime;
use serde::Deserialize;

/// An individual with an outstanding balance. Amounts are whole currency
/// units; the remaining debt is expected to equal total minus paid, which
/// ingestion checks via balance_mismatch().
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debtor {
	pub id: String,
	pub name: String,
	pub address: String,
	pub phone: String,
	pub email: String,
	pub total_debt: u64,
	pub paid_amount: u64,
	pub remaining_debt: u64,
	pub status: DebtorStatus,
	pub last_payment_date: Date,
	pub due_date: Date,
	pub contract_number: String,
}

impl Debtor {
	/// Returns the expected remaining debt if the stored figure disagrees
	/// with total minus paid. Overpayment is always a mismatch.
	pub fn balance_mismatch(&self) -> Option<i128> {
		let expected = self.total_debt as i128 - self.paid_amount as i128;
		if expected < 0 || expected != self.remaining_debt as i128 {
			return Some(expected);
		}
		None
	}

	/// Days the due date has been missed by as of the given day. None when
	/// nothing is owed or the due date has not passed.
	pub fn overdue_by(&self, as_of: &Date) -> Option<u32> {
		if self.remaining_debt == 0 || self.due_date >= *as_of {
			return None;
		}
		u32::try_from(as_of.days_since(&self.due_date)).ok()
	}
}

impl Record for Debtor {
	type Status = DebtorStatus;

	fn id(&self) -> &str {
		&self.id
	}

	fn status(&self) -> DebtorStatus {
		self.status
	}

	fn comm_type(&self) -> Option<CommType> {
		None
	}

	fn timestamp(&self) -> Option<&NaiveDateTime> {
		None
	}

	fn search_fields(&self) -> Vec<&str> {
		vec![
			self.name.as_str(),
			self.address.as_str(),
			self.phone.as_str(),
			self.contract_number.as_str(),
		]
	}
}

#[cfg(test)]
pub mod tests {
	use super::*;

	pub fn debtor(id: &str, name: &str, total: u64, paid: u64) -> Debtor {
		Debtor {
			id: id.to_string(),
			name: name.to_string(),
			address: "Toshkent shahri".to_string(),
			phone: "+998 90 000 00 00".to_string(),
			email: format!("{}@example.com", id),
			total_debt: total,
			paid_amount: paid,
			remaining_debt: total.saturating_sub(paid),
			status: DebtorStatus::Active,
			last_payment_date: Date::from_str("2024-01-10").unwrap(),
			due_date: Date::from_str("2024-02-15").unwrap(),
			contract_number: format!("CT-{}", id),
		}
	}

	#[test]
	fn test_balance_mismatch() {
		let mut d = debtor("1", "Alisher Karimov", 5000000, 2000000);
		assert_eq!(d.balance_mismatch(), None);

		d.remaining_debt = 2500000;
		assert_eq!(d.balance_mismatch(), Some(3000000));

		let mut over = debtor("2", "Dilshod Toshmatov", 100, 100);
		over.paid_amount = 150;
		over.remaining_debt = 0;
		assert_eq!(over.balance_mismatch(), Some(-50));
	}

	#[test]
	fn test_overdue_by() {
		let d = debtor("1", "Alisher Karimov", 5000000, 2000000);
		let before = Date::from_str("2024-02-01").unwrap();
		let after = Date::from_str("2024-03-01").unwrap();

		assert!(d.overdue_by(&before).is_none());
		assert!(d.overdue_by(&d.due_date).is_none());
		assert_eq!(d.overdue_by(&after), Some(15));

		let paid = debtor("2", "Gulnoza Ismoilova", 100, 100);
		assert!(paid.overdue_by(&after).is_none());
	}
}
