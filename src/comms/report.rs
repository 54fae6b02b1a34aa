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
use crate::comms::kinds::Month;
use serde::Deserialize;

/// Attempted versus achieved communications for one channel in one month.
///
/// Call reports name their figures made/notMade; they are read into the
/// same fields as sent/notSent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Figures {
	pub needed: u64,

	#[serde(alias = "made")]
	pub sent: u64,

	#[serde(alias = "notMade")]
	pub not_sent: u64,

	pub successful: u64,
	pub unsuccessful: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MonthlyBucket {
	pub month: Month,
	pub year: u32,

	#[serde(alias = "sms", alias = "autoCall", alias = "mail")]
	pub figures: Figures,
}

impl MonthlyBucket {
	/// Lists the ways this bucket's figures disagree with each other. The
	/// source data is not guaranteed to reconcile, so these are findings
	/// for the check report rather than ingestion errors.
	pub fn inconsistencies(&self) -> Vec<String> {
		let f = &self.figures;
		let mut found = vec![];

		// u128 so that figures near u64::MAX compare without wrapping
		if f.sent as u128 + f.not_sent as u128 != f.needed as u128 {
			found.push(format!(
				"sent {} + not sent {} != needed {}",
				f.sent, f.not_sent, f.needed
			));
		}
		if f.successful as u128 + f.unsuccessful as u128 != f.sent as u128 {
			found.push(format!(
				"successful {} + unsuccessful {} != sent {}",
				f.successful, f.unsuccessful, f.sent
			));
		}
		if f.sent > f.needed {
			found.push(format!("sent {} exceeds needed {}", f.sent, f.needed));
		}

		found
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_reads_every_channel_shape() {
		let sms: MonthlyBucket = serde_json::from_str(
			r#"{"month":"Yanvar","year":2024,"sms":{"needed":100,"sent":75,"notSent":25,"successful":63,"unsuccessful":12}}"#,
		)
		.unwrap();
		assert_eq!(sms.month, Month::Yanvar);
		assert_eq!(sms.figures.sent, 75);
		assert_eq!(sms.figures.not_sent, 25);

		let call: MonthlyBucket = serde_json::from_str(
			r#"{"month":"Mart","year":2025,"autoCall":{"needed":150,"made":120,"notMade":30,"successful":45,"unsuccessful":75}}"#,
		)
		.unwrap();
		assert_eq!(call.figures.sent, 120);
		assert_eq!(call.figures.not_sent, 30);
		assert!(call.inconsistencies().is_empty());
	}

	#[test]
	fn test_rejects_unknown_month() {
		let res = serde_json::from_str::<MonthlyBucket>(
			r#"{"month":"January","year":2024,"mail":{"needed":1,"sent":1,"notSent":0,"successful":1,"unsuccessful":0}}"#,
		);
		assert!(res.is_err());
	}

	#[test]
	fn test_inconsistencies() {
		let bucket = MonthlyBucket {
			month: Month::Yanvar,
			year: 2024,
			figures: Figures {
				needed: 150,
				sent: 120,
				not_sent: 30,
				successful: 50,
				unsuccessful: 75,
			},
		};
		let found = bucket.inconsistencies();
		assert_eq!(found.len(), 1);
		assert!(found[0].contains("successful 50 + unsuccessful 75"));
	}

	#[test]
	fn test_inconsistencies_at_u64_max() {
		let bucket: MonthlyBucket = serde_json::from_str(
			r#"{"month":"May","year":2024,"sms":{"needed":18446744073709551615,"sent":18446744073709551615,"notSent":18446744073709551615,"successful":18446744073709551615,"unsuccessful":1}}"#,
		)
		.unwrap();
		let found = bucket.inconsistencies();
		assert_eq!(found.len(), 2);
		assert!(found[0].contains("not sent 18446744073709551615"));
	}
}
