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
use crate::comms::record::Record;
use crate::filter::filter_state::FilterState;

/// Evaluates the four predicates of a filter against one record. A record
/// is kept iff every predicate holds; each is evaluated independently.
pub struct RecordFilter<'a, S> {
	state: &'a FilterState<S>,

	/// The query, lowercased once rather than per record
	needle: String,
}

impl<'a, S: PartialEq + Copy> RecordFilter<'a, S> {
	pub fn new(state: &'a FilterState<S>) -> Self {
		Self {
			state,
			needle: state.query.to_lowercase(),
		}
	}

	pub fn matches<R: Record<Status = S>>(&self, record: &R) -> bool {
		self.matches_search(record)
			&& self.matches_status(record)
			&& self.matches_type(record)
			&& self.matches_date(record)
	}

	/// Case-insensitive substring match against any searchable field
	pub fn matches_search<R: Record<Status = S>>(&self, record: &R) -> bool {
		if self.needle.is_empty() {
			return true;
		}
		record
			.search_fields()
			.iter()
			.any(|field| field.to_lowercase().contains(&self.needle))
	}

	pub fn matches_status<R: Record<Status = S>>(&self, record: &R) -> bool {
		self.state.status.map_or(true, |s| record.status() == s)
	}

	/// Records without a type are not constrained by the type filter
	pub fn matches_type<R: Record<Status = S>>(&self, record: &R) -> bool {
		match self.state.comm_type {
			None => true,
			Some(t) => record.comm_type().map_or(true, |rt| rt == t),
		}
	}

	pub fn matches_date<R: Record<Status = S>>(&self, record: &R) -> bool {
		if self.state.range.is_open() {
			return true;
		}
		match record.timestamp() {
			Some(ts) => self.state.range.contains(ts),
			None => true,
		}
	}

	/// Applies the filter to a whole list, keeping the original order.
	pub fn apply<'r, R: Record<Status = S>>(
		&self,
		records: &'r [R],
	) -> Vec<&'r R> {
		records.iter().filter(|r| self.matches(*r)).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::comms::debtor::tests::debtor;
	use crate::comms::kinds::{CommType, DebtorStatus, Keyed, SmsStatus};
	use crate::comms::sms::Sms;
	use crate::filter::filter_state::DateRange;
	use crate::util::date::Date;
	use chrono::NaiveDateTime;
	use rand::Rng;

	fn sms(id: &str, status: SmsStatus, typ: CommType, sent: &str) -> Sms {
		Sms {
			id: id.to_string(),
			recipient_name: format!("Recipient {}", id),
			recipient_phone: format!("+998 90 000 00 0{}", id),
			message: "Hurmatli mijoz! To'lov muddati yaqinlashmoqda.".to_string(),
			status,
			sent_date: NaiveDateTime::parse_from_str(sent, "%Y-%m-%dT%H:%M:%S")
				.unwrap(),
			delivered_date: None,
			typ,
			debtor_id: id.to_string(),
			contract_number: format!("CT-2024-00{}", id),
			amount: None,
		}
	}

	fn day(s: &str) -> Option<Date> {
		Some(Date::from_str(s).unwrap())
	}

	#[test]
	fn test_search_is_case_insensitive_over_all_fields() {
		let r = sms("1", SmsStatus::Sent, CommType::General, "2024-01-20T10:30:00");

		for q in ["recipient 1", "RECIPIENT", "ct-2024-001", "muddati", "90 000"] {
			let state = FilterState::default().with_query(q);
			assert!(RecordFilter::new(&state).matches(&r), "query {}", q);
		}

		let state = FilterState::default().with_query("karimov");
		assert!(!RecordFilter::new(&state).matches(&r));
	}

	#[test]
	fn test_query_whitespace_is_significant() {
		let d = debtor("1", "Alisher Karimov", 10, 5);

		let state = FilterState::default().with_query("Karimov ");
		assert!(!RecordFilter::new(&state).matches(&d));

		let state = FilterState::default().with_query(" Karimov");
		assert!(RecordFilter::new(&state).matches(&d));

		// only the empty string disables the search
		let r = sms("1", SmsStatus::Sent, CommType::General, "2024-01-20T10:30:00");
		let state = FilterState::default().with_query("  ");
		assert!(!RecordFilter::new(&state).matches(&r));
	}

	#[test]
	fn test_untyped_records_ignore_type_and_date() {
		let d = debtor("1", "Alisher Karimov", 10, 5);
		let state = FilterState::default()
			.with_type(CommType::OverdueNotice)
			.with_range(DateRange::new(day("2030-01-01"), None))
			.with_status(DebtorStatus::Active);
		assert!(RecordFilter::new(&state).matches(&d));

		let state = FilterState::default().with_status(DebtorStatus::Paid);
		assert!(!RecordFilter::new(&state).matches(&d));
	}

	#[test]
	fn test_range_after_all_records_is_empty() {
		let records = vec![
			sms("1", SmsStatus::Sent, CommType::General, "2024-01-20T10:30:00"),
			sms("2", SmsStatus::Failed, CommType::General, "2024-01-25T10:00:00"),
		];
		let state = FilterState::default()
			.with_range(DateRange::new(day("2024-02-01"), None));
		assert!(RecordFilter::new(&state).apply(&records).is_empty());
	}

	/// matches() must agree with the conjunction of the four predicates, and
	/// a filtered list can never grow.
	#[test]
	fn test_conjunction_property() {
		let mut rng = rand::thread_rng();
		let queries = ["", "recipient", "ct-2024-003", "zzz", "MUDDATI"];
		let days = [None, day("2024-01-10"), day("2024-01-15"), day("2024-01-31")];

		for _ in 0..200 {
			let records: Vec<Sms> = (0..rng.gen_range(1..12))
				.map(|i| {
					let status = SmsStatus::ALL[rng.gen_range(0..4)];
					let typ = CommType::ALL[rng.gen_range(0..4)];
					let sent = format!(
						"2024-01-{:02}T{:02}:00:00",
						rng.gen_range(1..29),
						rng.gen_range(0..24)
					);
					sms(&(i % 10).to_string(), status, typ, &sent)
				})
				.collect();

			let mut state = FilterState::default()
				.with_query(queries[rng.gen_range(0..queries.len())])
				.with_range(DateRange::new(
					days[rng.gen_range(0..days.len())],
					days[rng.gen_range(0..days.len())],
				));
			if rng.gen_bool(0.5) {
				state.status = Some(SmsStatus::ALL[rng.gen_range(0..4)]);
			}
			if rng.gen_bool(0.5) {
				state.comm_type = Some(CommType::ALL[rng.gen_range(0..4)]);
			}

			let filter = RecordFilter::new(&state);
			for r in &records {
				let each = [
					filter.matches_date(r),
					filter.matches_type(r),
					filter.matches_status(r),
					filter.matches_search(r),
				];
				assert_eq!(filter.matches(r), each.iter().all(|b| *b));
			}
			assert!(filter.apply(&records).len() <= records.len());
		}
	}
}
