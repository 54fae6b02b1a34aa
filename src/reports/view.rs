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
use crate::comms::kinds::DebtorStatus;
use crate::comms::mail::Mail;
use crate::comms::record::{Communication, Record};
use crate::comms::sms::Sms;
use crate::data::dataset::{linked, Dataset};
use crate::filter::filter_state::FilterState;
use crate::filter::record_filter::RecordFilter;
use crate::filter::sort::SortState;
use crate::util::date::Date;
use anyhow::{bail, Error};

/// The rows a log screen shows, plus how many records it was drawn from.
/// A pure function of its inputs; rebuilt on every change.
pub struct LogView<'a, R> {
	pub rows: Vec<&'a R>,
	pub total: usize,
}

impl<'a, R> LogView<'a, R> {
	pub fn shown(&self) -> usize {
		self.rows.len()
	}

	pub fn summary(&self) -> String {
		format!("Showing {} of {}", self.shown(), self.total)
	}
}

pub fn assemble<'a, R: Record>(
	records: &'a [R],
	state: &FilterState<R::Status>,
) -> LogView<'a, R> {
	LogView {
		rows: RecordFilter::new(state).apply(records),
		total: records.len(),
	}
}

/// Filters then sorts; only the debtor table is sortable.
pub fn assemble_debtors<'a>(
	debtors: &'a [Debtor],
	state: &FilterState<DebtorStatus>,
	sort: &SortState,
) -> LogView<'a, Debtor> {
	let mut view = assemble(debtors, state);
	sort.sort(&mut view.rows);
	view
}

/// One debtor with every communication sent their way.
pub struct DebtorDetail<'a> {
	pub debtor: &'a Debtor,
	pub sms: Vec<&'a Sms>,
	pub calls: Vec<&'a Call>,
	pub mail: Vec<&'a Mail>,
	pub days_overdue: u32,
}

impl<'a> DebtorDetail<'a> {
	pub fn assemble(
		data: &'a Dataset,
		id: &str,
		today: &Date,
	) -> Result<Self, Error> {
		let Some(debtor) = data.debtor(id) else {
			bail!("No debtor with id {}", id);
		};

		Ok(Self {
			debtor,
			sms: linked(&data.sms, id),
			calls: linked(&data.calls, id),
			mail: linked(&data.mail, id),
			days_overdue: debtor.overdue_by(today).unwrap_or(0),
		})
	}

}

/// How many of the given communications reached the debtor.
pub fn successes<C: Communication>(list: &[&C]) -> usize {
	list.iter().filter(|c| c.is_success()).count()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::comms::kinds::{Keyed, SmsStatus};
	use crate::filter::filter_state::DateRange;
	use crate::filter::sort::SortField;
	use std::path::Path;

	fn standard() -> Dataset {
		let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
			.join("tests/test_data/standard");
		Dataset::load(&dir, false).unwrap()
	}

	#[test]
	fn test_delivered_sms() {
		let data = standard();
		let state = FilterState::default().with_status(SmsStatus::Delivered);
		let view = assemble(&data.sms, &state);

		let tally = data
			.sms
			.iter()
			.filter(|s| s.status == SmsStatus::Delivered)
			.count();
		assert_eq!(view.shown(), tally);
		assert_eq!(view.shown(), 5);
		assert!(view.rows.iter().all(|s| s.status.key() == "delivered"));
		assert_eq!(view.summary(), "Showing 5 of 8");
	}

	#[test]
	fn test_search_debtors() {
		let data = standard();
		let state = FilterState::default().with_query("karimov");
		let view = assemble_debtors(&data.debtors, &state, &SortState::default());
		assert_eq!(view.shown(), 1);
		assert_eq!(view.rows[0].name, "Alisher Karimov");
	}

	#[test]
	fn test_sort_toggle_reverses() {
		let data = standard();
		let state = FilterState::default();
		let mut sort = SortState::default();

		sort.toggle(SortField::TotalDebt);
		let asc: Vec<&str> = assemble_debtors(&data.debtors, &state, &sort)
			.rows
			.iter()
			.map(|d| d.id.as_str())
			.collect();

		sort.toggle(SortField::TotalDebt);
		let mut desc: Vec<&str> = assemble_debtors(&data.debtors, &state, &sort)
			.rows
			.iter()
			.map(|d| d.id.as_str())
			.collect();

		assert_eq!(asc.first(), Some(&"4"));
		assert_eq!(desc.first(), Some(&"6"));
		desc.reverse();
		assert_eq!(asc, desc);
	}

	#[test]
	fn test_begin_after_everything() {
		let data = standard();
		let begin = Date::from_str("2030-01-01").unwrap();
		let state = FilterState::default()
			.with_range(DateRange::new(Some(begin), None));

		let view = assemble(&data.calls, &state);
		assert!(view.rows.is_empty());
		assert_eq!(view.summary(), "Showing 0 of 8");
	}

	#[test]
	fn test_debtor_detail() {
		let data = standard();
		let today = Date::from_str("2024-03-01").unwrap();
		let detail = DebtorDetail::assemble(&data, "1", &today).unwrap();

		assert_eq!(detail.debtor.name, "Alisher Karimov");
		assert_eq!(detail.sms.len(), 1);
		assert_eq!(detail.calls.len(), 1);
		assert_eq!(detail.mail.len(), 1);
		assert_eq!(successes(&detail.sms), 1);
		assert_eq!(detail.days_overdue, 15);

		assert!(DebtorDetail::assemble(&data, "404", &today).is_err());
	}
}
