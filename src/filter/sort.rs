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
use crate::comms::debtor::Debtor;
use crate::comms::kinds::Keyed;
use anyhow::Error;
use std::cmp::Ordering;

/// Debtor columns that can be sorted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
	Name,
	TotalDebt,
	PaidAmount,
	RemainingDebt,
	DueDate,
}

impl Keyed for SortField {
	const ALL: &'static [Self] = &[
		SortField::Name,
		SortField::TotalDebt,
		SortField::PaidAmount,
		SortField::RemainingDebt,
		SortField::DueDate,
	];

	fn key(&self) -> &'static str {
		match self {
			SortField::Name => "name",
			SortField::TotalDebt => "total-debt",
			SortField::PaidAmount => "paid-amount",
			SortField::RemainingDebt => "remaining-debt",
			SortField::DueDate => "due-date",
		}
	}

	fn label(&self) -> &'static str {
		match self {
			SortField::Name => "Ism",
			SortField::TotalDebt => "Umumiy qarz",
			SortField::PaidAmount => "To'langan",
			SortField::RemainingDebt => "Qolgan qarz",
			SortField::DueDate => "Muddat",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
	#[default]
	Asc,
	Desc,
}

impl Direction {
	pub fn flipped(self) -> Self {
		match self {
			Direction::Asc => Direction::Desc,
			Direction::Desc => Direction::Asc,
		}
	}
}

/// Which column a table is sorted on, if any. Mirrors clicking column
/// headers: the same header flips direction, a new one starts ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
	pub field: Option<SortField>,
	pub direction: Direction,
}

impl SortState {
	pub fn toggle(&mut self, field: SortField) {
		if self.field == Some(field) {
			self.direction = self.direction.flipped();
		} else {
			self.field = Some(field);
			self.direction = Direction::Asc;
		}
	}

	/// Replays a sequence of header clicks given by column key.
	pub fn from_toggles<S: AsRef<str>>(keys: &[S]) -> Result<Self, Error> {
		let mut state = SortState::default();
		for key in keys {
			state.toggle(SortField::parse(key.as_ref())?);
		}
		Ok(state)
	}

	pub fn compare(&self, a: &Debtor, b: &Debtor) -> Ordering {
		let Some(field) = self.field else {
			return Ordering::Equal;
		};

		let ord = compare_field(field, a, b);
		match self.direction {
			Direction::Asc => ord,
			Direction::Desc => ord.reverse(),
		}
	}

	/// Stable sort in place; ties keep their incoming order.
	pub fn sort(&self, debtors: &mut [&Debtor]) {
		if self.field.is_some() {
			debtors.sort_by(|a, b| self.compare(a, b));
		}
	}
}

fn compare_field(field: SortField, a: &Debtor, b: &Debtor) -> Ordering {
	match field {
		SortField::Name => compare_text(&a.name, &b.name),
		SortField::TotalDebt => a.total_debt.cmp(&b.total_debt),
		SortField::PaidAmount => a.paid_amount.cmp(&b.paid_amount),
		SortField::RemainingDebt => a.remaining_debt.cmp(&b.remaining_debt),
		SortField::DueDate => a.due_date.cmp(&b.due_date),
	}
}

/// Case-folded comparison first, so "alisher" sorts next to "Alisher",
/// then exact ordering to keep it total.
fn compare_text(a: &str, b: &str) -> Ordering {
	a.to_lowercase()
		.cmp(&b.to_lowercase())
		.then_with(|| a.cmp(b))
}
