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
use crate::comms::kinds::{Channel, CommType, Keyed};
use chrono::NaiveDateTime;

/// Anything that can appear in a filtered log view. The filter only ever
/// looks at records through this trait.
pub trait Record {
	type Status: Keyed + PartialEq;

	fn id(&self) -> &str;

	fn status(&self) -> Self::Status;

	/// None for records that have no communication type, i.e. debtors
	fn comm_type(&self) -> Option<CommType>;

	/// The timestamp the date range applies to (sent date, call date). None
	/// for records that are not events.
	fn timestamp(&self) -> Option<&NaiveDateTime>;

	/// Text fields the free-text search is matched against
	fn search_fields(&self) -> Vec<&str>;
}

/// One logged attempt to reach a debtor.
pub trait Communication: Record {
	const CHANNEL: Channel;

	fn debtor_id(&self) -> &str;

	fn recipient(&self) -> &str;

	/// Whether the attempt reached the debtor
	fn is_success(&self) -> bool;
}
