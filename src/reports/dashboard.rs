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
use crate::comms::kinds::{Channel, Month};
use crate::comms::report::MonthlyBucket;
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Attempts and outcomes for one channel. total is sent, or made for calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelCounts {
	pub total: u64,
	pub successful: u64,
	pub unsuccessful: u64,
}

impl AddAssign for ChannelCounts {
	fn add_assign(&mut self, other: Self) {
		self.total = self.total.saturating_add(other.total);
		self.successful = self.successful.saturating_add(other.successful);
		self.unsuccessful =
			self.unsuccessful.saturating_add(other.unsuccessful);
	}
}

impl From<&MonthlyBucket> for ChannelCounts {
	fn from(bucket: &MonthlyBucket) -> Self {
		Self {
			total: bucket.figures.sent,
			successful: bucket.figures.successful,
			unsuccessful: bucket.figures.unsuccessful,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelSet {
	pub sms: ChannelCounts,
	pub call: ChannelCounts,
	pub mail: ChannelCounts,
}

impl ChannelSet {
	pub fn get(&self, channel: Channel) -> &ChannelCounts {
		match channel {
			Channel::Sms => &self.sms,
			Channel::Call => &self.call,
			Channel::Mail => &self.mail,
		}
	}

	fn get_mut(&mut self, channel: Channel) -> &mut ChannelCounts {
		match channel {
			Channel::Sms => &mut self.sms,
			Channel::Call => &mut self.call,
			Channel::Mail => &mut self.mail,
		}
	}

	/// All three channels together
	pub fn combined(&self) -> ChannelCounts {
		let mut sum = self.sms;
		sum += self.call;
		sum += self.mail;
		sum
	}
}

impl AddAssign for ChannelSet {
	fn add_assign(&mut self, other: Self) {
		self.sms += other.sms;
		self.call += other.call;
		self.mail += other.mail;
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardRow {
	pub year: u32,
	pub month: Month,
	pub counts: ChannelSet,
}

/// Every channel's monthly figures side by side. A month missing from a
/// channel counts as zero for it.
pub struct Dashboard {
	/// Newest month first
	pub rows: Vec<DashboardRow>,
	pub year_totals: BTreeMap<u32, ChannelSet>,
	pub overall: ChannelSet,
}

impl Dashboard {
	pub fn build(
		sms: &[MonthlyBucket],
		call: &[MonthlyBucket],
		mail: &[MonthlyBucket],
	) -> Self {
		let mut by_month: BTreeMap<(u32, Month), ChannelSet> = BTreeMap::new();

		for (channel, buckets) in
			[(Channel::Sms, sms), (Channel::Call, call), (Channel::Mail, mail)]
		{
			for bucket in buckets {
				*by_month
					.entry((bucket.year, bucket.month))
					.or_default()
					.get_mut(channel) += ChannelCounts::from(bucket);
			}
		}

		let mut year_totals: BTreeMap<u32, ChannelSet> = BTreeMap::new();
		let mut overall = ChannelSet::default();
		let mut rows = Vec::with_capacity(by_month.len());

		for ((year, month), counts) in by_month.into_iter().rev() {
			*year_totals.entry(year).or_default() += counts;
			overall += counts;
			rows.push(DashboardRow {
				year,
				month,
				counts,
			});
		}

		Self {
			rows,
			year_totals,
			overall,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::comms::report::Figures;

	fn bucket(year: u32, month: Month, sent: u64, ok: u64) -> MonthlyBucket {
		MonthlyBucket {
			month,
			year,
			figures: Figures {
				needed: sent,
				sent,
				not_sent: 0,
				successful: ok,
				unsuccessful: sent - ok,
			},
		}
	}

	#[test]
	fn test_combines_channels() {
		let sms = vec![
			bucket(2024, Month::Yanvar, 10, 5),
			bucket(2024, Month::Fevral, 20, 10),
		];
		let call = vec![bucket(2024, Month::Yanvar, 4, 1)];
		let mail = vec![bucket(2025, Month::Yanvar, 2, 2)];

		let dash = Dashboard::build(&sms, &call, &mail);

		let order: Vec<(u32, Month)> =
			dash.rows.iter().map(|r| (r.year, r.month)).collect();
		assert_eq!(
			order,
			vec![
				(2025, Month::Yanvar),
				(2024, Month::Fevral),
				(2024, Month::Yanvar)
			]
		);

		// Fevral has no calls
		assert_eq!(dash.rows[1].counts.call, ChannelCounts::default());
		assert_eq!(dash.rows[2].counts.call.total, 4);

		assert_eq!(dash.year_totals[&2024].sms.total, 30);
		assert_eq!(dash.year_totals[&2025].mail.successful, 2);
		assert_eq!(dash.overall.combined().total, 36);
		assert_eq!(dash.overall.combined().unsuccessful, 18);
	}

	#[test]
	fn test_saturates_at_u64_max() {
		let sms = vec![bucket(2024, Month::Yanvar, u64::MAX, u64::MAX)];
		let call = vec![bucket(2024, Month::Yanvar, u64::MAX, 1)];

		let dash = Dashboard::build(&sms, &call, &[]);
		assert_eq!(dash.overall.combined().total, u64::MAX);
		assert_eq!(dash.year_totals[&2024].call.unsuccessful, u64::MAX - 1);
	}

	#[test]
	fn test_empty() {
		let dash = Dashboard::build(&[], &[], &[]);
		assert!(dash.rows.is_empty());
		assert_eq!(dash.overall.combined(), ChannelCounts::default());
	}
}
