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
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub data: Option<Data>,

	#[serde(default)]
	pub display: Display,

	pub identity: Option<Identity>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Data {
	/// Dataset directory used when -d is not given
	pub dir: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Display {
	/// Appended to every money amount, e.g. "so'm"
	pub currency: String,
	pub group_separator: String,

	/// Short month names, January first
	pub month_names: Vec<String>,
}

impl Default for Display {
	fn default() -> Self {
		Self {
			currency: "so'm".to_string(),
			group_separator: " ".to_string(),
			month_names: [
				"yan", "fev", "mar", "apr", "may", "iyn", "iyl", "avg", "sen",
				"okt", "noy", "dek",
			]
			.iter()
			.map(|s| s.to_string())
			.collect(),
		}
	}
}

/// The single-sign-on session handed to this tool from outside. It is only
/// ever compared against, never generated here.
#[derive(Debug, Default, Deserialize)]
pub struct Identity {
	pub token: Option<String>,
	pub token_cmd: Option<String>,
	pub user_id: Option<String>,
	pub name: Option<String>,
	pub email: Option<String>,
	pub expires_at: Option<DateTime<Utc>>,
}
