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
use thiserror::Error;

/// Problems found while reading a dataset directory. Any of these stops the
/// run; nothing is rendered from a partially understood dataset.
#[derive(Debug, Error)]
pub enum DataError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: String,
		source: std::io::Error,
	},

	#[error("{path}: {source}")]
	Parse {
		path: String,
		source: serde_json::Error,
	},

	#[error("{path}: duplicate entry {key}")]
	Duplicate { path: String, key: String },

	#[error(
		"debtor {id}: remaining debt {remaining} is not total {total} minus paid {paid} (use --lenient to accept)"
	)]
	Balance {
		id: String,
		total: u64,
		paid: u64,
		remaining: u64,
	},
}
