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
use crate::config::config_file::Config;
use crate::data::error::DataError;
use anyhow::{anyhow, bail, Error};
use dirs::home_dir;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Read access to one dataset directory.
pub struct Filesystem {
	root: PathBuf,
}

impl Filesystem {
	pub fn new(root: &Path) -> Self {
		Self {
			root: root.to_path_buf(),
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Reads a JSON array from the named file in the dataset directory. A
	/// missing file is an empty list; any other failure is an error.
	pub fn read_list<T: DeserializeOwned>(
		&self,
		name: &str,
	) -> Result<Vec<T>, DataError> {
		let path = self.root.join(name);
		let shown = path.display().to_string();

		if !path.exists() {
			debug!("{} not present, treating as empty", shown);
			return Ok(vec![]);
		}

		let content =
			fs::read_to_string(&path).map_err(|source| DataError::Io {
				path: shown.clone(),
				source,
			})?;

		serde_json::from_str(&content).map_err(|source| DataError::Parse {
			path: shown,
			source,
		})
	}
}

/// Fetches the config from the given path, or the default path if none. A
/// missing default file yields the default config; a missing custom file is
/// an error. The boolean argument indicates whether identity.token_cmd
/// should be executed to fill in identity.token.
pub fn get_config(
	custom_config_path: Option<&String>,
	expand_auth: bool,
) -> Result<Config, Error> {
	let config_path = match &custom_config_path {
		None => match home_dir() {
			Some(home) => home.join(".config/dunr/config.toml"),
			None => {
				debug!("no home directory; using default config");
				return Ok(Config::default());
			},
		},
		Some(p) => PathBuf::from(p),
	};

	if !config_path.exists() {
		if custom_config_path.is_some() {
			bail!("config file not found: {}", config_path.display());
		}
		debug!("{} not present, using defaults", config_path.display());
		return Ok(Config::default());
	}

	let content = fs::read_to_string(&config_path)?;
	let mut config: Config = toml::from_str(&content)
		.map_err(|e| anyhow!("failed to parse config: {}", e))?;

	if !expand_auth {
		return Ok(config);
	}

	if let Some(identity) = &mut config.identity {
		if identity.token_cmd.is_some() && identity.token.is_some() {
			bail!("Only one of identity.token and identity.token_cmd may be specified")
		}

		if let Some(token_cmd) = &identity.token_cmd {
			let output = Command::new("sh")
				.arg("-c")
				.arg(token_cmd)
				.output()
				.map_err(|e| anyhow!("failed to execute token_cmd: {}", e))?;

			if !output.status.success() {
				bail!(
					"identity token_cmd failed with status {}: {}",
					output.status,
					String::from_utf8_lossy(&output.stderr)
				);
			}

			identity.token = Some(
				String::from_utf8(output.stdout)
					.map_err(|e| {
						anyhow!("failed to parse command output: {}", e)
					})?
					.trim()
					.to_string(),
			);
		}
	}

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::comms::sms::Sms;

	fn fixtures() -> Filesystem {
		Filesystem::new(
			&Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/test_data/standard"),
		)
	}

	#[test]
	fn test_missing_file_is_empty() {
		let list: Vec<Sms> = fixtures().read_list("nothing_here.json").unwrap();
		assert!(list.is_empty());
	}

	#[test]
	fn test_reads_fixture() {
		let list: Vec<Sms> = fixtures().read_list("sms.json").unwrap();
		assert_eq!(list.len(), 8);
	}

	#[test]
	fn test_missing_custom_config_fails() {
		let path = "/nonexistent/dunr/config.toml".to_string();
		assert!(get_config(Some(&path), false).is_err());
	}

	#[test]
	fn test_token_cmd() {
		let dir = std::env::temp_dir().join("dunr_test_token_cmd");
		fs::create_dir_all(&dir).unwrap();
		let path = dir.join("config.toml");
		fs::write(&path, "[identity]\ntoken_cmd = \"echo ' secret '\"\n").unwrap();

		let path = path.display().to_string();
		let config = get_config(Some(&path), true).unwrap();
		assert_eq!(config.identity.unwrap().token.as_deref(), Some("secret"));

		let unexpanded = get_config(Some(&path), false).unwrap();
		assert!(unexpanded.identity.unwrap().token.is_none());
	}
}
