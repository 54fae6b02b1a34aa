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
use crate::config::config_file::Identity;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
	#[error("no identity configured")]
	NotConfigured,

	#[error("token does not match the configured session")]
	InvalidToken,

	#[error("token expired at {0}")]
	Expired(DateTime<Utc>),
}

/// A bearer token as handed over by the sign-on service. Opaque here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
	pub value: String,
	pub expires_at: Option<DateTime<Utc>>,
}

/// Who a validated token belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
	pub user_id: String,
	pub name: String,
	pub email: String,
}

/// The seam to single sign-on. Nothing in the reports depends on it.
pub trait IdentityProvider {
	fn authenticate(&self) -> Result<Token, AuthError>;

	fn validate(&self, token: &str) -> Result<Principal, AuthError>;
}

/// A session issued elsewhere and recorded in the config file. It is only
/// ever checked against; no token is produced here.
pub struct ConfiguredIdentity {
	token: Option<Token>,
	principal: Principal,
	now: DateTime<Utc>,
}

impl ConfiguredIdentity {
	pub fn new(identity: Option<&Identity>, now: DateTime<Utc>) -> Self {
		let token = identity.and_then(|i| {
			i.token.as_ref().map(|value| Token {
				value: value.clone(),
				expires_at: i.expires_at,
			})
		});

		Self {
			token,
			principal: Principal {
				user_id: identity
					.and_then(|i| i.user_id.clone())
					.unwrap_or_default(),
				name: identity.and_then(|i| i.name.clone()).unwrap_or_default(),
				email: identity.and_then(|i| i.email.clone()).unwrap_or_default(),
			},
			now,
		}
	}

	fn check_expiry(&self, token: &Token) -> Result<(), AuthError> {
		match token.expires_at {
			Some(at) if at <= self.now => Err(AuthError::Expired(at)),
			_ => Ok(()),
		}
	}
}

impl IdentityProvider for ConfiguredIdentity {
	fn authenticate(&self) -> Result<Token, AuthError> {
		let token = self.token.as_ref().ok_or(AuthError::NotConfigured)?;
		self.check_expiry(token)?;
		Ok(token.clone())
	}

	fn validate(&self, token: &str) -> Result<Principal, AuthError> {
		let expected = self.token.as_ref().ok_or(AuthError::NotConfigured)?;
		if expected.value != token {
			return Err(AuthError::InvalidToken);
		}
		self.check_expiry(expected)?;
		Ok(self.principal.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn identity(expires_at: Option<&str>) -> Identity {
		Identity {
			token: Some("tok-1".to_string()),
			user_id: Some("u-7".to_string()),
			name: Some("Operator".to_string()),
			email: Some("operator@example.com".to_string()),
			expires_at: expires_at.map(|s| s.parse().unwrap()),
			..Default::default()
		}
	}

	fn now() -> DateTime<Utc> {
		"2025-06-01T12:00:00Z".parse().unwrap()
	}

	#[test]
	fn test_validate() {
		let config = identity(Some("2025-06-02T00:00:00Z"));
		let provider = ConfiguredIdentity::new(Some(&config), now());

		let principal = provider.validate("tok-1").unwrap();
		assert_eq!(principal.user_id, "u-7");
		assert_eq!(principal.email, "operator@example.com");
		assert_eq!(provider.validate("tok-2"), Err(AuthError::InvalidToken));
		assert_eq!(provider.authenticate().unwrap().value, "tok-1");
	}

	#[test]
	fn test_expired() {
		let config = identity(Some("2025-05-31T00:00:00Z"));
		let provider = ConfiguredIdentity::new(Some(&config), now());
		assert!(matches!(
			provider.validate("tok-1"),
			Err(AuthError::Expired(_))
		));
		assert!(provider.authenticate().is_err());
	}

	#[test]
	fn test_not_configured() {
		let provider = ConfiguredIdentity::new(None, now());
		assert_eq!(provider.authenticate(), Err(AuthError::NotConfigured));
		assert_eq!(provider.validate("x"), Err(AuthError::NotConfigured));
	}
}
