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
use crate::comms::kinds::{Channel, Keyed};
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
	PaymentReminder,
	PaymentConfirmation,
	DebtNotification,
	Custom,
}

impl TemplateType {
	pub fn description(&self) -> &'static str {
		match self {
			TemplateType::PaymentReminder => {
				"Qarzdorlarga to'lov eslatmasi yuborish uchun"
			},
			TemplateType::PaymentConfirmation => {
				"To'lov qabul qilinganini tasdiqlash uchun"
			},
			TemplateType::DebtNotification => "Qarz haqida xabar berish uchun",
			TemplateType::Custom => "O'zingizning maxsus shabloningiz",
		}
	}

	/// Placeholders a new template of this type starts with
	pub fn default_variables(&self) -> &'static [&'static str] {
		match self {
			TemplateType::PaymentReminder => {
				&["{name}", "{amount}", "{dueDate}", "{account}"]
			},
			TemplateType::PaymentConfirmation => {
				&["{name}", "{amount}", "{date}", "{transactionId}"]
			},
			TemplateType::DebtNotification => {
				&["{name}", "{totalDebt}", "{overdueAmount}", "{daysOverdue}"]
			},
			TemplateType::Custom => &["{name}", "{amount}", "{date}"],
		}
	}
}

impl Keyed for TemplateType {
	const ALL: &'static [Self] = &[
		TemplateType::PaymentReminder,
		TemplateType::PaymentConfirmation,
		TemplateType::DebtNotification,
		TemplateType::Custom,
	];

	fn key(&self) -> &'static str {
		match self {
			TemplateType::PaymentReminder => "payment_reminder",
			TemplateType::PaymentConfirmation => "payment_confirmation",
			TemplateType::DebtNotification => "debt_notification",
			TemplateType::Custom => "custom",
		}
	}

	fn label(&self) -> &'static str {
		match self {
			TemplateType::PaymentReminder => "To'lov eslatmasi",
			TemplateType::PaymentConfirmation => "To'lov tasdiqlash",
			TemplateType::DebtNotification => "Qarz xabarnomasi",
			TemplateType::Custom => "Maxsus shablon",
		}
	}
}

/// A reusable message (SMS, mail) or recorded audio (auto-call) with
/// placeholder variables.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
	pub id: String,

	#[serde(rename = "type")]
	pub typ: TemplateType,

	pub name: String,
	pub content: Option<String>,
	pub audio_url: Option<String>,

	/// Audio length in seconds
	pub duration: Option<u32>,

	#[serde(default)]
	pub variables: Vec<String>,

	pub is_active: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// The editable part of a template, as submitted by an add or edit.
#[derive(Clone, Debug)]
pub struct TemplateDraft {
	pub name: String,
	pub typ: TemplateType,
	pub content: Option<String>,
	pub audio_url: Option<String>,
	pub duration: Option<u32>,
	pub is_active: bool,
}

impl TemplateDraft {
	pub fn new(name: &str, typ: TemplateType) -> Self {
		Self {
			name: name.to_string(),
			typ,
			content: None,
			audio_url: None,
			duration: None,
			is_active: true,
		}
	}

	/// Starts a draft from an existing template, for partial edits.
	pub fn from_template(t: &Template) -> Self {
		Self {
			name: t.name.clone(),
			typ: t.typ,
			content: t.content.clone(),
			audio_url: t.audio_url.clone(),
			duration: t.duration,
			is_active: t.is_active,
		}
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
	#[error("template name must not be empty")]
	MissingName,

	#[error("{0} templates need message content")]
	MissingContent(&'static str),

	#[error("auto-call templates need an audio URL")]
	MissingAudio,

	#[error("no template with id {0}")]
	NotFound(String),

	#[error("template {0} has no text to preview")]
	NoText(String),
}

/// The session's templates for one channel. Edits live only as long as the
/// book does; nothing is written back to the dataset.
#[derive(Debug)]
pub struct TemplateBook {
	channel: Channel,
	templates: Vec<Template>,
	placeholder: Regex,
}

impl TemplateBook {
	pub fn new(channel: Channel, templates: Vec<Template>) -> Self {
		Self {
			channel,
			templates,
			placeholder: Regex::new(r"\{(\w+)\}").unwrap(),
		}
	}

	pub fn channel(&self) -> Channel {
		self.channel
	}

	pub fn len(&self) -> usize {
		self.templates.len()
	}

	pub fn get(&self, id: &str) -> Option<&Template> {
		self.templates.iter().find(|t| t.id == id)
	}

	/// All templates of the given type, or every template for None, in
	/// insertion order.
	pub fn list(&self, typ: Option<TemplateType>) -> Vec<&Template> {
		self.templates
			.iter()
			.filter(|t| typ.map_or(true, |typ| t.typ == typ))
			.collect()
	}

	/// Adds a template and returns its id. Ids derive from the creation
	/// time in milliseconds, bumped until unique within the book.
	pub fn add(
		&mut self,
		draft: TemplateDraft,
		now: DateTime<Utc>,
	) -> Result<String, TemplateError> {
		self.validate(&draft)?;

		let mut n = now.timestamp_millis();
		while self.get(&n.to_string()).is_some() {
			n += 1;
		}
		let id = n.to_string();

		self.templates.push(Template {
			id: id.clone(),
			typ: draft.typ,
			name: draft.name.trim().to_string(),
			content: draft.content,
			audio_url: draft.audio_url,
			duration: draft.duration,
			variables: draft
				.typ
				.default_variables()
				.iter()
				.map(|v| v.to_string())
				.collect(),
			is_active: draft.is_active,
			created_at: now,
			updated_at: now,
		});

		Ok(id)
	}

	/// Replaces the editable fields of a template. Its variables stay as
	/// they were, even if the type changes.
	pub fn update(
		&mut self,
		id: &str,
		draft: TemplateDraft,
		now: DateTime<Utc>,
	) -> Result<(), TemplateError> {
		self.validate(&draft)?;

		let t = self.find_mut(id)?;
		t.name = draft.name.trim().to_string();
		t.typ = draft.typ;
		t.content = draft.content;
		t.audio_url = draft.audio_url;
		t.duration = draft.duration;
		t.is_active = draft.is_active;
		t.updated_at = now;

		Ok(())
	}

	pub fn delete(&mut self, id: &str) -> Result<Template, TemplateError> {
		match self.templates.iter().position(|t| t.id == id) {
			Some(i) => Ok(self.templates.remove(i)),
			None => Err(TemplateError::NotFound(id.to_string())),
		}
	}

	/// Flips the active flag and returns the new value.
	pub fn toggle_active(
		&mut self,
		id: &str,
		now: DateTime<Utc>,
	) -> Result<bool, TemplateError> {
		let t = self.find_mut(id)?;
		t.is_active = !t.is_active;
		t.updated_at = now;
		Ok(t.is_active)
	}

	/// Fills the template's placeholders from the given values. Placeholders
	/// with no value are left as written.
	pub fn render(
		&self,
		id: &str,
		values: &BTreeMap<String, String>,
	) -> Result<String, TemplateError> {
		let t = self
			.get(id)
			.ok_or_else(|| TemplateError::NotFound(id.to_string()))?;
		let content = t
			.content
			.as_ref()
			.ok_or_else(|| TemplateError::NoText(id.to_string()))?;

		Ok(self
			.placeholder
			.replace_all(content, |caps: &Captures| match values.get(&caps[1]) {
				Some(v) => v.clone(),
				None => caps[0].to_string(),
			})
			.into_owned())
	}

	/// Placeholders that actually occur in a piece of text, in order of
	/// first appearance.
	pub fn placeholders(&self, text: &str) -> Vec<String> {
		let mut found: Vec<String> = vec![];
		for caps in self.placeholder.captures_iter(text) {
			let p = caps[0].to_string();
			if !found.contains(&p) {
				found.push(p);
			}
		}
		found
	}

	fn validate(&self, draft: &TemplateDraft) -> Result<(), TemplateError> {
		if draft.name.trim().is_empty() {
			return Err(TemplateError::MissingName);
		}

		let filled = |s: &Option<String>| {
			s.as_ref().is_some_and(|s| !s.trim().is_empty())
		};

		match self.channel {
			Channel::Call if !filled(&draft.audio_url) => {
				Err(TemplateError::MissingAudio)
			},
			Channel::Sms | Channel::Mail if !filled(&draft.content) => {
				Err(TemplateError::MissingContent(self.channel.label()))
			},
			_ => Ok(()),
		}
	}

	fn find_mut(&mut self, id: &str) -> Result<&mut Template, TemplateError> {
		self.templates
			.iter_mut()
			.find(|t| t.id == id)
			.ok_or_else(|| TemplateError::NotFound(id.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn at(secs: i64) -> DateTime<Utc> {
		Utc.timestamp_opt(secs, 0).unwrap()
	}

	fn sms_book() -> TemplateBook {
		TemplateBook::new(
			Channel::Sms,
			vec![Template {
				id: "1".to_string(),
				typ: TemplateType::PaymentReminder,
				name: "Asosiy to'lov eslatmasi".to_string(),
				content: Some(
					"Hurmatli {name}, {amount} so'm qarz. Muddat: {dueDate}."
						.to_string(),
				),
				audio_url: None,
				duration: None,
				variables: vec!["{name}".to_string()],
				is_active: true,
				created_at: at(1_700_000_000),
				updated_at: at(1_700_000_000),
			}],
		)
	}

	fn sms_draft(name: &str, content: &str) -> TemplateDraft {
		TemplateDraft {
			content: Some(content.to_string()),
			..TemplateDraft::new(name, TemplateType::Custom)
		}
	}

	#[test]
	fn test_add_assigns_time_based_unique_ids() {
		let mut book = sms_book();
		let now = at(1_705_000_000);

		let a = book.add(sms_draft("A", "text {name}"), now).unwrap();
		let b = book.add(sms_draft("B", "text"), now).unwrap();

		assert_eq!(a, "1705000000000");
		assert_eq!(b, "1705000000001");
		assert_eq!(book.len(), 3);

		let added = book.get(&a).unwrap();
		assert_eq!(added.variables, vec!["{name}", "{amount}", "{date}"]);
		assert_eq!(added.created_at, now);
		assert!(added.is_active);
	}

	#[test]
	fn test_add_validates_draft() {
		let mut book = sms_book();
		let now = at(0);

		assert_eq!(
			book.add(sms_draft("  ", "text"), now),
			Err(TemplateError::MissingName)
		);
		assert_eq!(
			book.add(TemplateDraft::new("x", TemplateType::Custom), now),
			Err(TemplateError::MissingContent("SMS"))
		);

		let mut calls = TemplateBook::new(Channel::Call, vec![]);
		assert_eq!(
			calls.add(sms_draft("x", "text"), now),
			Err(TemplateError::MissingAudio)
		);
		let audio = TemplateDraft {
			audio_url: Some("/audio/x.mp3".to_string()),
			duration: Some(45),
			..TemplateDraft::new("x", TemplateType::PaymentReminder)
		};
		assert!(calls.add(audio, now).is_ok());
	}

	#[test]
	fn test_update_keeps_variables() {
		let mut book = sms_book();
		let later = at(1_800_000_000);

		let mut draft = TemplateDraft::from_template(book.get("1").unwrap());
		draft.name = "Yangi nom".to_string();
		draft.typ = TemplateType::DebtNotification;
		book.update("1", draft, later).unwrap();

		let t = book.get("1").unwrap();
		assert_eq!(t.name, "Yangi nom");
		assert_eq!(t.typ, TemplateType::DebtNotification);
		assert_eq!(t.variables, vec!["{name}"]);
		assert_eq!(t.updated_at, later);
		assert_eq!(t.created_at, at(1_700_000_000));
	}

	#[test]
	fn test_delete_and_toggle() {
		let mut book = sms_book();

		assert_eq!(book.toggle_active("1", at(5)), Ok(false));
		assert_eq!(book.toggle_active("1", at(6)), Ok(true));
		assert_eq!(book.get("1").unwrap().updated_at, at(6));

		assert!(matches!(
			book.toggle_active("9", at(7)),
			Err(TemplateError::NotFound(_))
		));

		assert_eq!(book.delete("1").unwrap().id, "1");
		assert_eq!(book.len(), 0);
		assert!(book.delete("1").is_err());
	}

	#[test]
	fn test_list_by_type() {
		let mut book = sms_book();
		book.add(sms_draft("B", "text"), at(10)).unwrap();

		assert_eq!(book.list(None).len(), 2);
		assert_eq!(book.list(Some(TemplateType::Custom)).len(), 1);
		assert_eq!(book.list(Some(TemplateType::DebtNotification)).len(), 0);
	}

	#[test]
	fn test_render_leaves_unknown_placeholders() {
		let book = sms_book();
		let mut values = BTreeMap::new();
		values.insert("name".to_string(), "Alisher Karimov".to_string());
		values.insert("amount".to_string(), "3 000 000".to_string());

		assert_eq!(
			book.render("1", &values).unwrap(),
			"Hurmatli Alisher Karimov, 3 000 000 so'm qarz. Muddat: {dueDate}."
		);
		assert!(book.render("2", &values).is_err());
	}

	#[test]
	fn test_placeholders() {
		let book = sms_book();
		assert_eq!(
			book.placeholders("{name} {amount} {name} {x-y}"),
			vec!["{name}", "{amount}"]
		);
	}
}
