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
use crate::comms::template::{Template, TemplateBook, TemplateType};
use crate::reports::table::Table;
use crate::util::format::{duration, Format, PLACEHOLDER};
use std::collections::BTreeMap;

pub struct TemplateReporter<'a> {
	fmt: &'a Format,
}

impl<'a> TemplateReporter<'a> {
	pub fn new(fmt: &'a Format) -> Self {
		Self { fmt }
	}

	pub fn print(
		&self,
		book: &TemplateBook,
		typ: Option<TemplateType>,
		templates: &[&Template],
	) {
		println!("{} templates", book.channel().label());
		if let Some(typ) = typ {
			println!("{}: {}", typ.label(), typ.description());
		}
		if templates.is_empty() {
			println!("No templates");
			return;
		}
		self.table(book.channel(), templates).print();
	}

	pub fn table(&self, channel: Channel, templates: &[&Template]) -> Table {
		let body = match channel {
			Channel::Call => "Audio",
			Channel::Sms | Channel::Mail => "Content",
		};

		let mut table = Table::new(7);
		table.add_header(vec![
			"ID", "Name", "Type", "Active", "Variables", body, "Updated",
		]);
		table.add_separator();

		for t in templates {
			let body = match channel {
				Channel::Call => match &t.audio_url {
					Some(url) => format!("{} ({})", url, duration(t.duration)),
					None => PLACEHOLDER.to_string(),
				},
				Channel::Sms | Channel::Mail => {
					t.content.as_deref().map(excerpt).unwrap_or_else(|| {
						PLACEHOLDER.to_string()
					})
				},
			};

			table.add_row(vec![
				t.id.clone(),
				t.name.clone(),
				t.typ.label().to_string(),
				if t.is_active { "yes" } else { "no" }.to_string(),
				t.variables.join(" "),
				body,
				self.fmt.datetime(&t.updated_at.naive_utc()),
			]);
		}
		table
	}

	/// Renders each template that has text with the given placeholder
	/// values.
	pub fn print_previews(
		&self,
		book: &TemplateBook,
		templates: &[&Template],
		values: &BTreeMap<String, String>,
	) {
		for t in templates.iter().filter(|t| t.content.is_some()) {
			if let Ok(text) = book.render(&t.id, values) {
				println!("\n{} ({}):\n{}", t.name, t.id, text);
			}
		}
	}
}

/// First line of a message, shortened for a table cell.
fn excerpt(content: &str) -> String {
	const MAX: usize = 48;
	let line = content.lines().next().unwrap_or("").trim();
	if line.chars().count() <= MAX {
		return line.to_string();
	}
	let cut: String = line.chars().take(MAX - 3).collect();
	format!("{}...", cut)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_excerpt() {
		assert_eq!(excerpt("Hurmatli {name}!\nQarzingiz"), "Hurmatli {name}!");
		let long = "a".repeat(60);
		let short = excerpt(&long);
		assert_eq!(short.chars().count(), 48);
		assert!(short.ends_with("..."));
	}
}
