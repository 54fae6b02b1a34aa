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
use crate::auth::identity::{ConfiguredIdentity, IdentityProvider};
use crate::comms::kinds::{Channel, CommType, Keyed, Month};
use crate::comms::template::{TemplateBook, TemplateDraft, TemplateType};
use crate::data::dataset::Dataset;
use crate::data::filesystem::get_config;
use crate::filter::filter_state::{DateRange, FilterState};
use crate::filter::sort::SortState;
use crate::reports::aggregator::{ReportIndex, Selection};
use crate::reports::campaign_reporter::CampaignReporter;
use crate::reports::check_reporter::CheckReporter;
use crate::reports::dashboard::Dashboard;
use crate::reports::dashboard_reporter::DashboardReporter;
use crate::reports::debtor_reporter::DebtorReporter;
use crate::reports::log_reporter::LogReporter;
use crate::reports::template_reporter::TemplateReporter;
use crate::reports::view::{assemble, assemble_debtors, DebtorDetail};
use crate::util::date::Date;
use crate::util::format::Format;
use anyhow::{anyhow, bail, Error};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod comms;
mod config;
mod data;
mod filter;
mod reports;
mod util;

#[derive(Parser)]
#[command(
	name = "dunr",
	version = "0.1",
	about = "Collections communication log and campaign reports"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// Debtor id for debtor; channel (sms, calls, mail) for report and
	/// templates
	#[arg(required = false)]
	term: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Dataset directory (default: data.dir from config)
	#[arg(short, long)]
	data: Option<String>,

	/// Case-insensitive search over names, phones, addresses and contracts
	#[arg(short, long)]
	query: Option<String>,

	/// Only show records with this status, or "all"
	#[arg(short, long)]
	status: Option<String>,

	/// Only show records of this type, or "all"
	#[arg(short = 't', long = "type")]
	typ: Option<String>,

	/// Ignore records before this date (YYYY-MM-DD)
	#[arg(short, long)]
	begin: Option<String>,

	/// Ignore records after this date (YYYY-MM-DD)
	#[arg(short, long)]
	end: Option<String>,

	/// Sort debtors by this column; repeat to toggle direction
	#[arg(long, value_name = "FIELD")]
	sort: Vec<String>,

	/// Report year
	#[arg(short, long)]
	year: Option<u32>,

	/// Report month by name or number, or "all"
	#[arg(short, long)]
	month: Option<String>,

	/// Custom config file location (default: ~/.config/dunr/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Keep debtors whose balances do not add up, with a warning
	#[arg(long)]
	lenient: bool,

	/// Log debug output to stderr
	#[arg(short, long)]
	verbose: bool,

	/// Token to check with whoami (default: the configured token)
	#[arg(long)]
	token: Option<String>,

	/// Add a template with this name for the session
	#[arg(long, value_name = "NAME")]
	add: Option<String>,

	/// Edit the template with this id for the session
	#[arg(long, value_name = "ID")]
	edit: Option<String>,

	/// New name for an edited template
	#[arg(long)]
	name: Option<String>,

	/// Message text for an added or edited template
	#[arg(long)]
	content: Option<String>,

	/// Audio URL for an added or edited auto-call template
	#[arg(long)]
	audio: Option<String>,

	/// Template type for an added or edited template
	#[arg(long)]
	kind: Option<String>,

	/// Delete the template with this id for the session
	#[arg(long, value_name = "ID")]
	delete: Option<String>,

	/// Flip the active flag of the template with this id
	#[arg(long, value_name = "ID")]
	toggle: Option<String>,

	/// Placeholder value for template previews
	#[arg(long = "var", value_name = "KEY=VALUE")]
	vars: Vec<String>,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if !self.sort.is_empty() && self.command != Directive::Debtors {
			bail!("Sorting is only available for debtors");
		}

		let edits_templates = self.add.is_some()
			|| self.edit.is_some()
			|| self.delete.is_some()
			|| self.toggle.is_some()
			|| !self.vars.is_empty();
		if edits_templates && self.command != Directive::Templates {
			bail!("Template options are only available for templates");
		}

		if self.add.is_some() && self.edit.is_some() {
			bail!("Only one of --add and --edit may be given");
		}

		let drafts_template = self.name.is_some()
			|| self.content.is_some()
			|| self.audio.is_some()
			|| self.kind.is_some();
		if drafts_template && self.add.is_none() && self.edit.is_none() {
			bail!("--name, --content, --audio and --kind need --add or --edit");
		}

		Ok(())
	}

	fn channel(&self) -> Result<Channel, Error> {
		match &self.term {
			Some(term) => Channel::parse(term),
			None => bail!("No channel specified (sms, calls or mail)"),
		}
	}
}

#[derive(ValueEnum, Clone, Copy, PartialEq)]
enum Directive {
	Sms,   // sms log
	Calls, // auto-call log
	Mail,  // mail log

	Debtors, // debtor list
	Debtor,  // one debtor with linked communications

	Report,    // monthly campaign report for one channel
	Dashboard, // all channels by month

	Templates, // template list with session edits

	Check, // find possible data integrity concerns

	Whoami, // check the configured sign-on session
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	init_logging(args.verbose);
	args.validate()?;

	let whoami = args.command == Directive::Whoami;
	let config = get_config(args.config.as_ref(), whoami)?;

	if whoami {
		let provider =
			ConfiguredIdentity::new(config.identity.as_ref(), Utc::now());
		let token = match &args.token {
			Some(token) => token.clone(),
			None => provider.authenticate()?.value,
		};
		let principal = provider.validate(&token)?;
		println!(
			"{} <{}> ({})",
			principal.name, principal.email, principal.user_id
		);
		return Ok(());
	}

	let fmt = Format::new(&config.display)?;

	let dir = match &args.data {
		Some(dir) => dir.clone(),
		None => config
			.data
			.as_ref()
			.and_then(|d| d.dir.clone())
			.ok_or_else(|| {
				anyhow!("No dataset directory; use -d or set data.dir in config")
			})?,
	};
	let data = Dataset::load(Path::new(&dir), args.lenient)?;
	let range = get_range(&args)?;

	match args.command {
		Directive::Sms => {
			let state = filter_state(&args, range)?;
			LogReporter::new(&fmt).print_sms(&assemble(&data.sms, &state));
		},
		Directive::Calls => {
			let state = filter_state(&args, range)?;
			let view = assemble(&data.calls, &state);
			LogReporter::new(&fmt).print_calls(&view);
		},
		Directive::Mail => {
			let state = filter_state(&args, range)?;
			LogReporter::new(&fmt).print_mail(&assemble(&data.mail, &state));
		},
		Directive::Debtors => {
			let state = filter_state(&args, range)?;
			let sort = SortState::from_toggles(&args.sort)?;
			let view = assemble_debtors(&data.debtors, &state, &sort);
			LogReporter::new(&fmt).print_debtors(&view);
		},
		Directive::Debtor => {
			let Some(id) = &args.term else {
				bail!("No debtor id specified");
			};
			let detail = DebtorDetail::assemble(&data, id, &Date::today())?;
			DebtorReporter::new(&fmt).print_detail(&detail);
		},
		Directive::Report => {
			let channel = args.channel()?;
			let index = ReportIndex::new(data.reports(channel));
			let reporter = CampaignReporter::new(channel, &fmt);

			match selection(&args, &index)? {
				Some(selection) => {
					debug!("report selection {:?}", selection);
					reporter.print(&index, &selection);
				},
				None => println!("No data"),
			}
		},
		Directive::Dashboard => {
			let dashboard = Dashboard::build(
				data.reports(Channel::Sms),
				data.reports(Channel::Call),
				data.reports(Channel::Mail),
			);
			DashboardReporter::new(&fmt).print(&dashboard);
		},
		Directive::Templates => {
			let channel = args.channel()?;
			let mut book =
				TemplateBook::new(channel, data.templates(channel).to_vec());
			edit_templates(&args, &mut book)?;
			debug!("{} templates after edits", book.len());

			let typ = match args.typ.as_deref() {
				None | Some("all") => None,
				Some(key) => Some(TemplateType::parse(key)?),
			};
			let listed = book.list(typ);
			let reporter = TemplateReporter::new(&fmt);
			reporter.print(&book, typ, &listed);

			if !args.vars.is_empty() {
				let values = parse_vars(&args.vars)?;
				reporter.print_previews(&book, &listed, &values);
			}
		},
		Directive::Check => {
			CheckReporter::new(&data).print();
		},
		Directive::Whoami => {},
	}

	Ok(())
}

/// Logs go to stderr so reports on stdout stay clean. DUNR_LOG takes
/// precedence over -v.
fn init_logging(verbose: bool) {
	let default = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_env("DUNR_LOG")
		.unwrap_or_else(|_| EnvFilter::new(default));

	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr).with_target(false))
		.with(filter)
		.init();
}

fn get_range(args: &Cli) -> Result<DateRange, Error> {
	let parse = |s: &Option<String>| -> Result<Option<Date>, Error> {
		s.as_deref().map(Date::from_str).transpose()
	};
	Ok(DateRange::new(parse(&args.begin)?, parse(&args.end)?))
}

/// Builds the filter for a log view. "all" is the same as leaving a
/// categorical filter out.
fn filter_state<S: Keyed>(
	args: &Cli,
	range: DateRange,
) -> Result<FilterState<S>, Error> {
	let mut state = FilterState::default().with_range(range);

	if let Some(query) = &args.query {
		state = state.with_query(query);
	}
	if let Some(status) = args.status.as_deref().filter(|s| *s != "all") {
		state = state.with_status(S::parse(status)?);
	}
	if let Some(typ) = args.typ.as_deref().filter(|s| *s != "all") {
		state = state.with_type(CommType::parse(typ)?);
	}

	Ok(state)
}

/// Works out which buckets a report covers. Without -y or -m this is the
/// current month if reported, else the latest month. -y alone means the
/// whole year.
fn selection(
	args: &Cli,
	index: &ReportIndex,
) -> Result<Option<Selection>, Error> {
	let month = match args.month.as_deref() {
		None => None,
		Some(m) => Some(parse_month(m)?),
	};

	let Some(default) = index.default_selection(&Date::today()) else {
		return Ok(None);
	};

	Ok(Some(match (args.year, month) {
		(None, None) => default,
		(Some(year), None) => Selection { year, month: None },
		(year, Some(month)) => Selection {
			year: year.unwrap_or(default.year),
			month,
		},
	}))
}

/// Month by Uzbek name in any case, by number, or "all" for None.
fn parse_month(s: &str) -> Result<Option<Month>, Error> {
	if s.eq_ignore_ascii_case("all") {
		return Ok(None);
	}
	if let Ok(n) = s.parse::<u32>() {
		return Month::from_number(n)
			.map(Some)
			.ok_or_else(|| anyhow!("Invalid month number: {}", n));
	}
	Month::ALL
		.iter()
		.find(|m| m.key().eq_ignore_ascii_case(s))
		.map(|m| Some(*m))
		.ok_or_else(|| anyhow!("Unknown month: {}", s))
}

/// Applies the session's template edits in a fixed order: add, edit,
/// toggle, delete.
fn edit_templates(args: &Cli, book: &mut TemplateBook) -> Result<(), Error> {
	let kind = args.kind.as_deref().map(TemplateType::parse).transpose()?;
	let now = Utc::now();

	if let Some(name) = &args.add {
		let typ = kind.unwrap_or(TemplateType::PaymentReminder);
		let mut draft = TemplateDraft::new(name, typ);
		draft.content = args.content.clone();
		draft.audio_url = args.audio.clone();
		let id = book.add(draft, now)?;
		info!("added template {}", id);
	}

	if let Some(id) = &args.edit {
		let Some(existing) = book.get(id) else {
			bail!("No template with id {}", id);
		};
		let mut draft = TemplateDraft::from_template(existing);
		if let Some(name) = &args.name {
			draft.name = name.clone();
		}
		if let Some(kind) = kind {
			draft.typ = kind;
		}
		if args.content.is_some() {
			draft.content = args.content.clone();
		}
		if args.audio.is_some() {
			draft.audio_url = args.audio.clone();
		}
		book.update(id, draft, now)?;
		info!("updated template {}", id);
	}

	if let Some(id) = &args.toggle {
		let active = book.toggle_active(id, now)?;
		info!("template {} active: {}", id, active);
	}

	if let Some(id) = &args.delete {
		let removed = book.delete(id)?;
		info!("deleted template {} ({})", removed.id, removed.name);
	}

	Ok(())
}

fn parse_vars(vars: &[String]) -> Result<BTreeMap<String, String>, Error> {
	vars.iter()
		.map(|v| match v.split_once('=') {
			Some((k, val)) => Ok((k.trim().to_string(), val.to_string())),
			None => bail!("Expected KEY=VALUE, got {}", v),
		})
		.collect()
}
