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
use std::fs;
use std::process::Command;

/// Config used for every run, so a developer's own config never leaks in.
const CONFIG: &str = "tests/test_data/config.toml";

/// Dynamically collects test cases from a given directory. Each case is an
/// `_in.txt` file holding the command-line arguments, one per line, and an
/// optional file with the given suffix listing lines the output must
/// contain: `_out.txt` for stdout, `_err.txt` for stderr.
fn collect_test_cases(
	subfolder: &str,
	suffix: &str,
) -> Vec<(String, Option<String>)> {
	let dir_path = format!("tests/test_data/{}", subfolder);

	let mut test_cases = vec![];

	if let Ok(entries) = fs::read_dir(&dir_path) {
		let mut inputs = vec![];
		let mut outputs = vec![];

		for entry in entries.flatten() {
			let file_name =
				entry.file_name().into_string().unwrap_or_default();
			if file_name.ends_with("_in.txt") {
				inputs.push(file_name);
			} else if file_name.ends_with(suffix) {
				outputs.push(file_name);
			}
		}

		inputs.sort();

		for input_file in inputs {
			let output_file = input_file.replace("_in.txt", suffix);
			if outputs.contains(&output_file) {
				test_cases.push((input_file, Some(output_file)));
			} else {
				test_cases.push((input_file, None));
			}
		}
	}

	assert!(!test_cases.is_empty(), "no test cases in {}", dir_path);
	test_cases
}

#[test]
fn test_integration_cases() {
	let test_cases = collect_test_cases("cases", "_out.txt");
	execute("cases", test_cases, true);
}

#[test]
fn test_integration_should_fail() {
	let test_cases = collect_test_cases("failures", "_err.txt");
	execute("failures", test_cases, false);
}

fn read(subfolder: &str, file: &str) -> String {
	fs::read_to_string(format!("tests/test_data/{}/{}", subfolder, file))
		.expect("Failed to read test case file")
}

fn execute(
	subfolder: &str,
	test_cases: Vec<(String, Option<String>)>,
	should_succeed: bool,
) {
	for (input_file, expected_output_file) in test_cases {
		println!("running for {}...", input_file);

		let input = read(subfolder, &input_file);
		let args: Vec<&str> = input
			.lines()
			.map(|l| l.trim())
			.filter(|l| !l.is_empty())
			.collect();

		let all_args =
			[vec!["run", "--quiet", "--", "--config", CONFIG], args].concat();

		let output = Command::new("cargo")
			.args(all_args)
			.env_remove("DUNR_LOG")
			.output()
			.expect("Failed to execute process");

		if should_succeed {
			assert!(
				output.status.success(),
				"{} failed processing: {}",
				input_file,
				String::from_utf8_lossy(&output.stderr)
			);
		} else {
			assert!(
				!output.status.success(),
				"{} unexpectedly succeeded!",
				input_file
			);
		}

		// failures are checked against the error message on stderr
		let stream = if should_succeed {
			&output.stdout
		} else {
			&output.stderr
		};
		let actual = String::from_utf8_lossy(stream);

		let Some(expected_output_file) = expected_output_file else {
			continue;
		};
		let expected_output = read(subfolder, &expected_output_file);

		for expected in expected_output.lines().filter(|l| !l.trim().is_empty())
		{
			assert!(
				actual.contains(expected.trim()),
				"Output for {} is missing {:?}; got:\n{}",
				input_file,
				expected.trim(),
				actual.trim()
			);
		}
	}
}
