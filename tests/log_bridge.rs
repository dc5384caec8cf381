// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use logweave::Config;
use logweave::append::Testing;

// the log crate's global logger is process-wide, so everything lives in one test
#[test]
fn test_log_crate_records_are_forwarded() {
    let first = Testing::default();
    let logger = Config::default()
        .json(false)
        .add_caller(true)
        .build_with(first.clone());
    logweave::bridge::setup_log_crate(logger).unwrap();

    log::debug!("below threshold");
    log::info!(attempt = 2, user = "ana", ok = true; "signed {}", "in");
    log::error!("plain");

    let lines = first.lines();
    assert_eq!(lines.len(), 2, "{lines:#?}");
    assert!(
        lines[0].contains("level=INFO msg=\"signed in\" caller=tests/log_bridge.rs:"),
        "{}",
        lines[0]
    );
    assert!(
        lines[0].ends_with(" attempt=2 user=ana ok=true"),
        "{}",
        lines[0]
    );
    assert!(lines[1].contains("level=ERROR msg=plain"), "{}", lines[1]);
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    // a second setup swaps the target, and the old logger keeps working on its own
    let second = Testing::default();
    let debug = Config::default()
        .level("debug")
        .build_with(second.clone());
    logweave::bridge::setup_log_crate(debug).unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Debug);

    log::debug!(kind = "json"; "now visible");
    assert_eq!(first.lines().len(), 2);

    let line: serde_json::Value = serde_json::from_str(&second.contents()).unwrap();
    assert_eq!(line["level"], "DEBUG");
    assert_eq!(line["msg"], "now visible");
    assert_eq!(line["kind"], "json");
}
