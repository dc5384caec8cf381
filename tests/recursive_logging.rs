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

// a value whose Display logs through the log crate while its own record is being built
struct Thing<'a>(&'a str);

impl std::fmt::Display for Thing<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        log::warn!("formatting wrapping ({})", self.0);
        f.write_str(self.0)
    }
}

#[test]
fn test_meta_logging_in_format_works() {
    let capture = Testing::default();
    let logger = Config::default()
        .json(false)
        .colorize_line(true)
        .build_with(capture.clone());
    logweave::bridge::setup_log_crate(logger.clone()).unwrap();

    log::info!("I'm logging {}!", Thing("aha"));
    logweave::infof!(logger, "and directly {}", Thing("oho"));

    let lines = capture.lines();
    assert_eq!(lines.len(), 4, "{lines:#?}");
    assert!(lines[0].contains("msg=\"formatting wrapping (aha)\""));
    assert!(lines[1].contains("msg=\"I'm logging aha!\""));
    assert!(lines[2].contains("msg=\"formatting wrapping (oho)\""));
    assert!(lines[3].contains("msg=\"and directly oho\""));
    for line in &lines {
        assert!(line.starts_with("\x1b["), "{line:?}");
        assert!(line.ends_with("\x1b[0m"), "{line:?}");
    }
}
