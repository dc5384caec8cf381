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

//! Expanding escaped newlines in quoted text attribute values.

use std::borrow::Cow;

/// Rewrite every quoted value (a `"..."` segment right after `=`) of a formatted text line whose
/// content holds an escaped newline (`\n`), replacing the escapes `\n`, `\t`, `\\` and `\"`
/// with the characters they stand for. Other escapes are kept as the escaped character. The
/// surrounding quotes are dropped, so `body="{\n}"` becomes `body={`, a newline and `}`.
///
/// Lines without any `\n` escape, and segments without one, are left byte-for-byte unchanged.
/// Quoted keys are never rewritten, and a `=` or `"` inside one does not start a value. A
/// segment missing its closing quote ends the scan.
///
/// # Examples
///
/// ```
/// use logweave::unescape::unescape_multiline;
///
/// let line = br#"msg=hi v="a\nb""#;
/// assert_eq!(&*unescape_multiline(line), b"msg=hi v=a\nb");
///
/// let line = br#"msg=hi v="a b""#;
/// assert_eq!(&*unescape_multiline(line), line);
/// ```
pub fn unescape_multiline(line: &[u8]) -> Cow<'_, [u8]> {
    if find(line, b"\\n").is_none() {
        return Cow::Borrowed(line);
    }

    let mut out = line.to_vec();
    let mut cursor = 0;
    while let Some(offset) = out[cursor..].iter().position(|b| *b == b'"') {
        let open = cursor + offset;
        let Some(close) = closing_quote(&out, open + 1) else {
            break;
        };

        // quoted keys are stepped over whole
        let is_value = open > 0 && out[open - 1] == b'=';
        let content = &out[open + 1..close];
        if !is_value || find(content, b"\\n").is_none() {
            cursor = close + 1;
            continue;
        }

        let expanded = unescape(content);
        let len = expanded.len();
        out.splice(open..=close, expanded);
        cursor = open + len;
    }
    Cow::Owned(out)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

// index of the first unescaped `"` at or after `from`
fn closing_quote(text: &[u8], from: usize) -> Option<usize> {
    let mut escaped = false;
    for (i, b) in text.iter().enumerate().skip(from) {
        match (escaped, b) {
            (true, _) => escaped = false,
            (false, b'\\') => escaped = true,
            (false, b'"') => return Some(i),
            (false, _) => {}
        }
    }
    None
}

fn unescape(content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len());
    let mut bytes = content.iter();
    while let Some(&b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'n') => out.push(b'\n'),
            Some(b't') => out.push(b'\t'),
            Some(&other) => out.push(other),
            None => out.push(b'\\'),
        }
    }
    out
}
