// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Encoders for identifiers embedded in resource paths.
//!
//! The appliance historically receives identifiers escaped one UTF-16 code unit
//! at a time, see [`encode_identifier`]. Standard UTF-8 percent-encoding is
//! available as [`encode_identifier_utf8`] for appliances known to decode it.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;

use crate::{Error, Result};

/// Characters that always need escaping inside a path segment.
const RESERVED: &[char] = &[
    ' ', '%', '$', '&', '+', ',', '/', ':', ';', '=', '?', '@', '<', '>', '#',
];

/// [`RESERVED`] plus ASCII controls, for UTF-8 percent-encoding.
///
/// Non-ASCII bytes are always encoded by `utf8_percent_encode`.
const RESERVED_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'%')
    .add(b'$')
    .add(b'&')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'?')
    .add(b'@')
    .add(b'<')
    .add(b'>')
    .add(b'#');

/// Bytes the http stack escapes in a path on its own, plus `\\` which it would
/// otherwise turn into `/`. `%` is absent so existing escapes stay untouched.
const WIRE_PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\');

/// How identifiers are escaped before they are embedded in a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierEncoding {
    /// One escape per UTF-16 code unit, see [`encode_identifier`].
    #[default]
    Legacy,
    /// Standard percent-encoding of UTF-8 bytes, see [`encode_identifier_utf8`].
    Utf8,
}

impl IdentifierEncoding {
    /// Encode input with this encoding.
    pub fn encode(self, input: &str) -> String {
        match self {
            IdentifierEncoding::Legacy => encode_identifier(input),
            IdentifierEncoding::Utf8 => encode_identifier_utf8(input),
        }
    }
}

/// Escape an identifier the way the appliance has always received it.
///
/// Every UTF-16 code unit above 128, and every reserved character, becomes
/// `%` followed by two "digits": `unit / 16` and `unit % 16`, each rendered as
/// `'0' + n` below ten and `'A' + n - 10` otherwise.
///
/// Units above 255 therefore produce a first digit outside `0-9A-F`, and the
/// code point 128 itself is passed through. Both are kept for wire compatibility.
pub fn encode_identifier(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    let mut units = [0u16; 2];

    for c in input.chars() {
        if (c as u32) <= 128 && !RESERVED.contains(&c) {
            s.push(c);
            continue;
        }

        for unit in c.encode_utf16(&mut units).iter() {
            let unit = u32::from(*unit);
            s.push('%');
            s.push(to_hex(unit / 16));
            s.push(to_hex(unit % 16));
        }
    }

    s
}

/// Escape an identifier with standard UTF-8 percent-encoding.
///
/// Printable ASCII input is encoded exactly like [`encode_identifier`].
pub fn encode_identifier_utf8(input: &str) -> String {
    utf8_percent_encode(input, RESERVED_SET).to_string()
}

/// Rewrite a resource path into the exact form it takes on the wire.
///
/// Raw non-ASCII characters left by [`encode_identifier`] (code point 128 and
/// the escapes of units above 255) would be escaped again by the http stack
/// after signing. This applies that escaping up front so the signed path and
/// the dispatched path are the same string. The result is stable: feeding it
/// back returns it unchanged.
///
/// Dot segments are rejected since they'd be collapsed before dispatch.
pub fn wire_path(path: &str) -> Result<String> {
    let is_dot_segment = |seg: &str| {
        matches!(
            seg.to_ascii_lowercase().as_str(),
            "." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e"
        )
    };
    if path.split('/').any(is_dot_segment) {
        return Err(Error::request_invalid(format!(
            "path {path:?} contains a dot segment"
        )));
    }

    Ok(utf8_percent_encode(path, WIRE_PATH_SET).to_string())
}

fn to_hex(n: u32) -> char {
    let c = if n < 10 {
        u32::from(b'0') + n
    } else {
        u32::from(b'A') + n - 10
    };
    // n never exceeds 0xFFFF / 16, which stays below the surrogate range.
    char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER)
}
