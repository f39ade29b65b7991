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

//! Time related utils.

use crate::{Error, Result};
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// The format used by the `Date` header and the signed timestamp.
///
/// The zone is always the literal `GMT`, never the host's local zone.
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into http date: `Wed, 04 Oct 2023 12:00:00 GMT`
///
/// Sub-second precision is dropped.
pub fn format_http_date(t: DateTime) -> String {
    t.format(HTTP_DATE).to_string()
}

/// Parse http date like `Wed, 04 Oct 2023 12:00:00 GMT` back into time.
pub fn parse_http_date(s: &str) -> Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, HTTP_DATE)
        .map_err(|e| Error::request_invalid(format!("invalid http date: {s}")).with_source(e))?;
    Ok(t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_http_date() {
        let t = Utc.with_ymd_and_hms(2023, 10, 4, 12, 0, 0).unwrap();
        assert_eq!(format_http_date(t), "Wed, 04 Oct 2023 12:00:00 GMT");
    }

    #[test]
    fn test_format_ignores_source_offset() {
        // 14:00 at +02:00 is 12:00 GMT.
        let local = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 10, 4, 14, 0, 0)
            .unwrap();
        assert_eq!(
            format_http_date(local.with_timezone(&Utc)),
            "Wed, 04 Oct 2023 12:00:00 GMT"
        );
    }

    #[test]
    fn test_http_date_parses_back() {
        let t = now();
        let s = format_http_date(t);
        assert!(s.ends_with(" GMT"));

        let parsed = parse_http_date(&s).unwrap();
        assert_eq!(parsed.timestamp(), t.timestamp());
        assert_eq!(format_http_date(parsed), s);
    }

    #[test]
    fn test_parse_rejects_other_zones() {
        assert!(parse_http_date("Wed, 04 Oct 2023 12:00:00 PST").is_err());
        assert!(parse_http_date("2023-10-04T12:00:00Z").is_err());
    }
}
