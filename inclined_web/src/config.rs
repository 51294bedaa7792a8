// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use inclined::TourOptions;

use crate::DomError;

/// Reads tour options from a JSON object. Missing fields keep their defaults;
/// a missing or blank string means all defaults.
pub fn parse_options(json: Option<&str>) -> Result<TourOptions, DomError> {
    match json.map(str::trim) {
        None | Some("") => Ok(TourOptions::default()),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}
