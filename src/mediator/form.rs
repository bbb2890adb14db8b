// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//! HTML form extraction.
//!
//! The handshake pages (the IdP login page and the auto-submit relay page)
//! carry a single HTML form that a browser would submit. The first form of
//! the document is taken, its action is resolved against the page URL and
//! its named inputs become the submission fields.

use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

use crate::mediator::HandshakeStep;
use crate::mediator::error::MediatorError;

/// A parsed HTML form ready for submission.
#[derive(Clone, Debug)]
pub struct Form {
    /// The resolved submission URL.
    pub action: Url,
    /// The named input fields with their preset values.
    pub fields: HashMap<String, String>,
}

impl Form {
    /// Extract the first form of the document. The `Html` tree is dropped
    /// before returning so the result can cross await points.
    pub fn parse(step: HandshakeStep, base: &Url, body: &str) -> Result<Self, MediatorError> {
        let document = Html::parse_document(body);
        let form_selector =
            Selector::parse("form").map_err(|err| MediatorError::FormParse(err.to_string()))?;
        let input_selector =
            Selector::parse("input").map_err(|err| MediatorError::FormParse(err.to_string()))?;

        let form = document
            .select(&form_selector)
            .next()
            .ok_or(MediatorError::NoFormFound { step })?;

        let action = match form.value().attr("action") {
            Some(href) if !href.is_empty() => base.join(href)?,
            _ => base.clone(),
        };

        let mut fields = HashMap::new();
        for input in form.select(&input_selector) {
            if let Some(name) = input.value().attr("name") {
                fields.insert(
                    name.to_string(),
                    input.value().attr("value").unwrap_or_default().to_string(),
                );
            }
        }

        Ok(Self { action, fields })
    }

    /// Set (or overwrite) a field value.
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.fields.insert(name.into(), value.into());
    }
}
