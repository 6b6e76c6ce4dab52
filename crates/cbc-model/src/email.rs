//! # Templated Email
//!
//! The loose shape keeps header names and values in two parallel arrays,
//! recipients as plain strings, and the body as an unlabelled string. Each
//! needs a check: the arrays must line up, names must not repeat (ignoring
//! case), every recipient must be an address, and none may repeat.
//!
//! [`TemplatedEmail`] pairs each name with its value, compares names with
//! [`CaseInsensitiveString`], holds recipients as a set of [`EmailAddress`]es,
//! and labels the body as [`Html`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use cbc_core::{CaseInsensitiveString, EmailAddress};

use crate::error::ShapeError;

/// Templated email with parallel header arrays and raw recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatedEmailForm {
    #[serde(default)]
    pub header_keys: Vec<String>,
    #[serde(default)]
    pub header_values: Vec<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub recipients: Vec<String>,
}

/// Legacy validator.
pub fn is_valid_templated_email(form: &TemplatedEmailForm) -> bool {
    if form.header_keys.len() != form.header_values.len() {
        return false;
    }
    let keys = &form.header_keys;
    let duplicate_key = keys
        .iter()
        .enumerate()
        .any(|(i, k)| keys[..i].iter().any(|earlier| earlier.eq_ignore_ascii_case(k)));
    if duplicate_key {
        return false;
    }
    let mut seen = BTreeSet::new();
    form.recipients.iter().all(|r| match EmailAddress::parse(r.as_str()) {
        Ok(address) => seen.insert(address),
        Err(_) => false,
    })
}

/// An HTML document body.
///
/// Not parsed or sanitized; the type marks the string as markup so it is not
/// confused with plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Html(String);

impl Html {
    /// Mark a string as HTML. Nothing is checked.
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// The markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A templated email with paired headers and validated, distinct recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplatedEmail {
    headers: Vec<(CaseInsensitiveString, String)>,
    body: Html,
    recipients: BTreeSet<EmailAddress>,
}

impl TemplatedEmail {
    /// Build an email, refusing header names that repeat ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::DuplicateHeader`] naming the second occurrence.
    pub fn new(
        headers: Vec<(CaseInsensitiveString, String)>,
        body: Html,
        recipients: BTreeSet<EmailAddress>,
    ) -> Result<Self, ShapeError> {
        let mut names = BTreeSet::new();
        for (name, _) in &headers {
            if !names.insert(name) {
                return Err(ShapeError::DuplicateHeader(name.as_str().to_string()));
            }
        }
        Ok(Self {
            headers,
            body,
            recipients,
        })
    }

    /// The value of header `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.matches(name))
            .map(|(_, value)| value.as_str())
    }

    /// Headers in their original order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The HTML body.
    pub fn body(&self) -> &Html {
        &self.body
    }

    /// The distinct recipients, in address order.
    pub fn recipients(&self) -> &BTreeSet<EmailAddress> {
        &self.recipients
    }
}

impl TryFrom<TemplatedEmailForm> for TemplatedEmail {
    type Error = ShapeError;

    fn try_from(form: TemplatedEmailForm) -> Result<Self, Self::Error> {
        if form.header_keys.len() != form.header_values.len() {
            return Err(ShapeError::HeaderCountMismatch {
                keys: form.header_keys.len(),
                values: form.header_values.len(),
            });
        }
        let headers = form
            .header_keys
            .into_iter()
            .map(CaseInsensitiveString::new)
            .zip(form.header_values)
            .collect();

        let mut recipients = BTreeSet::new();
        for raw in form.recipients {
            let address = EmailAddress::parse(raw)?;
            if recipients.contains(&address) {
                return Err(ShapeError::DuplicateRecipient(address.as_str().to_string()));
            }
            recipients.insert(address);
        }

        Self::new(headers, Html::new(form.body), recipients)
    }
}
