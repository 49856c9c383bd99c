use std::fmt;

use crate::{
    date_to_timestamp, date_to_timestamp_in, timestamp_to_date,
    domain::{Redirect, RedirectRequest},
    DateError, RedirectError,
};

pub const REQUIRED_MESSAGE: &str = "Please fill in this field";
pub const FROM_PATH_FORMAT_MESSAGE: &str = "Path must start with a forward slash";
pub const TO_URL_FORMAT_MESSAGE: &str = "URL must start with http or https";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FromPath,
    ToUrl,
}

impl FormField {
    pub const ALL: [FormField; 2] = [FormField::FromPath, FormField::ToUrl];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FromPath => "fromPath",
            FormField::ToUrl => "toUrl",
        }
    }
}

/// Per-field validation messages. An empty string means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub from_path: String,
    pub to_url: String,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.from_path.is_empty() && self.to_url.is_empty()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FromPath => &self.from_path,
            FormField::ToUrl => &self.to_url,
        }
    }

    /// Fields that failed, with their message.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        FormField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .filter(|(_, message)| !message.is_empty())
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field.as_str(), message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub fn validate_from_path(from_path: &str) -> Option<&'static str> {
    if from_path.is_empty() {
        Some(REQUIRED_MESSAGE)
    } else if !from_path.starts_with('/') {
        Some(FROM_PATH_FORMAT_MESSAGE)
    } else {
        None
    }
}

pub fn validate_to_url(to_url: &str) -> Option<&'static str> {
    if to_url.is_empty() {
        Some(REQUIRED_MESSAGE)
    } else if !to_url.starts_with("http") {
        Some(TO_URL_FORMAT_MESSAGE)
    } else {
        None
    }
}

/// Field values shared by the create and edit flows. Dates are `YYYY-MM-DD`
/// strings, `None` or empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectForm {
    pub from_path: String,
    pub to_url: String,
    pub starts_on: Option<String>,
    pub stops_on: Option<String>,
}

impl RedirectForm {
    /// Pre-fill an edit form from a stored redirect.
    pub fn from_redirect(redirect: &Redirect) -> Result<Self, DateError> {
        Ok(Self {
            from_path: redirect.from_path.clone(),
            to_url: redirect.to_url.clone(),
            starts_on: non_empty(timestamp_to_date(redirect.starts_on)?),
            stops_on: non_empty(timestamp_to_date(redirect.stops_on)?),
        })
    }

    /// Both fields are checked even when the first one fails.
    pub fn validate(&self) -> FormErrors {
        FormErrors {
            from_path: validate_from_path(&self.from_path)
                .unwrap_or_default()
                .to_string(),
            to_url: validate_to_url(&self.to_url)
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Build the request body in the local time zone.
    pub fn to_request(&self) -> Result<RedirectRequest, DateError> {
        Ok(RedirectRequest {
            from_path: self.from_path.clone(),
            to_url: self.to_url.clone(),
            starts_on: date_to_timestamp(self.starts_on.as_deref())?,
            stops_on: date_to_timestamp(self.stops_on.as_deref())?,
        })
    }

    pub fn to_request_in<Tz: chrono::TimeZone>(
        &self,
        tz: &Tz,
    ) -> Result<RedirectRequest, DateError> {
        Ok(RedirectRequest {
            from_path: self.from_path.clone(),
            to_url: self.to_url.clone(),
            starts_on: date_to_timestamp_in(tz, self.starts_on.as_deref())?,
            stops_on: date_to_timestamp_in(tz, self.stops_on.as_deref())?,
        })
    }

    /// Validate, then build the request. Nothing reaches the network when
    /// this fails.
    pub fn submission(&self) -> Result<RedirectRequest, RedirectError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(RedirectError::ValidationFailed(errors));
        }
        Ok(self.to_request()?)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
