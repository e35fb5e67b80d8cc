use serde::Deserialize;

use crate::store::{NAME_MAX, SEARCH_TERM_MAX};

const ACTOR_MAX: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every failed field of one submission, rendered as a single flash message.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("Errors in form submission: {}", join_errors(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError { field, message: message.into() });
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.0.is_empty() { Ok(value) } else { Err(self) }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect::<Vec<_>>().join("; ")
}

/// Home page submission, sent as query parameters to `/names`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NameForm {
    pub name: Option<String>,
    pub query: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewName {
    pub name: String,
    pub search_term: String,
}

impl NameForm {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.query.is_none()
    }

    pub fn validate(&self) -> Result<NewName, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = required_length(&mut errors, "name", self.name.as_deref(), NAME_MAX);
        let search_term =
            required_length(&mut errors, "query", self.query.as_deref(), SEARCH_TERM_MAX);

        errors.into_result(NewName {
            name: name.unwrap_or_default(),
            search_term: search_term.unwrap_or_default(),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub actor: String,
}

impl MovieForm {
    /// Returns the trimmed actor name.
    pub fn validate(&self) -> Result<String, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let actor = required_length(&mut errors, "actor", Some(self.actor.as_str()), ACTOR_MAX);

        if let Some(actor) = &actor {
            if actor.split(' ').filter(|t| !t.is_empty()).count() < 2 {
                errors.push("actor", "Actor must have first and last name!");
            }
        }

        errors.into_result(actor.unwrap_or_default())
    }
}

/// Trims `value` and checks it is present and at most `max` characters long.
/// Returns the trimmed value whenever it is non-empty.
fn required_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        errors.push(field, "This field is required.");
        return None;
    }

    if value.chars().count() > max {
        errors.push(field, format!("Field must be between 1 and {max} characters long."));
    }

    Some(value.to_string())
}
