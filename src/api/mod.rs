pub mod activities;
pub mod auth;
pub mod case_papers;
pub mod cleaning;
pub mod dashboard;
pub mod error;
pub mod feeding;
pub mod inventory;
pub mod menu;
pub mod middleware;
pub mod roles;
pub mod users;

pub use error::ApiError;

/// Collects every missing required field so a 400 can name all of them at
/// once instead of failing on the first. Empty/whitespace strings count as
/// missing, matching what the dashboard forms submit.
pub(crate) struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self {
            missing: Vec::new(),
        }
    }

    pub fn string(&mut self, name: &'static str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    pub fn required<T: Default>(&mut self, name: &'static str, value: Option<T>) -> T {
        value.unwrap_or_else(|| {
            self.missing.push(name);
            T::default()
        })
    }

    pub fn check(self) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::MissingFields(self.missing))
        }
    }
}
