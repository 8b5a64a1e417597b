//! Field checks for request bodies. Messages follow the `<field>: <constraint>` shape the
//! front-end already displays.

#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_blank(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.0.push(format!("{field}: must not be blank"));
        }
        self
    }

    /// Length in characters, inclusive bounds.
    pub fn size(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let len = value.chars().count();
        if len < min || len > max {
            self.0.push(format!("{field}: size must be between {min} and {max}"));
        }
        self
    }

    /// Empty values pass; pair with [`Violations::not_blank`] when the field is mandatory.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.is_empty() && !is_well_formed_email(value) {
            self.0.push(format!("{field}: must be a well-formed email address"));
        }
        self
    }

    pub fn required<T>(&mut self, field: &str, value: &Option<T>) -> &mut Self {
        if value.is_none() {
            self.0.push(format!("{field}: must not be null"));
        }
        self
    }

    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

fn is_well_formed_email(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    if local.contains('@') || local.starts_with('.') || local.ends_with('.') {
        return false;
    }
    domain
        .split('.')
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}
