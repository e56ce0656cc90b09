use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// First empty field, if any. Whitespace counts as a value.
    pub fn missing(&self) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| self.get(*field).is_empty())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("The {} field is required", .0.name())]
    Missing(Field),
    #[error("A message is already being sent")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    Idle,
    Sending { until: f64 },
}

/// Contact form with a simulated submission delay; nothing leaves the page.
#[derive(Debug)]
pub struct ContactForm {
    fields: FormFields,
    state: FormState,
    delay: f64,
}

impl ContactForm {
    pub fn new(delay: f64) -> Self {
        Self {
            fields: FormFields::default(),
            state: FormState::Idle,
            delay,
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.state, FormState::Sending { .. })
    }

    pub fn submit(&mut self, now: f64) -> Result<(), FormError> {
        if self.is_sending() {
            return Err(FormError::Busy);
        }
        if let Some(field) = self.fields.missing() {
            return Err(FormError::Missing(field));
        }
        self.state = FormState::Sending {
            until: now + self.delay,
        };
        log::info!("sending contact message from {}", self.fields.email);
        Ok(())
    }

    /// Returns `true` once, when a pending submission completes.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.state {
            FormState::Sending { until } if now >= until => {
                self.fields = FormFields::default();
                self.state = FormState::Idle;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new(2000.0);
        form.set(Field::Name, "Ada");
        form.set(Field::Email, "ada@example.com");
        form.set(Field::Subject, "Hola");
        form.set(Field::Message, "Un saludo");
        form
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut form = filled();
        form.set(Field::Subject, "");
        assert_eq!(form.submit(0.0), Err(FormError::Missing(Field::Subject)));
        assert!(!form.is_sending());
        assert_eq!(form.fields().name, "Ada");
    }

    #[test]
    fn test_whitespace_counts_as_filled() {
        let mut form = filled();
        form.set(Field::Subject, "   ");
        assert_eq!(form.submit(0.0), Ok(()));
    }

    #[test]
    fn test_successful_submission_resets() {
        let mut form = filled();
        assert_eq!(form.submit(100.0), Ok(()));
        assert!(form.is_sending());
        assert_eq!(form.submit(200.0), Err(FormError::Busy));
        assert!(!form.tick(2099.0));
        assert!(form.tick(2100.0));
        assert!(!form.is_sending());
        assert_eq!(form.fields(), &FormFields::default());
        assert!(!form.tick(5000.0));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FormError::Missing(Field::Email).to_string(),
            "The email field is required"
        );
    }
}
