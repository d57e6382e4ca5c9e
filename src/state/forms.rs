use athletrack_api::TeamRegistration;

/// A single-line text input.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    /// Render as asterisks.
    pub secret: bool,
}

impl TextField {
    fn new(label: &'static str) -> Self {
        Self { label, value: String::new(), secret: false }
    }

    fn secret(label: &'static str) -> Self {
        Self { label, value: String::new(), secret: true }
    }

    pub fn display_value(&self) -> String {
        if self.secret {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Fields plus a cursor; shared by the registration and login forms.
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focused: usize,
}

impl Form {
    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
        }
    }

    fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map(|f| f.value.trim()).unwrap_or_default()
    }

    fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focused = 0;
    }
}

// ---------------------------------------------------------------------------
// Team registration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStatus {
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub tournament_id: String,
    pub form: Form,
    pub errors: Vec<String>,
    pub status: SubmitStatus,
}

const TEAM_NAME: usize = 0;
const ORIGIN: usize = 1;
const COACH_NAME: usize = 2;
const COACH_PHONE: usize = 3;
const PLAYERS: usize = 4;

impl RegistrationForm {
    pub fn new(tournament_id: &str) -> Self {
        Self {
            tournament_id: tournament_id.to_string(),
            form: Form {
                fields: vec![
                    TextField::new("Team name"),
                    TextField::new("Origin"),
                    TextField::new("Coach name"),
                    TextField::new("Coach phone"),
                    TextField::new("Players (comma separated)"),
                ],
                focused: 0,
            },
            errors: Vec::new(),
            status: SubmitStatus::Editing,
        }
    }

    /// Validate and build the request body. Errors are kept on the form.
    pub fn validate(&mut self) -> Option<TeamRegistration> {
        let mut errors = Vec::new();
        for (idx, field) in self.form.fields.iter().enumerate() {
            if idx != PLAYERS && field.value.trim().is_empty() {
                errors.push(format!("{} is required", field.label));
            }
        }

        let phone = self.form.value(COACH_PHONE);
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.push("Coach phone must be 7-15 digits".to_string());
        }

        let players = split_players(self.form.value(PLAYERS));
        if players.is_empty() {
            errors.push("At least one player is required".to_string());
        }

        self.errors = errors;
        if !self.errors.is_empty() {
            return None;
        }

        Some(TeamRegistration {
            tournament_id: self.tournament_id.clone(),
            team_name: self.form.value(TEAM_NAME).to_string(),
            origin: self.form.value(ORIGIN).to_string(),
            coach_name: self.form.value(COACH_NAME).to_string(),
            coach_phone: phone.to_string(),
            players,
        })
    }

    pub fn on_submitted(&mut self) {
        self.status = SubmitStatus::Submitted;
        self.form.clear();
    }

    pub fn on_failed(&mut self) {
        self.status = SubmitStatus::Editing;
    }
}

fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

fn split_players(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Login gates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub form: Form,
    pub error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            form: Form {
                fields: vec![TextField::new("Username"), TextField::secret("Password")],
                focused: 0,
            },
            error: None,
        }
    }
}

impl LoginForm {
    /// True when the entered credentials match. The password field is
    /// cleared either way.
    pub fn attempt(&mut self, expected: &Credentials) -> bool {
        let ok = self.form.value(0) == expected.username
            && self.form.fields.get(1).map(|f| f.value.as_str()) == Some(expected.password.as_str());
        if let Some(password) = self.form.fields.get_mut(1) {
            password.value.clear();
        }
        self.error = if ok { None } else { Some("Invalid username or password".to_string()) };
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut RegistrationForm, values: [&str; 5]) {
        for (field, value) in form.form.fields.iter_mut().zip(values) {
            field.value = value.to_string();
        }
    }

    #[test]
    fn complete_form_builds_registration() {
        let mut form = RegistrationForm::new("t1");
        fill(&mut form, ["Lions", "Lalitpur", "Ram", "+9779800000000", "Sita, Hari ,, Gita"]);
        let reg = form.validate().expect("form is valid");
        assert!(form.errors.is_empty());
        assert_eq!(reg.tournament_id, "t1");
        assert_eq!(reg.players, ["Sita", "Hari", "Gita"]);
        assert_eq!(reg.coach_phone, "+9779800000000");
    }

    #[test]
    fn blank_fields_are_reported() {
        let mut form = RegistrationForm::new("t1");
        fill(&mut form, ["  ", "Lalitpur", "", "9800000000", ""]);
        assert!(form.validate().is_none());
        assert!(form.errors.contains(&"Team name is required".to_string()));
        assert!(form.errors.contains(&"Coach name is required".to_string()));
        assert!(form.errors.contains(&"At least one player is required".to_string()));
    }

    #[test]
    fn phone_must_be_digits_of_sane_length() {
        assert!(is_valid_phone("9800000000"));
        assert!(is_valid_phone("+9779800000000"));
        assert!(!is_valid_phone("98-000"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("1234567890123456"));
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = RegistrationForm::new("t1");
        form.form.focus_prev();
        assert_eq!(form.form.focused, 4);
        form.form.focus_next();
        assert_eq!(form.form.focused, 0);
        form.form.push_char('L');
        form.form.push_char('x');
        form.form.pop_char();
        assert_eq!(form.form.fields[0].value, "L");
    }

    #[test]
    fn submission_clears_the_form() {
        let mut form = RegistrationForm::new("t1");
        fill(&mut form, ["Lions", "Lalitpur", "Ram", "9800000000", "Sita"]);
        form.status = SubmitStatus::Submitting;
        form.on_submitted();
        assert_eq!(form.status, SubmitStatus::Submitted);
        assert!(form.form.fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn login_checks_credentials_and_clears_password() {
        let expected = Credentials { username: "admin".into(), password: "s3cret".into() };
        let mut login = LoginForm::default();
        login.form.fields[0].value = "admin".into();
        login.form.fields[1].value = "wrong".into();
        assert!(!login.attempt(&expected));
        assert!(login.error.is_some());
        assert!(login.form.fields[1].value.is_empty());

        login.form.fields[1].value = "s3cret".into();
        assert!(login.attempt(&expected));
        assert!(login.error.is_none());
        assert_eq!(login.form.fields[1].display_value(), "");
    }

    #[test]
    fn secret_fields_are_masked() {
        let mut field = TextField::secret("Password");
        field.value = "abc".into();
        assert_eq!(field.display_value(), "***");
    }
}
