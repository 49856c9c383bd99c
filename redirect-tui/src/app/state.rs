use chrono::{Days, Local, Months, NaiveDate};
use redirect_client::{
    domain::Redirect, parse_date, DateError, FormErrors, RedirectForm, DATE_FORMAT,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    List,
    Create,
    Edit,
    ConfirmDelete,
}

/// Single-line text field. `cursor` is a byte offset kept on a char boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
        }
    }
}

impl TextInput {
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(c) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.cursor)
    }
}

/// Date picker value: either unset or a real calendar day, never free text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DateInput {
    pub value: Option<NaiveDate>,
}

impl DateInput {
    /// Empty string means unset.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self {
            value: Some(parse_date(s)?),
        })
    }

    /// `YYYY-MM-DD`, or `None` when unset.
    pub fn form_value(&self) -> Option<String> {
        self.value.map(|d| d.format(DATE_FORMAT).to_string())
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn set_today(&mut self) {
        self.value = Some(Local::now().date_naive());
    }

    /// Move by whole days. An unset picker starts from today.
    pub fn step_days(&mut self, days: i64) {
        let current = self.current();
        let next = if days >= 0 {
            current.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            current.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        self.value = Some(next.unwrap_or(current));
    }

    /// Move by whole months, clamping the day to the end of shorter months.
    pub fn step_months(&mut self, months: i32) {
        let current = self.current();
        let next = if months >= 0 {
            current.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            current.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        self.value = Some(next.unwrap_or(current));
    }

    pub fn step_years(&mut self, years: i32) {
        self.step_months(years.saturating_mul(12));
    }

    fn current(&self) -> NaiveDate {
        self.value.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogField {
    FromPath,
    ToUrl,
    StartsOn,
    StopsOn,
}

impl DialogField {
    pub fn next(self) -> Self {
        match self {
            DialogField::FromPath => DialogField::ToUrl,
            DialogField::ToUrl => DialogField::StartsOn,
            DialogField::StartsOn => DialogField::StopsOn,
            DialogField::StopsOn => DialogField::FromPath,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DialogField::FromPath => DialogField::StopsOn,
            DialogField::ToUrl => DialogField::FromPath,
            DialogField::StartsOn => DialogField::ToUrl,
            DialogField::StopsOn => DialogField::StartsOn,
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, DialogField::StartsOn | DialogField::StopsOn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

/// State of the create/edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub from_path: TextInput,
    pub to_url: TextInput,
    pub starts_on: DateInput,
    pub stops_on: DateInput,
    pub focused_field: DialogField,
    pub errors: FormErrors,
    /// A request for this dialog is in flight; inputs are disabled.
    pub is_busy: bool,
    /// The edit dialog is still waiting for the stored values.
    pub is_loading: bool,
}

impl FormState {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            from_path: TextInput::default(),
            to_url: TextInput::default(),
            starts_on: DateInput::default(),
            stops_on: DateInput::default(),
            focused_field: DialogField::FromPath,
            errors: FormErrors::default(),
            is_busy: false,
            is_loading: false,
        }
    }

    /// Edit dialog waiting for the redirect to load.
    pub fn loading_edit(id: i64) -> Self {
        Self {
            mode: FormMode::Edit { id },
            is_busy: true,
            is_loading: true,
            ..Self::create()
        }
    }

    pub fn edit(redirect: &Redirect) -> Result<Self, DateError> {
        let form = RedirectForm::from_redirect(redirect)?;
        Ok(Self {
            mode: FormMode::Edit { id: redirect.id },
            from_path: TextInput::from(form.from_path.as_str()),
            to_url: TextInput::from(form.to_url.as_str()),
            starts_on: DateInput::parse(form.starts_on.as_deref().unwrap_or_default())?,
            stops_on: DateInput::parse(form.stops_on.as_deref().unwrap_or_default())?,
            focused_field: DialogField::FromPath,
            errors: FormErrors::default(),
            is_busy: false,
            is_loading: false,
        })
    }

    pub fn to_form(&self) -> RedirectForm {
        RedirectForm {
            from_path: self.from_path.value.clone(),
            to_url: self.to_url.value.clone(),
            starts_on: self.starts_on.form_value(),
            stops_on: self.stops_on.form_value(),
        }
    }

    pub fn focused_text(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            DialogField::FromPath => Some(&mut self.from_path),
            DialogField::ToUrl => Some(&mut self.to_url),
            DialogField::StartsOn | DialogField::StopsOn => None,
        }
    }

    pub fn focused_date(&mut self) -> Option<&mut DateInput> {
        match self.focused_field {
            DialogField::StartsOn => Some(&mut self.starts_on),
            DialogField::StopsOn => Some(&mut self.stops_on),
            DialogField::FromPath | DialogField::ToUrl => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => " Create Redirect ",
            FormMode::Edit { .. } => " Edit Redirect ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteContext {
    pub id: i64,
    pub from_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateInput {
        DateInput::parse(s).unwrap()
    }

    #[test]
    fn text_input_edits_at_cursor() {
        let mut input = TextInput::from("/ld");
        input.home();
        input.move_right();
        input.insert('o');
        assert_eq!(input.value, "/old");
        assert_eq!(input.split_at_cursor(), ("/o", "ld"));

        input.end();
        input.backspace();
        assert_eq!(input.value, "/ol");

        // Nothing to delete or move past at the start.
        input.home();
        input.backspace();
        input.move_left();
        assert_eq!(input.value, "/ol");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn text_input_handles_multibyte_chars() {
        let mut input = TextInput::default();
        input.insert('/');
        input.insert('é');
        input.move_left();
        input.insert('x');
        assert_eq!(input.value, "/xé");
        input.end();
        input.backspace();
        assert_eq!(input.value, "/x");
    }

    #[test]
    fn empty_date_input_is_unset() {
        let input = date("");
        assert_eq!(input.value, None);
        assert_eq!(input.form_value(), None);
    }

    #[test]
    fn date_input_steps_days_across_months() {
        let mut input = date("2024-02-28");
        input.step_days(1);
        assert_eq!(input.form_value().as_deref(), Some("2024-02-29"));
        input.step_days(1);
        assert_eq!(input.form_value().as_deref(), Some("2024-03-01"));
        input.step_days(-2);
        assert_eq!(input.form_value().as_deref(), Some("2024-02-28"));
    }

    #[test]
    fn date_input_clamps_month_end() {
        let mut input = date("2024-01-31");
        input.step_months(1);
        assert_eq!(input.form_value().as_deref(), Some("2024-02-29"));

        let mut input = date("2024-02-29");
        input.step_years(1);
        assert_eq!(input.form_value().as_deref(), Some("2025-02-28"));
        input.step_years(-1);
        assert_eq!(input.form_value().as_deref(), Some("2024-02-28"));
    }

    #[test]
    fn unset_date_input_starts_from_today() {
        let mut input = DateInput::default();
        input.step_days(0);
        assert_eq!(input.value, Some(Local::now().date_naive()));

        input.clear();
        assert_eq!(input.value, None);
    }

    #[test]
    fn dialog_fields_cycle() {
        let mut field = DialogField::FromPath;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, DialogField::FromPath);
        assert_eq!(DialogField::FromPath.prev(), DialogField::StopsOn);
        assert!(DialogField::StopsOn.is_date());
    }

    #[test]
    fn edit_state_round_trips_stored_dates() {
        let starts_on = redirect_client::date_to_timestamp(Some("2025-06-01")).unwrap();
        let redirect = Redirect {
            id: 5,
            from_path: "/summer".to_string(),
            to_url: "https://example.com/summer".to_string(),
            starts_on,
            stops_on: 0,
        };

        let state = FormState::edit(&redirect).unwrap();
        assert_eq!(state.mode, FormMode::Edit { id: 5 });
        assert_eq!(state.from_path.value, "/summer");
        assert_eq!(state.stops_on.value, None);

        let form = state.to_form();
        assert_eq!(form.starts_on.as_deref(), Some("2025-06-01"));
        assert_eq!(form.to_request().unwrap().starts_on, starts_on);
    }
}
