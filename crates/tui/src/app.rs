//! Application state and the actions behind each key binding.
//!
//! Every user action maps to at most one blocking client call, run on
//! the explicit tokio runtime the binary owns. The interface stays
//! sequential: no background fetches, no debouncing.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::runtime::Runtime;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use imuna_client::{
    ApiClient, ClientError, Employee, EmployeeFilter, Page, Vaccine, VaccineFilter,
};

use crate::form::{self, FieldKind, FormState, FormTarget};

/// Records requested per page.
pub const PER_PAGE: i64 = 10;

/// Rows inserted by the generate action.
const GENERATE_BATCH: i64 = 10;

/// Which list screen is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Employees,
    Vaccines,
}

/// What the keyboard is currently driving.
#[derive(Debug)]
pub enum Mode {
    Browse,
    Filter,
    Form(FormState),
    ConfirmDelete,
    Detail,
    Error(String),
}

// ---------------------------------------------------------------------------
// List pane
// ---------------------------------------------------------------------------

/// One page of rows plus cursor and pagination positions.
#[derive(Debug)]
pub struct ListPane<T> {
    pub rows: Vec<T>,
    pub selected: usize,
    pub page: i64,
    pub last_page: i64,
    pub total: i64,
}

impl<T> Default for ListPane<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
            page: 1,
            last_page: 1,
            total: 0,
        }
    }
}

impl<T> ListPane<T> {
    /// Page to fetch when stepping forward, or `None` at the last page.
    pub fn next_page(&self) -> Option<i64> {
        (self.page < self.last_page).then(|| self.page + 1)
    }

    /// Page to fetch when stepping back, or `None` at page 1.
    pub fn prev_page(&self) -> Option<i64> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn select_next(&mut self) {
        if !self.rows.is_empty() {
            self.selected = (self.selected + 1).min(self.rows.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_row(&self) -> Option<&T> {
        self.rows.get(self.selected)
    }

    fn absorb(&mut self, page: Page<T>) {
        self.rows = page.data;
        self.page = page.current_page;
        self.last_page = page.last_page;
        self.total = page.total;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Filter bar
// ---------------------------------------------------------------------------

/// Pair of filter inputs with one focused at a time.
#[derive(Debug, Default)]
pub struct FilterBar {
    pub inputs: [Input; 2],
    pub focus: usize,
}

impl FilterBar {
    pub fn focused_input_mut(&mut self) -> &mut Input {
        &mut self.inputs[self.focus]
    }

    pub fn cycle(&mut self) {
        self.focus = (self.focus + 1) % self.inputs.len();
    }

    /// Trimmed values in input order, empties dropped.
    pub fn values(&self) -> [Option<String>; 2] {
        [
            non_empty(self.inputs[0].value()),
            non_empty(self.inputs[1].value()),
        ]
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// Top-level application state.
pub struct App {
    client: ApiClient,
    runtime: Runtime,
    pub screen: Screen,
    pub mode: Mode,
    pub employees: ListPane<Employee>,
    pub vaccines: ListPane<Vaccine>,
    /// Employee screen filters: cpf, full name.
    pub employee_filter: FilterBar,
    /// Vaccine screen filters: name, batch.
    pub vaccine_filter: FilterBar,
    /// Transient message shown in the status line.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(client: ApiClient, runtime: Runtime) -> Self {
        Self {
            client,
            runtime,
            screen: Screen::Employees,
            mode: Mode::Browse,
            employees: ListPane::default(),
            vaccines: ListPane::default(),
            employee_filter: FilterBar::default(),
            vaccine_filter: FilterBar::default(),
            status: None,
            should_quit: false,
        }
    }

    // ----- data loading ----------------------------------------------------

    /// Fetch `page` of employees; a past-the-end request falls back to
    /// the real last page.
    pub fn load_employees(&mut self, page: i64) {
        if self.fetch_employees(page.max(1)) && self.employees.page > self.employees.last_page {
            let last = self.employees.last_page;
            self.fetch_employees(last);
        }
    }

    /// Fetch `page` of vaccines; a past-the-end request falls back to
    /// the real last page.
    pub fn load_vaccines(&mut self, page: i64) {
        if self.fetch_vaccines(page.max(1)) && self.vaccines.page > self.vaccines.last_page {
            let last = self.vaccines.last_page;
            self.fetch_vaccines(last);
        }
    }

    fn fetch_employees(&mut self, page: i64) -> bool {
        let [cpf, full_name] = self.employee_filter.values();
        let filter = EmployeeFilter { cpf, full_name };
        let result = self
            .runtime
            .block_on(self.client.list_employees(page, PER_PAGE, &filter));

        match result {
            Ok(page) => {
                self.employees.absorb(page);
                true
            }
            Err(err) => {
                tracing::error!("employee list fetch failed: {err}");
                self.status = Some("Could not load employees".to_string());
                false
            }
        }
    }

    fn fetch_vaccines(&mut self, page: i64) -> bool {
        let [name, batch] = self.vaccine_filter.values();
        let filter = VaccineFilter { name, batch };
        let result = self
            .runtime
            .block_on(self.client.list_vaccines(page, PER_PAGE, &filter));

        match result {
            Ok(page) => {
                self.vaccines.absorb(page);
                true
            }
            Err(err) => {
                tracing::error!("vaccine list fetch failed: {err}");
                self.status = Some("Could not load vaccines".to_string());
                false
            }
        }
    }

    /// Re-fetch the current page of the front screen.
    pub fn reload(&mut self) {
        match self.screen {
            Screen::Employees => {
                let page = self.employees.page;
                self.load_employees(page);
            }
            Screen::Vaccines => {
                let page = self.vaccines.page;
                self.load_vaccines(page);
            }
        }
    }

    // ----- navigation ------------------------------------------------------

    pub fn switch_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Employees => Screen::Vaccines,
            Screen::Vaccines => Screen::Employees,
        };
        self.reload();
    }

    pub fn next_page(&mut self) {
        match self.screen {
            Screen::Employees => {
                if let Some(page) = self.employees.next_page() {
                    self.load_employees(page);
                }
            }
            Screen::Vaccines => {
                if let Some(page) = self.vaccines.next_page() {
                    self.load_vaccines(page);
                }
            }
        }
    }

    pub fn prev_page(&mut self) {
        match self.screen {
            Screen::Employees => {
                if let Some(page) = self.employees.prev_page() {
                    self.load_employees(page);
                }
            }
            Screen::Vaccines => {
                if let Some(page) = self.vaccines.prev_page() {
                    self.load_vaccines(page);
                }
            }
        }
    }

    fn select_next(&mut self) {
        match self.screen {
            Screen::Employees => self.employees.select_next(),
            Screen::Vaccines => self.vaccines.select_next(),
        }
    }

    fn select_prev(&mut self) {
        match self.screen {
            Screen::Employees => self.employees.select_prev(),
            Screen::Vaccines => self.vaccines.select_prev(),
        }
    }

    pub fn filter_bar(&self) -> &FilterBar {
        match self.screen {
            Screen::Employees => &self.employee_filter,
            Screen::Vaccines => &self.vaccine_filter,
        }
    }

    fn filter_bar_mut(&mut self) -> &mut FilterBar {
        match self.screen {
            Screen::Employees => &mut self.employee_filter,
            Screen::Vaccines => &mut self.vaccine_filter,
        }
    }

    /// `page X/Y - Z records` for the front screen.
    pub fn pagination_line(&self) -> String {
        let (page, last_page, total) = match self.screen {
            Screen::Employees => (
                self.employees.page,
                self.employees.last_page,
                self.employees.total,
            ),
            Screen::Vaccines => (
                self.vaccines.page,
                self.vaccines.last_page,
                self.vaccines.total,
            ),
        };
        format!("page {page}/{last_page} - {total} records")
    }

    // ----- actions ---------------------------------------------------------

    /// Apply the filter inputs, re-fetching from page 1.
    fn apply_filter(&mut self) {
        self.mode = Mode::Browse;
        match self.screen {
            Screen::Employees => self.load_employees(1),
            Screen::Vaccines => self.load_vaccines(1),
        }
    }

    fn open_create_form(&mut self) {
        let form = match self.screen {
            Screen::Employees => form::employee_form(None),
            Screen::Vaccines => form::vaccine_form(None),
        };
        self.mode = Mode::Form(form);
    }

    fn open_edit_form(&mut self) {
        let form = match self.screen {
            Screen::Employees => match self.employees.selected_row() {
                Some(employee) => form::employee_form(Some(employee)),
                None => return,
            },
            Screen::Vaccines => match self.vaccines.selected_row() {
                Some(vaccine) => form::vaccine_form(Some(vaccine)),
                None => return,
            },
        };
        self.mode = Mode::Form(form);
    }

    fn open_detail(&mut self) {
        if self.screen == Screen::Employees && self.employees.selected_row().is_some() {
            self.mode = Mode::Detail;
        }
    }

    fn request_delete(&mut self) {
        let has_selection = match self.screen {
            Screen::Employees => self.employees.selected_row().is_some(),
            Screen::Vaccines => self.vaccines.selected_row().is_some(),
        };
        if has_selection {
            self.mode = Mode::ConfirmDelete;
        }
    }

    /// Validate and submit the open form. Client-side failures and
    /// server 422 field errors keep the form open with messages
    /// attached; other failures keep it open behind a banner.
    fn submit_form(&mut self) {
        let Mode::Form(mut form) = std::mem::replace(&mut self.mode, Mode::Browse) else {
            return;
        };

        if !form.validate() {
            self.mode = Mode::Form(form);
            return;
        }

        let outcome = match form.target.clone() {
            FormTarget::CreateEmployee => {
                let payload = form.employee_payload();
                self.runtime
                    .block_on(self.client.create_employee(&payload))
                    .map(|_| "Employee saved")
            }
            FormTarget::EditEmployee(id) => {
                let payload = form.employee_payload();
                self.runtime
                    .block_on(self.client.update_employee(&id.to_string(), &payload))
                    .map(|_| "Employee saved")
            }
            FormTarget::CreateVaccine => {
                let payload = form.vaccine_payload();
                self.runtime
                    .block_on(self.client.create_vaccine(&payload))
                    .map(|_| "Vaccine saved")
            }
            FormTarget::EditVaccine(id) => {
                let payload = form.vaccine_payload();
                self.runtime
                    .block_on(self.client.update_vaccine(id, &payload))
                    .map(|_| "Vaccine saved")
            }
        };

        match outcome {
            Ok(message) => {
                self.status = Some(message.to_string());
                self.reload();
            }
            Err(ClientError::Validation { errors, .. }) => {
                form.set_server_errors(errors);
                self.mode = Mode::Form(form);
            }
            Err(err) => {
                tracing::error!("save failed: {err}");
                form.banner = Some(err.to_string());
                self.mode = Mode::Form(form);
            }
        }
    }

    /// Delete the selected record after confirmation.
    fn confirm_delete(&mut self) {
        self.mode = Mode::Browse;

        let outcome = match self.screen {
            Screen::Employees => match self.employees.selected_row() {
                Some(employee) => {
                    let key = employee.id.to_string();
                    self.runtime.block_on(self.client.delete_employee(&key))
                }
                None => return,
            },
            Screen::Vaccines => match self.vaccines.selected_row() {
                Some(vaccine) => self.runtime.block_on(self.client.delete_vaccine(vaccine.id)),
                None => return,
            },
        };

        match outcome {
            Ok(message) => {
                self.status = Some(message);
                self.reload();
            }
            Err(err) => {
                tracing::error!("delete failed: {err}");
                self.mode = Mode::Error(err.to_string());
            }
        }
    }

    /// Insert a batch of synthetic rows into the front screen's table.
    fn generate(&mut self) {
        let outcome = match self.screen {
            Screen::Employees => self
                .runtime
                .block_on(self.client.generate_employees(GENERATE_BATCH)),
            Screen::Vaccines => self
                .runtime
                .block_on(self.client.generate_vaccines(GENERATE_BATCH)),
        };

        match outcome {
            Ok(message) => {
                self.status = Some(message);
                self.reload();
            }
            Err(err) => {
                tracing::error!("generate failed: {err}");
                self.mode = Mode::Error(err.to_string());
            }
        }
    }

    // ----- key routing -----------------------------------------------------

    /// Route one key press according to the current mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        self.status = None;

        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Filter => self.handle_filter_key(key),
            Mode::Form(_) => self.handle_form_key(key),
            Mode::ConfirmDelete => self.handle_confirm_key(key),
            Mode::Detail | Mode::Error(_) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.mode = Mode::Browse;
                }
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.switch_screen(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Left | KeyCode::Char('p') => self.prev_page(),
            KeyCode::Right | KeyCode::Char('n') => self.next_page(),
            KeyCode::Char('f') | KeyCode::Char('/') => self.mode = Mode::Filter,
            KeyCode::Char('c') => self.open_create_form(),
            KeyCode::Char('e') => self.open_edit_form(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('g') => self.generate(),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Enter => self.open_detail(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Enter => self.apply_filter(),
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => self.filter_bar_mut().cycle(),
            _ => {
                self.filter_bar_mut()
                    .focused_input_mut()
                    .handle_event(&Event::Key(key));
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => {
                if let Mode::Form(form) = &mut self.mode {
                    form.next_field();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Mode::Form(form) = &mut self.mode {
                    form.prev_field();
                }
            }
            _ => {
                if let Mode::Form(form) = &mut self.mode {
                    let field = form.active_field_mut();
                    match field.kind {
                        FieldKind::Flag => {
                            if key.code == KeyCode::Char(' ') {
                                field.toggle();
                            }
                        }
                        FieldKind::Text => {
                            field.input.handle_event(&Event::Key(key));
                        }
                    }
                }
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => self.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => self.mode = Mode::Browse,
            _ => {}
        }
    }
}
