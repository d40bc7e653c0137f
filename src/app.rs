use std::sync::mpsc::Sender;
use std::time::Instant;

use chrono::{Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use tracing::{debug, info, warn};

use crate::accounts::{AccountError, AccountService, MoneyOp, FLIGHT_REWARD, STARTING_MONEY};
use crate::aircraft::{self, group_thousands, CATALOG};
use crate::config::NOTIFICATION_TTL;
use crate::event::Event;
use crate::flight::clock::TickStatus;
use crate::flight::{FlightOutcome, FlightView};
use crate::store::{AccountRecord, AccountRepository, Role};

const MAX_FIELD_LEN: usize = 24;
const MAX_WARNING_LEN: usize = 60;
pub const AMOUNT_STEP: i64 = 10_000;
const TEMP_BAN_HOURS: i64 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Dashboard,
    Flying,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Hangar,
    Dealership,
    Admin,
}

impl Tab {
    pub fn all(is_admin: bool) -> &'static [Tab] {
        if is_admin {
            &[Tab::Hangar, Tab::Dealership, Tab::Admin]
        } else {
            &[Tab::Hangar, Tab::Dealership]
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Hangar => " Hangar ",
            Tab::Dealership => " Dealership ",
            Tab::Admin => " CEO Panel ",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Admin,
}

pub struct Notification {
    pub msg: String,
    pub kind: NoticeKind,
    expires_at: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
}

pub struct AuthForm {
    pub username: String,
    pub password: String,
    pub focus: Field,
    pub confirm_reset: bool,
}

impl AuthForm {
    fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focus: Field::Username,
            confirm_reset: false,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Username => Field::Password,
            Field::Password => Field::Username,
        };
    }
}

pub struct AdminPanel {
    pub selected: usize,
    pub amount: i64,
    /// Some while a warning is being typed.
    pub warning: Option<String>,
}

pub struct App<R> {
    pub should_quit: bool,
    pub screen: Screen,
    pub tab: Tab,
    pub accounts: AccountService<R>,
    pub current_user: Option<String>,
    pub auth: AuthForm,
    pub hangar_selected: usize,
    pub shop_selected: usize,
    pub admin: AdminPanel,
    pub flight: FlightView,
    pub notification: Option<Notification>,
    events: Sender<Event>,
}

impl<R: AccountRepository> App<R> {
    pub fn new(accounts: AccountService<R>, events: Sender<Event>) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Login,
            tab: Tab::Hangar,
            accounts,
            current_user: None,
            auth: AuthForm::new(),
            hangar_selected: 0,
            shop_selected: 0,
            admin: AdminPanel {
                selected: 0,
                amount: AMOUNT_STEP,
                warning: None,
            },
            flight: FlightView::new(),
            notification: None,
            events,
        }
    }

    pub fn user(&self) -> Option<AccountRecord> {
        self.current_user.as_deref().and_then(|u| self.accounts.get(u))
    }

    fn is_admin(&self) -> bool {
        self.user().map(|u| u.is_admin()).unwrap_or(false)
    }

    /// Players the admin panel can act on: everyone but yourself and the
    /// configured administrator.
    pub fn admin_targets(&self) -> Vec<String> {
        let me = self.current_user.as_deref();
        self.accounts
            .usernames()
            .into_iter()
            .filter(|u| Some(u.as_str()) != me && !self.accounts.is_owner(u))
            .collect()
    }

    pub fn hangar(&self) -> Vec<&'static aircraft::AircraftProfile> {
        self.user()
            .map(|u| u.inventory.iter().filter_map(|id| aircraft::find(id)).collect())
            .unwrap_or_default()
    }

    pub fn notify(&mut self, msg: impl Into<String>, kind: NoticeKind) {
        self.notification = Some(Notification {
            msg: msg.into(),
            kind,
            expires_at: Instant::now() + NOTIFICATION_TTL,
        });
    }

    fn report(&mut self, err: AccountError) {
        warn!(error = %err, "account action rejected");
        self.notify(err.to_string(), NoticeKind::Error);
    }

    pub fn on_tick(&mut self) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| Instant::now() >= n.expires_at)
        {
            self.notification = None;
        }

        if self.screen == Screen::Flying && self.flight.update() == TickStatus::Ended {
            // The outcome arrives as an Event::Flight on the next loop turn.
            self.flight.leave();
        }
    }

    pub fn on_flight_outcome(&mut self, outcome: FlightOutcome) {
        self.flight.leave();
        // The pilot already left the flight (Esc) before the outcome was read.
        if self.screen != Screen::Flying {
            debug!(?outcome, "dropping outcome of an aborted flight");
            return;
        }
        self.screen = Screen::Dashboard;
        let Some(user) = self.current_user.clone() else {
            return;
        };
        match outcome {
            FlightOutcome::Completed { score } => {
                info!(user = %user, score, "flight landed");
                match self.accounts.credit_reward(&user, FLIGHT_REWARD) {
                    Ok(_) => self.notify(
                        format!("Landed Successfully! Earned {} AZ", group_thousands(FLIGHT_REWARD)),
                        NoticeKind::Success,
                    ),
                    Err(e) => self.report(e),
                }
            }
            FlightOutcome::Crashed => {
                info!(user = %user, "flight crashed");
                self.notify("CRASHED! Hull Destroyed.", NoticeKind::Error);
            }
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.screen == Screen::Flying {
            self.flight.handle_mouse(mouse);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Login | Screen::Signup => self.handle_auth_key(key),
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Flying => {
                if key.code == KeyCode::Esc {
                    self.flight.leave();
                    self.screen = Screen::Dashboard;
                    self.notify("Flight aborted", NoticeKind::Error);
                } else {
                    self.flight.handle_input(key);
                }
            }
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        if self.auth.confirm_reset {
            self.auth.confirm_reset = false;
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                match self.accounts.reset_all() {
                    Ok(()) => self.notify("All saved data deleted", NoticeKind::Admin),
                    Err(e) => self.report(e),
                }
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.screen == Screen::Signup {
                    self.switch_auth(Screen::Login);
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::F(2) => {
                let next = if self.screen == Screen::Login { Screen::Signup } else { Screen::Login };
                self.switch_auth(next);
            }
            KeyCode::F(5) if self.screen == Screen::Login => self.auth.confirm_reset = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.auth.toggle_focus(),
            KeyCode::Backspace => {
                self.auth.focused_mut().pop();
            }
            KeyCode::Enter => self.submit_auth(),
            KeyCode::Char(c) if !c.is_control() => {
                let field = self.auth.focused_mut();
                if field.chars().count() < MAX_FIELD_LEN {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    fn switch_auth(&mut self, screen: Screen) {
        self.auth = AuthForm::new();
        self.screen = screen;
    }

    fn submit_auth(&mut self) {
        if self.auth.username.is_empty() || self.auth.password.is_empty() {
            self.notify("Callsign and security code required", NoticeKind::Error);
            return;
        }
        let username = self.auth.username.clone();
        let password = self.auth.password.clone();

        let result = if self.screen == Screen::Signup {
            self.accounts.signup(&username, &password)
        } else {
            self.accounts.login(&username, &password, Utc::now())
        };

        match result {
            Ok(_) => {
                let msg = if self.screen == Screen::Signup {
                    format!("Account Created! +{} AZ", group_thousands(STARTING_MONEY))
                } else {
                    format!("Welcome back, {}", username)
                };
                info!(user = %username, "pilot signed in");
                self.enter_dashboard(username);
                self.notify(msg, NoticeKind::Success);
            }
            Err(e) => {
                self.auth.password.clear();
                self.report(e);
            }
        }
    }

    fn enter_dashboard(&mut self, username: String) {
        self.current_user = Some(username);
        self.auth = AuthForm::new();
        self.screen = Screen::Dashboard;
        self.tab = Tab::Hangar;
        self.hangar_selected = 0;
        self.shop_selected = 0;
        self.admin.selected = 0;
        self.admin.warning = None;
    }

    fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!(user = %user, "pilot signed out");
        }
        self.flight.leave();
        self.switch_auth(Screen::Login);
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        // Typing a warning swallows every key.
        if self.admin.warning.is_some() {
            self.handle_warning_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.logout();
                return;
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.take_off();
                return;
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if self.user().is_some_and(|u| !u.warnings.is_empty()) {
                    let user = self.current_user.clone().unwrap_or_default();
                    if let Err(e) = self.accounts.clear_warnings(&user) {
                        self.report(e);
                    }
                }
                return;
            }
            KeyCode::Tab => {
                self.cycle_tab(1);
                return;
            }
            KeyCode::BackTab => {
                self.cycle_tab(-1);
                return;
            }
            _ => {}
        }

        match self.tab {
            Tab::Hangar => self.handle_hangar_key(key),
            Tab::Dealership => self.handle_shop_key(key),
            Tab::Admin => self.handle_admin_key(key),
        }
    }

    fn cycle_tab(&mut self, delta: isize) {
        let tabs = Tab::all(self.is_admin());
        let idx = tabs.iter().position(|t| *t == self.tab).unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        self.tab = tabs[((idx + delta).rem_euclid(len)) as usize];
    }

    fn handle_hangar_key(&mut self, key: KeyEvent) {
        let owned = self.hangar();
        match key.code {
            KeyCode::Up => self.hangar_selected = step_selection(self.hangar_selected, owned.len(), -1),
            KeyCode::Down => self.hangar_selected = step_selection(self.hangar_selected, owned.len(), 1),
            KeyCode::Enter => {
                let (Some(user), Some(plane)) = (self.current_user.clone(), owned.get(self.hangar_selected)) else {
                    return;
                };
                match self.accounts.select_plane(&user, plane.id) {
                    Ok(_) => self.notify(format!("{} ready on the runway", plane.name), NoticeKind::Success),
                    Err(e) => self.report(e),
                }
            }
            _ => {}
        }
    }

    fn handle_shop_key(&mut self, key: KeyEvent) {
        let listing = aircraft::shop_listing(self.is_admin());
        match key.code {
            KeyCode::Up => self.shop_selected = step_selection(self.shop_selected, listing.len(), -1),
            KeyCode::Down => self.shop_selected = step_selection(self.shop_selected, listing.len(), 1),
            KeyCode::Enter => {
                let (Some(user), Some(plane)) = (self.current_user.clone(), listing.get(self.shop_selected)) else {
                    return;
                };
                match self.accounts.purchase(&user, plane.id) {
                    Ok(_) => self.notify(format!("Bought {}!", plane.name), NoticeKind::Success),
                    Err(e) => self.report(e),
                }
            }
            _ => {}
        }
    }

    fn handle_admin_key(&mut self, key: KeyEvent) {
        let targets = self.admin_targets();
        match key.code {
            KeyCode::Up => {
                self.admin.selected = step_selection(self.admin.selected, targets.len(), -1);
                return;
            }
            KeyCode::Down => {
                self.admin.selected = step_selection(self.admin.selected, targets.len(), 1);
                return;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.admin.amount = self.admin.amount.saturating_add(AMOUNT_STEP);
                return;
            }
            KeyCode::Char('-') => {
                self.admin.amount = (self.admin.amount - AMOUNT_STEP).max(0);
                return;
            }
            _ => {}
        }

        let (Some(actor), Some(target)) = (self.current_user.clone(), targets.get(self.admin.selected).cloned()) else {
            return;
        };
        let amount = self.admin.amount;

        let result = match key.code {
            KeyCode::Char('g') => self
                .accounts
                .adjust_balance(&actor, &target, amount, MoneyOp::Add)
                .map(|_| "Funds Added".to_string()),
            KeyCode::Char('t') => self
                .accounts
                .adjust_balance(&actor, &target, amount, MoneyOp::Subtract)
                .map(|_| "Funds Removed".to_string()),
            KeyCode::Char('s') => self
                .accounts
                .adjust_balance(&actor, &target, amount, MoneyOp::Set)
                .map(|_| "Balance Set".to_string()),
            KeyCode::Char('b') => self.accounts.ban(&actor, &target, None).map(|_| "Banned".to_string()),
            KeyCode::Char('x') => {
                let until = Utc::now() + Duration::hours(TEMP_BAN_HOURS);
                self.accounts
                    .ban(&actor, &target, Some(until))
                    .map(|_| format!("Banned for {}h", TEMP_BAN_HOURS))
            }
            KeyCode::Char('u') => self.accounts.unban(&actor, &target).map(|_| "Unbanned".to_string()),
            KeyCode::Char('r') => {
                let role = match self.accounts.get(&target).map(|r| r.role) {
                    Some(Role::Admin) => Role::User,
                    _ => Role::Admin,
                };
                self.accounts
                    .set_role(&actor, &target, role)
                    .map(|_| format!("Role set to {:?}", role))
            }
            KeyCode::Char('w') => {
                self.admin.warning = Some(String::new());
                return;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let Some(plane) = CATALOG.get(c as usize - '1' as usize) else {
                    return;
                };
                let owned = self.accounts.get(&target).is_some_and(|r| r.owns(plane.id));
                if owned {
                    self.accounts
                        .remove_aircraft(&actor, &target, plane.id)
                        .map(|_| format!("Took {}", plane.name))
                } else {
                    self.accounts
                        .give_aircraft(&actor, &target, plane.id)
                        .map(|_| format!("Gave {}", plane.name))
                }
            }
            _ => return,
        };

        match result {
            Ok(msg) => self.notify(msg, NoticeKind::Admin),
            Err(e) => self.report(e),
        }
    }

    fn handle_warning_key(&mut self, key: KeyEvent) {
        let Some(buffer) = self.admin.warning.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.admin.warning = None,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if !c.is_control() => {
                if buffer.chars().count() < MAX_WARNING_LEN {
                    buffer.push(c);
                }
            }
            KeyCode::Enter => {
                let message = self.admin.warning.take().unwrap_or_default();
                let targets = self.admin_targets();
                let (Some(actor), Some(target)) = (self.current_user.clone(), targets.get(self.admin.selected)) else {
                    return;
                };
                match self.accounts.warn(&actor, target, &message) {
                    Ok(_) => self.notify("Sent", NoticeKind::Admin),
                    Err(e) => self.report(e),
                }
            }
            _ => {}
        }
    }

    fn take_off(&mut self) {
        let Some(user) = self.user() else {
            return;
        };
        if user.active_plane.is_none() {
            self.notify("Select a plane first!", NoticeKind::Error);
            return;
        }
        let profile = aircraft::profile_or_default(user.active_plane.as_deref());

        let done = self.events.clone();
        let crash = self.events.clone();
        self.flight.start_flight(
            profile,
            move |score| {
                let _ = done.send(Event::Flight(FlightOutcome::Completed { score }));
            },
            move || {
                let _ = crash.send(Event::Flight(FlightOutcome::Crashed));
            },
        );
        self.screen = Screen::Flying;
    }
}

/// Move a list cursor by `delta`, wrapping around.
fn step_selection(current: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as isize + delta).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Balance, MemoryStore};
    use std::sync::mpsc::{self, Receiver};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
    }

    fn app() -> (App<MemoryStore>, Receiver<Event>) {
        let mut accounts = AccountService::new(MemoryStore::new());
        accounts.bootstrap_admin("chief", "s3cret").unwrap();
        let (tx, rx) = mpsc::channel();
        (App::new(accounts, tx), rx)
    }

    fn signed_up(name: &str) -> (App<MemoryStore>, Receiver<Event>) {
        let (mut app, rx) = app();
        app.on_key(key(KeyCode::F(2)));
        type_str(&mut app, name);
        app.on_key(key(KeyCode::Tab));
        type_str(&mut app, "pw");
        app.on_key(key(KeyCode::Enter));
        (app, rx)
    }

    fn next_outcome(rx: &Receiver<Event>) -> Option<FlightOutcome> {
        rx.try_iter().find_map(|e| match e {
            Event::Flight(o) => Some(o),
            _ => None,
        })
    }

    #[test]
    fn signup_form_lands_on_dashboard() {
        let (app, _rx) = signed_up("maverick");
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.current_user.as_deref(), Some("maverick"));
        assert_eq!(app.user().map(|u| u.balance), Some(Balance::Finite(25_000)));
        assert_eq!(app.notification.as_ref().map(|n| n.kind), Some(NoticeKind::Success));
    }

    #[test]
    fn bad_login_stays_on_login_with_error() {
        let (mut app, _rx) = app();
        type_str(&mut app, "chief");
        app.on_key(key(KeyCode::Tab));
        type_str(&mut app, "wrong");
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.notification.as_ref().map(|n| n.msg.as_str()), Some("Invalid password"));
        assert!(app.auth.password.is_empty());
    }

    #[test]
    fn take_off_requires_a_selected_plane() {
        let (mut app, _rx) = signed_up("maverick");
        app.on_key(key(KeyCode::Char('f')));
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.notification.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
    }

    fn buy_and_fly(app: &mut App<MemoryStore>) {
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Dealership);
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::BackTab));
        assert_eq!(app.tab, Tab::Hangar);
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Char('f')));
        assert_eq!(app.screen, Screen::Flying);
        assert!(app.flight.is_active());
    }

    #[test]
    fn completed_flight_pays_the_reward_once() {
        let (mut app, rx) = signed_up("maverick");
        buy_and_fly(&mut app);

        let mut outcome = None;
        for _ in 0..1000 {
            app.on_tick();
            if let Some(o) = next_outcome(&rx) {
                outcome = Some(o);
                break;
            }
        }
        assert_eq!(outcome, Some(FlightOutcome::Completed { score: 100 }));
        app.on_flight_outcome(FlightOutcome::Completed { score: 100 });

        for _ in 0..100 {
            app.on_tick();
        }
        assert!(next_outcome(&rx).is_none());
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.user().map(|u| u.balance), Some(Balance::Finite(50_000)));
    }

    #[test]
    fn diving_into_the_ground_crashes() {
        let (mut app, rx) = signed_up("maverick");
        buy_and_fly(&mut app);
        for _ in 0..9 {
            app.on_key(key(KeyCode::Down));
        }
        assert_eq!(app.flight.state().map(|s| s.pitch), Some(45.0));

        let mut outcome = None;
        for _ in 0..60 {
            app.on_tick();
            if let Some(o) = next_outcome(&rx) {
                outcome = Some(o);
                break;
            }
        }
        assert_eq!(outcome, Some(FlightOutcome::Crashed));
        app.on_flight_outcome(FlightOutcome::Crashed);
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.user().map(|u| u.balance), Some(Balance::Finite(0)));
    }

    #[test]
    fn escape_aborts_without_outcome() {
        let (mut app, rx) = signed_up("maverick");
        buy_and_fly(&mut app);
        app.on_tick();
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(!app.flight.is_active());
        for _ in 0..1500 {
            app.on_tick();
        }
        assert!(next_outcome(&rx).is_none());
    }

    #[test]
    fn escape_after_landing_forfeits_the_reward() {
        let (mut app, rx) = signed_up("maverick");
        buy_and_fly(&mut app);

        let mut outcome = None;
        for _ in 0..1000 {
            app.on_tick();
            if let Some(o) = next_outcome(&rx) {
                outcome = Some(o);
                break;
            }
        }
        let outcome = outcome.unwrap();
        app.on_key(key(KeyCode::Esc));
        app.on_flight_outcome(outcome);

        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.user().map(|u| u.balance), Some(Balance::Finite(0)));
        assert_eq!(app.notification.as_ref().map(|n| n.msg.as_str()), Some("Flight aborted"));
    }

    #[test]
    fn promoted_admin_cannot_see_the_configured_admin() {
        let (mut app, _rx) = signed_up("maverick");
        app.accounts.set_role("chief", "maverick", Role::Admin).unwrap();
        app.accounts.signup("goose", "pw").unwrap();
        assert_eq!(app.admin_targets(), vec!["goose".to_string()]);

        app.on_key(key(KeyCode::BackTab));
        assert_eq!(app.tab, Tab::Admin);
        app.on_key(key(KeyCode::Char('b')));
        assert!(app.accounts.get("goose").is_some_and(|r| r.banned));
        assert!(app.accounts.get("chief").is_some_and(|r| !r.banned));
    }

    #[test]
    fn admin_tab_only_for_admins() {
        let (mut app, _rx) = signed_up("maverick");
        app.on_key(key(KeyCode::Tab));
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Hangar);
    }

    #[test]
    fn admin_panel_moderates_players() {
        let (mut app, _rx) = signed_up("maverick");
        app.on_key(key(KeyCode::Char('l')));
        assert_eq!(app.screen, Screen::Login);

        type_str(&mut app, "chief");
        app.on_key(key(KeyCode::Tab));
        type_str(&mut app, "s3cret");
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Dashboard);

        app.on_key(key(KeyCode::BackTab));
        assert_eq!(app.tab, Tab::Admin);
        assert_eq!(app.admin_targets(), vec!["maverick".to_string()]);

        app.on_key(key(KeyCode::Char('+')));
        app.on_key(key(KeyCode::Char('g')));
        assert_eq!(
            app.accounts.get("maverick").map(|r| r.balance),
            Some(Balance::Finite(45_000))
        );

        app.on_key(key(KeyCode::Char('w')));
        type_str(&mut app, "no barrel rolls");
        app.on_key(key(KeyCode::Enter));
        assert_eq!(
            app.accounts.get("maverick").map(|r| r.warnings),
            Some(vec!["no barrel rolls".to_string()])
        );

        app.on_key(key(KeyCode::Char('2')));
        assert!(app.accounts.get("maverick").is_some_and(|r| r.owns("p2")));
        app.on_key(key(KeyCode::Char('2')));
        assert!(!app.accounts.get("maverick").is_some_and(|r| r.owns("p2")));

        app.on_key(key(KeyCode::Char('b')));
        assert!(app.accounts.get("maverick").is_some_and(|r| r.banned));
        assert_eq!(app.notification.as_ref().map(|n| n.kind), Some(NoticeKind::Admin));
    }

    #[test]
    fn reset_requires_confirmation() {
        let (mut app, _rx) = signed_up("maverick");
        app.on_key(key(KeyCode::Char('l')));

        app.on_key(key(KeyCode::F(5)));
        app.on_key(key(KeyCode::Char('n')));
        assert!(app.accounts.get("maverick").is_some());

        app.on_key(key(KeyCode::F(5)));
        app.on_key(key(KeyCode::Char('y')));
        assert!(app.accounts.get("maverick").is_none());
        assert!(app.accounts.get("chief").is_some());
    }

    #[test]
    fn selection_wraps() {
        assert_eq!(step_selection(0, 3, -1), 2);
        assert_eq!(step_selection(2, 3, 1), 0);
        assert_eq!(step_selection(5, 0, 1), 0);
    }
}
