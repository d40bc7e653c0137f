use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::aircraft::{self, EXECUTIVE_AIRCRAFT};
use crate::store::{AccountRecord, AccountRepository, Balance, Role, StoreError};

pub const STARTING_MONEY: i64 = 25_000;
/// Credited by the host when a flight completes.
pub const FLIGHT_REWARD: i64 = 50_000;
const MIN_USERNAME_LEN: usize = 3;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Banned until {}", .0.format("%Y-%m-%d %H:%M UTC"))]
    Banned(DateTime<Utc>),

    #[error("Account permanently banned")]
    PermanentlyBanned,

    #[error("Username taken")]
    UsernameTaken,

    #[error("Username too short")]
    UsernameTooShort,

    #[error("Aircraft already owned")]
    AlreadyOwned,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Unknown aircraft")]
    UnknownAircraft,

    #[error("Aircraft not in hangar")]
    NotOwned,

    #[error("Administrator rights required")]
    NotPermitted,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoneyOp {
    Add,
    Subtract,
    Set,
}

/// Account and economy rules on top of a repository.
pub struct AccountService<R> {
    repo: R,
    admin: Option<(String, String)>,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo, admin: None }
    }

    /// Make sure the configured administrator exists. Credentials come from
    /// configuration only.
    pub fn bootstrap_admin(&mut self, username: &str, password: &str) -> Result<(), AccountError> {
        self.admin = Some((username.to_string(), password.to_string()));
        self.ensure_admin()
    }

    fn ensure_admin(&mut self) -> Result<(), AccountError> {
        let Some((username, password)) = self.admin.clone() else {
            return Ok(());
        };
        let mut record = self
            .repo
            .get(&username)
            .unwrap_or_else(|| AccountRecord::new(&username, &password, Role::Admin, Balance::Unlimited));
        record.password = password;
        record.role = Role::Admin;
        record.balance = Balance::Unlimited;
        record.banned = false;
        record.banned_until = None;
        if !record.owns(EXECUTIVE_AIRCRAFT) {
            record.inventory.push(EXECUTIVE_AIRCRAFT.to_string());
        }
        self.repo.upsert(record)?;
        info!(admin = %username, "administrator account ensured");
        Ok(())
    }

    pub fn get(&self, username: &str) -> Option<AccountRecord> {
        self.repo.get(username)
    }

    /// The configured administrator is out of reach of every admin action.
    pub fn is_owner(&self, username: &str) -> bool {
        self.admin.as_ref().is_some_and(|(owner, _)| owner == username)
    }

    pub fn usernames(&self) -> Vec<String> {
        self.repo.usernames()
    }

    fn record(&self, username: &str) -> Result<AccountRecord, AccountError> {
        self.repo.get(username).ok_or(AccountError::UserNotFound)
    }

    fn update(
        &mut self,
        username: &str,
        f: impl FnOnce(&mut AccountRecord),
    ) -> Result<AccountRecord, AccountError> {
        let mut record = self.record(username)?;
        f(&mut record);
        self.repo.upsert(record.clone())?;
        Ok(record)
    }

    pub fn signup(&mut self, username: &str, password: &str) -> Result<AccountRecord, AccountError> {
        if self.repo.get(username).is_some() {
            return Err(AccountError::UsernameTaken);
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(AccountError::UsernameTooShort);
        }
        let record = AccountRecord::new(username, password, Role::User, Balance::Finite(STARTING_MONEY));
        self.repo.upsert(record.clone())?;
        info!(user = %username, "account created");
        Ok(record)
    }

    /// An expired temporary ban is lifted as part of logging in.
    pub fn login(&mut self, username: &str, password: &str, now: DateTime<Utc>) -> Result<AccountRecord, AccountError> {
        let record = self.record(username)?;
        if record.password != password {
            return Err(AccountError::InvalidPassword);
        }
        if record.banned {
            match record.banned_until {
                Some(until) if until > now => return Err(AccountError::Banned(until)),
                None => return Err(AccountError::PermanentlyBanned),
                Some(_) => {
                    info!(user = %username, "ban expired");
                    return self.update(username, |r| {
                        r.banned = false;
                        r.banned_until = None;
                    });
                }
            }
        }
        Ok(record)
    }

    pub fn purchase(&mut self, username: &str, plane_id: &str) -> Result<AccountRecord, AccountError> {
        let record = self.record(username)?;
        let plane = aircraft::find(plane_id)
            .filter(|p| !p.hidden || record.is_admin())
            .ok_or(AccountError::UnknownAircraft)?;
        if record.owns(plane.id) {
            return Err(AccountError::AlreadyOwned);
        }
        if !record.balance.can_afford(plane.price) {
            return Err(AccountError::InsufficientFunds);
        }
        let updated = self.update(username, |r| {
            r.balance = r.balance.subtract(plane.price);
            r.inventory.push(plane.id.to_string());
        })?;
        info!(user = %username, aircraft = plane.id, price = plane.price, "aircraft purchased");
        Ok(updated)
    }

    pub fn select_plane(&mut self, username: &str, plane_id: &str) -> Result<AccountRecord, AccountError> {
        if !self.record(username)?.owns(plane_id) {
            return Err(AccountError::NotOwned);
        }
        self.update(username, |r| r.active_plane = Some(plane_id.to_string()))
    }

    pub fn credit_reward(&mut self, username: &str, amount: i64) -> Result<AccountRecord, AccountError> {
        let updated = self.update(username, |r| r.balance = r.balance.add(amount))?;
        info!(user = %username, amount, "reward credited");
        Ok(updated)
    }

    pub fn clear_warnings(&mut self, username: &str) -> Result<AccountRecord, AccountError> {
        self.update(username, |r| r.warnings.clear())
    }

    fn require_admin(&self, actor: &str, target: &str) -> Result<(), AccountError> {
        if self.is_owner(target) {
            return Err(AccountError::NotPermitted);
        }
        match self.repo.get(actor) {
            Some(r) if r.is_admin() => Ok(()),
            _ => Err(AccountError::NotPermitted),
        }
    }

    pub fn adjust_balance(
        &mut self,
        actor: &str,
        target: &str,
        amount: i64,
        op: MoneyOp,
    ) -> Result<AccountRecord, AccountError> {
        self.require_admin(actor, target)?;
        let updated = self.update(target, |r| {
            r.balance = match op {
                MoneyOp::Add => r.balance.add(amount),
                MoneyOp::Subtract => r.balance.subtract(amount),
                MoneyOp::Set => r.balance.set(amount),
            }
        })?;
        info!(admin = %actor, user = %target, amount, ?op, "balance adjusted");
        Ok(updated)
    }

    pub fn give_aircraft(&mut self, actor: &str, target: &str, plane_id: &str) -> Result<AccountRecord, AccountError> {
        self.require_admin(actor, target)?;
        let plane = aircraft::find(plane_id).ok_or(AccountError::UnknownAircraft)?;
        let updated = self.update(target, |r| {
            if !r.owns(plane.id) {
                r.inventory.push(plane.id.to_string());
            }
        })?;
        info!(admin = %actor, user = %target, aircraft = plane.id, "aircraft granted");
        Ok(updated)
    }

    pub fn remove_aircraft(&mut self, actor: &str, target: &str, plane_id: &str) -> Result<AccountRecord, AccountError> {
        self.require_admin(actor, target)?;
        let updated = self.update(target, |r| {
            r.inventory.retain(|id| id != plane_id);
            if r.active_plane.as_deref() == Some(plane_id) {
                r.active_plane = None;
            }
        })?;
        info!(admin = %actor, user = %target, aircraft = plane_id, "aircraft removed");
        Ok(updated)
    }

    /// `until: None` bans permanently.
    pub fn ban(&mut self, actor: &str, target: &str, until: Option<DateTime<Utc>>) -> Result<AccountRecord, AccountError> {
        self.require_admin(actor, target)?;
        let updated = self.update(target, |r| {
            r.banned = true;
            r.banned_until = until;
        })?;
        info!(admin = %actor, user = %target, ?until, "user banned");
        Ok(updated)
    }

    pub fn unban(&mut self, actor: &str, target: &str) -> Result<AccountRecord, AccountError> {
        self.require_admin(actor, target)?;
        let updated = self.update(target, |r| {
            r.banned = false;
            r.banned_until = None;
        })?;
        info!(admin = %actor, user = %target, "user unbanned");
        Ok(updated)
    }

    pub fn set_role(&mut self, actor: &str, target: &str, role: Role) -> Result<AccountRecord, AccountError> {
        self.require_admin(actor, target)?;
        let updated = self.update(target, |r| r.role = role)?;
        info!(admin = %actor, user = %target, ?role, "role changed");
        Ok(updated)
    }

    pub fn warn(&mut self, actor: &str, target: &str, message: &str) -> Result<AccountRecord, AccountError> {
        self.require_admin(actor, target)?;
        let message = if message.trim().is_empty() { "Warning" } else { message.trim() };
        let updated = self.update(target, |r| r.warnings.push(message.to_string()))?;
        info!(admin = %actor, user = %target, "warning issued");
        Ok(updated)
    }

    /// Wipe every account, then re-create the configured administrator.
    pub fn reset_all(&mut self) -> Result<(), AccountError> {
        self.repo.clear()?;
        info!("all accounts reset");
        self.ensure_admin()
    }
}
