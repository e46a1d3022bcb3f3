//! In-memory administrative dataset shared between instances.
//!
//! Mutators validate and apply; none of them touches the version counter.
//! Versioning is owned by the synchronizer at publish time so the counter
//! stays monotonic across process restarts.

pub mod snapshot;

use chrono::{DateTime, Local, NaiveDate};

use crate::errors::{AppError, AppResult};
use crate::models::{CardId, DailyHours, Employee, Group, SpecialDay, SpecialDayKind};

#[derive(Debug, Clone, Default)]
pub struct SyncedDataset {
    employees: Vec<Employee>,
    groups: Vec<Group>,
    special_days: Vec<SpecialDay>,
    version: u64,
    last_updated: Option<DateTime<Local>>,
}

impl SyncedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------
    // Accessors
    // ---------------------------

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn special_days(&self) -> &[SpecialDay] {
        &self.special_days
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn employee_by_card(&self, card_id: &CardId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.card_id == *card_id)
    }

    pub fn group_by_id(&self, id: i64) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Group name for display; a dangling reference reads as no group.
    pub fn group_name(&self, group_id: Option<i64>) -> Option<&str> {
        group_id
            .and_then(|id| self.group_by_id(id))
            .map(|g| g.name.as_str())
    }

    pub fn special_days_for(&self, card_id: &CardId) -> Vec<&SpecialDay> {
        self.special_days
            .iter()
            .filter(|sd| sd.card_id == *card_id)
            .collect()
    }

    // ---------------------------
    // Employee mutators
    // ---------------------------

    pub fn add_employee(
        &mut self,
        name: &str,
        card_id: CardId,
        daily_hours: DailyHours,
        group_id: Option<i64>,
    ) -> AppResult<&Employee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Employee name must not be empty".into()));
        }
        if let DailyHours::Fixed(h) = daily_hours
            && h <= 0.0
        {
            return Err(AppError::InvalidDailyHours(h.to_string()));
        }
        if self.employee_by_card(&card_id).is_some() {
            return Err(AppError::DuplicateCardId(card_id.to_string()));
        }
        if let Some(gid) = group_id
            && self.group_by_id(gid).is_none()
        {
            return Err(AppError::UnknownGroup(gid));
        }

        let id = self.employees.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        self.employees.push(Employee {
            id,
            name: name.to_string(),
            card_id,
            daily_hours,
            group_id,
        });
        self.touch();

        Ok(&self.employees[self.employees.len() - 1])
    }

    pub fn remove_employee(&mut self, card_id: &CardId) -> AppResult<Employee> {
        let idx = self
            .employees
            .iter()
            .position(|e| e.card_id == *card_id)
            .ok_or_else(|| AppError::UnknownCardId(card_id.to_string()))?;

        let removed = self.employees.remove(idx);
        self.touch();
        Ok(removed)
    }

    pub fn set_daily_hours(&mut self, card_id: &CardId, daily_hours: DailyHours) -> AppResult<()> {
        if let DailyHours::Fixed(h) = daily_hours
            && h <= 0.0
        {
            return Err(AppError::InvalidDailyHours(h.to_string()));
        }

        let employee = self.employee_by_card_mut(card_id)?;
        employee.daily_hours = daily_hours;
        self.touch();
        Ok(())
    }

    pub fn set_group(&mut self, card_id: &CardId, group_id: Option<i64>) -> AppResult<()> {
        if let Some(gid) = group_id
            && self.group_by_id(gid).is_none()
        {
            return Err(AppError::UnknownGroup(gid));
        }

        let employee = self.employee_by_card_mut(card_id)?;
        employee.group_id = group_id;
        self.touch();
        Ok(())
    }

    /// Point the employee (and their special days) at a new card id. The
    /// caller is responsible for propagating the change into the day-files
    /// on the share.
    pub fn change_card_id(&mut self, old: &CardId, new: CardId) -> AppResult<()> {
        if self.employees.iter().any(|e| e.card_id == new) {
            return Err(AppError::DuplicateCardId(new.to_string()));
        }

        let employee = self.employee_by_card_mut(old)?;
        employee.card_id = new.clone();

        for sd in self.special_days.iter_mut().filter(|sd| sd.card_id == *old) {
            sd.card_id = new.clone();
        }
        self.touch();
        Ok(())
    }

    // ---------------------------
    // Group mutators
    // ---------------------------

    pub fn add_group(&mut self, name: &str) -> AppResult<&Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Group name must not be empty".into()));
        }
        if self.group_by_name(name).is_some() {
            return Err(AppError::DuplicateGroupName(name.to_string()));
        }

        let id = self.groups.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        self.groups.push(Group {
            id,
            name: name.to_string(),
        });
        self.touch();

        Ok(&self.groups[self.groups.len() - 1])
    }

    /// Remove a group. Member employees keep their group id; the reference
    /// is advisory and resolves to "no group" once dangling.
    pub fn remove_group(&mut self, id: i64) -> AppResult<Group> {
        let idx = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(AppError::UnknownGroup(id))?;

        let removed = self.groups.remove(idx);
        self.touch();
        Ok(removed)
    }

    // ---------------------------
    // Special-day mutators
    // ---------------------------

    /// Mark dates as special for one card. An existing entry on the same
    /// date is replaced, never duplicated.
    pub fn set_special_days(
        &mut self,
        card_id: &CardId,
        dates: &[NaiveDate],
        kind: SpecialDayKind,
    ) -> AppResult<()> {
        if self.employee_by_card(card_id).is_none() {
            return Err(AppError::UnknownCardId(card_id.to_string()));
        }

        for date in dates {
            self.special_days
                .retain(|sd| !(sd.card_id == *card_id && sd.date == *date));
            self.special_days.push(SpecialDay {
                card_id: card_id.clone(),
                date: *date,
                kind,
            });
        }
        self.touch();
        Ok(())
    }

    /// Clear special-day marks; returns how many entries were removed.
    pub fn clear_special_days(&mut self, card_id: &CardId, dates: &[NaiveDate]) -> AppResult<usize> {
        let before = self.special_days.len();
        self.special_days
            .retain(|sd| !(sd.card_id == *card_id && dates.contains(&sd.date)));
        let removed = before - self.special_days.len();
        if removed > 0 {
            self.touch();
        }
        Ok(removed)
    }

    // ---------------------------
    // Version bookkeeping (synchronizer only)
    // ---------------------------

    pub(crate) fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    fn touch(&mut self) {
        self.last_updated = Some(Local::now());
    }

    fn employee_by_card_mut(&mut self, card_id: &CardId) -> AppResult<&mut Employee> {
        self.employees
            .iter_mut()
            .find(|e| e.card_id == *card_id)
            .ok_or_else(|| AppError::UnknownCardId(card_id.to_string()))
    }
}
