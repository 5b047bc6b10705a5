//! Cascading filter state machine.
//!
//! Pure state: every mutation returns the [`OptionsRequest`] the caller must
//! run, and responses are fed back through [`SmartFilterState::apply_options`].
//! Each request carries a ticket; only the latest ticket is ever applied.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use contracts::shared::error::ApiError;
use contracts::shared::filters::{FilterKey, FilterOptionSet, FilterSelection, FilterValue};

/// Snapshots kept for undo / rollback
pub const HISTORY_LIMIT: usize = 5;
/// Quiet period before a validation pass
pub const VALIDATION_DEBOUNCE_MS: u32 = 300;
/// Delay before reloading options after clear / undo
pub const RELOAD_DELAY_MS: u32 = 100;

pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStatus {
    Selected,
    Available,
    Blocked,
}

impl FilterStatus {
    pub fn css_modifier(&self) -> &'static str {
        match self {
            FilterStatus::Selected => "selected",
            FilterStatus::Available => "available",
            FilterStatus::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterHistoryEntry {
    pub selection: FilterSelection,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPurpose {
    /// Plain reload after a change
    Refresh,
    /// Debounced pass that also checks the selection is still valid
    Validate,
}

/// Option-set fetch the caller has to perform.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsRequest {
    pub ticket: Ticket,
    pub selection: FilterSelection,
    pub purpose: RequestPurpose,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    /// The intersection query failed or came back empty; load the basic set
    /// for the same ticket.
    NeedsFallback,
    /// A selected value vanished from the options; the selection was reset to
    /// the latest history entry and `reload` must be run.
    RolledBack {
        restored: FilterSelection,
        reload: OptionsRequest,
    },
}

/// What the caller still has to do once a response was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum FollowUp {
    Done,
    /// Fetch the basic option set for the same request
    LoadBasic,
    /// Run the reload for a rolled-back selection, then validate it again
    Reload(OptionsRequest),
}

impl ApplyOutcome {
    pub fn follow_up(self) -> FollowUp {
        match self {
            ApplyOutcome::NeedsFallback => FollowUp::LoadBasic,
            ApplyOutcome::RolledBack { reload, .. } => FollowUp::Reload(reload),
            ApplyOutcome::Applied | ApplyOutcome::Stale => FollowUp::Done,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmartFilterState {
    selection: FilterSelection,
    options: FilterOptionSet,
    history: VecDeque<FilterHistoryEntry>,
    loading: bool,
    latest_ticket: Ticket,
}

impl Default for SmartFilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl SmartFilterState {
    pub fn new() -> Self {
        Self {
            selection: FilterSelection::default(),
            options: FilterOptionSet::empty(),
            history: VecDeque::with_capacity(HISTORY_LIMIT),
            loading: false,
            latest_ticket: 0,
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn options(&self) -> &FilterOptionSet {
        &self.options
    }

    /// Oldest first
    pub fn history(&self) -> impl Iterator<Item = &FilterHistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.latest_ticket
    }

    fn issue(&mut self, purpose: RequestPurpose) -> OptionsRequest {
        self.latest_ticket += 1;
        self.loading = true;
        OptionsRequest {
            ticket: self.latest_ticket,
            selection: self.selection.clone(),
            purpose,
        }
    }

    fn snapshot(&mut self, now: DateTime<Utc>) {
        if self.selection.is_empty() {
            return;
        }
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(FilterHistoryEntry {
            selection: self.selection.clone(),
            timestamp: now,
        });
    }

    /// Options for the current (initially empty) selection.
    pub fn initial_request(&mut self) -> OptionsRequest {
        self.issue(RequestPurpose::Refresh)
    }

    /// Sets or clears `key`, cascade-clearing its dependents.
    pub fn update_filter(
        &mut self,
        key: FilterKey,
        value: Option<FilterValue>,
        now: DateTime<Utc>,
    ) -> OptionsRequest {
        self.snapshot(now);
        match value {
            Some(value) if value.key() == key => self.selection.set(value),
            Some(value) => {
                log::warn!("filter value {:?} does not belong to {:?}", value, key);
                self.selection.remove(key);
            }
            None => self.selection.remove(key),
        }
        for dependent in key.dependents() {
            self.selection.remove(*dependent);
        }
        self.issue(RequestPurpose::Refresh)
    }

    /// Same as [`update_filter`](Self::update_filter) for a raw `<select>` value.
    /// Only an empty value clears; one that does not parse for `key` is
    /// ignored and yields no request.
    pub fn update_filter_raw(
        &mut self,
        key: FilterKey,
        raw: &str,
        now: DateTime<Utc>,
    ) -> Option<OptionsRequest> {
        if raw.trim().is_empty() {
            return Some(self.update_filter(key, None, now));
        }
        match FilterValue::parse(key, raw) {
            Some(value) => Some(self.update_filter(key, Some(value), now)),
            None => {
                log::warn!("ignoring unparseable {} value {:?}", key.wire_name(), raw);
                None
            }
        }
    }

    /// Snapshot, reset to empty and ask for the empty-selection options.
    /// The caller waits [`RELOAD_DELAY_MS`] before running the request.
    pub fn clear_filters(&mut self, now: DateTime<Utc>) -> OptionsRequest {
        self.snapshot(now);
        self.selection = FilterSelection::default();
        self.issue(RequestPurpose::Refresh)
    }

    /// Pops and restores the latest snapshot. `None` when history is empty.
    pub fn undo_last_change(&mut self) -> Option<OptionsRequest> {
        let entry = self.history.pop_back()?;
        self.selection = entry.selection;
        Some(self.issue(RequestPurpose::Refresh))
    }

    /// Restores the snapshot at `index` (oldest first) without removing it.
    pub fn restore_from_history(&mut self, index: usize) -> Option<OptionsRequest> {
        let selection = self.history.get(index)?.selection.clone();
        self.selection = selection;
        Some(self.issue(RequestPurpose::Refresh))
    }

    /// Only multi-key selections are validated.
    pub fn needs_validation(&self) -> bool {
        self.selection.len() > 1
    }

    pub fn begin_validation(&mut self) -> Option<OptionsRequest> {
        if self.needs_validation() {
            Some(self.issue(RequestPurpose::Validate))
        } else {
            None
        }
    }

    /// Feeds back the result of an intersection query.
    pub fn apply_options(
        &mut self,
        request: &OptionsRequest,
        result: Result<FilterOptionSet, ApiError>,
    ) -> ApplyOutcome {
        if !self.is_current(request.ticket) {
            return ApplyOutcome::Stale;
        }
        let options = match result {
            Ok(options) if !options.is_empty() => options,
            Ok(_) => return ApplyOutcome::NeedsFallback,
            Err(e) => {
                log::warn!("filter options failed: {}", e);
                return ApplyOutcome::NeedsFallback;
            }
        };
        self.options = options;
        self.loading = false;

        if request.purpose == RequestPurpose::Validate {
            let stale = self.stale_values();
            if !stale.is_empty() {
                let Some(entry) = self.history.pop_back() else {
                    log::warn!("selection no longer valid ({:?}), no previous state to restore", stale);
                    return ApplyOutcome::Applied;
                };
                log::warn!("selection no longer valid ({:?}), rolling back", stale);
                let restored = entry.selection;
                self.selection = restored.clone();
                let reload = self.issue(RequestPurpose::Refresh);
                return ApplyOutcome::RolledBack { restored, reload };
            }
        }
        ApplyOutcome::Applied
    }

    /// Feeds back the basic (dimension tables) option set. On failure the
    /// options end up empty.
    pub fn apply_fallback(
        &mut self,
        request: &OptionsRequest,
        result: Result<FilterOptionSet, ApiError>,
    ) -> ApplyOutcome {
        if !self.is_current(request.ticket) {
            return ApplyOutcome::Stale;
        }
        self.options = match result {
            Ok(options) => options,
            Err(e) => {
                log::error!("basic filter options failed: {}", e);
                FilterOptionSet::empty()
            }
        };
        self.loading = false;
        ApplyOutcome::Applied
    }

    /// Selected values missing from the current options.
    pub fn stale_values(&self) -> Vec<FilterValue> {
        self.selection
            .values()
            .into_iter()
            .filter(|v| !self.options.contains(v))
            .collect()
    }

    pub fn filter_status(&self, key: FilterKey) -> FilterStatus {
        if !self.selection.prerequisites_met(key) {
            return FilterStatus::Blocked;
        }
        if self.selection.has(key) {
            return FilterStatus::Selected;
        }
        if self.options.options(key).is_empty() {
            FilterStatus::Blocked
        } else {
            FilterStatus::Available
        }
    }

    /// Whether the next level of the cascade still has something to offer.
    pub fn can_continue_filtering(&self) -> bool {
        let s = &self.selection;
        if s.year.is_none() {
            return false;
        }
        if s.month.is_none() {
            return !self.options.months.is_empty();
        }
        if s.zone.is_none() {
            return !self.options.zones.is_empty();
        }
        if s.variety.is_none() {
            return !self.options.varieties.is_empty();
        }
        true
    }

    /// Hint shown when the cascade ran out of options below the current level.
    pub fn tree_end_message(&self) -> Option<&'static str> {
        let s = &self.selection;
        if s.year.is_none() {
            return None;
        }
        if s.month.is_none() {
            if self.options.months.is_empty() {
                return Some("¡Suaquete! No hay meses disponibles para este año. Tome su gráfica con los datos del año.");
            }
            return None;
        }
        if s.zone.is_none() {
            if self.options.zones.is_empty() {
                return Some("¡Suaquete! No hay zonas disponibles para este año y mes. Tome su gráfica con los datos hasta aquí.");
            }
            return None;
        }
        if s.variety.is_none() && self.options.varieties.is_empty() {
            return Some("¡Suaquete! No hay variedades disponibles para esta combinación. Tome su gráfica con los datos hasta aquí.");
        }
        None
    }

    /// `(key, label)` chips for the active selection.
    pub fn active_labels(&self) -> Vec<(FilterKey, String)> {
        self.selection
            .values()
            .into_iter()
            .map(|v| {
                let label = match &v {
                    FilterValue::TopFarms(n) => format!("Top {}", n),
                    other => self.options.label_of(other),
                };
                (v.key(), label)
            })
            .collect()
    }
}
