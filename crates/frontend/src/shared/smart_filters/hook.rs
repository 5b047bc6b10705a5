//! Leptos binding of [`SmartFilterState`]: signals, request dispatch and the
//! debounce / reload timers.

use chrono::Utc;
use contracts::shared::filters::{FilterKey, FilterOption, FilterSelection};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::state::{
    ApplyOutcome, FilterHistoryEntry, FilterStatus, FollowUp, OptionsRequest, SmartFilterState,
    RELOAD_DELAY_MS, VALIDATION_DEBOUNCE_MS,
};

#[derive(Clone, Copy)]
pub struct SmartFilters {
    state: RwSignal<SmartFilterState>,
    /// Bumped on every change; a pending validation only runs if it still
    /// holds the latest generation.
    debounce_generation: StoredValue<u64>,
}

/// Creates the filter state for one page and loads the initial options.
pub fn use_smart_filters() -> SmartFilters {
    let filters = SmartFilters {
        state: RwSignal::new(SmartFilterState::new()),
        debounce_generation: StoredValue::new(0),
    };
    if let Some(request) = filters.state.try_update(|s| s.initial_request()) {
        filters.dispatch(request);
    }
    filters
}

impl SmartFilters {
    pub fn selection(&self) -> FilterSelection {
        self.state.with(|s| s.selection().clone())
    }

    pub fn status(&self, key: FilterKey) -> FilterStatus {
        self.state.with(|s| s.filter_status(key))
    }

    pub fn options(&self, key: FilterKey) -> Vec<FilterOption> {
        self.state.with(|s| s.options().options(key).to_vec())
    }

    pub fn farm_count(&self) -> usize {
        self.state.with(|s| s.options().farms.len())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.is_loading())
    }

    pub fn history(&self) -> Vec<FilterHistoryEntry> {
        self.state.with(|s| s.history().cloned().collect())
    }

    pub fn active_labels(&self) -> Vec<(FilterKey, String)> {
        self.state.with(|s| s.active_labels())
    }

    pub fn can_continue_filtering(&self) -> bool {
        self.state.with(|s| s.can_continue_filtering())
    }

    pub fn tree_end_message(&self) -> Option<&'static str> {
        self.state.with(|s| s.tree_end_message())
    }

    /// Raw `<select>` value; empty clears the key.
    pub fn update_filter(&self, key: FilterKey, raw: String) {
        log::debug!("filter {} -> {:?}", key.wire_name(), raw);
        let request = self
            .state
            .try_update(|s| s.update_filter_raw(key, &raw, Utc::now()))
            .flatten();
        if let Some(request) = request {
            self.dispatch(request);
            self.schedule_validation();
        }
    }

    pub fn clear_filters(&self) {
        log::info!("clearing filters");
        let request = self.state.try_update(|s| s.clear_filters(Utc::now()));
        if let Some(request) = request {
            self.dispatch_delayed(request);
            self.schedule_validation();
        }
    }

    pub fn undo_last_change(&self) {
        match self.state.try_update(|s| s.undo_last_change()).flatten() {
            Some(request) => {
                log::info!("undo -> {:?}", request.selection);
                self.dispatch_delayed(request);
                self.schedule_validation();
            }
            None => log::debug!("undo ignored, history is empty"),
        }
    }

    pub fn restore_from_history(&self, index: usize) {
        if let Some(request) = self.state.try_update(|s| s.restore_from_history(index)).flatten() {
            log::info!("restoring filters from history #{}", index);
            self.dispatch(request);
            self.schedule_validation();
        }
    }

    fn schedule_validation(&self) {
        let generation = self.debounce_generation.get_value() + 1;
        self.debounce_generation.set_value(generation);
        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(VALIDATION_DEBOUNCE_MS).await;
            if this.debounce_generation.try_get_value() != Some(generation) {
                return;
            }
            if let Some(request) = this.state.try_update(|s| s.begin_validation()).flatten() {
                this.dispatch(request);
            }
        });
    }

    fn dispatch_delayed(&self, request: OptionsRequest) {
        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(RELOAD_DELAY_MS).await;
            let current = this
                .state
                .try_with_untracked(|s| s.is_current(request.ticket))
                .unwrap_or(false);
            if current {
                this.dispatch(request);
            }
        });
    }

    fn dispatch(&self, request: OptionsRequest) {
        let this = *self;
        spawn_local(async move {
            let result = api::get_filter_options(&request.selection).await;
            let Some(outcome) = this.state.try_update(|s| s.apply_options(&request, result)) else {
                return;
            };
            match &outcome {
                ApplyOutcome::RolledBack { restored, .. } => {
                    log::warn!("filters restored to {:?}", restored)
                }
                ApplyOutcome::Stale => log::debug!("dropped stale filter options #{}", request.ticket),
                _ => {}
            }
            match outcome.follow_up() {
                FollowUp::LoadBasic => {
                    let basic = api::get_basic_options().await;
                    this.state.try_update(|s| s.apply_fallback(&request, basic));
                }
                FollowUp::Reload(reload) => {
                    this.dispatch(reload);
                    this.schedule_validation();
                }
                FollowUp::Done => {}
            }
        });
    }
}
