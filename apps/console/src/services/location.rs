//! Cascading region → sub-region selectors.
//!
//! Two profiles share the mechanics but keep their own placeholder
//! conventions: the registration form insists on a parent selection, the
//! admin filter treats "no selection" as "all".

use std::fmt::Display;

use tracing::{debug, error};

use crate::models::RegionOption;
use crate::services::StateCell;

/// Parent value meaning "every region" in the admin filter.
pub const ALL_SENTINEL: &str = "all";

#[allow(async_fn_in_trait)]
pub trait LocationSource {
    type Error: Display;

    async fn sub_regions(&self, region_id: &str) -> Result<Vec<RegionOption>, Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CascadeProfile {
    /// Patient registration: a state must be chosen first.
    Registration,
    /// Dashboard filter: no state means all LGAs.
    AdminFilter,
}

impl CascadeProfile {
    fn loading(self) -> SelectOption {
        SelectOption::new("", "Loading...")
    }

    fn empty_parent(self) -> SelectOption {
        match self {
            Self::Registration => SelectOption::new("", "-- Select a State First --"),
            Self::AdminFilter => SelectOption::new(ALL_SENTINEL, "All LGAs"),
        }
    }

    fn leading_option(self) -> SelectOption {
        match self {
            Self::Registration => SelectOption::new("", "-- Select an LGA --"),
            Self::AdminFilter => SelectOption::new(ALL_SENTINEL, "All LGAs"),
        }
    }

    fn failure(self) -> SelectOption {
        match self {
            Self::Registration => SelectOption::new("", "-- Error loading LGAs --"),
            Self::AdminFilter => SelectOption::new(ALL_SENTINEL, "Error loading LGAs"),
        }
    }

    fn disables_while_loading(self) -> bool {
        matches!(self, Self::AdminFilter)
    }

    fn is_empty_parent(self, region_id: &str) -> bool {
        let value = region_id.trim();
        value.is_empty() || (self == Self::AdminFilter && value == ALL_SENTINEL)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<RegionOption> for SelectOption {
    fn from(region: RegionOption) -> Self {
        Self {
            value: region.id,
            label: region.name,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Ticket for one parent change; only the newest ticket may fill the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookupTicket(u64);

/// The dependent (sub-region) selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependentSelector {
    profile: CascadeProfile,
    options: Vec<SelectOption>,
    disabled: bool,
    status: SelectorStatus,
    generation: u64,
}

impl DependentSelector {
    pub fn new(profile: CascadeProfile) -> Self {
        Self {
            profile,
            options: vec![profile.empty_parent()],
            disabled: false,
            status: SelectorStatus::Idle,
            generation: 0,
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn status(&self) -> SelectorStatus {
        self.status
    }

    /// Value the selector shows after a repopulation.
    #[cfg(test)]
    pub fn default_value(&self) -> &str {
        self.options
            .first()
            .map(|option| option.value.as_str())
            .unwrap_or("")
    }

    /// Reacts to a parent change. Returns a ticket when a lookup must be made.
    pub fn begin(&mut self, region_id: &str) -> Option<LookupTicket> {
        self.generation += 1;

        if self.profile.is_empty_parent(region_id) {
            self.options = vec![self.profile.empty_parent()];
            self.disabled = false;
            self.status = SelectorStatus::Idle;
            return None;
        }

        self.options = vec![self.profile.loading()];
        self.disabled = self.profile.disables_while_loading();
        self.status = SelectorStatus::Loading;
        Some(LookupTicket(self.generation))
    }

    /// Applies a lookup result. Returns `false` if the ticket was superseded.
    pub fn complete<E: Display>(
        &mut self,
        ticket: LookupTicket,
        result: Result<Vec<RegionOption>, E>,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "discarding stale lga lookup");
            return false;
        }

        match result {
            Ok(regions) => {
                let mut options = Vec::with_capacity(regions.len() + 1);
                options.push(self.profile.leading_option());
                options.extend(regions.into_iter().map(SelectOption::from));
                self.options = options;
                self.status = SelectorStatus::Ready;
            }
            Err(err) => {
                error!("Error fetching LGAs: {err}");
                self.options = vec![self.profile.failure()];
                self.status = SelectorStatus::Failed;
            }
        }
        self.disabled = false;
        true
    }
}

/// Runs one full parent-change cycle against `source`.
pub async fn resolve<C, S>(mut selector: C, source: &S, region_id: &str) -> bool
where
    C: StateCell<DependentSelector>,
    S: LocationSource,
{
    let Some(ticket) = selector.update(|selector| selector.begin(region_id)) else {
        return false;
    };
    let result = source.sub_regions(region_id.trim()).await;
    selector.update(|selector| selector.complete(ticket, result))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::*;

    #[derive(Default)]
    struct FakeSource {
        calls: RefCell<Vec<String>>,
        fail: bool,
    }

    impl LocationSource for FakeSource {
        type Error = String;

        async fn sub_regions(&self, region_id: &str) -> Result<Vec<RegionOption>, String> {
            self.calls.borrow_mut().push(region_id.to_string());
            if self.fail {
                return Err("connection refused".into());
            }
            Ok(vec![
                RegionOption::new("3", "Surulere"),
                RegionOption::new("1", "Agege"),
                RegionOption::new("2", "Ikeja"),
            ])
        }
    }

    #[test]
    fn empty_parent_resets_without_request() {
        let source = FakeSource::default();

        let mut registration = DependentSelector::new(CascadeProfile::Registration);
        block_on(resolve(&mut registration, &source, ""));
        assert_eq!(registration.options()[0].label, "-- Select a State First --");

        let mut admin = DependentSelector::new(CascadeProfile::AdminFilter);
        block_on(resolve(&mut admin, &source, "all"));
        assert_eq!(admin.options(), &[SelectOption::new("all", "All LGAs")]);
        assert!(!admin.is_disabled());

        assert!(source.calls.borrow().is_empty());
    }

    #[test]
    fn all_is_a_real_id_for_registration() {
        let source = FakeSource::default();
        let mut registration = DependentSelector::new(CascadeProfile::Registration);
        block_on(resolve(&mut registration, &source, "all"));
        assert_eq!(source.calls.borrow().as_slice(), ["all"]);
    }

    #[test]
    fn results_keep_payload_order_after_default() {
        let source = FakeSource::default();
        let mut selector = DependentSelector::new(CascadeProfile::Registration);
        assert!(block_on(resolve(&mut selector, &source, "lagos")));

        let labels: Vec<_> = selector.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["-- Select an LGA --", "Surulere", "Agege", "Ikeja"]);
        assert_eq!(selector.options().len(), 3 + 1);
        assert_eq!(selector.status(), SelectorStatus::Ready);
        assert_eq!(selector.default_value(), "");
    }

    #[test]
    fn admin_filter_disables_while_loading() {
        let mut admin = DependentSelector::new(CascadeProfile::AdminFilter);
        let ticket = admin.begin("kano");
        assert!(ticket.is_some());
        assert!(admin.is_disabled());
        assert_eq!(admin.options()[0].label, "Loading...");

        let mut registration = DependentSelector::new(CascadeProfile::Registration);
        registration.begin("kano");
        assert!(!registration.is_disabled());
    }

    #[test]
    fn failure_shows_profile_error_placeholder() {
        let source = FakeSource {
            fail: true,
            ..FakeSource::default()
        };

        let mut registration = DependentSelector::new(CascadeProfile::Registration);
        block_on(resolve(&mut registration, &source, "kano"));
        assert_eq!(registration.options()[0].label, "-- Error loading LGAs --");
        assert_eq!(registration.status(), SelectorStatus::Failed);

        let mut admin = DependentSelector::new(CascadeProfile::AdminFilter);
        block_on(resolve(&mut admin, &source, "kano"));
        assert_eq!(admin.options()[0].label, "Error loading LGAs");
        assert!(!admin.is_disabled());
    }

    #[test]
    fn stale_lookup_is_discarded() {
        let mut selector = DependentSelector::new(CascadeProfile::AdminFilter);
        let first = selector.begin("lagos").unwrap();
        let second = selector.begin("kano").unwrap();

        let applied = selector.complete::<String>(first, Ok(vec![RegionOption::new("9", "Epe")]));
        assert!(!applied);
        assert_eq!(selector.status(), SelectorStatus::Loading);

        assert!(selector.complete::<String>(second, Ok(vec![RegionOption::new("4", "Dala")])));
        assert_eq!(selector.options()[1].label, "Dala");
    }

    #[test]
    fn reset_supersedes_inflight_lookup() {
        let mut selector = DependentSelector::new(CascadeProfile::Registration);
        let ticket = selector.begin("lagos").unwrap();
        assert!(selector.begin("").is_none());
        assert!(!selector.complete::<String>(ticket, Ok(vec![RegionOption::new("1", "Agege")])));
        assert_eq!(selector.options().len(), 1);
    }
}
