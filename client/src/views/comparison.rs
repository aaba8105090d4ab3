use shared::FinancialEntry;
use tracing::warn;

use super::{notice_for, Notice, ViewState};
use crate::periods::{available_quarters, compare_periods, default_comparison, ComparisonReport, Period};
use crate::session::Session;
use crate::store::EntryStore;

pub struct ComparisonController<S> {
    store: S,
    session: Session,
    entries: Vec<FinancialEntry>,
    pub selection: Option<(Period, Period)>,
    pub state: ViewState<ComparisonReport>,
    pub notice: Option<Notice>,
}

impl<S: EntryStore> ComparisonController<S> {
    pub fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            entries: Vec::new(),
            selection: None,
            state: ViewState::Loading,
            notice: None,
        }
    }

    /// Fetch entries; keeps an explicit selection, otherwise compares the
    /// latest quarter with the one before it
    pub async fn refresh(&mut self) {
        self.state = ViewState::Loading;
        self.notice = None;
        match self.store.list(&self.session).await {
            Ok(entries) => {
                self.entries = entries;
                if self.selection.is_none() {
                    self.selection = default_comparison(&self.entries);
                }
                self.rebuild();
            }
            Err(e) => {
                warn!("Failed to load comparison: {}", e);
                self.entries.clear();
                self.notice = Some(notice_for(&e));
                self.state = ViewState::Empty;
            }
        }
    }

    /// Quarters the user can pick from
    pub fn periods(&self) -> Vec<Period> {
        available_quarters(&self.entries)
    }

    pub fn compare(&mut self, current: Period, baseline: Period) {
        self.selection = Some((current, baseline));
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.state = match self.selection {
            Some((current, baseline)) if !self.entries.is_empty() => {
                let report = compare_periods(&self.entries, &current, &baseline);
                if report.has_data() {
                    ViewState::Ready(report)
                } else {
                    ViewState::Empty
                }
            }
            _ => ViewState::Empty,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fake::{entry, session, FakeStore};
    use shared::{Category, Month};

    fn store() -> FakeStore {
        FakeStore::with_entries(vec![
            entry("1", "Stocks", "Tech", 0.0, 1000.0, 1000.0, Month::February, 2024),
            entry("2", "Stocks", "Tech", 0.0, 1250.0, 1400.0, Month::May, 2024),
        ])
    }

    #[tokio::test]
    async fn test_defaults_to_latest_quarters() {
        let mut controller = ComparisonController::new(store(), session());
        controller.refresh().await;

        let report = controller.state.ready().unwrap();
        assert_eq!(report.current.period.label(), "Q2-2024");
        assert_eq!(report.baseline.period.label(), "Q1-2024");
        assert!((report.overall_growth - 25.0).abs() < 1e-9);
        assert_eq!(report.difference(), 250.0);
        assert_eq!(report.current.assets, 1400.0);
        assert_eq!(report.best_performer.as_ref().unwrap().category, Category::Stocks);
        assert_eq!(controller.periods().len(), 2);
    }

    #[tokio::test]
    async fn test_periods_without_data_are_empty() {
        let mut controller = ComparisonController::new(store(), session());
        controller.refresh().await;

        controller.compare(Period::year(2020), Period::year(2019));
        assert!(controller.state.is_empty());

        controller.compare(Period::parse("May-2024").unwrap(), Period::parse("Feb-2024").unwrap());
        assert!(controller.state.ready().is_some());
    }

    #[tokio::test]
    async fn test_no_entries() {
        let mut controller = ComparisonController::new(FakeStore::default(), session());
        controller.refresh().await;
        assert!(controller.state.is_empty());
        assert!(controller.selection.is_none());
    }

    #[tokio::test]
    async fn test_successful_refresh_clears_earlier_failure() {
        let store = store();
        store.fail_with(crate::errors::ClientError::Transient("timeout".to_string()));
        let mut controller = ComparisonController::new(store.clone(), session());
        controller.refresh().await;
        assert!(controller.notice.is_some());

        store.recover();
        controller.refresh().await;

        assert!(controller.notice.is_none());
        assert!(controller.state.ready().is_some());
    }
}
