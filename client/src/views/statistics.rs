use shared::{FinancialEntry, MonthKey};
use tracing::warn;

use super::{notice_for, Notice, ViewState};
use crate::aggregation::{
    category_breakdown, category_performance, entries_between, entries_for, growth_series, latest_key,
    month_buckets, CategoryPerformance, CategoryShare, GrowthPoint, MonthTotals,
};
use crate::periods::StatsRange;
use crate::session::Session;
use crate::store::EntryStore;

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsView {
    pub range: StatsRange,
    pub from: MonthKey,
    pub to: MonthKey,
    pub monthly: Vec<MonthTotals>,
    pub growth: Vec<GrowthPoint>,
    pub distribution: Vec<CategoryShare>,
    pub performance: Vec<CategoryPerformance>,
}

impl StatisticsView {
    fn build(entries: &[FinancialEntry], range: StatsRange) -> Option<Self> {
        let (from, to) = range.window(latest_key(entries)?);
        let window = entries_between(entries, from, to);
        let latest = entries_for(&window, to);
        let monthly = month_buckets(&window);
        Some(Self {
            range,
            from,
            to,
            growth: growth_series(&monthly),
            monthly,
            distribution: category_breakdown(latest.iter().copied()),
            performance: category_performance(latest.iter().copied()),
        })
    }
}

pub struct StatisticsController<S> {
    store: S,
    session: Session,
    entries: Vec<FinancialEntry>,
    pub range: StatsRange,
    pub state: ViewState<StatisticsView>,
    pub notice: Option<Notice>,
}

impl<S: EntryStore> StatisticsController<S> {
    pub fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            entries: Vec::new(),
            range: StatsRange::default(),
            state: ViewState::Loading,
            notice: None,
        }
    }

    pub async fn refresh(&mut self) {
        self.state = ViewState::Loading;
        self.notice = None;
        match self.store.list(&self.session).await {
            Ok(entries) => {
                self.entries = entries;
                self.rebuild();
            }
            Err(e) => {
                warn!("Failed to load statistics: {}", e);
                self.entries.clear();
                self.notice = Some(notice_for(&e));
                self.state = ViewState::Empty;
            }
        }
    }

    /// Change the range without fetching again
    pub fn select_range(&mut self, range: StatsRange) {
        self.range = range;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.state = match StatisticsView::build(&self.entries, self.range) {
            Some(view) => ViewState::Ready(view),
            None => ViewState::Empty,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;
    use crate::store::fake::{entry, session, FakeStore};
    use shared::Month;

    fn store() -> FakeStore {
        FakeStore::with_entries(vec![
            entry("1", "Stocks", "Tech", 0.0, 100.0, 100.0, Month::January, 2024),
            entry("2", "Stocks", "Tech", 0.0, 100.0, 120.0, Month::April, 2024),
            entry("3", "Stocks", "Tech", 0.0, 100.0, 130.0, Month::June, 2024),
            entry("4", "Bank Account", "Savings", 50.0, 0.0, 50.0, Month::June, 2024),
        ])
    }

    #[tokio::test]
    async fn test_range_limits_months() {
        let mut controller = StatisticsController::new(store(), session());
        controller.refresh().await;

        let view = controller.state.ready().unwrap();
        assert_eq!(view.range, StatsRange::SixMonths);
        assert_eq!(view.from, MonthKey::new(Month::January, 2024));
        assert_eq!(view.monthly.len(), 3);

        controller.select_range(StatsRange::ThreeMonths);
        let view = controller.state.ready().unwrap();
        assert_eq!(view.from, MonthKey::new(Month::April, 2024));
        assert_eq!(view.monthly.len(), 2);
        assert_eq!(view.growth[0].growth_percent, 0.0);
        assert!((view.growth[1].growth_percent - 50.0).abs() < 1e-9);

        controller.select_range(StatsRange::LastMonth);
        let view = controller.state.ready().unwrap();
        assert_eq!(view.monthly.len(), 1);
        assert_eq!(view.distribution.len(), 2);
        assert_eq!(view.performance.len(), 2);
    }

    #[tokio::test]
    async fn test_no_entries_is_empty() {
        let mut controller = StatisticsController::new(FakeStore::default(), session());
        controller.refresh().await;
        assert!(controller.state.is_empty());
        controller.select_range(StatsRange::LastYear);
        assert!(controller.state.is_empty());
    }

    #[tokio::test]
    async fn test_failure_becomes_notice() {
        let store = store();
        store.fail_with(ClientError::Transient("timeout".to_string()));
        let mut controller = StatisticsController::new(store, session());
        controller.refresh().await;
        assert!(controller.state.is_empty());
        assert!(controller.notice.is_some());
    }

    #[tokio::test]
    async fn test_successful_refresh_clears_earlier_failure() {
        let store = store();
        store.fail_with(ClientError::Transient("timeout".to_string()));
        let mut controller = StatisticsController::new(store.clone(), session());
        controller.refresh().await;
        assert!(controller.notice.is_some());

        store.recover();
        controller.refresh().await;

        assert!(controller.notice.is_none());
        assert!(controller.state.ready().is_some());
    }
}
