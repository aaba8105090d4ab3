use shared::FinancialStats;
use tracing::warn;

use super::{notice_for, Notice, ViewState};
use crate::aggregation::{summarize_dashboard, DashboardSummary};
use crate::session::Session;
use crate::store::EntryStore;
use crate::title_table::{build_title_rows, sort_rows, SortColumn, SortState, TitleRow};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub summary: DashboardSummary,
    pub stats: FinancialStats,
    pub rows: Vec<TitleRow>,
}

pub struct DashboardController<S> {
    store: S,
    session: Session,
    pub state: ViewState<DashboardView>,
    pub notice: Option<Notice>,
    pub sort: SortState,
}

impl<S: EntryStore> DashboardController<S> {
    pub fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            state: ViewState::Loading,
            notice: None,
            sort: SortState::default(),
        }
    }

    /// Fetch stats and entries together and rebuild the view
    pub async fn refresh(&mut self) {
        self.state = ViewState::Loading;
        self.notice = None;

        let fetched = tokio::try_join!(self.store.stats(&self.session), self.store.list(&self.session));
        match fetched {
            Ok((stats, entries)) => {
                let summary = summarize_dashboard(&entries);
                if !summary.has_data {
                    self.state = ViewState::Empty;
                    return;
                }
                let mut rows = build_title_rows(&entries);
                sort_rows(&mut rows, self.sort);
                self.state = ViewState::Ready(DashboardView { summary, stats, rows });
            }
            Err(e) => {
                warn!("Failed to load dashboard: {}", e);
                self.notice = Some(notice_for(&e));
                self.state = ViewState::Empty;
            }
        }
    }

    pub fn has_data(&self) -> bool {
        self.state
            .ready()
            .map(|view| view.summary.has_data)
            .unwrap_or(false)
    }

    /// Select a table column; selecting the active column reverses it
    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort.select(column);
        if let ViewState::Ready(view) = &mut self.state {
            sort_rows(&mut view.rows, self.sort);
        }
    }

    /// Delete one particular and reload; false when the store call failed
    pub async fn delete_entry(&mut self, id: &str) -> bool {
        match self.store.delete(&self.session, id).await {
            Ok(true) => self.notice = Some(Notice::Toast("Particular deleted".to_string())),
            Ok(false) => self.notice = Some(Notice::Toast("Particular was already removed".to_string())),
            Err(e) => {
                warn!("Failed to delete entry {}: {}", id, e);
                self.notice = Some(notice_for(&e));
                return false;
            }
        }
        let notice = self.notice.take();
        self.refresh().await;
        if self.notice.is_none() {
            self.notice = notice;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;
    use crate::store::fake::{entry, session, FakeStore};
    use crate::title_table::SortDirection;
    use shared::Month;

    #[tokio::test]
    async fn test_empty_dashboard() {
        let mut controller = DashboardController::new(FakeStore::default(), session());
        assert_eq!(controller.state, ViewState::Loading);

        controller.refresh().await;

        assert!(controller.state.is_empty());
        assert!(!controller.has_data());
        assert!(controller.notice.is_none());
    }

    #[tokio::test]
    async fn test_ready_dashboard() {
        let store = FakeStore::with_entries(vec![
            entry("1", "Bank Account", "Savings", 1000.0, 0.0, 1000.0, Month::January, 2024),
            entry("2", "Bank Account", "Savings", 1200.0, 0.0, 1200.0, Month::February, 2024),
        ]);
        let mut controller = DashboardController::new(store, session());
        controller.refresh().await;

        assert!(controller.has_data());
        let view = controller.state.ready().unwrap();
        assert!((view.summary.monthly_growth - 20.0).abs() < 1e-9);
        assert_eq!(view.stats.total_entries, 2);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].id, "2");
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_to_empty() {
        let store = FakeStore::with_entries(vec![entry("1", "Gold", "Coins", 0.0, 10.0, 10.0, Month::May, 2024)]);
        store.fail_with(ClientError::Transient("Server unavailable".to_string()));
        let mut controller = DashboardController::new(store, session());

        controller.refresh().await;

        assert!(controller.state.is_empty());
        assert!(matches!(controller.notice, Some(Notice::Toast(_))));
    }

    #[tokio::test]
    async fn test_expired_session_asks_for_sign_in() {
        let store = FakeStore::default();
        store.fail_with(ClientError::Auth("Invalid or expired session".to_string()));
        let mut controller = DashboardController::new(store, session());

        controller.refresh().await;

        assert!(matches!(controller.notice, Some(Notice::SignIn(_))));
    }

    #[tokio::test]
    async fn test_sort_and_delete() {
        let store = FakeStore::with_entries(vec![
            entry("a", "Stocks", "Tech", 0.0, 100.0, 150.0, Month::May, 2024),
            entry("b", "Gold", "Coins", 0.0, 300.0, 290.0, Month::May, 2024),
        ]);
        let mut controller = DashboardController::new(store.clone(), session());
        controller.refresh().await;

        controller.sort_by(SortColumn::Investment);
        controller.sort_by(SortColumn::Investment);
        assert_eq!(controller.sort.direction, SortDirection::Descending);
        let ids: Vec<&str> = controller.state.ready().unwrap().rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        assert!(controller.delete_entry("b").await);
        assert_eq!(controller.state.ready().unwrap().rows.len(), 1);
        assert_eq!(store.state.lock().unwrap().entries.len(), 1);

        assert!(controller.delete_entry("b").await);
        assert_eq!(
            controller.notice,
            Some(Notice::Toast("Particular was already removed".to_string()))
        );
    }

    #[tokio::test]
    async fn test_successful_refresh_clears_earlier_failure() {
        let store = FakeStore::with_entries(vec![entry("1", "Gold", "Coins", 0.0, 10.0, 10.0, Month::May, 2024)]);
        store.fail_with(ClientError::Transient("Server unavailable".to_string()));
        let mut controller = DashboardController::new(store.clone(), session());
        controller.refresh().await;
        assert!(controller.notice.is_some());

        store.recover();
        controller.refresh().await;

        assert_eq!(controller.notice, None);
        assert!(controller.has_data());
    }
}
