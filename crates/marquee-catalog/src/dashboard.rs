//! Admin dashboard controller
//!
//! Keeps the movies picked for import and turns every batch request into a
//! notification. Failures never propagate; the UI only sees the message.

use parking_lot::RwLock;
use std::sync::Arc;

use marquee_auth::SessionManager;

use crate::client::MovieCatalog;
use crate::error::CatalogError;
use crate::movie::Movie;
use crate::notification::Notification;

const ADDED: &str = "Movies added successfully";
const ADD_FAILED: &str = "Failed to add movies";
const DELETED: &str = "Movies deleted successfully";
const DELETE_FAILED: &str = "Failed to delete movies";

pub struct AdminDashboard {
    catalog: Arc<dyn MovieCatalog>,
    session: SessionManager,
    /// Movies picked in the search results, waiting to be added
    selected: Arc<RwLock<Vec<Movie>>>,
}

impl AdminDashboard {
    pub fn new(catalog: Arc<dyn MovieCatalog>, session: SessionManager) -> Self {
        Self {
            catalog,
            session,
            selected: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replace the current selection.
    pub fn on_movies_selected(&self, movies: Vec<Movie>) {
        *self.selected.write() = movies;
    }

    pub fn selected_movies(&self) -> Vec<Movie> {
        self.selected.read().clone()
    }

    /// Add `movies` to the catalog. The selection is cleared on success.
    pub async fn add_to_database(&self, movies: &[Movie]) -> Notification {
        let result = match self.require_admin() {
            Ok(()) => self.catalog.batch_add(movies).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.selected.write().clear();
                tracing::info!(count = movies.len(), "Added movies to catalog");
                Notification::success(ADDED)
            }
            Err(e) => {
                tracing::warn!(count = movies.len(), error = %e, "Batch add failed");
                Notification::from_error(&e, ADD_FAILED)
            }
        }
    }

    pub async fn delete_from_database(&self, movie_ids: &[i64]) -> Notification {
        let result = match self.require_admin() {
            Ok(()) => self.catalog.batch_delete(movie_ids).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!(count = movie_ids.len(), "Deleted movies from catalog");
                Notification::success(DELETED)
            }
            Err(e) => {
                tracing::warn!(count = movie_ids.len(), error = %e, "Batch delete failed");
                Notification::from_error(&e, DELETE_FAILED)
            }
        }
    }

    fn require_admin(&self) -> Result<(), CatalogError> {
        if self.session.is_admin() {
            Ok(())
        } else {
            Err(CatalogError::AdminRequired)
        }
    }
}

impl Clone for AdminDashboard {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            session: self.session.clone(),
            selected: Arc::clone(&self.selected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationKind;
    use crate::test_support::session_with_role;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct FakeCatalog {
        fail_with: Option<(u16, Option<String>)>,
        added: Mutex<Vec<Movie>>,
        deleted: Mutex<Vec<i64>>,
    }

    impl FakeCatalog {
        fn failing(status: u16, message: Option<&str>) -> Self {
            Self {
                fail_with: Some((status, message.map(str::to_string))),
                ..Self::default()
            }
        }

        fn outcome(&self) -> crate::Result<()> {
            match &self.fail_with {
                Some((status, message)) => Err(CatalogError::Api {
                    status: *status,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl MovieCatalog for FakeCatalog {
        async fn batch_add(&self, movies: &[Movie]) -> crate::Result<()> {
            self.outcome()?;
            self.added.lock().extend_from_slice(movies);
            Ok(())
        }

        async fn batch_delete(&self, movie_ids: &[i64]) -> crate::Result<()> {
            self.outcome()?;
            self.deleted.lock().extend_from_slice(movie_ids);
            Ok(())
        }
    }

    fn picks() -> Vec<Movie> {
        vec![Movie::new("Metropolis"), Movie::new("Nosferatu")]
    }

    #[tokio::test]
    async fn test_add_clears_selection() {
        let catalog = Arc::new(FakeCatalog::default());
        let dashboard =
            AdminDashboard::new(catalog.clone(), session_with_role(Some("ROLE_ADMIN")));

        dashboard.on_movies_selected(picks());
        assert_eq!(dashboard.selected_movies().len(), 2);

        let notification = dashboard.add_to_database(&picks()).await;
        assert_eq!(notification, Notification::success("Movies added successfully"));
        assert!(dashboard.selected_movies().is_empty());
        assert_eq!(catalog.added.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_add_keeps_selection() {
        let dashboard = AdminDashboard::new(
            Arc::new(FakeCatalog::failing(409, Some("Metropolis already exists"))),
            session_with_role(Some("ROLE_ADMIN")),
        );
        dashboard.on_movies_selected(picks());

        let notification = dashboard.add_to_database(&picks()).await;
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Metropolis already exists");
        assert_eq!(dashboard.selected_movies().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_messages() {
        let catalog = Arc::new(FakeCatalog::default());
        let dashboard =
            AdminDashboard::new(catalog.clone(), session_with_role(Some("ROLE_ADMIN")));

        let ok = dashboard.delete_from_database(&[4, 8]).await;
        assert_eq!(ok.message, "Movies deleted successfully");
        assert_eq!(*catalog.deleted.lock(), vec![4, 8]);

        let failing = AdminDashboard::new(
            Arc::new(FakeCatalog::failing(500, None)),
            session_with_role(Some("ROLE_ADMIN")),
        );
        let err = failing.delete_from_database(&[4]).await;
        assert!(err.is_error());
        assert_eq!(err.message, "Failed to delete movies");
    }

    #[tokio::test]
    async fn test_non_admin_is_refused_locally() {
        let catalog = Arc::new(FakeCatalog::default());

        for session in [session_with_role(Some("ROLE_USER")), session_with_role(None)] {
            let dashboard = AdminDashboard::new(catalog.clone(), session);
            let notification = dashboard.add_to_database(&picks()).await;
            assert_eq!(notification.message, "Admin access required");
            assert!(notification.is_error());

            let notification = dashboard.delete_from_database(&[1]).await;
            assert_eq!(notification.message, "Admin access required");
        }

        assert!(catalog.added.lock().is_empty());
        assert!(catalog.deleted.lock().is_empty());
    }
}
