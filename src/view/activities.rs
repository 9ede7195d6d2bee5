//! Activities view
//!
//! Holds the activities read model, the signup form and the activities status
//! region. Commands never patch the catalog locally: a successful signup or
//! unregister re-fetches the whole collection.

use std::time::Duration;

use super::render::{ActivityCard, ACTIVITIES_FAILED, ACTIVITIES_LOADING};
use super::status::StatusBoard;
use super::{failure_text, Outcome};
use crate::client::{Backend, ClientError};
use crate::models::ActivityCatalog;

const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
const UNREGISTER_FAILED: &str = "Failed to unregister. Please try again.";

/// What the activities list region currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivitiesRegion {
    Loading,
    Ready(ActivityCatalog),
    Failed,
}

/// Signup form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

impl SignupForm {
    pub fn reset(&mut self) {
        self.email.clear();
        self.activity.clear();
    }
}

pub struct ActivitiesView<B> {
    backend: B,
    region: ActivitiesRegion,
    options: Vec<String>,
    form: SignupForm,
    status: StatusBoard,
    message_ttl: Duration,
}

impl<B: Backend> ActivitiesView<B> {
    pub fn new(backend: B, message_ttl: Duration) -> Self {
        Self {
            backend,
            region: ActivitiesRegion::Loading,
            options: Vec::new(),
            form: SignupForm::default(),
            status: StatusBoard::new(),
            message_ttl,
        }
    }

    pub fn region(&self) -> &ActivitiesRegion {
        &self.region
    }

    /// Activity names offered by the signup selector
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    /// Cards in server order; empty unless the last load succeeded
    pub fn cards(&self) -> Vec<ActivityCard> {
        match &self.region {
            ActivitiesRegion::Ready(catalog) => catalog
                .iter()
                .map(|(name, activity)| ActivityCard::new(name, activity))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Text rendering of the list region
    pub fn render(&self) -> String {
        match &self.region {
            ActivitiesRegion::Loading => format!("{}\n", ACTIVITIES_LOADING),
            ActivitiesRegion::Failed => format!("{}\n", ACTIVITIES_FAILED),
            ActivitiesRegion::Ready(_) => self
                .cards()
                .iter()
                .map(|card| card.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Fetch the whole catalog and replace the list and the selector options
    pub async fn load(&mut self) {
        match self.backend.list_activities().await {
            Ok(catalog) => {
                tracing::debug!(count = catalog.len(), "activities loaded");
                self.options = catalog.names().map(str::to_string).collect();
                self.region = ActivitiesRegion::Ready(catalog);
            }
            Err(e) => {
                tracing::error!("Error fetching activities: {}", e);
                self.region = ActivitiesRegion::Failed;
            }
        }
    }

    /// Fill the form and submit it
    pub async fn signup(&mut self, activity: &str, email: &str) -> Outcome {
        self.form.activity = activity.to_string();
        self.form.email = email.to_string();
        self.submit_signup().await
    }

    /// Submit the signup form as it currently stands.
    ///
    /// The form is cleared and the list refreshed only on success.
    pub async fn submit_signup(&mut self) -> Outcome {
        let SignupForm { email, activity } = self.form.clone();

        match self.backend.signup(&activity, &email).await {
            Ok(response) => {
                tracing::info!(%activity, %email, "signed up");
                self.status.success(response.message, self.message_ttl);
                self.form.reset();
                self.load().await;
                Outcome::Completed
            }
            Err(e) => self.report(e, SIGNUP_FAILED),
        }
    }

    /// Remove one participant; triggered from a roster row's removal control
    pub async fn unregister(&mut self, activity: &str, email: &str) -> Outcome {
        match self.backend.unregister(activity, email).await {
            Ok(response) => {
                tracing::info!(%activity, %email, "unregistered");
                self.status.success(response.message, self.message_ttl);
                self.load().await;
                Outcome::Completed
            }
            Err(e) => self.report(e, UNREGISTER_FAILED),
        }
    }

    fn report(&mut self, err: ClientError, network_text: &str) -> Outcome {
        let outcome = Outcome::from_error(&err);
        if outcome == Outcome::Failed {
            tracing::error!("{}: {}", network_text, err);
        } else {
            tracing::warn!("command rejected: {}", err);
        }
        self.status
            .error(failure_text(&err, network_text), Some(self.message_ttl));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::MemoryBackend;
    use crate::view::StatusKind;
    use std::sync::Arc;

    fn view(backend: &Arc<MemoryBackend>) -> ActivitiesView<Arc<MemoryBackend>> {
        ActivitiesView::new(Arc::clone(backend), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_load_renders_cards_and_options() {
        let backend = Arc::new(MemoryBackend::chess_club());
        let mut view = view(&backend);
        assert_eq!(view.region(), &ActivitiesRegion::Loading);

        view.load().await;

        assert_eq!(view.options(), &["Chess Club".to_string()]);
        let cards = view.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].availability(), "9 spots left");
        assert_eq!(cards[0].participants()[0].email, "a@x.com");
    }

    #[tokio::test]
    async fn test_load_failure_shows_static_message() {
        let backend = Arc::new(MemoryBackend::chess_club());
        backend.set_offline(true);
        let mut view = view(&backend);

        view.load().await;

        assert_eq!(view.region(), &ActivitiesRegion::Failed);
        assert_eq!(view.render().trim(), ACTIVITIES_FAILED);
        assert_eq!(backend.call_count("GET /activities"), 1);
    }

    #[tokio::test]
    async fn test_signup_success_clears_form_and_refreshes() {
        let backend = Arc::new(MemoryBackend::chess_club());
        let mut view = view(&backend);
        view.load().await;

        let outcome = view.signup("Chess Club", "b@x.com").await;

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(view.form(), &SignupForm::default());
        assert_eq!(backend.call_count("GET /activities"), 2);
        assert_eq!(view.cards()[0].availability(), "8 spots left");

        let message = view.status().current().unwrap();
        assert_eq!(message.kind, StatusKind::Success);
        assert_eq!(message.text, "Signed up b@x.com for Chess Club");
    }

    #[tokio::test]
    async fn test_signup_rejection_keeps_form_and_list() {
        let backend = Arc::new(MemoryBackend::chess_club());
        let mut view = view(&backend);
        view.load().await;

        let outcome = view.signup("Chess Club", "a@x.com").await;

        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(view.form().email, "a@x.com");
        assert_eq!(view.form().activity, "Chess Club");
        assert_eq!(backend.call_count("GET /activities"), 1);

        let message = view.status().current().unwrap();
        assert_eq!(message.kind, StatusKind::Error);
        assert_eq!(message.text, "Student is already signed up");
    }

    #[tokio::test]
    async fn test_signup_network_failure() {
        let backend = Arc::new(MemoryBackend::chess_club());
        let mut view = view(&backend);
        view.load().await;
        backend.set_offline(true);

        let outcome = view.signup("Chess Club", "b@x.com").await;

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(view.status().current().unwrap().text, SIGNUP_FAILED);
        assert_eq!(view.form().email, "b@x.com");
        // the list from the last successful load stays on screen
        assert!(matches!(view.region(), ActivitiesRegion::Ready(_)));
    }

    #[tokio::test]
    async fn test_unregister_from_roster_row() {
        let backend = Arc::new(MemoryBackend::chess_club());
        let mut view = view(&backend);
        view.load().await;

        let row = view.cards()[0].participants()[0].clone();
        let outcome = view.unregister(&row.activity, &row.email).await;

        assert_eq!(outcome, Outcome::Completed);
        assert!(backend.participants("Chess Club").is_empty());
        assert!(view.cards()[0].participants().is_empty());
        assert_eq!(
            view.status().current().unwrap().text,
            "Unregistered a@x.com from Chess Club"
        );
    }

    #[tokio::test]
    async fn test_unregister_unknown_activity() {
        let backend = Arc::new(MemoryBackend::chess_club());
        let mut view = view(&backend);
        view.load().await;

        let outcome = view.unregister("Glee Club", "a@x.com").await;

        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(view.status().current().unwrap().text, "Activity not found");
        assert_eq!(backend.call_count("GET /activities"), 1);
    }
}
