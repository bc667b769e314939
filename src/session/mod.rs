//! Explicit session context: the bearer token, the signed-in user and a
//! channel announcing sign-in/sign-out to whoever subscribed.

pub mod token_store;

use anyhow::Result;
use log::{debug, info};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;

use crate::domain::CurrentUser;
pub use token_store::{StoredToken, TokenStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(CurrentUser),
    SignedOut,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<CurrentUser>,
    subscribers: Vec<mpsc::UnboundedSender<AuthEvent>>,
}

impl SessionState {
    /// Deliver to every live subscriber; closed ones are dropped
    fn publish(&mut self, event: AuthEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        if self.subscribers.is_empty() {
            debug!("No auth subscribers");
        }
    }
}

/// Cloning yields another handle to the same session.
#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<RwLock<SessionState>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: Arc::default(),
        }
    }

    /// A session that already carries a token but no known user
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.write().token = Some(token.into());
        session
    }

    /// Build a session from a previously stored token, if any
    pub fn restore(store: &TokenStore) -> Result<Self> {
        match store.load()? {
            Some(stored) => {
                info!("Restored session token saved at {}", stored.saved_at);
                Ok(Self::with_token(stored.token))
            }
            None => Ok(Self::new()),
        }
    }

    pub fn sign_in(&self, token: impl Into<String>, user: CurrentUser) {
        let mut state = self.write();
        state.token = Some(token.into());
        state.user = Some(user.clone());
        // Published under the lock so event order matches state order
        state.publish(AuthEvent::SignedIn(user));
    }

    /// No event is emitted when the session is already signed out
    pub fn sign_out(&self) {
        let mut state = self.write();
        if state.token.is_none() && state.user.is_none() {
            return;
        }
        state.token = None;
        state.user = None;
        state.publish(AuthEvent::SignedOut);
    }

    /// Sign out and release this handle
    pub fn close(self) {
        self.sign_out();
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Events emitted before this call are not replayed. Every later event
    /// is kept until the subscription reads it or is dropped.
    pub fn subscribe(&self) -> AuthSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.write().subscribers.push(sender);
        AuthSubscription { receiver }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        let mut state = self.write();
        state.subscribers.retain(|subscriber| !subscriber.is_closed());
        state.subscribers.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Receives auth events in emission order until dropped
pub struct AuthSubscription {
    receiver: mpsc::UnboundedReceiver<AuthEvent>,
}

impl AuthSubscription {
    /// `None` once every session handle is gone and all events are read
    pub async fn recv(&mut self) -> Option<AuthEvent> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<AuthEvent> {
        self.receiver.try_recv().ok()
    }

    pub fn unsubscribe(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> CurrentUser {
        CurrentUser {
            id: 1,
            username: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let session = Session::new();
        let mut subscription = session.subscribe();

        session.sign_in("t1", alice());
        session.sign_out();
        session.sign_in("t2", alice());

        assert_eq!(subscription.recv().await, Some(AuthEvent::SignedIn(alice())));
        assert_eq!(subscription.recv().await, Some(AuthEvent::SignedOut));
        assert_eq!(subscription.recv().await, Some(AuthEvent::SignedIn(alice())));
        assert_eq!(session.token().as_deref(), Some("t2"));
    }

    #[test]
    fn test_earlier_events_are_not_replayed() {
        let session = Session::new();
        session.sign_in("t1", alice());

        let mut subscription = session.subscribe();

        assert_eq!(subscription.try_recv(), None);
    }

    #[test]
    fn test_sign_out_twice_emits_once() {
        let session = Session::with_token("t1");
        let mut subscription = session.subscribe();

        session.sign_out();
        session.sign_out();

        assert_eq!(subscription.try_recv(), Some(AuthEvent::SignedOut));
        assert_eq!(subscription.try_recv(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::new();
        let handle = session.clone();
        let mut subscription = session.subscribe();

        handle.sign_in("t1", alice());

        assert_eq!(session.current_user(), Some(alice()));
        assert_eq!(subscription.try_recv(), Some(AuthEvent::SignedIn(alice())));

        handle.close();
        assert_eq!(session.token(), None);
        assert_eq!(subscription.try_recv(), Some(AuthEvent::SignedOut));
    }

    #[test]
    fn test_slow_subscriber_receives_every_event() {
        let session = Session::new();
        let mut subscription = session.subscribe();

        for round in 0..100 {
            session.sign_in(format!("t{round}"), alice());
            session.sign_out();
        }

        let mut received = Vec::new();
        while let Some(event) = subscription.try_recv() {
            received.push(event);
        }

        assert_eq!(received.len(), 200);
        assert_eq!(received[198], AuthEvent::SignedIn(alice()));
        assert_eq!(received.last(), Some(&AuthEvent::SignedOut));
    }

    #[test]
    fn test_unsubscribed_receiver_is_removed() {
        let session = Session::new();
        let mut kept = session.subscribe();
        let dropped = session.subscribe();
        assert_eq!(session.subscriber_count(), 2);

        dropped.unsubscribe();
        session.sign_in("t1", alice());

        assert_eq!(kept.try_recv(), Some(AuthEvent::SignedIn(alice())));
        assert_eq!(session.subscriber_count(), 1);

        drop(kept);
        assert_eq!(session.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_subscription_ends_when_session_is_gone() {
        let session = Session::new();
        let mut subscription = session.subscribe();

        drop(session);

        assert_eq!(subscription.recv().await, None);
    }

    #[test]
    fn test_restore_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));

        assert!(!Session::restore(&store).unwrap().is_authenticated());

        store.save("stored-token").unwrap();
        let session = Session::restore(&store).unwrap();

        assert_eq!(session.token().as_deref(), Some("stored-token"));
        assert_eq!(session.current_user(), None);
    }
}
