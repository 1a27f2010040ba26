//! Auth state change events.
//!
//! Components that care about sessions subscribe to sign-in and sign-out
//! events instead of polling any shared "current user" state.
//!
//! ## Subscription Lifetime
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Auth Event Fan-out                                │
//! │                                                                         │
//! │  sign-in handler ──► AuthEvents::publish(SignedIn)                     │
//! │                            │                                            │
//! │              ┌─────────────┼─────────────┐                              │
//! │              ▼             ▼             ▼                              │
//! │         watcher A     watcher B     (none? event is dropped)           │
//! │                                                                         │
//! │  Dropping a watcher IS the unsubscribe; there is no separate           │
//! │  handle to call and nothing to leak.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::broadcast;

use freshmart_core::types::UserProfile;

/// Capacity of the event buffer per subscriber. Slow subscribers that fall
/// further behind than this see `RecvError::Lagged` and skip ahead.
const EVENT_BUFFER: usize = 64;

/// An auth state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    /// A user presented valid credentials.
    SignedIn(UserProfile),
    /// A session ended by explicit sign-out.
    SignedOut { user_id: String },
}

/// Broadcast channel for auth state changes.
#[derive(Debug, Clone)]
pub struct AuthEvents {
    sender: broadcast::Sender<AuthEvent>,
}

impl AuthEvents {
    /// Creates a new event channel with no subscribers.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER);
        AuthEvents { sender }
    }

    /// Starts watching auth state changes from this point on.
    ///
    /// Past events are not replayed. Drop the watcher to unsubscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event to all current watchers.
    ///
    /// With no watchers the event is simply dropped; publishing never
    /// fails and never blocks.
    pub fn publish(&self, event: AuthEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        AuthEvents::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freshmart_core::types::UserRole;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            email: "admin@freshmart.example".to_string(),
            role: UserRole::Admin,
        }
    }

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let events = AuthEvents::new();
        let mut watcher = events.subscribe();

        events.publish(AuthEvent::SignedIn(profile()));
        events.publish(AuthEvent::SignedOut {
            user_id: "u1".to_string(),
        });

        assert_eq!(watcher.recv().await.unwrap(), AuthEvent::SignedIn(profile()));
        assert_eq!(
            watcher.recv().await.unwrap(),
            AuthEvent::SignedOut {
                user_id: "u1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let events = AuthEvents::new();
        events.publish(AuthEvent::SignedIn(profile()));
    }

    #[tokio::test]
    async fn test_drop_unsubscribes() {
        let events = AuthEvents::new();
        let watcher = events.subscribe();
        drop(watcher);

        // A fresh watcher only sees events published after it subscribed
        events.publish(AuthEvent::SignedIn(profile()));
        let mut late = events.subscribe();
        events.publish(AuthEvent::SignedOut {
            user_id: "u1".to_string(),
        });

        assert_eq!(
            late.recv().await.unwrap(),
            AuthEvent::SignedOut {
                user_id: "u1".to_string()
            }
        );
    }
}
