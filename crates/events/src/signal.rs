//! Typed observer registry.
//!
//! A [`Signal<E>`] holds an ordered list of receivers for events of type
//! `E`. Receivers are identified by a dispatch uid; connecting the same uid
//! twice keeps the first registration. Sending invokes every receiver
//! synchronously, in registration order, on the caller's thread.

use std::sync::{Arc, PoisonError, RwLock};

use netmon_core::CoreError;

type Handler<E> = Arc<dyn Fn(&E) -> Result<(), CoreError> + Send + Sync>;

struct Receiver<E> {
    dispatch_uid: String,
    handler: Handler<E>,
}

impl<E> Clone for Receiver<E> {
    fn clone(&self) -> Self {
        Self {
            dispatch_uid: self.dispatch_uid.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// A receiver failed while handling an event.
#[derive(Debug, thiserror::Error)]
#[error("Receiver '{dispatch_uid}' of signal '{signal}' failed: {source}")]
pub struct DispatchError {
    pub signal: &'static str,
    pub dispatch_uid: String,
    #[source]
    pub source: CoreError,
}

pub struct Signal<E> {
    name: &'static str,
    receivers: RwLock<Vec<Receiver<E>>>,
}

impl<E> Signal<E> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            receivers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Append a receiver. Returns `false` if `dispatch_uid` is already
    /// connected, in which case the existing receiver is kept.
    pub fn connect<F>(&self, dispatch_uid: impl Into<String>, handler: F) -> bool
    where
        F: Fn(&E) -> Result<(), CoreError> + Send + Sync + 'static,
    {
        let dispatch_uid = dispatch_uid.into();
        let mut receivers = self
            .receivers
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if receivers.iter().any(|r| r.dispatch_uid == dispatch_uid) {
            tracing::debug!(signal = self.name, %dispatch_uid, "Receiver already connected");
            return false;
        }

        tracing::debug!(signal = self.name, %dispatch_uid, "Receiver connected");
        receivers.push(Receiver {
            dispatch_uid,
            handler: Arc::new(handler),
        });
        true
    }

    pub fn disconnect(&self, dispatch_uid: &str) -> bool {
        let mut receivers = self
            .receivers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = receivers.len();
        receivers.retain(|r| r.dispatch_uid != dispatch_uid);
        receivers.len() != before
    }

    pub fn is_connected(&self, dispatch_uid: &str) -> bool {
        self.receivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|r| r.dispatch_uid == dispatch_uid)
    }

    pub fn receiver_count(&self) -> usize {
        self.receivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Receivers are invoked on a snapshot so handlers may connect or
    /// disconnect without deadlocking.
    fn snapshot(&self) -> Vec<Receiver<E>> {
        self.receivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Deliver `event` to every receiver in order.
    ///
    /// The first failing receiver stops dispatch; its error is returned.
    /// On success, returns the number of receivers invoked.
    pub fn send(&self, event: &E) -> Result<usize, DispatchError> {
        let receivers = self.snapshot();
        for receiver in &receivers {
            (receiver.handler)(event).map_err(|source| DispatchError {
                signal: self.name,
                dispatch_uid: receiver.dispatch_uid.clone(),
                source,
            })?;
        }
        Ok(receivers.len())
    }

    /// Deliver `event` to every receiver, collecting each outcome instead of
    /// stopping at the first failure.
    pub fn send_robust(&self, event: &E) -> Vec<(String, Result<(), CoreError>)> {
        self.snapshot()
            .into_iter()
            .map(|receiver| {
                let outcome = (receiver.handler)(event);
                if let Err(e) = &outcome {
                    tracing::warn!(
                        signal = self.name,
                        dispatch_uid = %receiver.dispatch_uid,
                        error = %e,
                        "Receiver failed",
                    );
                }
                (receiver.dispatch_uid, outcome)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> impl Fn(&u32) -> Result<(), CoreError> {
        let log = Arc::clone(log);
        move |value| {
            log.lock().unwrap().push(format!("{tag}:{value}"));
            Ok(())
        }
    }

    #[test]
    fn receivers_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let signal = Signal::<u32>::new("test");
        signal.connect("b", recorder(&log, "b"));
        signal.connect("a", recorder(&log, "a"));

        assert_eq!(signal.send(&7).unwrap(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["b:7", "a:7"]);
    }

    #[test]
    fn duplicate_uid_is_ignored() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let signal = Signal::<u32>::new("test");

        assert!(signal.connect("once", recorder(&log, "first")));
        assert!(!signal.connect("once", recorder(&log, "second")));
        signal.send(&1).unwrap();

        assert_eq!(signal.receiver_count(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["first:1"]);
    }

    #[test]
    fn send_stops_at_first_failure() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let signal = Signal::<u32>::new("test");
        signal.connect("ok", recorder(&log, "ok"));
        signal.connect("broken", |_: &u32| Err(CoreError::Internal("boom".into())));
        signal.connect("never", recorder(&log, "never"));

        let err = signal.send(&3).unwrap_err();

        assert_eq!(err.signal, "test");
        assert_eq!(err.dispatch_uid, "broken");
        assert_matches!(err.source, CoreError::Internal(_));
        assert_eq!(*log.lock().unwrap(), vec!["ok:3"]);
    }

    #[test]
    fn send_robust_runs_every_receiver() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let signal = Signal::<u32>::new("test");
        signal.connect("broken", |_: &u32| Err(CoreError::Internal("boom".into())));
        signal.connect("ok", recorder(&log, "ok"));

        let outcomes = signal.send_robust(&5);

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].0, "broken");
        assert!(outcomes[0].1.is_err());
        assert!(outcomes[1].1.is_ok());
        assert_eq!(*log.lock().unwrap(), vec!["ok:5"]);
    }

    #[test]
    fn disconnect_removes_receiver() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let signal = Signal::<u32>::new("test");
        signal.connect("gone", recorder(&log, "gone"));

        assert!(signal.disconnect("gone"));
        assert!(!signal.disconnect("gone"));
        assert!(!signal.is_connected("gone"));
        assert_eq!(signal.send(&9).unwrap(), 0);
        assert!(log.lock().unwrap().is_empty());
    }
}
