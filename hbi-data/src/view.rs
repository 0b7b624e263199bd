//! Explicit load states and disposal-guarded view models.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

/// Whether loaded data should be shown as the empty state.
pub trait ViewData {
    fn is_empty_view(&self) -> bool;
}

impl<T> ViewData for Vec<T> {
    fn is_empty_view(&self) -> bool {
        self.is_empty()
    }
}

/// Load state of one dashboard panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum LoadState<T> {
    Loading,
    Empty,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

impl<T: ViewData> LoadState<T> {
    /// Map a load result to `Ready`, `Empty` or `Failed`.
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) if data.is_empty_view() => Self::Empty,
            Ok(data) => Self::Ready(data),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Holds a panel's load state and drops updates once disposed.
///
/// Stands in for a component that may unmount while its data is in flight.
#[derive(Debug)]
pub struct ViewModel<T> {
    name: String,
    state: RwLock<LoadState<T>>,
    disposed: AtomicBool,
}

impl<T: Clone + ViewData> ViewModel<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(LoadState::Loading),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn state(&self) -> LoadState<T> {
        self.state.read().await.clone()
    }

    /// Replace the state. Returns `false` if the view was disposed.
    pub async fn set(&self, state: LoadState<T>) -> bool {
        // Check under the write lock so a dispose while waiting is honoured
        let mut guard = self.state.write().await;
        if self.is_disposed() {
            debug!(view = %self.name, "Dropping update to disposed view");
            return false;
        }
        *guard = state;
        true
    }

    /// Run a load, publishing `Loading` first and the outcome after.
    ///
    /// Returns `false` if the view was disposed before the outcome arrived.
    pub async fn load<F, E>(&self, fut: F) -> bool
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        if !self.set(LoadState::Loading).await {
            return false;
        }
        let outcome = LoadState::from_result(fut.await);
        self.set(outcome).await
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_states() {
        let view: ViewModel<Vec<u32>> = ViewModel::new("bids");
        assert!(view.state().await.is_loading());

        assert!(view.load(async { Ok::<_, String>(vec![1, 2]) }).await);
        assert_eq!(view.state().await.ready(), Some(&vec![1, 2]));

        assert!(view.load(async { Ok::<_, String>(Vec::new()) }).await);
        assert_eq!(view.state().await, LoadState::Empty);

        assert!(view.load(async { Err::<Vec<u32>, _>("offline") }).await);
        assert_eq!(view.state().await, LoadState::Failed("offline".to_string()));
    }

    #[tokio::test]
    async fn test_disposed_view_ignores_updates() {
        let view: ViewModel<Vec<u32>> = ViewModel::new("partners");
        view.set(LoadState::Ready(vec![7])).await;
        view.dispose();

        assert!(!view.set(LoadState::Empty).await);
        assert!(!view.load(async { Ok::<_, String>(vec![8]) }).await);
        assert_eq!(view.state().await, LoadState::Ready(vec![7]));
    }

    #[tokio::test]
    async fn test_dispose_while_in_flight() {
        let view: ViewModel<Vec<u32>> = ViewModel::new("documents");
        let (tx, rx) = tokio::sync::oneshot::channel::<Vec<u32>>();

        let load = view.load(async move { rx.await.map_err(|e| e.to_string()) });
        let unmount = async {
            view.dispose();
            let _ = tx.send(vec![1]);
        };
        let (applied, ()) = tokio::join!(load, unmount);

        assert!(!applied);
        assert!(view.state().await.is_loading());
    }

    #[tokio::test]
    async fn test_dispose_while_waiting_for_lock() {
        let view = std::sync::Arc::new(ViewModel::<Vec<u32>>::new("bids"));
        let reader = view.state.read().await;

        let pending = tokio::spawn({
            let view = std::sync::Arc::clone(&view);
            async move { view.set(LoadState::Ready(vec![9])).await }
        });
        tokio::task::yield_now().await;
        view.dispose();
        drop(reader);

        assert!(!pending.await.unwrap());
        assert!(view.state().await.is_loading());
    }

    #[test]
    fn test_serialized_shape() {
        let ready: LoadState<Vec<u32>> = LoadState::Ready(vec![1]);
        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["data"][0], 1);

        let loading: LoadState<Vec<u32>> = LoadState::Loading;
        assert_eq!(serde_json::to_value(&loading).unwrap()["status"], "loading");
    }
}
