//! In-session store for staffing plan change requests.
//!
//! Requests are created and advanced here, never deleted. Every change bumps
//! a generation counter, which keys the memoized table query.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use hbi_core::{
    apply_query, create_spcr, Actor, QueryMemo, RecordQuery, ReviewAction, Spcr, SpcrDraft,
    WorkflowStage,
};
use tracing::debug;

use crate::error::ServiceError;

#[derive(Debug, Default)]
pub struct StaffingStore {
    requests: DashMap<String, Spcr>,
    generation: AtomicU64,
    memo: Mutex<QueryMemo>,
}

impl StaffingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with loaded requests. Existing ids are replaced.
    pub fn load(&self, requests: impl IntoIterator<Item = Spcr>) -> usize {
        let mut count = 0;
        for spcr in requests {
            self.requests.insert(spcr.id.clone(), spcr);
            count += 1;
        }
        self.bump();
        debug!(count = count, "Seeded staffing store");
        count
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Changes applied so far. Moves on every load, create and stage change.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Times the table query was actually evaluated rather than served from the memo.
    pub fn query_recomputes(&self) -> u64 {
        self.memo_guard().recompute_count()
    }

    pub fn get(&self, id: &str) -> Option<Spcr> {
        self.requests.get(id).map(|entry| entry.value().clone())
    }

    /// All requests, oldest first.
    pub fn list(&self) -> Vec<Spcr> {
        let mut requests: Vec<Spcr> = self
            .requests
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        requests.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        requests
    }

    /// Requests matching a table query.
    ///
    /// Repeating a query with no change in between reuses the cached order.
    pub fn query(&self, query: &RecordQuery) -> Vec<Spcr> {
        let mut memo = self.memo_guard();
        let generation = self.generation();
        let requests = self.list();

        // A change landed mid-listing; answer without caching
        if generation != self.generation() {
            return apply_query(&requests, query).into_iter().cloned().collect();
        }
        memo.apply(&requests, generation, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Requests waiting on a reviewer with this role key.
    pub fn pending_for(&self, role: &str) -> Vec<Spcr> {
        self.list()
            .into_iter()
            .filter(|spcr| {
                spcr.workflow_stage
                    .pending_reviewer()
                    .is_some_and(|reviewer| reviewer.as_str() == role)
            })
            .collect()
    }

    pub fn create(
        &self,
        draft: SpcrDraft,
        requester: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Spcr, ServiceError> {
        let spcr = create_spcr(draft, requester, now)?;
        self.requests.insert(spcr.id.clone(), spcr.clone());
        self.bump();
        Ok(spcr)
    }

    pub fn transition(
        &self,
        id: &str,
        to: WorkflowStage,
        actor: &Actor,
        comment: &str,
        now: DateTime<Utc>,
    ) -> Result<Spcr, ServiceError> {
        let mut entry = self
            .requests
            .get_mut(id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        entry.transition(to, actor, comment, now)?;
        let updated = entry.value().clone();
        drop(entry);
        self.bump();
        Ok(updated)
    }

    pub fn review(
        &self,
        id: &str,
        action: ReviewAction,
        actor: &Actor,
        comment: &str,
        now: DateTime<Utc>,
    ) -> Result<Spcr, ServiceError> {
        let mut entry = self
            .requests
            .get_mut(id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        entry.apply(action, actor, comment, now)?;
        let updated = entry.value().clone();
        drop(entry);
        self.bump();
        Ok(updated)
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn memo_guard(&self) -> MutexGuard<'_, QueryMemo> {
        // The memo is a cache; a poisoned one is still safe to reuse
        self.memo.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
