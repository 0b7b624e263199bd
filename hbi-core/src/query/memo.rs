//! Memoized query results.

use super::{query_indices, Queryable, RecordQuery};

/// Caches the indices of the last query so unchanged inputs skip a recompute.
///
/// The caller owns the data and bumps its generation whenever the records
/// change; the memo only compares generations, never record contents.
#[derive(Debug, Default)]
pub struct QueryMemo {
    cached: Option<(RecordQuery, u64, Vec<usize>)>,
    recomputes: u64,
}

impl QueryMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices matching `query` over `records` at `generation`.
    pub fn indices<T: Queryable>(
        &mut self,
        records: &[T],
        generation: u64,
        query: &RecordQuery,
    ) -> &[usize] {
        let fresh = matches!(
            &self.cached,
            Some((cached_query, cached_gen, _))
                if *cached_gen == generation && cached_query == query
        );

        if !fresh {
            self.recomputes += 1;
            let indices = query_indices(records, query);
            self.cached = Some((query.clone(), generation, indices));
        }

        match &self.cached {
            Some((_, _, indices)) => indices,
            None => &[],
        }
    }

    /// Records matching `query`, borrowed from `records`.
    pub fn apply<'a, T: Queryable>(
        &mut self,
        records: &'a [T],
        generation: u64,
        query: &RecordQuery,
    ) -> Vec<&'a T> {
        self.indices(records, generation, query)
            .iter()
            .filter_map(|&index| records.get(index))
            .collect()
    }

    /// Number of times the query has actually been evaluated.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
