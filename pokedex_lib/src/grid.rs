//! Grid controller: hydrates list stubs into cards and serves the filtered view.
//!
//! A load fetches detail for at most `cap` stubs concurrently on a
//! `JoinSet`, reassembles the results by index so the grid keeps the
//! listing's order, and records a per-item success or failure. Each load
//! takes a new generation; when a newer load has started, an older batch
//! finishing late is dropped instead of overwriting the newer entries.

use std::future::Future;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::catalog::{CatalogItem, CatalogStub};
use crate::client::CachedClient;
use crate::error::PokedexError;
use crate::filter::FilterState;

/// Anything that can turn a stub name into a card.
pub trait DetailSource: Send + Sync + 'static {
    fn fetch_item(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<CatalogItem, PokedexError>> + Send;
}

impl DetailSource for CachedClient {
    async fn fetch_item(&self, name: &str) -> Result<CatalogItem, PokedexError> {
        let pokemon = self.get_pokemon(name).await?;
        Ok(CatalogItem::from(&pokemon))
    }
}

/// One grid slot.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum GridEntry {
    Loaded(CatalogItem),
    /// The detail fetch for this stub failed; the card renders a marker.
    Failed { name: String, reason: String },
}

impl GridEntry {
    pub fn name(&self) -> &str {
        match self {
            GridEntry::Loaded(item) => &item.name,
            GridEntry::Failed { name, .. } => name,
        }
    }

    pub fn item(&self) -> Option<&CatalogItem> {
        match self {
            GridEntry::Loaded(item) => Some(item),
            GridEntry::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, GridEntry::Failed { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridPhase {
    Loading,
    Ready,
}

/// Result of a call to [`GridController::load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The batch's entries are now the grid's entries.
    Applied { generation: u64 },
    /// A newer load started while this batch was in flight; its entries were dropped.
    Superseded { generation: u64, current: u64 },
}

struct GridState {
    generation: u64,
    phase: GridPhase,
    entries: Vec<GridEntry>,
}

pub struct GridController<S> {
    source: Arc<S>,
    cap: usize,
    state: Mutex<GridState>,
}

impl<S: DetailSource> GridController<S> {
    /// `cap` bounds how many stubs of each load are hydrated.
    pub fn new(source: Arc<S>, cap: usize) -> Self {
        Self {
            source,
            cap,
            state: Mutex::new(GridState {
                generation: 0,
                phase: GridPhase::Loading,
                entries: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GridState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn phase(&self) -> GridPhase {
        self.lock().phase
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Every entry of the last applied batch, in stub order.
    pub fn entries(&self) -> Vec<GridEntry> {
        self.lock().entries.clone()
    }

    /// The displayed subset for `filter`. Pure; never touches the network.
    pub fn visible(&self, filter: &FilterState) -> Vec<GridEntry> {
        filter.apply(&self.lock().entries)
    }

    /// Enters LOADING, fetches the first `cap` stubs concurrently, and enters
    /// READY with the results unless a newer load has started meanwhile.
    pub async fn load(&self, stubs: &[CatalogStub]) -> LoadOutcome {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.phase = GridPhase::Loading;
            state.generation
        };

        let names: Vec<String> = stubs
            .iter()
            .take(self.cap)
            .map(|stub| stub.name.clone())
            .collect();
        tracing::debug!(
            "grid load #{}: fetching {} of {} stubs",
            generation,
            names.len(),
            stubs.len()
        );

        let mut slots: Vec<Option<GridEntry>> = vec![None; names.len()];
        let mut join_set = JoinSet::new();
        for (idx, name) in names.iter().cloned().enumerate() {
            let source = Arc::clone(&self.source);
            join_set.spawn(async move {
                let entry = match source.fetch_item(&name).await {
                    Ok(item) => GridEntry::Loaded(item),
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", name, e);
                        GridEntry::Failed {
                            name,
                            reason: e.to_string(),
                        }
                    }
                };
                (idx, entry)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, entry)) => slots[idx] = Some(entry),
                Err(e) => tracing::error!("grid fetch task failed: {}", e),
            }
        }

        let entries: Vec<GridEntry> = slots
            .into_iter()
            .zip(names)
            .map(|(slot, name)| {
                slot.unwrap_or_else(|| GridEntry::Failed {
                    name,
                    reason: "fetch task aborted".to_string(),
                })
            })
            .collect();

        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(
                "grid load #{} superseded by #{}, dropping {} entries",
                generation,
                state.generation,
                entries.len()
            );
            return LoadOutcome::Superseded {
                generation,
                current: state.generation,
            };
        }
        state.entries = entries;
        state.phase = GridPhase::Ready;
        LoadOutcome::Applied { generation }
    }
}
