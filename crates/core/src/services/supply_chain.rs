use crate::app_state::AppState;
use crate::repositories::{TransactionLookup, TransactionRepository};
use agritrack_primitives::error::ApiError;
use agritrack_primitives::models::entities::transaction::Transaction;
use std::collections::{HashSet, VecDeque};
use tracing::warn;
use uuid::Uuid;

pub struct SupplyChainService;

impl SupplyChainService {
    /// Chain containing the transaction addressed by `raw_id`, oldest first.
    pub fn history_for(state: &AppState, raw_id: &str) -> Result<Vec<Transaction>, ApiError> {
        let origin = state
            .transactions
            .find(&TransactionLookup::parse(raw_id))?
            .ok_or_else(|| ApiError::not_found("Transaction"))?;

        Self::history(state.transactions.as_ref(), origin)
    }

    /// Walks `previous` links to the front, then `next` links to the back.
    /// A null link or a missing record ends that direction. A record seen
    /// twice means the links form a loop; the walk stops there.
    pub fn history(
        repo: &dyn TransactionRepository,
        origin: Transaction,
    ) -> Result<Vec<Transaction>, ApiError> {
        let mut visited = HashSet::from([origin.id]);
        let mut chain = VecDeque::from([origin.clone()]);

        let mut cursor = origin.previous_transaction;
        while let Some(id) = cursor {
            if !visited.insert(id) {
                warn!(origin = %origin.id, repeated = %id, "supply chain: loop in previous links");
                break;
            }
            match repo.find_by_id(id)? {
                Some(txn) => {
                    cursor = txn.previous_transaction;
                    chain.push_front(txn);
                }
                None => break,
            }
        }

        let mut cursor = origin.next_transaction;
        while let Some(id) = cursor {
            if !visited.insert(id) {
                warn!(origin = %origin.id, repeated = %id, "supply chain: loop in next links");
                break;
            }
            match repo.find_by_id(id)? {
                Some(txn) => {
                    cursor = txn.next_transaction;
                    chain.push_back(txn);
                }
                None => break,
            }
        }

        Ok(chain.into())
    }

    /// Whether `target` is reachable by following `next` links from `from`.
    pub fn reaches_forward(
        repo: &dyn TransactionRepository,
        from: &Transaction,
        target: Uuid,
    ) -> Result<bool, ApiError> {
        let mut visited = HashSet::from([from.id]);
        let mut cursor = from.next_transaction;
        while let Some(id) = cursor {
            if id == target {
                return Ok(true);
            }
            if !visited.insert(id) {
                return Ok(false);
            }
            cursor = repo.find_by_id(id)?.and_then(|t| t.next_transaction);
        }
        Ok(false)
    }
}
