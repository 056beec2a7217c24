use crate::app_state::AppState;
use crate::repositories::TransactionLookup;
use crate::services::supply_chain::SupplyChainService;
use agritrack_primitives::error::ApiError;
use agritrack_primitives::models::dtos::transaction_dto::{
    CreateTransactionRequest, LinkTransactionRequest, ListTransactionsQuery, PageRequest,
    TransactionFilter, TransactionPage, DEFAULT_PAGE_SIZE, DEFAULT_PRICE_UNIT,
};
use agritrack_primitives::models::dtos::transaction_patch::UpdateTransactionRequest;
use agritrack_primitives::models::entities::enum_types::TransactionStatus;
use agritrack_primitives::models::entities::transaction::{NewTransaction, Transaction};
use agritrack_primitives::models::entities::transaction_details::BlockchainRecord;
use agritrack_primitives::models::entities::user::User;
use agritrack_primitives::utility::generate_transaction_code;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use validator::Validate;

pub struct TransactionService;

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}

impl TransactionService {
    pub fn create(
        state: &AppState,
        creator: &User,
        payload: CreateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let payload = payload.normalize();
        payload.validate()?;

        let role = creator.role;
        let new_txn = NewTransaction {
            transaction_id: generate_transaction_code(role, Utc::now()),
            created_by: creator.id,
            creator_role: role,
            crop_name: payload.crop_name,
            quantity: payload.quantity,
            quality: payload.quality,
            price: payload.price,
            price_unit: payload
                .price_unit
                .unwrap_or_else(|| DEFAULT_PRICE_UNIT.to_string()),
            target_entity_id: payload.target_entity,
            target_entity_type: role.target_entity_type(),
            target_entity_details: payload
                .target_entity_details
                .as_ref()
                .map(to_json)
                .transpose()?,
            transaction_date: payload.date,
            stage: role.stage(),
            location: payload.location.as_ref().map(to_json).transpose()?,
            metadata: to_json(&payload.metadata.unwrap_or_default())?,
            blockchain: to_json(&BlockchainRecord::default())?,
            status: TransactionStatus::Pending,
            is_verified: false,
        };

        let txn = state.transactions.create(new_txn)?;
        info!(
            transaction_id = %txn.transaction_id,
            user_id = %creator.id,
            stage = %txn.stage,
            "Transaction created"
        );
        Ok(txn)
    }

    pub fn list(
        state: &AppState,
        owner: &User,
        query: ListTransactionsQuery,
    ) -> Result<TransactionPage, ApiError> {
        query.validate()?;

        let status = query
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(TransactionStatus::parse)
            .transpose()?;
        let filter = TransactionFilter {
            status,
            crop_name: query.crop_name,
        };
        let page = PageRequest {
            page: query.page.unwrap_or(1),
            limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        };

        state.transactions.list_for_owner(owner.id, &filter, page)
    }

    pub fn get(state: &AppState, raw_id: &str, requester: &User) -> Result<Transaction, ApiError> {
        Self::load_owned(state, raw_id, requester)
    }

    pub fn update(
        state: &AppState,
        raw_id: &str,
        requester: &User,
        patch: UpdateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let mut txn = Self::load_owned(state, raw_id, requester)?;
        Self::ensure_pending(&txn, "Cannot update confirmed or completed transactions")?;

        patch.validate()?;
        patch.apply_to(&mut txn)?;

        let saved = state.transactions.save(&txn)?;
        info!(transaction_id = %saved.transaction_id, "Transaction updated");
        Ok(saved)
    }

    pub fn delete(state: &AppState, raw_id: &str, requester: &User) -> Result<(), ApiError> {
        let txn = Self::load_owned(state, raw_id, requester)?;
        Self::ensure_pending(&txn, "Cannot delete confirmed or completed transactions")?;

        if !state.transactions.delete(txn.id)? {
            return Err(ApiError::not_found("Transaction"));
        }
        info!(transaction_id = %txn.transaction_id, "Transaction deleted");
        Ok(())
    }

    /// Marks the transaction confirmed regardless of its current status.
    pub fn confirm(
        state: &AppState,
        raw_id: &str,
        requester: &User,
    ) -> Result<Transaction, ApiError> {
        let txn = Self::load_owned(state, raw_id, requester)?;
        let confirmed = state
            .transactions
            .set_status(txn.id, TransactionStatus::Confirmed)?;
        info!(transaction_id = %confirmed.transaction_id, "Transaction confirmed");
        Ok(confirmed)
    }

    /// Records `previousTransactionId` as the predecessor of `raw_id`.
    pub fn link(
        state: &AppState,
        raw_id: &str,
        requester: &User,
        payload: LinkTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        payload.validate()?;
        let current = Self::load_owned(state, raw_id, requester)?;
        let previous = state
            .transactions
            .find(&TransactionLookup::parse(&payload.previous_transaction_id))?
            .ok_or_else(|| ApiError::not_found("Previous transaction"))?;

        if previous.id == current.id {
            return Err(ApiError::InvalidState(
                "A transaction cannot precede itself".into(),
            ));
        }
        if current.previous_transaction.is_some() {
            return Err(ApiError::InvalidState(
                "Transaction already has a predecessor".into(),
            ));
        }
        if previous.next_transaction.is_some() {
            return Err(ApiError::InvalidState(
                "Previous transaction already has a successor".into(),
            ));
        }
        if SupplyChainService::reaches_forward(
            state.transactions.as_ref(),
            &current,
            previous.id,
        )? {
            warn!(
                transaction_id = %current.transaction_id,
                previous = %previous.transaction_id,
                "supply chain: link would create a loop"
            );
            return Err(ApiError::InvalidState(
                "Linking would create a cycle in the supply chain".into(),
            ));
        }

        let linked = state.transactions.link(previous.id, current.id)?;
        info!(
            transaction_id = %linked.transaction_id,
            previous = %previous.transaction_id,
            "Transactions linked"
        );
        Ok(linked)
    }

    fn load_owned(state: &AppState, raw_id: &str, requester: &User) -> Result<Transaction, ApiError> {
        let txn = state
            .transactions
            .find(&TransactionLookup::parse(raw_id))?
            .ok_or_else(|| ApiError::not_found("Transaction"))?;

        if !txn.is_owned_by(requester.id) {
            warn!(
                transaction_id = %txn.transaction_id,
                user_id = %requester.id,
                "transaction access denied"
            );
            return Err(ApiError::access_denied());
        }
        Ok(txn)
    }

    fn ensure_pending(txn: &Transaction, message: &str) -> Result<(), ApiError> {
        if txn.status.is_pending() {
            Ok(())
        } else {
            Err(ApiError::InvalidState(message.into()))
        }
    }
}
