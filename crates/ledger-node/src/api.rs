use crate::constants::{DEFAULT_MINER, DEFAULT_RECORDS_LIMIT, MAX_RECORDS_LIMIT};
use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ledger_core::{
    BlockView, ChainSummary, ChainViolation, HistoryEntry, LedgerError, MiningControl,
    SharedLedger, TransactionView,
};
use ledger_storage::{AuditStore, MiningRecord};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub ledger: SharedLedger,
    pub audit: Arc<dyn AuditStore>,
    /// `None` mines without a bound.
    pub mine_timeout: Option<Duration>,
}

impl AppState {
    fn mining_control(&self) -> MiningControl {
        match self.mine_timeout {
            Some(timeout) => MiningControl::with_timeout(timeout),
            None => MiningControl::unbounded(),
        }
    }
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let status = match err {
            LedgerError::InvalidAmount(_) | LedgerError::DifficultyTooHigh { .. } => {
                StatusCode::BAD_REQUEST
            }
            LedgerError::BlockNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::MiningCancelled { .. } | LedgerError::MiningTimedOut { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            LedgerError::RejectedBlock(_) => StatusCode::CONFLICT,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err:#}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "success": false, "error": self.message }));
        (self.status, body).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<BlockView>,
    pub length: usize,
    pub pending_transactions: usize,
    pub difficulty: u32,
    pub valid: bool,
}

#[derive(Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<ChainViolation>,
}

#[derive(Deserialize)]
pub struct TxIn {
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
}

#[derive(Serialize, Deserialize)]
pub struct TxAccepted {
    pub success: bool,
    pub transaction_id: String,
    pub message: String,
}

#[derive(Deserialize, Default)]
pub struct MineIn {
    pub miner: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct MineResponse {
    pub mined: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockView>,
    pub reward: f64,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct WalletResponse {
    pub address: String,
    pub balance: f64,
    pub transaction_count: usize,
    pub history: Vec<HistoryEntry>,
}

#[derive(Deserialize)]
pub struct RecordsQuery {
    pub limit: Option<usize>,
    pub miner: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(Health { status: "ok" }) }))
        .route("/chain", get(get_chain))
        .route("/chain/summary", get(get_summary))
        .route("/chain/blocks/{index}", get(get_block))
        .route("/chain/validate", get(validate_chain))
        .route("/tx", post(submit_tx))
        .route("/tx/pending", get(pending_txs))
        .route("/mine", post(mine))
        .route("/wallet/{address}", get(wallet))
        .route("/mining/records", get(mining_records))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_chain(State(state): State<AppState>) -> Json<ChainResponse> {
    let response = state.ledger.read(|ledger| ChainResponse {
        chain: ledger.chain_snapshot(),
        length: ledger.len(),
        pending_transactions: ledger.pending_count(),
        difficulty: ledger.difficulty(),
        valid: ledger.is_chain_valid(),
    });
    Json(response)
}

async fn get_summary(State(state): State<AppState>) -> Json<ChainSummary> {
    Json(state.ledger.summary())
}

async fn get_block(State(state): State<AppState>, Path(index): Path<u64>) -> ApiResult<BlockView> {
    Ok(Json(state.ledger.block_view(index)?))
}

async fn validate_chain(State(state): State<AppState>) -> Json<ValidationResponse> {
    let violation = state.ledger.validate_chain().err();
    if let Some(v) = &violation {
        warn!(%v, "chain validation failed");
    }
    Json(ValidationResponse {
        valid: violation.is_none(),
        violation,
    })
}

async fn pending_txs(State(state): State<AppState>) -> Json<Vec<TransactionView>> {
    Json(state.ledger.pending_snapshot())
}

async fn submit_tx(State(state): State<AppState>, Json(tx): Json<TxIn>) -> ApiResult<TxAccepted> {
    if tx.sender.trim().is_empty() || tx.receiver.trim().is_empty() {
        return Err(ApiError::bad_request("sender and receiver are required"));
    }
    let transaction_id = state
        .ledger
        .add_transaction(&tx.sender, &tx.receiver, tx.amount)?;
    Ok(Json(TxAccepted {
        success: true,
        transaction_id,
        message: "Transaction added to pending pool".to_string(),
    }))
}

async fn mine(State(state): State<AppState>, body: Option<Json<MineIn>>) -> ApiResult<MineResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let miner = req
        .miner
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MINER.to_string());

    let ledger = state.ledger.clone();
    let control = state.mining_control();
    let searcher = miner.clone();
    // The nonce search is CPU-bound; keep it off the async workers.
    let mined = tokio::task::spawn_blocking(move || {
        ledger.mine_pending_transactions(&searcher, &control)
    })
    .await
    .context("mining task failed")??;

    let reward = state.ledger.mining_reward();
    let Some(block) = mined else {
        return Ok(Json(MineResponse {
            mined: false,
            block: None,
            reward,
            message: "No pending transactions to mine".to_string(),
        }));
    };

    // The block is already appended; audit failures are logged, not returned.
    let record = MiningRecord::from_block(&miner, &block, state.ledger.difficulty(), reward);
    let balance = state.ledger.get_wallet_balance(&miner);
    match state
        .audit
        .record_mining(&record)
        .and_then(|()| state.audit.put_balance(&miner, balance))
    {
        Ok(()) => info!(miner = %miner, index = block.index, "mining recorded"),
        Err(e) => warn!(
            miner = %miner,
            index = block.index,
            error = %format!("{e:#}"),
            "failed to record mining"
        ),
    }

    Ok(Json(MineResponse {
        mined: true,
        message: format!("Block #{} mined successfully! Reward: {} coins", block.index, reward),
        block: Some(block.view()),
        reward,
    }))
}

async fn wallet(State(state): State<AppState>, Path(address): Path<String>) -> ApiResult<WalletResponse> {
    let (balance, history) = state.ledger.read(|ledger| {
        (
            ledger.get_wallet_balance(&address),
            ledger.get_transaction_history(&address),
        )
    });
    // Only addresses that appear on the chain get a cache entry.
    if !history.is_empty() {
        state.audit.put_balance(&address, balance)?;
    }
    Ok(Json(WalletResponse {
        address,
        balance,
        transaction_count: history.len(),
        history,
    }))
}

async fn mining_records(
    State(state): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> ApiResult<Vec<MiningRecord>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECORDS_LIMIT)
        .min(MAX_RECORDS_LIMIT);
    let records = match query.miner {
        Some(miner) => {
            let mut records = state.audit.mining_by_miner(&miner)?;
            records.truncate(limit);
            records
        }
        None => state.audit.recent_mining(limit)?,
    };
    Ok(Json(records))
}
