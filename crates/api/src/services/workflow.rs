//! Asset repair workflow orchestration.
//!
//! Each operation runs its database writes inside one transaction and
//! appends a workflow step to the audit trail. Expected business failures
//! (wrong state, missing link, repeated step) are reported in the result DTO
//! with `success = false` and HTTP 200; only infrastructure errors surface
//! as [`AppError`]. Ordering between steps is enforced solely by entity
//! state preconditions, so out-of-order calls fail cleanly without writes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use wardtrack_core::audit::{action_types, entity_types};
use wardtrack_core::error::CoreError;
use wardtrack_core::types::{DbId, Timestamp};
use wardtrack_core::workflow::{self, PartRequest};
use wardtrack_core::{asset_status, procurement_status, request_status};
use wardtrack_db::models::asset::{Asset, MoveAsset};
use wardtrack_db::models::audit::CreateAuditLog;
use wardtrack_db::models::procurement::{CreateProcurement, ProcurementItemInput};
use wardtrack_db::models::request::ItRequest;
use wardtrack_db::repositories::{
    AssetRepo, AuditLogRepo, InventoryRepo, ProcurementRepo, RequestRepo,
};

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Result DTOs
// ---------------------------------------------------------------------------

/// Result of starting the repair workflow.
#[derive(Debug, Serialize)]
pub struct StartRepairResult {
    pub success: bool,
    pub message: String,
    /// Step labels recorded so far, in order.
    pub workflow_steps: Vec<String>,
    /// Whether the repair needs procurement before it can finish.
    pub requires_procurement: bool,
    /// Procurement requests already generated from this request.
    pub generated_procurement_ids: Vec<DbId>,
    /// The temporary replacement asset, if one is deployed.
    pub temporary_replacement_asset_id: Option<DbId>,
}

/// Result of deploying a temporary replacement asset.
#[derive(Debug, Serialize)]
pub struct ReplaceAssetResult {
    pub success: bool,
    pub message: String,
    pub original_asset_id: Option<DbId>,
    pub replacement_asset_id: Option<DbId>,
    /// Where the replacement was deployed.
    pub location_id: Option<DbId>,
}

/// Result of generating procurement for repair parts.
#[derive(Debug, Serialize)]
pub struct GenerateProcurementResult {
    pub success: bool,
    pub message: String,
    pub generated_procurement_request_ids: Vec<DbId>,
    pub generated_items: i64,
    pub total_estimated_cost: Decimal,
}

/// Result of completing the repair.
#[derive(Debug, Serialize)]
pub struct CompleteRepairResult {
    pub success: bool,
    pub message: String,
    pub asset_id: Option<DbId>,
    /// Substitute returned to the pool, if one was out.
    pub returned_temporary_asset_id: Option<DbId>,
}

/// Result of acknowledging a received procurement.
#[derive(Debug, Serialize)]
pub struct ProcurementReceivedResult {
    pub success: bool,
    pub message: String,
    pub all_parts_received: bool,
}

/// One recorded workflow step, reconstructed from the audit trail.
#[derive(Debug, Serialize)]
pub struct WorkflowStep {
    pub label: String,
    pub actor_id: Option<DbId>,
    pub recorded_at: Timestamp,
}

/// Read-only workflow status for a request.
#[derive(Debug, Serialize)]
pub struct WorkflowStatus {
    pub request: ItRequest,
    pub workflow_steps: Vec<WorkflowStep>,
    pub related_procurement_ids: Vec<DbId>,
    pub temporary_asset_id: Option<DbId>,
    pub pending_actions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Input DTOs
// ---------------------------------------------------------------------------

/// Body for the replace step.
#[derive(Debug, Deserialize)]
pub struct ReplaceAssetInput {
    pub replacement_asset_id: DbId,
}

/// Body for the procurement generation step.
#[derive(Debug, Deserialize)]
pub struct GenerateProcurementInput {
    pub part_requests: Vec<PartRequest>,
    pub vendor_id: Option<DbId>,
}

/// Body for the completion step.
#[derive(Debug, Deserialize, Default)]
pub struct CompleteRepairInput {
    pub completion_notes: Option<String>,
    pub final_location_id: Option<DbId>,
}

/// Body for the procurement-received acknowledgement.
#[derive(Debug, Deserialize)]
pub struct ProcurementReceivedInput {
    pub procurement_request_id: DbId,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Orchestrates the request -> procurement -> inventory -> repair flow.
pub struct WorkflowService;

impl WorkflowService {
    /// Start the repair workflow for an IT request.
    ///
    /// Moves the damaged asset to `maintenance_pending`, moves the request to
    /// `in_progress`, and reports whether procurement will be needed.
    pub async fn start_repair(
        pool: &PgPool,
        request_id: DbId,
        user_id: DbId,
    ) -> AppResult<StartRepairResult> {
        let mut tx = pool.begin().await.map_err(AppError::Database)?;

        let Some(request) = RequestRepo::find_by_id_tx(&mut tx, request_id).await? else {
            return Ok(Self::start_failure(format!(
                "IT request {request_id} not found"
            )));
        };
        if request_status::is_terminal(&request.status) {
            return Ok(Self::start_failure(format!(
                "Request {} is already {}",
                request.request_number, request.status
            )));
        }
        let Some(asset_id) = request.damaged_asset_id else {
            return Ok(Self::start_failure(format!(
                "Request {} has no damaged asset linked",
                request.request_number
            )));
        };
        let Some(asset) = AssetRepo::find_by_id_tx(&mut tx, asset_id).await? else {
            return Ok(Self::start_failure(format!("Asset {asset_id} not found")));
        };

        if let Err(err) = asset_status::validate_transition(
            &asset.status,
            asset_status::STATUS_MAINTENANCE_PENDING,
        ) {
            return Ok(Self::start_failure(err.to_string()));
        }
        Self::set_asset_status(
            &mut tx,
            &asset,
            asset_status::STATUS_MAINTENANCE_PENDING,
        )
        .await?;

        if request.status == request_status::STATUS_SUBMITTED {
            RequestRepo::set_status_with_activity(
                &mut tx,
                request.id,
                request_status::STATUS_IN_PROGRESS,
                user_id,
                Some("Repair workflow started"),
                request.row_version,
            )
            .await?
            .ok_or_else(Self::stale_request)?;
        }

        // Procurement is needed when parts were already requested for this
        // repair, or when the required spare is out of stock.
        let prior_procurements =
            ProcurementRepo::list_by_originating_request_tx(&mut tx, request.id).await?;
        let required_stock = match request.required_inventory_item_id {
            Some(item_id) => InventoryRepo::find_by_id_tx(&mut tx, item_id)
                .await?
                .map(|item| item.quantity),
            None => None,
        };
        let requires_procurement =
            workflow::requires_procurement(!prior_procurements.is_empty(), required_stock);

        Self::record_step(
            &mut tx,
            request.id,
            user_id,
            workflow::STEP_STARTED,
            serde_json::json!({ "asset_id": asset.id }),
        )
        .await?;
        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            request_id = request.id,
            asset_id = asset.id,
            requires_procurement,
            "Repair workflow started"
        );

        Ok(StartRepairResult {
            success: true,
            message: format!("Repair workflow started for {}", request.request_number),
            workflow_steps: Self::step_labels(pool, request.id).await?,
            requires_procurement,
            generated_procurement_ids: prior_procurements.iter().map(|p| p.id).collect(),
            temporary_replacement_asset_id: request.temporary_asset_id,
        })
    }

    /// Deploy a temporary replacement asset in place of the damaged one.
    ///
    /// The replacement must be `available`. It takes over the damaged
    /// asset's location and assignee; the damaged asset goes `in_transit`
    /// when it held a location.
    pub async fn replace_asset_temporarily(
        pool: &PgPool,
        request_id: DbId,
        input: &ReplaceAssetInput,
        user_id: DbId,
    ) -> AppResult<ReplaceAssetResult> {
        let mut tx = pool.begin().await.map_err(AppError::Database)?;

        let Some(request) = RequestRepo::find_by_id_tx(&mut tx, request_id).await? else {
            return Ok(Self::replace_failure(format!(
                "IT request {request_id} not found"
            )));
        };
        if request_status::is_terminal(&request.status) {
            return Ok(Self::replace_failure(format!(
                "Request {} is already {}",
                request.request_number, request.status
            )));
        }
        if let Some(existing) = request.temporary_asset_id {
            return Ok(Self::replace_failure(format!(
                "Request {} already has replacement asset {existing} deployed",
                request.request_number
            )));
        }
        let Some(damaged_id) = request.damaged_asset_id else {
            return Ok(Self::replace_failure(format!(
                "Request {} has no damaged asset linked",
                request.request_number
            )));
        };
        let Some(damaged) = AssetRepo::find_by_id_tx(&mut tx, damaged_id).await? else {
            return Ok(Self::replace_failure(format!(
                "Asset {damaged_id} not found"
            )));
        };
        let Some(replacement) =
            AssetRepo::find_by_id_tx(&mut tx, input.replacement_asset_id).await?
        else {
            return Ok(Self::replace_failure(format!(
                "Replacement asset {} not found",
                input.replacement_asset_id
            )));
        };
        if replacement.status != asset_status::STATUS_AVAILABLE {
            return Ok(Self::replace_failure(format!(
                "Replacement asset {} is {}, not available",
                replacement.asset_tag, replacement.status
            )));
        }

        // Replacement takes over the damaged asset's spot.
        let mv = MoveAsset {
            new_location_id: damaged.location_id,
            new_user_id: damaged.assigned_to,
            reason: format!(
                "Temporary replacement for {} ({})",
                damaged.asset_tag, request.request_number
            ),
        };
        let moved = AssetRepo::move_asset(&mut tx, &replacement, &mv, user_id)
            .await?
            .ok_or_else(Self::stale_asset)?;
        Self::set_asset_status(&mut tx, &moved, asset_status::STATUS_IN_USE).await?;

        if damaged.location_id.is_some()
            && asset_status::can_transition(&damaged.status, asset_status::STATUS_IN_TRANSIT)
        {
            Self::set_asset_status(&mut tx, &damaged, asset_status::STATUS_IN_TRANSIT).await?;
        }

        RequestRepo::set_temporary_asset(
            &mut tx,
            request.id,
            Some(replacement.id),
            request.row_version,
        )
        .await?
        .ok_or_else(Self::stale_request)?;

        Self::record_step(
            &mut tx,
            request.id,
            user_id,
            workflow::STEP_REPLACEMENT_DEPLOYED,
            serde_json::json!({
                "original_asset_id": damaged.id,
                "replacement_asset_id": replacement.id,
                "location_id": damaged.location_id,
            }),
        )
        .await?;
        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            request_id = request.id,
            replacement_asset_id = replacement.id,
            "Temporary replacement deployed"
        );

        Ok(ReplaceAssetResult {
            success: true,
            message: format!(
                "Asset {} deployed as temporary replacement for {}",
                replacement.asset_tag, damaged.asset_tag
            ),
            original_asset_id: Some(damaged.id),
            replacement_asset_id: Some(replacement.id),
            location_id: damaged.location_id,
        })
    }

    /// Generate (or extend) a draft procurement request for repair parts.
    ///
    /// Appends to the request's open draft when one exists; the budget is
    /// recomputed from the line items. The draft is not auto-submitted.
    pub async fn generate_procurement_from_repair(
        pool: &PgPool,
        request_id: DbId,
        input: &GenerateProcurementInput,
        user_id: DbId,
    ) -> AppResult<GenerateProcurementResult> {
        if let Err(err) = workflow::validate_part_requests(&input.part_requests) {
            return Ok(Self::procurement_failure(err.to_string()));
        }

        let mut tx = pool.begin().await.map_err(AppError::Database)?;

        let Some(request) = RequestRepo::find_by_id_tx(&mut tx, request_id).await? else {
            return Ok(Self::procurement_failure(format!(
                "IT request {request_id} not found"
            )));
        };
        if request_status::is_terminal(&request.status) {
            return Ok(Self::procurement_failure(format!(
                "Request {} is already {}",
                request.request_number, request.status
            )));
        }

        let lines: Vec<ProcurementItemInput> = input
            .part_requests
            .iter()
            .map(|p| ProcurementItemInput {
                item_name: p.part_name.clone(),
                quantity: p.quantity,
                unit_price: p.estimated_unit_price,
                inventory_item_id: p.inventory_item_id,
            })
            .collect();

        let open_draft = ProcurementRepo::list_by_originating_request_tx(&mut tx, request.id)
            .await?
            .into_iter()
            .find(|p| p.status == procurement_status::STATUS_DRAFT);

        let procurement = match open_draft {
            Some(draft) => ProcurementRepo::add_items(&mut tx, draft.id, &lines).await?,
            None => {
                let create = CreateProcurement {
                    vendor_id: input.vendor_id,
                    originating_request_id: Some(request.id),
                    items: lines,
                };
                ProcurementRepo::create_with_items(&mut tx, &create, user_id).await?
            }
        };

        let total = workflow::total_estimated_cost(&input.part_requests);
        Self::record_step(
            &mut tx,
            request.id,
            user_id,
            workflow::STEP_PROCUREMENT_GENERATED,
            serde_json::json!({
                "procurement_request_id": procurement.id,
                "items": input.part_requests.len(),
                "total_estimated_cost": total,
            }),
        )
        .await?;
        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            request_id = request.id,
            procurement_id = procurement.id,
            items = input.part_requests.len(),
            "Procurement generated from repair"
        );

        let all = ProcurementRepo::list_by_originating_request(pool, request.id).await?;
        Ok(GenerateProcurementResult {
            success: true,
            message: format!(
                "Procurement {} covers {} part(s)",
                procurement.request_number,
                input.part_requests.len()
            ),
            generated_procurement_request_ids: all.iter().map(|p| p.id).collect(),
            generated_items: input.part_requests.len() as i64,
            total_estimated_cost: total,
        })
    }

    /// Complete the repair: return the asset to service, recall any
    /// temporary substitute, and close the request.
    pub async fn complete_asset_repair(
        pool: &PgPool,
        request_id: DbId,
        input: &CompleteRepairInput,
        user_id: DbId,
    ) -> AppResult<CompleteRepairResult> {
        let mut tx = pool.begin().await.map_err(AppError::Database)?;

        let Some(request) = RequestRepo::find_by_id_tx(&mut tx, request_id).await? else {
            return Ok(Self::complete_failure(format!(
                "IT request {request_id} not found"
            )));
        };
        if request_status::is_terminal(&request.status) {
            return Ok(Self::complete_failure(format!(
                "Request {} is already {}",
                request.request_number, request.status
            )));
        }
        if let Err(err) =
            request_status::validate_transition(&request.status, request_status::STATUS_COMPLETED)
        {
            return Ok(Self::complete_failure(err.to_string()));
        }
        let Some(asset_id) = request.damaged_asset_id else {
            return Ok(Self::complete_failure(format!(
                "Request {} has no damaged asset linked",
                request.request_number
            )));
        };
        let Some(asset) = AssetRepo::find_by_id_tx(&mut tx, asset_id).await? else {
            return Ok(Self::complete_failure(format!("Asset {asset_id} not found")));
        };
        if !asset_status::is_maintenance_status(&asset.status) {
            return Ok(Self::complete_failure(format!(
                "Asset {} is {}, not under repair",
                asset.asset_tag, asset.status
            )));
        }

        // Return the repaired asset to service, unassigned.
        let mv = MoveAsset {
            new_location_id: input.final_location_id.or(asset.location_id),
            new_user_id: None,
            reason: format!("Repair completed ({})", request.request_number),
        };
        let moved = AssetRepo::move_asset(&mut tx, &asset, &mv, user_id)
            .await?
            .ok_or_else(Self::stale_asset)?;
        Self::set_asset_status(&mut tx, &moved, asset_status::STATUS_AVAILABLE).await?;

        // Recall the temporary substitute, if one is out.
        let mut returned_temporary = None;
        if let Some(tmp_id) = request.temporary_asset_id {
            if let Some(substitute) = AssetRepo::find_by_id_tx(&mut tx, tmp_id).await? {
                let prior_location = AssetRepo::last_movement_tx(&mut tx, tmp_id)
                    .await?
                    .and_then(|m| m.from_location_id);
                let recall = MoveAsset {
                    new_location_id: prior_location,
                    new_user_id: None,
                    reason: format!("Substitute recalled ({})", request.request_number),
                };
                let recalled = AssetRepo::move_asset(&mut tx, &substitute, &recall, user_id)
                    .await?
                    .ok_or_else(Self::stale_asset)?;
                Self::set_asset_status(&mut tx, &recalled, asset_status::STATUS_AVAILABLE)
                    .await?;
                returned_temporary = Some(tmp_id);
            }
        }

        let request = RequestRepo::set_temporary_asset(
            &mut tx,
            request.id,
            None,
            request.row_version,
        )
        .await?
        .ok_or_else(Self::stale_request)?;

        RequestRepo::set_status_with_activity(
            &mut tx,
            request.id,
            request_status::STATUS_COMPLETED,
            user_id,
            input.completion_notes.as_deref(),
            request.row_version,
        )
        .await?
        .ok_or_else(Self::stale_request)?;

        Self::record_step(
            &mut tx,
            request.id,
            user_id,
            workflow::STEP_COMPLETED,
            serde_json::json!({
                "asset_id": asset.id,
                "returned_temporary_asset_id": returned_temporary,
            }),
        )
        .await?;
        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            request_id = request.id,
            asset_id = asset.id,
            "Repair completed"
        );

        Ok(CompleteRepairResult {
            success: true,
            message: format!(
                "Repair completed; asset {} returned to service",
                asset.asset_tag
            ),
            asset_id: Some(asset.id),
            returned_temporary_asset_id: returned_temporary,
        })
    }

    /// Acknowledge that a received procurement closes the parts gap.
    ///
    /// Only acts when the named procurement is `received` and every
    /// procurement originating from the request is settled. Idempotent: a
    /// second call reports `success = false` without writing anything.
    pub async fn update_request_from_procurement_completion(
        pool: &PgPool,
        request_id: DbId,
        input: &ProcurementReceivedInput,
        user_id: DbId,
    ) -> AppResult<ProcurementReceivedResult> {
        let mut tx = pool.begin().await.map_err(AppError::Database)?;

        let Some(request) = RequestRepo::find_by_id_tx(&mut tx, request_id).await? else {
            return Ok(Self::received_failure(
                format!("IT request {request_id} not found"),
                false,
            ));
        };
        let Some(procurement) =
            ProcurementRepo::find_by_id_tx(&mut tx, input.procurement_request_id).await?
        else {
            return Ok(Self::received_failure(
                format!(
                    "Procurement request {} not found",
                    input.procurement_request_id
                ),
                false,
            ));
        };
        if procurement.originating_request_id != Some(request.id) {
            return Ok(Self::received_failure(
                format!(
                    "Procurement {} does not originate from request {}",
                    procurement.request_number, request.request_number
                ),
                false,
            ));
        }
        if procurement.status != procurement_status::STATUS_RECEIVED {
            return Ok(Self::received_failure(
                format!(
                    "Procurement {} is {}, not received",
                    procurement.request_number, procurement.status
                ),
                false,
            ));
        }

        let siblings =
            ProcurementRepo::list_by_originating_request_tx(&mut tx, request.id).await?;
        let all_settled = siblings.iter().all(|p| {
            matches!(
                p.status.as_str(),
                procurement_status::STATUS_RECEIVED | procurement_status::STATUS_CANCELLED
            )
        });
        if !all_settled {
            return Ok(Self::received_failure(
                format!(
                    "Request {} still has open procurement",
                    request.request_number
                ),
                false,
            ));
        }

        if AuditLogRepo::workflow_step_exists(&mut tx, request.id, workflow::STEP_PARTS_RECEIVED)
            .await?
        {
            return Ok(Self::received_failure(
                format!(
                    "Parts already recorded as received for {}",
                    request.request_number
                ),
                true,
            ));
        }

        Self::record_step(
            &mut tx,
            request.id,
            user_id,
            workflow::STEP_PARTS_RECEIVED,
            serde_json::json!({ "procurement_request_id": procurement.id }),
        )
        .await?;
        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            request_id = request.id,
            procurement_id = procurement.id,
            "Repair parts received"
        );

        Ok(ProcurementReceivedResult {
            success: true,
            message: format!(
                "All repair parts received for {}",
                request.request_number
            ),
            all_parts_received: true,
        })
    }

    /// Read-only workflow status: recorded steps, related procurement, and
    /// derived pending actions.
    pub async fn get_workflow_status(
        pool: &PgPool,
        request_id: DbId,
    ) -> AppResult<Option<WorkflowStatus>> {
        let Some(request) = RequestRepo::find_by_id(pool, request_id).await? else {
            return Ok(None);
        };

        let steps = AuditLogRepo::list_workflow_steps(pool, request.id).await?;
        let procurements =
            ProcurementRepo::list_by_originating_request(pool, request.id).await?;
        let statuses: Vec<&str> = procurements.iter().map(|p| p.status.as_str()).collect();
        let pending_actions = workflow::pending_actions(
            request_status::is_terminal(&request.status),
            &statuses,
            request.temporary_asset_id.is_some(),
        );

        Ok(Some(WorkflowStatus {
            workflow_steps: steps
                .into_iter()
                .map(|s| WorkflowStep {
                    label: s.description,
                    actor_id: s.user_id,
                    recorded_at: s.created_at,
                })
                .collect(),
            related_procurement_ids: procurements.iter().map(|p| p.id).collect(),
            temporary_asset_id: request.temporary_asset_id,
            pending_actions,
            request,
        }))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Validated status change with a status-change audit entry.
    async fn set_asset_status(
        conn: &mut sqlx::PgConnection,
        asset: &Asset,
        new_status: &str,
    ) -> AppResult<Asset> {
        asset_status::validate_transition(&asset.status, new_status)?;
        let updated = AssetRepo::set_status(conn, asset.id, new_status, asset.row_version)
            .await?
            .ok_or_else(Self::stale_asset)?;
        Ok(updated)
    }

    async fn record_step(
        conn: &mut sqlx::PgConnection,
        request_id: DbId,
        user_id: DbId,
        label: &str,
        details: serde_json::Value,
    ) -> AppResult<()> {
        AuditLogRepo::insert(
            conn,
            &CreateAuditLog {
                action_type: action_types::WORKFLOW_STEP.to_string(),
                entity_type: entity_types::IT_REQUEST.to_string(),
                entity_id: Some(request_id),
                user_id: Some(user_id),
                description: label.to_string(),
                details_json: details,
            },
        )
        .await?;
        Ok(())
    }

    async fn step_labels(pool: &PgPool, request_id: DbId) -> AppResult<Vec<String>> {
        let steps = AuditLogRepo::list_workflow_steps(pool, request_id).await?;
        Ok(steps.into_iter().map(|s| s.description).collect())
    }

    fn stale_request() -> AppError {
        AppError::Core(CoreError::Conflict(
            "Request was modified by another user; reload and retry".to_string(),
        ))
    }

    fn stale_asset() -> AppError {
        AppError::Core(CoreError::Conflict(
            "Asset was modified by another user; reload and retry".to_string(),
        ))
    }

    fn start_failure(message: String) -> StartRepairResult {
        StartRepairResult {
            success: false,
            message,
            workflow_steps: Vec::new(),
            requires_procurement: false,
            generated_procurement_ids: Vec::new(),
            temporary_replacement_asset_id: None,
        }
    }

    fn replace_failure(message: String) -> ReplaceAssetResult {
        ReplaceAssetResult {
            success: false,
            message,
            original_asset_id: None,
            replacement_asset_id: None,
            location_id: None,
        }
    }

    fn procurement_failure(message: String) -> GenerateProcurementResult {
        GenerateProcurementResult {
            success: false,
            message,
            generated_procurement_request_ids: Vec::new(),
            generated_items: 0,
            total_estimated_cost: Decimal::ZERO,
        }
    }

    fn complete_failure(message: String) -> CompleteRepairResult {
        CompleteRepairResult {
            success: false,
            message,
            asset_id: None,
            returned_temporary_asset_id: None,
        }
    }

    fn received_failure(message: String, all_parts_received: bool) -> ProcurementReceivedResult {
        ProcurementReceivedResult {
            success: false,
            message,
            all_parts_received,
        }
    }
}
