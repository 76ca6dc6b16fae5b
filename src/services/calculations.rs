//! Calculation lifecycle scoped to the owning user.
//!
//! Every lookup filters by owner as well as id, so a record owned by someone
//! else is reported exactly like a missing one. Rows without an owner never
//! match and are therefore invisible to every caller.

use crate::error::{ApiError, Result};
use chrono::Utc;
use model::entities::calculation::{self, OperationKind};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument, trace, warn};

/// Outcome of applying an operation to two operands, not yet stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Computed {
    pub a: f64,
    pub b: f64,
    pub op_type: OperationKind,
    pub result: f64,
}

/// Resolve, validate and compute without touching storage.
#[instrument]
pub fn evaluate(a: f64, b: f64, operation_id: &str) -> Result<Computed> {
    let operation = compute::resolve(operation_id)?;
    operation.validate(a, b)?;
    let result = operation.compute(a, b)?;
    trace!("Computed {} {} {} = {}", a, operation.kind(), b, result);
    Ok(Computed {
        a,
        b,
        op_type: operation.kind(),
        result,
    })
}

/// Compute and persist a calculation owned by `owner_id`.
#[instrument(skip(db))]
pub async fn create<C: ConnectionTrait>(
    db: &C,
    owner_id: i32,
    a: f64,
    b: f64,
    operation_id: &str,
) -> Result<calculation::Model> {
    let computed = evaluate(a, b, operation_id)?;

    let new_calculation = calculation::ActiveModel {
        a: Set(computed.a),
        b: Set(computed.b),
        op_type: Set(computed.op_type),
        result: Set(computed.result),
        user_id: Set(Some(owner_id)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let calculation_model = new_calculation.insert(db).await?;
    info!(
        "Calculation created with ID: {} for user ID: {}",
        calculation_model.id, owner_id
    );
    Ok(calculation_model)
}

/// Fetch a calculation owned by `caller_id`.
#[instrument(skip(db))]
pub async fn get<C: ConnectionTrait>(db: &C, id: i32, caller_id: i32) -> Result<calculation::Model> {
    let found = calculation::Entity::find_by_id(id)
        .filter(calculation::Column::UserId.eq(caller_id))
        .one(db)
        .await?;

    found.ok_or_else(|| {
        warn!("Calculation {} not found for user ID {}", id, caller_id);
        ApiError::NotFound
    })
}

/// All calculations owned by `caller_id`, oldest first.
#[instrument(skip(db))]
pub async fn list<C: ConnectionTrait>(db: &C, caller_id: i32) -> Result<Vec<calculation::Model>> {
    let calculations = calculation::Entity::find()
        .filter(calculation::Column::UserId.eq(caller_id))
        .order_by_asc(calculation::Column::Id)
        .all(db)
        .await?;

    debug!("Retrieved {} calculations for user ID {}", calculations.len(), caller_id);
    Ok(calculations)
}

/// Replace operands and operation of an owned calculation and recompute its result.
///
/// Lookup and write share one transaction.
#[instrument(skip(db))]
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    caller_id: i32,
    a: f64,
    b: f64,
    operation_id: &str,
) -> Result<calculation::Model> {
    let computed = evaluate(a, b, operation_id)?;

    let txn = db.begin().await?;
    let existing = get(&txn, id, caller_id).await?;

    let mut active: calculation::ActiveModel = existing.into();
    active.a = Set(computed.a);
    active.b = Set(computed.b);
    active.op_type = Set(computed.op_type);
    active.result = Set(computed.result);

    let updated = active.update(&txn).await?;
    txn.commit().await?;

    info!("Calculation {} updated for user ID {}", id, caller_id);
    Ok(updated)
}

/// Permanently remove an owned calculation.
#[instrument(skip(db))]
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32, caller_id: i32) -> Result<()> {
    let delete_result = calculation::Entity::delete_many()
        .filter(calculation::Column::Id.eq(id))
        .filter(calculation::Column::UserId.eq(caller_id))
        .exec(db)
        .await?;

    debug!("Delete operation completed. Rows affected: {}", delete_result.rows_affected);
    if delete_result.rows_affected == 0 {
        warn!("Calculation {} not found for deletion by user ID {}", id, caller_id);
        return Err(ApiError::NotFound);
    }

    info!("Calculation {} deleted by user ID {}", id, caller_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_user, setup_test_db};
    use sea_orm::PaginatorTrait;

    async fn count(db: &DatabaseConnection) -> u64 {
        calculation::Entity::find().count(db).await.unwrap()
    }

    fn fields(model: &calculation::Model) -> (i32, f64, f64, OperationKind, f64, Option<i32>) {
        (model.id, model.a, model.b, model.op_type, model.result, model.user_id)
    }

    #[test]
    fn test_evaluate_without_storage() {
        let computed = evaluate(4.0, 2.0, "Divide").unwrap();
        assert_eq!(computed.op_type, OperationKind::Divide);
        assert_eq!(computed.result, 2.0);

        assert!(matches!(evaluate(1.0, 2.0, "Power"), Err(ApiError::UnknownOperation(_))));
        assert!(matches!(evaluate(1.0, 0.0, "Divide"), Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let db = setup_test_db().await;
        let owner = create_test_user(&db, "alice").await;

        let created = create(&db, owner.id, 10.0, 5.0, "Divide").await.unwrap();
        let fetched = get(&db, created.id, owner.id).await.unwrap();

        assert_eq!(fetched.a, 10.0);
        assert_eq!(fetched.b, 5.0);
        assert_eq!(fetched.op_type, OperationKind::Divide);
        assert_eq!(fetched.result, 2.0);
        assert_eq!(fetched.user_id, Some(owner.id));
    }

    #[tokio::test]
    async fn test_divide_by_zero_is_rejected_before_persistence() {
        let db = setup_test_db().await;
        let owner = create_test_user(&db, "alice").await;
        let before = count(&db).await;

        let result = create(&db, owner.id, 1.0, 0.0, "Divide").await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(count(&db).await, before);
    }

    #[tokio::test]
    async fn test_overflowing_result_is_rejected_before_persistence() {
        let db = setup_test_db().await;
        let owner = create_test_user(&db, "alice").await;
        let created = create(&db, owner.id, 2.0, 3.0, "Add").await.unwrap();

        let result = create(&db, owner.id, 1e308, 10.0, "Multiply").await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(count(&db).await, 1);

        let rejected = update(&db, created.id, owner.id, 1e308, 10.0, "Multiply").await;
        assert!(matches!(rejected, Err(ApiError::Validation(_))));
        assert_eq!(fields(&get(&db, created.id, owner.id).await.unwrap()), fields(&created));
    }

    #[tokio::test]
    async fn test_unknown_operation_is_rejected_before_persistence() {
        let db = setup_test_db().await;
        let owner = create_test_user(&db, "alice").await;

        let result = create(&db, owner.id, 1.0, 2.0, "Modulo").await;

        assert!(matches!(result, Err(ApiError::UnknownOperation(id)) if id == "Modulo"));
        assert_eq!(count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_idempotent_update() {
        let db = setup_test_db().await;
        let owner = create_test_user(&db, "alice").await;
        let created = create(&db, owner.id, 6.0, 7.0, "Multiply").await.unwrap();

        let updated = update(&db, created.id, owner.id, 6.0, 7.0, "Multiply").await.unwrap();

        assert_eq!(fields(&updated), fields(&created));
    }

    #[tokio::test]
    async fn test_update_recomputes_result() {
        let db = setup_test_db().await;
        let owner = create_test_user(&db, "alice").await;
        let created = create(&db, owner.id, 6.0, 7.0, "Multiply").await.unwrap();

        let updated = update(&db, created.id, owner.id, 9.0, 4.0, "Sub").await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.op_type, OperationKind::Sub);
        assert_eq!(updated.result, 5.0);

        let rejected = update(&db, created.id, owner.id, 9.0, 0.0, "Divide").await;
        assert!(matches!(rejected, Err(ApiError::Validation(_))));
        assert_eq!(fields(&get(&db, created.id, owner.id).await.unwrap()), fields(&updated));
    }

    #[tokio::test]
    async fn test_ownership_isolation() {
        let db = setup_test_db().await;
        let alice = create_test_user(&db, "alice").await;
        let bob = create_test_user(&db, "bob").await;
        let created = create(&db, alice.id, 1.0, 2.0, "Add").await.unwrap();

        assert!(matches!(get(&db, created.id, bob.id).await, Err(ApiError::NotFound)));
        assert!(matches!(
            update(&db, created.id, bob.id, 5.0, 5.0, "Add").await,
            Err(ApiError::NotFound)
        ));
        assert!(matches!(delete(&db, created.id, bob.id).await, Err(ApiError::NotFound)));
        assert!(list(&db, bob.id).await.unwrap().is_empty());

        // Record is untouched
        assert_eq!(fields(&get(&db, created.id, alice.id).await.unwrap()), fields(&created));
    }

    #[tokio::test]
    async fn test_list_returns_only_owned_in_id_order() {
        let db = setup_test_db().await;
        let alice = create_test_user(&db, "alice").await;
        let bob = create_test_user(&db, "bob").await;

        let first = create(&db, alice.id, 1.0, 1.0, "Add").await.unwrap();
        create(&db, bob.id, 2.0, 2.0, "Add").await.unwrap();
        let second = create(&db, alice.id, 3.0, 3.0, "Sub").await.unwrap();

        let ids: Vec<i32> = list(&db, alice.id).await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_unowned_calculations_are_invisible() {
        let db = setup_test_db().await;
        let alice = create_test_user(&db, "alice").await;

        let legacy = calculation::ActiveModel {
            a: Set(1.0),
            b: Set(1.0),
            op_type: Set(OperationKind::Add),
            result: Set(2.0),
            user_id: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        assert!(matches!(get(&db, legacy.id, alice.id).await, Err(ApiError::NotFound)));
        assert!(list(&db, alice.id).await.unwrap().is_empty());
        assert!(matches!(delete(&db, legacy.id, alice.id).await, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let db = setup_test_db().await;
        let owner = create_test_user(&db, "alice").await;
        let created = create(&db, owner.id, 10.0, 5.0, "Divide").await.unwrap();

        delete(&db, created.id, owner.id).await.unwrap();

        assert!(matches!(get(&db, created.id, owner.id).await, Err(ApiError::NotFound)));
        assert!(matches!(delete(&db, created.id, owner.id).await, Err(ApiError::NotFound)));
    }
}
