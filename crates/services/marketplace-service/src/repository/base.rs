//! Shared primary-key helpers used by every store.
//!
//! All marketplace tables use an `i32` surrogate key, except the
//! user/skill association which has its own composite-key queries.

use sea_orm::{DatabaseConnection, EntityTrait, PrimaryKeyTrait};

use common::{AppError, AppResult};

/// Find one row by primary key.
pub(crate) async fn find_by_id<E>(db: &DatabaseConnection, id: i32) -> AppResult<Option<E::Model>>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    E::find_by_id(id).one(db).await.map_err(AppError::from)
}

/// Find one row by primary key, failing with `NotFound` when absent.
pub(crate) async fn get_by_id<E>(db: &DatabaseConnection, id: i32) -> AppResult<E::Model>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    find_by_id::<E>(db, id).await?.ok_or(AppError::NotFound)
}

/// Delete one row by primary key.
///
/// Dependents are governed by the foreign-key actions in the schema:
/// a restricted reference surfaces as `ConstraintViolation`.
pub(crate) async fn delete_by_id<E>(db: &DatabaseConnection, id: i32) -> AppResult<()>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    let result = E::delete_by_id(id).exec(db).await.map_err(AppError::from)?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}
