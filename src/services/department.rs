use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::database::entities::{DepartmentEntity, department};
use crate::error::StoreResult;

pub struct DepartmentService;

impl DepartmentService {
    /// All departments in id order, for the front end's department pickers.
    pub async fn list<C>(conn: &C) -> StoreResult<Vec<department::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(DepartmentEntity::find()
            .order_by_asc(department::Column::Id)
            .all(conn)
            .await?)
    }
}
