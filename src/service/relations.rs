//! Nested user reads.

use crate::error::StoreError;
use crate::model::{UserWithAccessLogs, UserWithBuildings};
use crate::store::UserRelations;
use std::sync::Arc;

#[derive(Clone)]
pub struct RelationService {
    relations: Arc<dyn UserRelations>,
}

impl RelationService {
    pub fn new(relations: Arc<dyn UserRelations>) -> Self {
        RelationService { relations }
    }

    pub async fn get_buildings(&self, user_id: &str) -> Result<Option<UserWithBuildings>, StoreError> {
        self.relations.get_buildings(user_id).await
    }

    pub async fn get_access_logs(&self, user_id: &str) -> Result<Option<UserWithAccessLogs>, StoreError> {
        self.relations.get_access_logs(user_id).await
    }
}
