//! Generic CRUD service over one entity's repository.

use crate::error::StoreError;
use crate::model::Entity;
use crate::store::Repository;
use std::sync::Arc;

pub struct Service<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for Service<E> {
    fn clone(&self) -> Self {
        Service {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<E: Entity> Service<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        Service { repo }
    }

    pub async fn create(&self, data: E::Create) -> Result<E, StoreError> {
        self.repo.create(data).await
    }

    pub async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        self.repo.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError> {
        self.repo.get_by_id(id).await
    }

    pub async fn update(&self, id: &str, data: E::Patch) -> Result<E, StoreError> {
        self.repo.update(id, data).await
    }

    pub async fn delete(&self, id: &str) -> Result<E, StoreError> {
        self.repo.delete(id).await
    }
}
