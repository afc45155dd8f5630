use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

use crate::db::error::StorageError;
use crate::db::models::Professional;

/// Read access to professionals and the weekly schedules bookings are
/// checked against.
#[async_trait]
pub trait ProfessionalRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Professional>, StorageError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Professional>, StorageError>;
}

/// Reference implementation backed by a plain vector. A SQL-backed store
/// implements the same trait without the engine noticing.
pub struct InMemoryProfessionalRepository {
    inner: RwLock<Vec<Professional>>,
}

impl InMemoryProfessionalRepository {
    pub fn new(professionals: Vec<Professional>) -> Self {
        Self {
            inner: RwLock::new(professionals),
        }
    }
}

#[async_trait]
impl ProfessionalRepository for InMemoryProfessionalRepository {
    async fn list(&self) -> Result<Vec<Professional>, StorageError> {
        let guard = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Professional>, StorageError> {
        let guard = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard.iter().find(|p| p.id == id).cloned())
    }
}
