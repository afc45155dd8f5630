use async_trait::async_trait;
use std::sync::RwLock;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::db::error::StorageError;
use crate::db::models::{Booking, UpdateBookingPayload};
use crate::scheduling::BookingDraft;

/// Storage for bookings. `list_by_professional_and_date` is the snapshot
/// the scheduling engine computes over; the engine itself never writes.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list(
        &self,
        professional_id: Option<Uuid>,
        date: Option<Date>,
    ) -> Result<Vec<Booking>, StorageError>;

    async fn list_by_professional_and_date(
        &self,
        professional_id: Uuid,
        date: Date,
    ) -> Result<Vec<Booking>, StorageError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Booking>, StorageError>;

    async fn get_by_token(&self, token: &str) -> Result<Option<Booking>, StorageError>;

    async fn create(&self, draft: BookingDraft) -> Result<Booking, StorageError>;

    async fn update(
        &self,
        id: Uuid,
        update: UpdateBookingPayload,
    ) -> Result<Option<Booking>, StorageError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError>;
}

pub struct InMemoryBookingRepository {
    inner: RwLock<Vec<Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn list(
        &self,
        professional_id: Option<Uuid>,
        date: Option<Date>,
    ) -> Result<Vec<Booking>, StorageError> {
        let guard = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard
            .iter()
            .filter(|b| professional_id.is_none_or(|id| b.professional_id == id))
            .filter(|b| date.is_none_or(|d| b.date == d))
            .cloned()
            .collect())
    }

    async fn list_by_professional_and_date(
        &self,
        professional_id: Uuid,
        date: Date,
    ) -> Result<Vec<Booking>, StorageError> {
        self.list(Some(professional_id), Some(date)).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Booking>, StorageError> {
        let guard = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard.iter().find(|b| b.id == id).cloned())
    }

    async fn get_by_token(&self, token: &str) -> Result<Option<Booking>, StorageError> {
        let guard = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard.iter().find(|b| b.confirmation_token == token).cloned())
    }

    async fn create(&self, draft: BookingDraft) -> Result<Booking, StorageError> {
        let booking = Booking {
            id: Uuid::new_v4(),
            professional_id: draft.professional_id,
            service_id: draft.service_id,
            customer_name: draft.customer_name,
            customer_phone: draft.customer_phone,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            status: draft.status,
            notes: draft.notes,
            created_at: OffsetDateTime::now_utc(),
            confirmation_token: draft.confirmation_token,
        };
        let mut guard = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        guard.push(booking.clone());
        Ok(booking)
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdateBookingPayload,
    ) -> Result<Option<Booking>, StorageError> {
        let mut guard = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        let Some(booking) = guard.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(status) = update.status {
            booking.status = status;
        }
        if let Some(notes) = update.notes {
            booking.notes = Some(notes);
        }
        Ok(Some(booking.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut guard = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        let before = guard.len();
        guard.retain(|b| b.id != id);
        Ok(guard.len() < before)
    }
}
