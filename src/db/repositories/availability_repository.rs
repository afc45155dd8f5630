use async_trait::async_trait;
use std::sync::RwLock;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::db::error::StorageError;
use crate::db::models::{DayOverride, NewDayOverride};

/// Storage for day-specific schedule exceptions. At most one override
/// exists per (professional, date); writes are upserts.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn get_override(
        &self,
        professional_id: Uuid,
        date: Date,
    ) -> Result<Option<DayOverride>, StorageError>;

    /// Lists overrides, optionally narrowed to one professional and an
    /// inclusive date range.
    async fn list(
        &self,
        professional_id: Option<Uuid>,
        range: Option<(Date, Date)>,
    ) -> Result<Vec<DayOverride>, StorageError>;

    async fn upsert(&self, new: NewDayOverride) -> Result<DayOverride, StorageError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError>;
}

pub struct InMemoryAvailabilityRepository {
    inner: RwLock<Vec<DayOverride>>,
}

impl InMemoryAvailabilityRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryAvailabilityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityRepository {
    async fn get_override(
        &self,
        professional_id: Uuid,
        date: Date,
    ) -> Result<Option<DayOverride>, StorageError> {
        let guard = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard
            .iter()
            .find(|ov| ov.professional_id == professional_id && ov.date == date)
            .cloned())
    }

    async fn list(
        &self,
        professional_id: Option<Uuid>,
        range: Option<(Date, Date)>,
    ) -> Result<Vec<DayOverride>, StorageError> {
        let guard = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard
            .iter()
            .filter(|ov| professional_id.is_none_or(|id| ov.professional_id == id))
            .filter(|ov| range.is_none_or(|(start, end)| ov.date >= start && ov.date <= end))
            .cloned()
            .collect())
    }

    async fn upsert(&self, new: NewDayOverride) -> Result<DayOverride, StorageError> {
        let mut guard = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        if let Some(existing) = guard
            .iter_mut()
            .find(|ov| ov.professional_id == new.professional_id && ov.date == new.date)
        {
            existing.is_available = new.is_available;
            existing.custom_hours = new.custom_hours;
            existing.reason = new.reason;
            return Ok(existing.clone());
        }

        let created = DayOverride {
            id: Uuid::new_v4(),
            professional_id: new.professional_id,
            date: new.date,
            is_available: new.is_available,
            custom_hours: new.custom_hours,
            reason: new.reason,
            created_at: OffsetDateTime::now_utc(),
        };
        guard.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut guard = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        let before = guard.len();
        guard.retain(|ov| ov.id != id);
        Ok(guard.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn new_override(professional_id: Uuid, date: Date, is_available: bool) -> NewDayOverride {
        NewDayOverride {
            professional_id,
            date,
            is_available,
            custom_hours: None,
            reason: None,
        }
    }

    #[tokio::test]
    async fn upsert_replaces_rather_than_appends() {
        let repo = InMemoryAvailabilityRepository::new();
        let professional = Uuid::new_v4();
        let day = date!(2025 - 06 - 03);

        let first = repo
            .upsert(new_override(professional, day, false))
            .await
            .unwrap();
        let second = repo
            .upsert(new_override(professional, day, true))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert!(second.is_available);
        assert_eq!(repo.list(Some(professional), None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn range_listing_is_inclusive() {
        let repo = InMemoryAvailabilityRepository::new();
        let professional = Uuid::new_v4();
        for day in [date!(2025 - 06 - 01), date!(2025 - 06 - 05), date!(2025 - 06 - 10)] {
            repo.upsert(new_override(professional, day, false)).await.unwrap();
        }

        let listed = repo
            .list(
                Some(professional),
                Some((date!(2025 - 06 - 01), date!(2025 - 06 - 05))),
            )
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let repo = InMemoryAvailabilityRepository::new();
        let created = repo
            .upsert(new_override(Uuid::new_v4(), date!(2025 - 06 - 03), false))
            .await
            .unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
