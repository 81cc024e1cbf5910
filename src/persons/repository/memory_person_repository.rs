use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::error::{PersonError, PersonResult, VERSION_CONFLICT};
use crate::core::repository::Repository;
use crate::persons::domain::model::PersonEntity;
use crate::persons::repository::PersonRepository;

// Process-local store. Records keep insertion order and ids come from a sequence that is
// never rewound, so deleted ids are not reused.
#[derive(Debug, Default)]
pub struct MemoryPersonRepository {
    records: RwLock<Vec<PersonEntity>>,
    sequence: AtomicU64,
}

impl MemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<PersonEntity> for MemoryPersonRepository {
    async fn insert(&self, entity: &PersonEntity) -> PersonResult<PersonEntity> {
        let mut records = self.records.write().await;
        if records.iter().any(|p| p.email == entity.email) {
            return Err(PersonError::unique_violation(entity.email.as_str()));
        }
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let saved = entity.assigned(id.to_string());
        records.push(saved.clone());
        Ok(saved)
    }

    async fn save(&self, entity: &PersonEntity) -> PersonResult<PersonEntity> {
        if !entity.is_persisted() {
            return Err(PersonError::storage("cannot save a person without id", None, false));
        }
        let mut records = self.records.write().await;
        if records.iter().any(|p| p.email == entity.email && p.person_id != entity.person_id) {
            return Err(PersonError::unique_violation(entity.email.as_str()));
        }
        // only an existing record at the expected version is replaced, a deleted one stays deleted
        match records.iter().position(|p| p.person_id == entity.person_id && p.version == entity.version) {
            Some(ndx) => {
                let next = entity.next_version();
                records[ndx] = next.clone();
                Ok(next)
            }
            None => Err(PersonError::storage(
                format!("stale version {} or deleted record for {}", entity.version, entity.person_id).as_str(),
                Some(VERSION_CONFLICT.to_string()), false)),
        }
    }

    async fn find_by_id(&self, id: &str) -> PersonResult<Option<PersonEntity>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|p| p.person_id == id).cloned())
    }

    async fn find_all(&self) -> PersonResult<Vec<PersonEntity>> {
        Ok(self.records.read().await.clone())
    }

    async fn delete(&self, entity: &PersonEntity) -> PersonResult<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|p| p.person_id != entity.person_id);
        Ok(before - records.len())
    }
}

#[async_trait]
impl PersonRepository for MemoryPersonRepository {
    async fn find_by_email(&self, email: &str) -> PersonResult<Option<PersonEntity>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|p| p.email == email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::error::{ErrorKind, VERSION_CONFLICT};
    use crate::core::error::PersonError;
    use crate::core::repository::Repository;
    use crate::persons::domain::model::PersonEntity;
    use crate::persons::repository::memory_person_repository::MemoryPersonRepository;
    use crate::persons::repository::PersonRepository;

    fn person(email: &str) -> PersonEntity {
        PersonEntity::new("first", "last", email, "address", "Female")
    }

    #[tokio::test]
    async fn test_should_insert_get_persons() {
        let repo = MemoryPersonRepository::new();
        let saved = repo.insert(&person("a@x.com")).await.expect("should insert person");
        assert_eq!("1", saved.person_id.as_str());

        let loaded = repo.find_by_id("1").await.expect("should query").expect("should return person");
        assert_eq!(saved, loaded);
        assert_eq!(None, repo.find_by_id("2").await.expect("should query"));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_email_on_insert() {
        let repo = MemoryPersonRepository::new();
        let _ = repo.insert(&person("a@x.com")).await.expect("should insert person");
        let err = repo.insert(&person("a@x.com")).await.expect_err("should reject duplicate");
        assert!(err.is_unique_violation());
        assert_eq!(1, repo.find_all().await.expect("should list").len());
    }

    #[tokio::test]
    async fn test_should_find_by_email() {
        let repo = MemoryPersonRepository::new();
        let saved = repo.insert(&person("a@x.com")).await.expect("should insert person");
        let loaded = repo.find_by_email("a@x.com").await.expect("should query");
        assert_eq!(Some(saved), loaded);
        assert_eq!(None, repo.find_by_email("A@x.com").await.expect("should query"));
    }

    #[tokio::test]
    async fn test_should_save_persons() {
        let repo = MemoryPersonRepository::new();
        let mut saved = repo.insert(&person("a@x.com")).await.expect("should insert person");
        saved.first_name = "first2".to_string();
        let updated = repo.save(&saved).await.expect("should save person");
        assert_eq!(1, updated.version);

        let loaded = repo.find_by_id(saved.person_id.as_str()).await.expect("should query").expect("should return person");
        assert_eq!("first2", loaded.first_name.as_str());

        let err = repo.save(&saved).await.expect_err("should reject stale version");
        assert!(matches!(err, PersonError::StorageFailure{ reason_code: Some(ref code), .. } if code == VERSION_CONFLICT));
    }

    #[tokio::test]
    async fn test_should_not_save_deleted_person() {
        let repo = MemoryPersonRepository::new();
        let saved = repo.insert(&person("a@x.com")).await.expect("should insert person");
        assert_eq!(1, repo.delete(&saved).await.expect("should delete person"));

        let err = repo.save(&saved).await.expect_err("should not bring person back");
        assert!(matches!(err, PersonError::StorageFailure{ reason_code: Some(ref code), .. } if code == VERSION_CONFLICT));
        assert_eq!(None, repo.find_by_id(saved.person_id.as_str()).await.expect("should query"));
        assert!(repo.find_all().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_save_without_id() {
        let repo = MemoryPersonRepository::new();
        let err = repo.save(&person("a@x.com")).await.expect_err("should reject");
        assert_eq!(ErrorKind::StorageFailure, err.kind());
    }

    #[tokio::test]
    async fn test_should_delete_persons_without_reusing_ids() {
        let repo = MemoryPersonRepository::new();
        let saved = repo.insert(&person("a@x.com")).await.expect("should insert person");
        assert_eq!(1, repo.delete(&saved).await.expect("should delete person"));
        assert_eq!(0, repo.delete(&saved).await.expect("should delete nothing"));
        assert!(repo.find_all().await.expect("should list").is_empty());

        let again = repo.insert(&person("a@x.com")).await.expect("should insert freed email");
        assert_eq!("2", again.person_id.as_str());
    }
}
