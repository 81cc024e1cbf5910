pub mod ddb_person_repository;
pub mod memory_person_repository;

use async_trait::async_trait;
use crate::core::error::PersonResult;
use crate::core::repository::Repository;
use crate::persons::domain::model::PersonEntity;

// PersonRepository is the only gateway to stored persons.
#[async_trait]
pub trait PersonRepository: Repository<PersonEntity> {
    async fn find_by_email(&self, email: &str) -> PersonResult<Option<PersonEntity>>;
}
