pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::error::PersonResult;
use crate::persons::dto::PersonDto;

// PersonService owns the person lifecycle rules; it is the only place domain errors originate.
#[async_trait]
pub trait PersonService: Sync + Send {
    async fn create(&self, person: &PersonDto) -> PersonResult<PersonDto>;
    async fn find_by_id(&self, id: &str) -> PersonResult<PersonDto>;
    async fn find_all(&self) -> PersonResult<Vec<PersonDto>>;
    async fn update(&self, person: &PersonDto) -> PersonResult<PersonDto>;
    async fn delete(&self, id: &str) -> PersonResult<()>;
}
