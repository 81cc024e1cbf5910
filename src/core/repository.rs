use async_trait::async_trait;
use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::error::PersonResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // persists a new entity, the repository assigns its id
    async fn insert(&self, entity: &Entity) -> PersonResult<Entity>;

    // replaces a stored entity at its current version
    async fn save(&self, entity: &Entity) -> PersonResult<Entity>;

    // get an entity if present
    async fn find_by_id(&self, id: &str) -> PersonResult<Option<Entity>>;

    // all entities in storage-defined order
    async fn find_all(&self) -> PersonResult<Vec<Entity>>;

    // delete an entity
    async fn delete(&self, entity: &Entity) -> PersonResult<usize>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}

impl From<String> for RepositoryStore {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "dynamodb" | "ddb" => RepositoryStore::DynamoDB,
            "memory" | "mem" => RepositoryStore::Memory,
            _ => RepositoryStore::LocalDynamoDB,
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::DynamoDB => write!(f, "dynamodb"),
            RepositoryStore::LocalDynamoDB => write!(f, "local"),
            RepositoryStore::Memory => write!(f, "memory"),
        }
    }
}
