use tracing::{info, warn};
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::persons::domain::PersonService;
use crate::persons::domain::service::PersonServiceImpl;
use crate::persons::repository::ddb_person_repository::DDBPersonRepository;
use crate::persons::repository::memory_person_repository::MemoryPersonRepository;
use crate::persons::repository::PersonRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub async fn create_person_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn PersonRepository> {
    info!(store = %store, "building person repository");
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(config, store).await;
            Box::new(DDBPersonRepository::new(client, config.persons_table.as_str(), config.emails_table.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config, store).await;
            // tables survive restarts of DynamoDB Local, so "already exists" is expected here
            if let Err(err) = create_table(&client, config.persons_table.as_str(), "person_id").await {
                warn!(error = %err, "persons table not created");
            }
            if let Err(err) = create_table(&client, config.emails_table.as_str(), "email").await {
                warn!(error = %err, "person emails table not created");
            }
            Box::new(DDBPersonRepository::new(client, config.persons_table.as_str(), config.emails_table.as_str()))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryPersonRepository::new())
        }
    }
}

pub async fn create_person_service(config: &Configuration, store: RepositoryStore) -> Box<dyn PersonService> {
    let person_repo = create_person_repository(config, store).await;
    Box::new(PersonServiceImpl::new(config, person_repo))
}
