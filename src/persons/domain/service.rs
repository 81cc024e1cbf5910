use async_trait::async_trait;
use tracing::{info, warn};
use crate::core::domain::Configuration;
use crate::core::error::{PersonError, PersonResult};
use crate::persons::domain::model::PersonEntity;
use crate::persons::domain::PersonService;
use crate::persons::dto::PersonDto;
use crate::persons::repository::PersonRepository;

pub struct PersonServiceImpl {
    person_repository: Box<dyn PersonRepository>,
}

impl PersonServiceImpl {
    pub fn new(_config: &Configuration, person_repository: Box<dyn PersonRepository>) -> Self {
        PersonServiceImpl {
            person_repository,
        }
    }

    async fn load(&self, id: &str) -> PersonResult<PersonEntity> {
        match self.person_repository.find_by_id(id).await? {
            Some(person) => Ok(person),
            None => {
                warn!(id, "no person stored under id");
                Err(PersonError::not_found(id))
            }
        }
    }
}

#[async_trait]
impl PersonService for PersonServiceImpl {
    async fn create(&self, person: &PersonDto) -> PersonResult<PersonDto> {
        info!("Creating one person.");
        if person.id.is_some() {
            return Err(PersonError::validation("id must not be set when creating a person", Some("id".to_string())));
        }
        person.validate()?;
        if self.person_repository.find_by_email(person.email.as_str()).await?.is_some() {
            warn!(email = person.email.as_str(), "person already exists");
            return Err(PersonError::duplicate_identity(person.email.as_str()));
        }
        match self.person_repository.insert(&PersonEntity::from(person)).await {
            Ok(saved) => Ok(PersonDto::from(&saved)),
            // another create won the race for this email after our lookup
            Err(err) if err.is_unique_violation() => {
                warn!(email = person.email.as_str(), "store rejected duplicate person");
                Err(PersonError::duplicate_identity(person.email.as_str()))
            }
            Err(err) => Err(err),
        }
    }

    async fn find_by_id(&self, id: &str) -> PersonResult<PersonDto> {
        info!("Finding one person.");
        self.load(id).await.map(|p| PersonDto::from(&p))
    }

    async fn find_all(&self) -> PersonResult<Vec<PersonDto>> {
        info!("Finding all people.");
        let res = self.person_repository.find_all().await?;
        Ok(res.iter().map(PersonDto::from).collect())
    }

    async fn update(&self, person: &PersonDto) -> PersonResult<PersonDto> {
        info!("Updating one person.");
        let id = person.id.as_deref()
            .ok_or_else(|| PersonError::validation("id is required to update a person", Some("id".to_string())))?;
        let mut existing = self.load(id).await?;
        person.validate_descriptive()?;

        // email and id are identity, only descriptive fields are replaced
        existing.first_name = person.first_name.to_string();
        existing.last_name = person.last_name.to_string();
        existing.address = person.address.to_string();
        existing.gender = person.gender.to_string();

        let saved = self.person_repository.save(&existing).await?;
        Ok(PersonDto::from(&saved))
    }

    async fn delete(&self, id: &str) -> PersonResult<()> {
        info!("Deleting one person.");
        let existing = self.load(id).await?;
        match self.person_repository.delete(&existing).await? {
            0 => Err(PersonError::not_found(id)),
            _ => Ok(()),
        }
    }
}

impl From<&PersonEntity> for PersonDto {
    fn from(other: &PersonEntity) -> Self {
        Self {
            id: Some(other.person_id.to_string()),
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            email: other.email.to_string(),
            address: other.address.to_string(),
            gender: other.gender.to_string(),
        }
    }
}

impl From<&PersonDto> for PersonEntity {
    fn from(other: &PersonDto) -> Self {
        let mut person = PersonEntity::new(
            other.first_name.as_str(),
            other.last_name.as_str(),
            other.email.as_str(),
            other.address.as_str(),
            other.gender.as_str(),
        );
        if let Some(id) = &other.id {
            person.person_id = id.to_string();
        }
        person
    }
}
