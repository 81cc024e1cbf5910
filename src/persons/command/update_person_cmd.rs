use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::persons::dto::{deserialize_id, PersonDto};
use crate::core::command::{Command, CommandError};
use crate::persons::domain::PersonService;

pub struct UpdatePersonCommand {
    person_service: Arc<dyn PersonService>,
}

impl UpdatePersonCommand {
    pub fn new(person_service: Arc<dyn PersonService>) -> Self {
        Self {
            person_service,
        }
    }
}

// The email is accepted for symmetry with the create body but never applied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonCommandRequest {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub address: String,
    pub gender: String,
}

impl UpdatePersonCommandRequest {
    pub fn new(id: &str, first_name: &str, last_name: &str, address: &str, gender: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: "".to_string(),
            address: address.to_string(),
            gender: gender.to_string(),
        }
    }

    pub fn build_person(&self) -> PersonDto {
        PersonDto {
            id: self.id.clone(),
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            email: self.email.to_string(),
            address: self.address.to_string(),
            gender: self.gender.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdatePersonCommandResponse {
    pub person: PersonDto,
}

impl UpdatePersonCommandResponse {
    pub fn new(person: PersonDto) -> Self {
        Self {
            person,
        }
    }
}

#[async_trait]
impl Command<UpdatePersonCommandRequest, UpdatePersonCommandResponse> for UpdatePersonCommand {
    async fn execute(&self, req: UpdatePersonCommandRequest) -> Result<UpdatePersonCommandResponse, CommandError> {
        let person = req.build_person();
        self.person_service.update(&person).await.map_err(CommandError::from).map(UpdatePersonCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::persons::command::add_person_cmd::{AddPersonCommand, AddPersonCommandRequest};
    use crate::persons::command::update_person_cmd::{UpdatePersonCommand, UpdatePersonCommandRequest};
    use crate::persons::domain::PersonService;
    use crate::persons::factory;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Arc<dyn PersonService>> = AsyncOnce::new(async {
                let svc: Arc<dyn PersonService> = Arc::from(
                    factory::create_person_service(&Configuration::new("test"), RepositoryStore::Memory).await);
                svc
            });
    }

    #[tokio::test]
    async fn test_should_run_update_person() {
        let svc = SUT_SVC.get().await.clone();
        let add_cmd = AddPersonCommand::new(svc.clone());
        let update_cmd = UpdatePersonCommand::new(svc);

        let add_res = add_cmd.execute(AddPersonCommandRequest::new("João", "Castro", "update@x.com", "Salvador", "Male"))
            .await.expect("should add person");
        let id = add_res.person.id.clone().expect("should assign id");

        let mut req = UpdatePersonCommandRequest::new(id.as_str(), "José", "Castro", "Salvador", "Male");
        req.email = "other@x.com".to_string();
        let res = update_cmd.execute(req).await.expect("should update person");
        assert_eq!(Some(id), res.person.id);
        assert_eq!("José", res.person.first_name.as_str());
        assert_eq!("update@x.com", res.person.email.as_str());
    }

    #[tokio::test]
    async fn test_should_not_update_unknown_person() {
        let update_cmd = UpdatePersonCommand::new(SUT_SVC.get().await.clone());

        let res = update_cmd.execute(UpdatePersonCommandRequest::new("unknown-id", "José", "Castro", "Salvador", "Male")).await;
        assert!(matches!(res, Err(CommandError::NotFound{ .. })));
    }
}
