use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::persons::dto::PersonDto;
use crate::core::command::{Command, CommandError};
use crate::persons::domain::PersonService;

pub struct GetPersonCommand {
    person_service: Arc<dyn PersonService>,
}

impl GetPersonCommand {
    pub fn new(person_service: Arc<dyn PersonService>) -> Self {
        Self {
            person_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetPersonCommandRequest {
    pub person_id: String,
}

impl GetPersonCommandRequest {
    pub fn new(person_id: String) -> Self {
        Self {
            person_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetPersonCommandResponse {
    pub person: PersonDto,
}

impl GetPersonCommandResponse {
    pub fn new(person: PersonDto) -> Self {
        Self {
            person,
        }
    }
}

#[async_trait]
impl Command<GetPersonCommandRequest, GetPersonCommandResponse> for GetPersonCommand {
    async fn execute(&self, req: GetPersonCommandRequest) -> Result<GetPersonCommandResponse, CommandError> {
        self.person_service.find_by_id(req.person_id.as_str())
            .await.map_err(CommandError::from).map(GetPersonCommandResponse::new)
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
    use crate::persons::command::get_person_cmd::{GetPersonCommand, GetPersonCommandRequest};
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
    async fn test_should_run_get_person() {
        let svc = SUT_SVC.get().await.clone();
        let add_cmd = AddPersonCommand::new(svc.clone());
        let get_cmd = GetPersonCommand::new(svc);

        let add_res = add_cmd.execute(AddPersonCommandRequest::new("João", "Castro", "get@x.com", "Salvador", "Male"))
            .await.expect("should add person");
        let id = add_res.person.id.clone().expect("should assign id");
        let get_res = get_cmd.execute(GetPersonCommandRequest::new(id)).await.expect("should get person");
        assert_eq!(add_res.person, get_res.person);
    }

    #[tokio::test]
    async fn test_should_not_get_unknown_person() {
        let get_cmd = GetPersonCommand::new(SUT_SVC.get().await.clone());

        let res = get_cmd.execute(GetPersonCommandRequest::new("unknown-id".to_string())).await;
        assert!(matches!(res, Err(CommandError::NotFound{ .. })));
    }
}
