use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::date::serializer;

// PersonEntity is the stored representation of a person. The id stays empty until the
// repository assigns one on insert.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PersonEntity {
    pub person_id: String,
    pub version: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub gender: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl PersonEntity {
    pub fn new(first_name: &str, last_name: &str, email: &str, address: &str, gender: &str) -> Self {
        Self {
            person_id: "".to_string(),
            version: 0,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            address: address.to_string(),
            gender: gender.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.person_id.is_empty()
    }

    // Stamps the entity as freshly inserted under the given id.
    pub(crate) fn assigned(&self, person_id: String) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            person_id,
            version: 0,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    // Next stored revision of this entity.
    pub(crate) fn next_version(&self) -> Self {
        Self {
            version: self.version + 1,
            updated_at: Utc::now().naive_utc(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::persons::domain::model::PersonEntity;

    #[tokio::test]
    async fn test_should_build_person() {
        let person = PersonEntity::new("João", "Castro", "joao@x.com", "Salvador", "Male");
        assert_eq!("joao@x.com", person.email.as_str());
        assert!(!person.is_persisted());
    }

    #[tokio::test]
    async fn test_should_assign_and_bump_version() {
        let person = PersonEntity::new("João", "Castro", "joao@x.com", "Salvador", "Male")
            .assigned("7".to_string());
        assert!(person.is_persisted());
        assert_eq!(0, person.version);
        let next = person.next_version();
        assert_eq!("7", next.person_id.as_str());
        assert_eq!(1, next.version);
        assert_eq!(person.created_at, next.created_at);
    }

    #[tokio::test]
    async fn test_should_serialize_person() {
        let person = PersonEntity::new("João", "Castro", "joao@x.com", "Salvador", "Male")
            .assigned("1".to_string());
        let json = serde_json::to_string(&person).expect("should serialize");
        let loaded: PersonEntity = serde_json::from_str(json.as_str()).expect("should deserialize");
        assert_eq!(person, loaded);
    }
}
