pub mod add_person_cmd;
pub mod get_person_cmd;
pub mod list_persons_cmd;
pub mod remove_person_cmd;
pub mod update_person_cmd;
