use crate::model::User as ModelUser;
use async_graphql::{ID, SimpleObject};

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub email: String,
}

impl From<ModelUser> for User {
    fn from(u: ModelUser) -> Self {
        Self {
            id: ID(u.id.to_string()),
            first_name: u.first_name,
            last_name: u.last_name,
            age: u.age,
            email: u.email,
        }
    }
}
