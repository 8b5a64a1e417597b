use crate::auth::Principal;
use crate::validation::Violations;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema, Debug)]
pub struct LoginReq {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginReq {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut v = Violations::new();
        v.not_blank("email", &self.email)
            .not_blank("password", &self.password);
        v.into_result()
    }
}

#[derive(Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupReq {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

impl SignupReq {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut v = Violations::new();
        v.not_blank("email", &self.email)
            .size("email", &self.email, 0, 50)
            .email("email", &self.email)
            .not_blank("firstName", &self.first_name)
            .size("firstName", &self.first_name, 3, 20)
            .not_blank("lastName", &self.last_name)
            .size("lastName", &self.last_name, 3, 20)
            .not_blank("password", &self.password)
            .size("password", &self.password, 6, 40);
        v.into_result()
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JwtResp {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl JwtResp {
    pub fn new(token: String, principal: Principal) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            id: principal.id,
            username: principal.email,
            first_name: principal.first_name,
            last_name: principal.last_name,
            admin: principal.admin,
        }
    }
}
