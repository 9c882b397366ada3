use genproto::account::Account as AccountProto;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<AccountProto> for AccountResponse {
    fn from(value: AccountProto) -> Self {
        AccountResponse {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}
