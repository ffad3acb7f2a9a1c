//! Wire shape of the remote users listing.

use crate::model::user::{UserId, UserRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCompany {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAddress {
    pub city: String,
}

/// One object of the remote listing. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub website: Option<String>,
    pub company: RemoteCompany,
    pub address: RemoteAddress,
}

impl From<RemoteUser> for UserRecord {
    /// Flattens `company.name` and `address.city`; no local validation applies.
    fn from(value: RemoteUser) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            company: value.company.name,
            city: value.address.city,
            website: value.website,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RemoteUser;
    use crate::model::user::UserRecord;

    const SAMPLE: &str = r#"[{
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    }]"#;

    #[test]
    fn decodes_listing_and_flattens_nested_fields() {
        let users: Vec<RemoteUser> = serde_json::from_str(SAMPLE).unwrap();
        let record = UserRecord::from(users.into_iter().next().unwrap());

        assert_eq!(record.id, 1);
        assert_eq!(record.company, "Romaguera-Crona");
        assert_eq!(record.city, "Gwenborough");
        assert_eq!(record.website.as_deref(), Some("hildegard.org"));
    }

    #[test]
    fn missing_nested_company_is_a_decode_error() {
        let body = r#"[{"id":1,"name":"a","email":"b","phone":"c","address":{"city":"d"}}]"#;
        assert!(serde_json::from_str::<Vec<RemoteUser>>(body).is_err());
    }
}
