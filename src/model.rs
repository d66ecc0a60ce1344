//! The Student entity as stored and as exchanged over the API (camelCase JSON).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Store-assigned when omitted or 0.
    #[serde(default)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl Student {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: i32) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// True when the store should generate the id.
    pub fn has_unset_id(&self) -> bool {
        self.id == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_camel_case_and_id_is_optional() {
        let s: Student =
            serde_json::from_str(r#"{"firstName":"Erkki","lastName":"Pekkanen","age":45}"#).unwrap();
        assert!(s.has_unset_id());
        assert_eq!(s, Student::new("Erkki", "Pekkanen", 45));

        let v = serde_json::to_value(s.with_id(3)).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"id": 3, "firstName": "Erkki", "lastName": "Pekkanen", "age": 45})
        );
    }
}
