use serde::{Deserialize, Serialize};

/// Named group of employees. Employees reference a group by id; the
/// reference is advisory and deleting a group leaves members in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}
