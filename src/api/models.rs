//! Entity records exchanged with the remote API. Field names follow the
//! server's camelCase JSON; everything the console does not strictly need is
//! optional so partially populated replies still deserialize.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Login form posted to /api/auth/login.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(alias = "id", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(alias = "name")]
    pub project_name: String,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub progress: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    #[serde(alias = "id", skip_serializing_if = "Option::is_none")]
    pub emp_id: Option<i64>,
    pub user_id: Option<String>,
    pub name: String,
    pub skill: Option<String>,
    pub job_role: Option<String>,
    pub experience_year: Option<i32>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    pub unit_price: Option<f64>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_tolerates_sparse_replies() {
        let p: Project = serde_json::from_str(r#"{"projectId": 3, "projectName": "Depot"}"#).unwrap();
        assert_eq!(p.project_id, Some(3));
        assert_eq!(p.project_name, "Depot");
        assert!(p.budget.is_none());
    }

    #[test]
    fn employee_accepts_id_alias_and_dates() {
        let e: Employee =
            serde_json::from_str(r#"{"id": 9, "name": "Lee", "hireDate": "2024-02-01"}"#).unwrap();
        assert_eq!(e.emp_id, Some(9));
        assert_eq!(e.hire_date.unwrap().to_string(), "2024-02-01");
    }
}
