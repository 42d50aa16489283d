use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Table {
    pub table_id: i64,
    pub table_name: String,
    pub capacity: i32,
    pub reservation_id: Option<i64>,
    pub created_at: chrono::NaiveDateTime,
}

// Валидированный payload для вставки (валидация в services::tables)
#[derive(Debug, Clone)]
pub struct NewTable {
    pub table_name: String,
    pub capacity: i32,
    pub reservation_id: Option<i64>,
}
