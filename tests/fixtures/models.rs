// Model fixture - data types used by the controllers
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub status: Status,
    internal_notes: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateItem {
    pub name: String,
    #[serde(rename = "initialStatus")]
    pub status: Status,
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Status {
    Draft,
    Published,
}
