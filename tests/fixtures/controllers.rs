// Controller fixture - a small catalogue service
use crate::models::{CreateItem, Item, Page, TreeNode};

#[route("items")]
pub struct ItemsController {
    store: ItemStore,
}

impl ItemsController {
    pub fn new(store: ItemStore) -> Self {
        Self { store }
    }

    /// Fetch a single item by id.
    #[get("{id}")]
    pub async fn get(&self, id: u64) -> Item {
        self.store.get(id)
    }

    /// List items matching a filter.
    #[get("")]
    pub async fn list(&self, filter: Option<String>, page: u32) -> Page<Item> {
        self.store.list(filter, page)
    }

    #[post]
    pub async fn create(&self, payload: Json<CreateItem>) -> Item {
        self.store.insert(payload.0)
    }

    #[get("lookup")]
    #[post("lookup")]
    pub async fn lookup(&self, #[from_header] tenant: String, Id: u64) -> Option<Item> {
        self.store.lookup(&tenant, Id)
    }
}

#[controller("api/[controller]")]
pub struct Categories;

impl Categories {
    #[get("{slug:alpha}/tree")]
    pub async fn tree(&self, Slug: String, depth: u8) -> TreeNode {
        todo!()
    }
}

pub struct ItemStore;
