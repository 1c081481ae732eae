//! 内存产品存储
//!
//! 所有读改写都在同一把互斥锁内完成，保证每个 id 至多对应一条记录。

use std::sync::{Mutex, MutexGuard};

use crate::app::products::model::{NewProduct, Product};
use crate::core::error::CoreError;

/// 有序的产品集合，插入顺序即列表顺序
#[derive(Debug, Default)]
pub struct ProductStore {
    products: Mutex<Vec<Product>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: Mutex::new(products.into_iter().collect()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Product>>, CoreError> {
        self.products
            .lock()
            .map_err(|e| CoreError::internal(format!("产品存储锁已中毒: {}", e)))
    }

    /// 当前全部产品的快照
    pub fn list(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.lock()?.clone())
    }

    pub fn get(&self, id: &str) -> Result<Option<Product>, CoreError> {
        Ok(self.lock()?.iter().find(|p| p.id == id).cloned())
    }

    /// 分配新 id 并追加到末尾
    pub fn create(&self, input: NewProduct) -> Result<Product, CoreError> {
        let mut products = self.lock()?;

        let mut product = Product::new(input);
        while products.iter().any(|p| p.id == product.id) {
            product.id = uuid::Uuid::new_v4().to_string();
        }

        products.push(product.clone());
        Ok(product)
    }

    /// 整体替换，保持 id 与位置不变
    pub fn replace(&self, id: &str, input: NewProduct) -> Result<Option<Product>, CoreError> {
        let mut products = self.lock()?;

        Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
            product.replace_fields(input);
            product.clone()
        }))
    }

    pub fn remove(&self, id: &str) -> Result<Option<Product>, CoreError> {
        let mut products = self.lock()?;

        Ok(products
            .iter()
            .position(|p| p.id == id)
            .map(|index| products.remove(index)))
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.lock()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn input(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{} description", name),
            price: serde_json::Number::from(10),
            category: "misc".to_string(),
            in_stock: true,
        }
    }

    #[test]
    fn test_create_appends_in_order() {
        let store = ProductStore::new();
        let a = store.create(input("a")).unwrap();
        let b = store.create(input("b")).unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_ne!(a.id, b.id);
        assert_eq!(store.get(&a.id).unwrap(), Some(a));
    }

    #[test]
    fn test_get_missing() {
        let store = ProductStore::new();
        store.create(input("a")).unwrap();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_replace_keeps_id_and_position() {
        let store = ProductStore::new();
        let a = store.create(input("a")).unwrap();
        store.create(input("b")).unwrap();

        let updated = store.replace(&a.id, input("z")).unwrap().unwrap();
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.name, "z");

        let list = store.list().unwrap();
        assert_eq!(list[0], updated);
        assert_eq!(list[1].name, "b");
    }

    #[test]
    fn test_replace_missing_leaves_store_untouched() {
        let store = ProductStore::new();
        let a = store.create(input("a")).unwrap();

        assert_eq!(store.replace("missing", input("z")).unwrap(), None);
        assert_eq!(store.list().unwrap(), vec![a]);
    }

    #[test]
    fn test_remove() {
        let store = ProductStore::new();
        let a = store.create(input("a")).unwrap();
        let b = store.create(input("b")).unwrap();
        let c = store.create(input("c")).unwrap();

        assert_eq!(store.remove(&b.id).unwrap(), Some(b.clone()));
        assert_eq!(store.list().unwrap(), vec![a, c]);
        assert_eq!(store.remove(&b.id).unwrap(), None);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_with_products() {
        let seeded = Product::with_id("fixed".to_string(), input("seed"));
        let store = ProductStore::with_products(vec![seeded.clone()]);

        assert!(!store.is_empty().unwrap());
        assert_eq!(store.get("fixed").unwrap(), Some(seeded));
    }

    #[test]
    fn test_concurrent_creates() {
        let store = Arc::new(ProductStore::new());
        let mut handles = vec![];

        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for j in 0..50 {
                    store.create(input(&format!("{}-{}", i, j))).unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let list = store.list().unwrap();
        assert_eq!(list.len(), 400);

        let mut ids: Vec<_> = list.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 400);
    }
}
