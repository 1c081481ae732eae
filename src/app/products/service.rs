//! 产品业务服务

use std::sync::Arc;

use super::model::{sample_products, NewProduct, Product};
use crate::core::error::CoreError;
use crate::infrastructure::store::ProductStore;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<ProductStore>) -> Self {
        Self { store }
    }

    pub fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        self.store.list()
    }

    pub fn get_product(&self, id: &str) -> Result<Product, CoreError> {
        self.store.get(id)?.ok_or(CoreError::NotFound)
    }

    pub fn create_product(&self, input: NewProduct) -> Result<Product, CoreError> {
        self.store.create(input)
    }

    pub fn update_product(&self, id: &str, input: NewProduct) -> Result<Product, CoreError> {
        self.store.replace(id, input)?.ok_or(CoreError::NotFound)
    }

    pub fn delete_product(&self, id: &str) -> Result<Product, CoreError> {
        self.store.remove(id)?.ok_or(CoreError::NotFound)
    }

    /// 写入示例数据，返回写入的条数
    pub fn seed_sample_data(&self) -> Result<usize, CoreError> {
        let samples = sample_products();
        let count = samples.len();
        for sample in samples {
            self.store.create(sample)?;
        }
        Ok(count)
    }
}
