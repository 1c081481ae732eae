//! 产品数据模型

use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

/// 产品记录，`id` 在创建时由服务端分配且之后不再改变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// 原样保留请求中的 JSON 数字，整数不会变成浮点数
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

/// 通过校验的产品字段（不含 id）
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    pub fn new(input: NewProduct) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), input)
    }

    pub fn with_id(id: String, input: NewProduct) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            in_stock: input.in_stock,
        }
    }

    /// 整体替换除 id 以外的全部字段
    pub fn replace_fields(&mut self, input: NewProduct) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.category = input.category;
        self.in_stock = input.in_stock;
    }
}

/// 删除成功的响应体，`product` 保持为数组形式
#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub message: &'static str,
    pub product: Vec<Product>,
}

impl DeleteProductResponse {
    pub fn new(removed: Product) -> Self {
        Self {
            message: "Product deleted",
            product: vec![removed],
        }
    }
}

/// 启动时预置的示例产品
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Laptop".to_string(),
            description: "High-performance laptop".to_string(),
            price: Number::from(1200),
            category: "electronics".to_string(),
            in_stock: true,
        },
        NewProduct {
            name: "Headphones".to_string(),
            description: "Noise-cancelling headphones".to_string(),
            price: Number::from(300),
            category: "electronics".to_string(),
            in_stock: false,
        },
    ]
}
