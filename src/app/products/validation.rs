//! 产品请求体校验
//!
//! 创建与更新共用同一套规则：五个字段必须齐全，`price` 必须是数字，
//! `inStock` 必须是布尔值。

use serde_json::{Map, Number, Value};

use super::model::NewProduct;

/// 校验失败的种类，`Display` 即返回给调用方的文案
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields.")]
    MissingFields,
    #[error("Price must be a number.")]
    PriceNotNumber,
    #[error("inStock must be true or false.")]
    InStockNotBoolean,
}

/// 校验原始 JSON 请求体并转换成 [`NewProduct`]
///
/// 非对象的请求体视为所有字段缺失。文本字段为 `null`、空串或非字符串时
/// 同样算作缺失；`price` / `inStock` 只要出现（包括 `null`）就进入类型检查。
pub fn validate_product(payload: &Value) -> Result<NewProduct, ValidationError> {
    let Value::Object(fields) = payload else {
        return Err(ValidationError::MissingFields);
    };

    let name = required_text(fields, "name");
    let description = required_text(fields, "description");
    let category = required_text(fields, "category");
    let price = fields.get("price");
    let in_stock = fields.get("inStock");

    let (Some(name), Some(description), Some(category), Some(price), Some(in_stock)) =
        (name, description, category, price, in_stock)
    else {
        return Err(ValidationError::MissingFields);
    };

    let price = as_number(price).ok_or(ValidationError::PriceNotNumber)?;
    let in_stock = in_stock
        .as_bool()
        .ok_or(ValidationError::InStockNotBoolean)?;

    Ok(NewProduct {
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        in_stock,
    })
}

fn as_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        _ => None,
    }
}

fn required_text<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
