//! Records the service starts with

use rust_decimal::Decimal;

use super::model::{Category, Product};

fn product(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    category: &str,
    stock: u32,
    created_at: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(price_cents, 2),
        category: category.to_string(),
        stock,
        created_at: created_at.to_string(),
    }
}

fn category(id: &str, name: &str, description: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Laptop Pro",
            "High-performance laptop for professionals",
            129_999,
            "electronics",
            50,
            "2024-01-15T10:00:00Z",
        ),
        product(
            "2",
            "Wireless Headphones",
            "Premium noise-cancelling headphones",
            29_999,
            "electronics",
            100,
            "2024-01-16T11:30:00Z",
        ),
        product(
            "3",
            "Python Programming Book",
            "Complete guide to Python programming",
            4_999,
            "books",
            25,
            "2024-01-17T09:15:00Z",
        ),
        product(
            "4",
            "Cotton T-Shirt",
            "Comfortable 100% cotton t-shirt",
            1_999,
            "clothing",
            200,
            "2024-01-18T14:20:00Z",
        ),
        product(
            "5",
            "Smart Watch",
            "Feature-rich smartwatch with health tracking",
            39_999,
            "electronics",
            75,
            "2024-01-19T16:45:00Z",
        ),
    ]
}

pub fn categories() -> Vec<Category> {
    vec![
        category("electronics", "Electronics", "Electronic devices and gadgets"),
        category("books", "Books", "Books and educational materials"),
        category("clothing", "Clothing", "Apparel and fashion items"),
    ]
}
