//! # Seed Data Generator
//!
//! Populates the database with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p stride-db --bin seed
//!
//! # Specify database path
//! cargo run -p stride-db --bin seed -- --db ./data/stride.db
//! ```
//!
//! ## Generated Data
//! - 4 brands, 3 categories
//! - A shoe catalog with per-size stock across sizes 35-42
//! - Two promotions: SUMMER10 (10% off, capped) and WELCOME5 ($5 off)

use std::env;

use chrono::{Duration, Utc};
use stride_core::{Brand, Category, DiscountType, Promotion};
use stride_db::repository::catalog::{generate_id, new_product};
use stride_db::{Database, DbConfig};

const BRANDS: &[&str] = &["Velocity", "Northpeak", "Urban Stride", "Coastline"];

const CATEGORIES: &[&str] = &["Running", "Sneakers", "Boots"];

/// (name, brand index, category index, price in cents)
const PRODUCTS: &[(&str, usize, usize, i64)] = &[
    ("Runner 2", 0, 0, 8900),
    ("Runner 2 Trail", 0, 0, 10400),
    ("Featherlite Racer", 0, 0, 12900),
    ("Summit Hiker", 1, 2, 15900),
    ("Ridgeline Mid", 1, 2, 13400),
    ("Court Classic", 2, 1, 7900),
    ("Canvas Low", 2, 1, 5900),
    ("Boardwalk Slip-On", 3, 1, 6400),
    ("Tidewater Trainer", 3, 0, 9900),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = parse_db_path().unwrap_or_else(|| "stride.db".to_string());
    println!("Seeding database at {db_path}");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let mut brand_ids = Vec::new();
    for name in BRANDS {
        let brand = Brand {
            id: generate_id(),
            name: name.to_string(),
        };
        db.catalog().insert_brand(&brand).await?;
        brand_ids.push(brand.id);
    }

    let mut category_ids = Vec::new();
    for name in CATEGORIES {
        let category = Category {
            id: generate_id(),
            name: name.to_string(),
        };
        db.catalog().insert_category(&category).await?;
        category_ids.push(category.id);
    }

    for (i, (name, brand, category, price)) in PRODUCTS.iter().enumerate() {
        let product = new_product(name, &brand_ids[*brand], &category_ids[*category], *price);
        db.catalog().insert_product(&product).await?;

        // Stagger stock so some sizes start sold out
        for size in 35..=42 {
            let quantity = (i as i64 + size) % 5;
            db.inventory().set_stock(&product.id, size, quantity).await?;
        }
    }

    let now = Utc::now();
    db.promotions()
        .insert(&Promotion {
            id: generate_id(),
            code: "SUMMER10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            max_discount_cents: Some(2000),
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(90),
            active: true,
        })
        .await?;
    db.promotions()
        .insert(&Promotion {
            id: generate_id(),
            code: "WELCOME5".to_string(),
            discount_type: DiscountType::FixedAmount,
            discount_value: 500,
            max_discount_cents: None,
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(365),
            active: true,
        })
        .await?;

    println!(
        "Seeded {} brands, {} categories, {} products, 2 promotions",
        BRANDS.len(),
        CATEGORIES.len(),
        PRODUCTS.len()
    );
    Ok(())
}

fn parse_db_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1).cloned())
}
