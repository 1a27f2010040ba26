//! # Seed Data Generator
//!
//! Populates the database with demo products, banners, and an admin
//! account for development.
//!
//! ## Usage
//! ```bash
//! # Generate 24 products (default)
//! cargo run -p freshmart-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p freshmart-store --bin seed -- --count 60
//!
//! # Specify database path and admin credentials
//! cargo run -p freshmart-store --bin seed -- \
//!     --db ./freshmart_dev.db --email admin@freshmart.example --password secret
//! ```
//!
//! ## Generated Data
//! - Products across grocery shelves (fruit, vegetables, dairy, grains,
//!   snacks), each with tags, a price, and hot/seasonal flags
//! - Three homepage banners with internal links
//! - One admin account (argon2-hashed password)

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use chrono::{Duration, Utc};
use std::env;

use freshmart_core::types::{CreateBanner, CreateProduct, UserRole};
use freshmart_store::{Store, StoreConfig};

/// Grocery shelves for realistic demo data.
const SHELVES: &[(&str, &[&str])] = &[
    (
        "fruit",
        &[
            "Mango", "Banana Bunch", "Red Apples", "Green Grapes", "Strawberries",
            "Peaches", "Watermelon", "Oranges", "Kiwi", "Pineapple",
        ],
    ),
    (
        "vegetables",
        &[
            "Tomatoes", "Cucumbers", "Spinach", "Potatoes", "Red Onions",
            "Carrots", "Bell Peppers", "Cauliflower", "Okra", "Garlic",
        ],
    ),
    (
        "dairy",
        &[
            "Whole Milk", "Greek Yogurt", "Cheddar Cheese", "Butter", "Eggs Dozen",
            "Cream Cheese", "Mozzarella", "Fresh Cream",
        ],
    ),
    (
        "grains",
        &[
            "Basmati Rice 5kg", "Whole Wheat Flour", "Red Lentils", "Chickpeas",
            "Rolled Oats", "Brown Rice", "Pasta Penne", "Couscous",
        ],
    ),
    (
        "snacks",
        &[
            "Salted Chips", "Roasted Almonds", "Dark Chocolate", "Biscuits",
            "Popcorn Kernels", "Dates 500g", "Honey Jar", "Peanut Butter",
        ],
    ),
];

const BANNERS: &[(&str, &str, &str)] = &[
    ("Summer Fruit Festival", "Fresh seasonal fruit at harvest prices", "/products"),
    ("Weekly Hot Deals", "Pantry staples, marked down every Monday", "/products"),
    ("New: Fresh Dairy Corner", "Farm dairy delivered every morning", "/products"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 24;
    let mut db_path = String::from("./freshmart_dev.db");
    let mut email = String::from("admin@freshmart.example");
    let mut password = String::from("changeme");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(24);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--email" | "-e" => {
                if i + 1 < args.len() {
                    email = args[i + 1].clone();
                    i += 1;
                }
            }
            "--password" | "-p" => {
                if i + 1 < args.len() {
                    password = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Freshmart Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>        Number of products to generate (default: 24)");
                println!("  -d, --db <PATH>        Database file path (default: ./freshmart_dev.db)");
                println!("  -e, --email <EMAIL>    Admin email (default: admin@freshmart.example)");
                println!("  -p, --password <PW>    Admin password (default: changeme)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Freshmart Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let store = Store::connect(StoreConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = store
        .products()
        .count(&freshmart_core::types::ProductFilter::default())
        .await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate products
    println!();
    println!("Generating products...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (shelf_idx, (shelf, names)) in SHELVES.iter().enumerate() {
        for (name_idx, name) in names.iter().enumerate() {
            if generated >= count {
                break 'outer;
            }

            let input = generate_product(shelf, name, shelf_idx * 100 + name_idx);
            if let Err(e) = store.products().create(input).await {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }

            generated += 1;
        }
    }

    let elapsed = start.elapsed();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    // Banners
    println!();
    println!("Generating banners...");
    for (title, description, link) in BANNERS {
        store
            .banners()
            .create(CreateBanner {
                title: title.to_string(),
                description: description.to_string(),
                image_url: format!(
                    "/blobs/banners/{}.jpg",
                    title.to_lowercase().replace(' ', "-")
                ),
                link: link.to_string(),
            })
            .await?;
    }
    println!("✓ Generated {} banners", BANNERS.len());

    // Admin account
    println!();
    println!("Creating admin account...");
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {e}"))?;
    store
        .users()
        .create(&email, &hash.to_string(), UserRole::Admin)
        .await?;
    println!("✓ Admin account: {}", email);

    // Smoke-check search
    println!();
    let hits = store.products().search("rice", 10).await?;
    println!("  Search 'rice': {} results", hits.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with plausible data derived from its index.
fn generate_product(shelf: &str, name: &str, seed: usize) -> CreateProduct {
    // Price $0.99 - $14.99 in 50-cent steps
    let price_cents = 99 + ((seed * 29) % 29) as i64 * 50;

    let is_hot = seed % 5 == 0;
    let is_seasonal = shelf == "fruit" && seed % 3 == 0;
    let seasonal_end_date = is_seasonal.then(|| Utc::now() + Duration::days(45));

    let slug = name.to_lowercase().replace(' ', "-");

    CreateProduct {
        name: name.to_string(),
        description: format!("Fresh {} from the {} shelf.", name.to_lowercase(), shelf),
        price_cents,
        image_url: format!("/blobs/products/{slug}.jpg"),
        tags: vec![shelf.to_string()],
        is_hot,
        is_seasonal,
        seasonal_end_date,
    }
}
