//! # Seed Data Generator
//!
//! Writes a fixture data directory in the REST payload format, ready for
//! `JsonDirSource` and the console binary.
//!
//! ## Usage
//! ```bash
//! # 200 products, 120 orders into ./data (default)
//! cargo run -p mercato-data --bin seed
//!
//! # Custom amounts and directory
//! cargo run -p mercato-data --bin seed -- --products 1000 --orders 500 --dir ./fixtures
//! ```
//!
//! Quantities cycle through every stock bucket and statuses cover every order
//! bucket plus a few the classifier does not know.

use std::env;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use mercato_data::snapshot_file_name;
use mercato_core::SnapshotKind;

const PRODUCT_NAMES: &[&str] = &[
    "Classic Tee",
    "Slim Jeans",
    "Hoodie",
    "Canvas Sneakers",
    "Leather Belt",
    "Wool Scarf",
    "Denim Jacket",
    "Running Shorts",
    "Baseball Cap",
    "Ankle Socks",
];

const ORDER_STATUSES: &[&str] = &[
    "pending",
    "processing",
    "shipped",
    "delivered",
    "cancelled",
    "Order Shipped",
    "pending - will ship",
    "returned",
];

const VARIANT_TYPES: &[(&str, &str, &[&str])] = &[
    ("vt-size", "Size", &["XS", "S", "M", "L", "XL"]),
    ("vt-color", "Color", &["Black", "White", "Red", "Navy"]),
    ("vt-material", "Material", &["Cotton", "Linen"]),
];

const QUANTITIES: &[i64] = &[0, 1, 3, 5, 6, 12, 40, 150];

struct Args {
    dir: PathBuf,
    products: usize,
    orders: usize,
}

fn parse_args() -> Args {
    let mut args = Args {
        dir: PathBuf::from("./data"),
        products: 200,
        orders: 120,
    };
    let argv: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--dir" if i + 1 < argv.len() => {
                args.dir = PathBuf::from(&argv[i + 1]);
                i += 1;
            }
            "--products" if i + 1 < argv.len() => {
                args.products = argv[i + 1].parse().unwrap_or(args.products);
                i += 1;
            }
            "--orders" if i + 1 < argv.len() => {
                args.orders = argv[i + 1].parse().unwrap_or(args.orders);
                i += 1;
            }
            other => eprintln!("ignoring argument: {}", other),
        }
        i += 1;
    }
    args
}

fn variant_types() -> Value {
    let data: Vec<Value> = VARIANT_TYPES
        .iter()
        .map(|(id, label, _)| json!({ "_id": id, "type": label }))
        .collect();
    json!({ "success": true, "message": "Variant types retrieved successfully.", "data": data })
}

fn variants() -> Value {
    let data: Vec<Value> = VARIANT_TYPES
        .iter()
        .flat_map(|(type_id, _, names)| {
            names.iter().map(move |name| {
                json!({
                    "_id": format!("{}-{}", type_id, name.to_lowercase()),
                    "name": name,
                    "variantTypeId": { "_id": type_id }
                })
            })
        })
        .collect();
    json!({ "success": true, "message": "Variants retrieved successfully.", "data": data })
}

fn products(count: usize) -> Value {
    let data: Vec<Value> = (0..count)
        .map(|i| {
            let name = PRODUCT_NAMES[i % PRODUCT_NAMES.len()];
            let (type_id, _, names) = VARIANT_TYPES[i % VARIANT_TYPES.len()];
            let picked: Vec<String> = names
                .iter()
                .take(1 + i % names.len())
                .map(|n| format!("{}-{}", type_id, n.to_lowercase()))
                .collect();
            json!({
                "_id": format!("p{:05}", i),
                "name": format!("{} #{}", name, i),
                "quantity": QUANTITIES[i % QUANTITIES.len()],
                "price": 9.99 + (i % 40) as f64,
                "proVariantTypeId": type_id,
                "variants": picked
            })
        })
        .collect();
    json!({ "success": true, "message": "Products retrieved successfully.", "data": data })
}

fn orders(count: usize) -> Value {
    let data: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "_id": format!("o{:05}", i),
                "orderStatus": ORDER_STATUSES[i % ORDER_STATUSES.len()],
                "orderTotal": { "total": 15.0 + (i % 25) as f64 * 2.5 },
                "userID": { "_id": format!("u{}", i % 17), "name": format!("Customer {}", i % 17) },
                "orderDate": format!("2024-05-{:02}T12:00:00.000Z", 1 + i % 28),
                "items": vec![json!({}); 1 + i % 4]
            })
        })
        .collect();
    json!({ "success": true, "message": "Orders retrieved successfully.", "data": data })
}

fn write(dir: &Path, kind: SnapshotKind, payload: &Value) -> std::io::Result<()> {
    let path = dir.join(snapshot_file_name(kind));
    let body = serde_json::to_string_pretty(payload)?;
    std::fs::write(&path, body)?;
    println!("  wrote {}", path.display());
    Ok(())
}

fn main() -> std::io::Result<()> {
    let args = parse_args();
    std::fs::create_dir_all(&args.dir)?;

    println!(
        "Seeding {} products and {} orders into {}",
        args.products,
        args.orders,
        args.dir.display()
    );
    write(&args.dir, SnapshotKind::Products, &products(args.products))?;
    write(&args.dir, SnapshotKind::Orders, &orders(args.orders))?;
    write(&args.dir, SnapshotKind::VariantTypes, &variant_types())?;
    write(&args.dir, SnapshotKind::Variants, &variants())?;
    Ok(())
}
