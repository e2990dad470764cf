//! `upsort table` – list extensions per category.

use upsort_core::Category;

pub fn run_table() {
    println!("{:<10} {:<12} {}", "CATEGORY", "SUBDIR", "EXTENSIONS");
    for category in Category::ALL {
        println!(
            "{:<10} {:<12} {}",
            category.name(),
            category.subdir(),
            category.extensions().join(", ")
        );
    }
}
