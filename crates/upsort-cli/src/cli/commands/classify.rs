//! `upsort classify` – print the category of each filename.

use upsort_core::classify;

pub fn run_classify(filenames: &[String]) {
    for name in filenames {
        let label = classify(name).map(|c| c.name()).unwrap_or("none");
        println!("{name}\t{label}");
    }
}
