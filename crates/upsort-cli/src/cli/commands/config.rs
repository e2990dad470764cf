//! `upsort config` – show where the config lives and what it holds.

use anyhow::Result;
use upsort_core::config::{self, SorterConfig};

pub fn run_config(cfg: &SorterConfig) -> Result<()> {
    println!("path:          {}", config::config_path()?.display());
    println!("suffix_policy: {}", cfg.suffix_policy);
    println!("output:        {}", cfg.output);
    Ok(())
}
