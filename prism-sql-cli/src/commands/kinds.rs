//! Kinds command implementation.

use anyhow::Result;
use prism_sql::{AggregationFamily, AggregationKind};

/// Print the aggregation registry, optionally restricted to one family
pub fn run_kinds(family: Option<AggregationFamily>) -> Result<()> {
    println!("{:<8}  {:<18}  TAG", "FAMILY", "KIND");
    println!("--------------------------------------------------");
    for line in kind_rows(family) {
        println!("{}", line);
    }
    Ok(())
}

fn kind_rows(family: Option<AggregationFamily>) -> Vec<String> {
    AggregationKind::ALL
        .iter()
        .filter(|k| family.map_or(true, |f| k.family() == f))
        .map(|k| format!("{:<8}  {:<18}  {}", k.family(), format!("{:?}", k), k.tag()))
        .collect()
}
