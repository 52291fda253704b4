//! Codes command implementation.
//!
//! Feeds the input through a code tree and prints the codes the tree ends
//! up with.

use crate::utils::{display_symbol, read_input};
use oxihuff_vitter::{AdaptiveCodeTree, NodeKind};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct CodeJson {
    symbol: u8,
    weight: u64,
    code: String,
}

#[derive(Debug, Serialize)]
struct CodeTableJson {
    symbols: u64,
    escape: String,
    codes: Vec<CodeJson>,
}

pub fn cmd_codes(
    input: Option<&Path>,
    blocks: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;

    let mut tree = AdaptiveCodeTree::new();
    for &symbol in &data {
        tree.insert(symbol)?;
    }

    let codes: Vec<CodeJson> = tree
        .codes()
        .into_iter()
        .map(|(symbol, code)| CodeJson {
            symbol,
            weight: tree
                .search_symbol(symbol)
                .map_or(0, |leaf| tree.node(leaf).weight()),
            code: code.to_string(),
        })
        .collect();

    if json {
        let table = CodeTableJson {
            symbols: tree.total_weight(),
            escape: tree.nyt_code().to_string(),
            codes,
        };
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    for entry in &codes {
        println!(
            "Symbol: {:<6} Weight: {:<8} Code: {}",
            display_symbol(entry.symbol),
            entry.weight,
            entry.code
        );
    }
    println!("Escape (NYT) code: {}", tree.nyt_code());

    if blocks {
        println!();
        println!("Blocks:");
        for block in tree.blocks() {
            let kind = match block.kind {
                NodeKind::Leaf => "leaf",
                NodeKind::Internal => "internal",
            };
            let numbers: Vec<String> = block
                .members
                .iter()
                .map(|&id| tree.node(id).number().to_string())
                .collect();
            println!(
                "  weight {:<8} {:<8} #{}",
                block.weight,
                kind,
                numbers.join(" #")
            );
        }
    }

    Ok(())
}
