//! Exotic wager payouts, reshaped to one wide row per race.

use std::collections::BTreeMap;

use scraper::ElementRef;

use super::{cells, selector, text_of};
use crate::error::ExtractError;
use crate::types::ExoticColumns;

const FIELDS: [&str; 3] = ["finish", "$2_payout", "total_pool"];

/// One long-format row of the `table-exotic-payouts` table.
#[derive(Debug, Clone, PartialEq)]
struct PoolRow {
    pool: String,
    finish: String,
    payout: String,
    total_pool: String,
}

impl PoolRow {
    fn field(&self, name: &str) -> &str {
        match name {
            "finish" => &self.finish,
            "$2_payout" => &self.payout,
            _ => &self.total_pool,
        }
    }
}

/// Parser for the exotic payouts table.
pub struct ExoticsParser;

impl ExoticsParser {
    /// Columns `{pool}_finish`, `{pool}_$2_payout`, `{pool}_total_pool`
    /// for every pool, field-major with pools in sorted order.
    pub fn reshape(table: &ElementRef) -> Result<ExoticColumns, ExtractError> {
        let tr = selector("tr")?;
        let rows: Vec<_> = table.select(&tr).collect();

        if rows.len() < 2 {
            return Ok(Self::placeholder());
        }

        let mut pools: Vec<PoolRow> = Vec::new();
        for row in &rows {
            let cols = cells(row)?;
            if cols.len() < 3 {
                continue;
            }
            let cell = |i: usize| {
                cols.get(i)
                    .map(text_of)
                    .ok_or(ExtractError::MissingElement("exotic payout cell"))
            };
            let parsed = PoolRow {
                pool: cell(0)?,
                finish: cell(1)?,
                payout: cell(2)?,
                total_pool: cell(3)?,
            };
            // carry-over pools show up twice
            if pools.iter().all(|p| p.pool != parsed.pool) {
                pools.push(parsed);
            }
        }

        let by_pool: BTreeMap<&str, &PoolRow> = pools.iter().map(|p| (p.pool.as_str(), p)).collect();

        let mut columns = Vec::with_capacity(by_pool.len() * FIELDS.len());
        for field in FIELDS {
            for (pool, row) in &by_pool {
                columns.push((
                    format!("{}_{}", pool.to_lowercase(), field),
                    Some(row.field(field).to_string()),
                ));
            }
        }
        Ok(columns)
    }

    /// Schema used when a race has no exotic payouts posted.
    pub fn placeholder() -> ExoticColumns {
        FIELDS
            .iter()
            .map(|field| (format!("exacta_{}", field), None))
            .collect()
    }
}
