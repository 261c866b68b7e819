// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::Result;
use rusqlite::Connection;

use crate::engine::expand::RECURRENCE_CAP;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Expenses pointing at a payment source that no longer exists
    let mut stmt = conn.prepare(
        "SELECT e.id, e.payment_source_id FROM expenses e
         LEFT JOIN payment_sources s ON e.payment_source_id=s.id
         WHERE s.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: String = r.get(0)?;
        let src: String = r.get(1)?;
        rows.push(vec!["dangling_source".into(), format!("{} -> {}", id, src)]);
    }

    // 2) Expenses pointing at a missing category (cascade should prevent this)
    let mut stmt2 = conn.prepare(
        "SELECT e.id, e.category_id FROM expenses e
         LEFT JOIN categories c ON e.category_id=c.id
         WHERE c.id IS NULL",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: String = r.get(0)?;
        let cat: String = r.get(1)?;
        rows.push(vec!["dangling_category".into(), format!("{} -> {}", id, cat)]);
    }

    // 3) Installment series with missing or extra members
    let mut stmt3 = conn.prepare(
        "SELECT related_expense_id, installment_number, total_installments FROM expenses
         WHERE payment_type='installment' AND related_expense_id IS NOT NULL",
    )?;
    let mut cur3 = stmt3.query([])?;
    let mut series: HashMap<String, Vec<(u32, u32)>> = HashMap::new();
    while let Some(r) = cur3.next()? {
        let group: String = r.get(0)?;
        let number: u32 = r.get::<_, Option<u32>>(1)?.unwrap_or(0);
        let total: u32 = r.get::<_, Option<u32>>(2)?.unwrap_or(0);
        series.entry(group).or_default().push((number, total));
    }
    for (group, mut members) in series {
        members.sort();
        let total = members.first().map(|&(_, t)| t).unwrap_or(0);
        let contiguous = members
            .iter()
            .enumerate()
            .all(|(i, &(n, t))| n == i as u32 + 1 && t == total);
        if members.len() as u32 != total || !contiguous {
            rows.push(vec![
                "broken_installment_series".into(),
                format!("{} ({}/{} members)", group, members.len(), total),
            ]);
        }
    }

    // 4) Recurrence series larger than the expansion cap
    let mut stmt4 = conn.prepare(
        "SELECT recurrence_id, COUNT(*) FROM expenses
         WHERE recurrence_id IS NOT NULL GROUP BY recurrence_id",
    )?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: String = r.get(0)?;
        let count: i64 = r.get(1)?;
        if count as usize > RECURRENCE_CAP {
            rows.push(vec![
                "oversized_recurrence".into(),
                format!("{} ({} members)", id, count),
            ]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
