// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::engine::audit;
use crate::store::Store;
use crate::utils::pretty_table;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    let user = m.get_one::<String>("user").unwrap();
    let findings = store.with_txn(|txn| audit::audit(txn, user))?;

    if findings.is_empty() {
        println!("✅ doctor: no aggregate drift found");
        return Ok(());
    }
    let rows = findings
        .iter()
        .map(|d| {
            vec![
                d.scope.clone(),
                d.field.to_string(),
                d.expected.to_string(),
                d.actual.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Scope", "Field", "Expected", "Stored"], rows));
    Ok(())
}
