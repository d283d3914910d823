//! Projects a handful of in-memory records into a table page.
//!
//! Run with: `cargo run -p datatables-lib --example in_memory`

use datatables_lib::adapter::{Adapter, ArrayAdapter};
use datatables_lib::model::{Record, Value};
use datatables_lib::table::{Column, DataTable, DataTableState, Direction};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let records: Vec<Record> = serde_json::from_str(
        r#"[
            {"id": 1, "first": "Ann", "last": "Lee", "address": {"city": "Oslo"}},
            {"id": 2, "first": "Bob", "last": "Ray", "address": {"city": "Paris"}},
            {"id": 3, "first": "Cid", "last": "Moe"}
        ]"#,
    )?;

    let mut table = DataTable::<Record>::new("people");
    table
        .add(Column::mapped("id"))?
        .add(Column::new("city").field("address.city").default_value("unknown"))?
        .add(Column::new("name").with_transform(|_, record: &Record| {
            let first = record.get_string("first")?.unwrap_or_default();
            let last = record.get_string("last")?.unwrap_or_default();
            Ok(Value::from(format!("{first} {last}")))
        }))?;

    let adapter = ArrayAdapter::new(records).with_identifier("id");
    let state = DataTableState::new(&table)
        .with_draw(1)
        .with_order("id", Direction::Desc)?;

    let result = adapter.get_data(&state).await?;
    println!("{}", serde_json::to_string_pretty(&result.into_response(state.draw()))?);
    Ok(())
}
