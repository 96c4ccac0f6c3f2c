//! Minimal user CRUD on top of `SqliteHelper`.
//!
//! Run with `RUST_LOG=debug cargo run --example users` to see bound statements.

use sqlbind::{ColumnValue, HelperConfig, QueryResult, Result, SqliteHelper, Value};
use tracing_subscriber::EnvFilter;

/// A user row.
struct User {
    uname: String,
    udes: String,
    title: String,
    remark: String,
}

struct UserStore {
    helper: SqliteHelper,
}

impl UserStore {
    fn open(config: &HelperConfig) -> Result<Self> {
        let helper = SqliteHelper::open(config)?;
        helper.execute_batch(
            "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                uname TEXT,
                udes TEXT,
                title TEXT,
                remark TEXT
            )",
        )?;
        Ok(Self { helper })
    }

    fn add(&self, user: &User) -> Result<usize> {
        self.helper.execute_non_query(
            "insert into user values(null,@uname,@udes,@title,@remark)",
            &[
                Value::from(user.uname.as_str()),
                Value::from(user.udes.as_str()),
                Value::from(user.title.as_str()),
                Value::from(user.remark.as_str()),
            ],
        )
    }

    fn list(&self) -> Result<QueryResult> {
        self.helper.execute_query("select * from user", &[])
    }

    fn delete(&self, id: i32) -> Result<usize> {
        self.helper
            .execute_non_query("delete from user where id=@id", &[Value::from(id)])
    }
}

fn print_rows(result: &QueryResult) {
    println!("{}", result.columns.join(" | "));
    for row in &result.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|(_, value)| match value {
                ColumnValue::Integer(i) => i.to_string(),
                ColumnValue::Real(f) => f.to_string(),
                ColumnValue::Text(s) => s.clone(),
                ColumnValue::Blob(b) => format!("<{} bytes>", b.len()),
                ColumnValue::Null => "NULL".to_string(),
            })
            .collect();
        println!("{}", cells.join(" | "));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store = UserStore::open(&HelperConfig::in_memory())?;
    for (uname, title) in [("aaa", "admin"), ("bbb", "editor"), ("ccc", "viewer")] {
        store.add(&User {
            uname: uname.to_string(),
            udes: format!("{uname} description"),
            title: title.to_string(),
            remark: String::new(),
        })?;
    }

    store.delete(1)?;
    print_rows(&store.list()?);
    Ok(())
}
