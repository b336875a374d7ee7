//! Bridge SeaQuery bound values to sqlx PostgreSQL arguments.

use anyhow::{Context, Result, anyhow, bail};
use sea_query::{Value, Values};
use sqlx::Arguments;
use sqlx::postgres::PgArguments;

/// Convert rendered query values into positional Postgres arguments.
pub fn pg_arguments(values: Values) -> Result<PgArguments> {
    let mut args = PgArguments::default();
    for value in values.0 {
        bind_value(&mut args, value)?;
    }
    Ok(args)
}

fn bind_value(args: &mut PgArguments, value: Value) -> Result<()> {
    let bound = match value {
        Value::Bool(v) => args.add(v),
        Value::TinyInt(v) => args.add(v.map(i16::from)),
        Value::SmallInt(v) => args.add(v),
        Value::Int(v) => args.add(v),
        Value::BigInt(v) => args.add(v),
        Value::TinyUnsigned(v) => args.add(v.map(i16::from)),
        Value::SmallUnsigned(v) => args.add(v.map(i32::from)),
        Value::Unsigned(v) => args.add(v.map(i64::from)),
        // Postgres has no unsigned types; LIMIT/OFFSET arrive here.
        Value::BigUnsigned(v) => {
            let v = v
                .map(i64::try_from)
                .transpose()
                .context("unsigned query parameter exceeds BIGINT")?;
            args.add(v)
        }
        Value::Float(v) => args.add(v),
        Value::Double(v) => args.add(v),
        Value::String(v) => args.add(v.map(|s| *s)),
        Value::Decimal(v) => args.add(v.map(|d| *d)),
        other => bail!("unsupported query parameter type: {other:?}"),
    };
    bound.map_err(|e| anyhow!("failed to bind query parameter: {e}"))
}
