#[cfg(test)]
mod tests {
    use indoc::indoc;
    use regex::Regex;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::macros::{date, datetime, time};
    use ydb_dialect_core::{
        DataType, Field, GenericSqlWriter, IndexDef, SqlWriter, TableDef, Value, explain_sql,
        inline_sql,
    };

    const WRITER: GenericSqlWriter = GenericSqlWriter::new();

    fn value(value: impl Into<Value>) -> String {
        let mut out = String::new();
        WRITER.write_value(&mut out, &value.into());
        out
    }

    #[test]
    fn quote_identifiers() {
        let mut out = String::new();
        WRITER.write_identifier_quoted(&mut out, "schema.my \"table\"");
        assert_eq!(out, r#""schema"."my ""table""""#);
    }

    #[test]
    fn literals() {
        assert_eq!(value(Value::Null), "NULL");
        assert_eq!(value(Option::<i32>::None), "NULL");
        assert_eq!(value(true), "true");
        assert_eq!(value(-128_i8), "-128");
        assert_eq!(value(u64::MAX), "18446744073709551615");
        assert_eq!(value(1.5_f64), "1.5");
        assert_eq!(value(f64::INFINITY), "'Infinity'");
        assert_eq!(value(f32::NEG_INFINITY), "'-Infinity'");
        assert_eq!(value(f64::NAN), "'NaN'");
        assert_eq!(value(Decimal::from_str("12.340").unwrap()), "12.340");
        assert_eq!(value("l'arbre"), "'l''arbre'");
        assert_eq!(value(vec![0x0a_u8, 0xff]), "'\\x0AFF'");
        assert_eq!(value(date!(2024 - 02 - 29)), "'2024-02-29'");
        assert_eq!(value(time!(08:05:03.250)), "'08:05:03.25'");
        assert_eq!(
            value(datetime!(1999-12-31 23:59:59)),
            "'1999-12-31 23:59:59'"
        );
        assert_eq!(
            value(datetime!(2020-01-01 10:00:00 -03:30)),
            "'2020-01-01 10:00:00-03:30'"
        );
        assert_eq!(
            value(datetime!(2020-01-01 10:00:00 +05:30:15)),
            "'2020-01-01 10:00:00+05:30:15'"
        );
    }

    #[test]
    fn explain_question_marks() {
        assert_eq!(
            WRITER.explain(
                "SELECT '?' AS q, a FROM t WHERE a = ? AND b = ? AND c = ?",
                &[Value::Int32(Some(5)), Value::Varchar(Some("x".into()))]
            ),
            "SELECT '?' AS q, a FROM t WHERE a = 5 AND b = 'x' AND c = ?"
        );
    }

    #[test]
    fn explain_numbered() {
        let placeholder = Regex::new(r":(\d+)").unwrap();
        assert_eq!(
            explain_sql(
                &WRITER,
                "VALUES (:2, :1, :0, :3)",
                Some(&placeholder),
                &[Value::Int8(Some(1)), Value::Boolean(Some(false))]
            ),
            "VALUES (false, 1, :0, :3)"
        );
    }

    #[test]
    fn inline_skips_quoted_text() {
        assert_eq!(
            WRITER.inline_values(
                r#"SELECT '?', "a?", `b?`, ? FROM t WHERE c = 'it''s ?' AND d = ?"#,
                &[Value::Int32(Some(1)), Value::Boolean(Some(true))]
            ),
            r#"SELECT '?', "a?", `b?`, 1 FROM t WHERE c = 'it''s ?' AND d = true"#
        );
        let placeholder = Regex::new(r"\$(\d+)").unwrap();
        assert_eq!(
            inline_sql(
                &WRITER,
                "INSERT INTO t (note, n) VALUES ('costs $1', $1)",
                Some(&placeholder),
                &[Value::Int32(Some(5))]
            ),
            "INSERT INTO t (note, n) VALUES ('costs $1', 5)"
        );
        assert_eq!(
            inline_sql(&WRITER, "SELECT ?, 'open ?", None, &[Value::Int8(Some(3))]),
            "SELECT 3, 'open ?"
        );
    }

    #[test]
    fn create_table() {
        let table = TableDef::new("trades")
            .field(Field::of::<i64>("id").primary_key())
            .field(Field::of::<String>("symbol").with_size(8).primary_key())
            .field(Field::new("price", DataType::Float).with_precision(18, 4))
            .field(Field::of::<Option<String>>("note").with_default("none"))
            .field(Field::of::<u16>("lot").unique())
            .index(IndexDef {
                unique: true,
                ..IndexDef::new("trades_lot", ["lot", "symbol"])
            });
        let mut out = String::new();
        WRITER.write_create_table(&mut out, &table, true);
        assert_eq!(
            out,
            indoc! {r#"
                CREATE TABLE "trades" (
                "id" BIGINT,
                "symbol" VARCHAR(8),
                "price" DECIMAL(18,4) NOT NULL,
                "note" TEXT DEFAULT 'none',
                "lot" SMALLINT NOT NULL UNIQUE,
                PRIMARY KEY ("id", "symbol"),
                UNIQUE INDEX "trades_lot" ("lot", "symbol")
                );
            "#}
            .trim()
        );
        let mut out = String::new();
        WRITER.write_create_index(&mut out, &table, &table.indexes[0]);
        assert_eq!(
            out,
            r#"CREATE UNIQUE INDEX "trades_lot" ON "trades" ("lot", "symbol");"#
        );
        let mut out = String::new();
        WRITER.write_drop_table(&mut out, &table.clone().with_schema("market"), false);
        assert_eq!(out, r#"DROP TABLE "market"."trades";"#);
    }

    #[test]
    fn transaction_statements() {
        let mut out = String::new();
        WRITER.write_transaction_begin(&mut out);
        WRITER.write_savepoint(&mut out, " a");
        WRITER.write_rollback_to_savepoint(&mut out, " a;");
        WRITER.write_transaction_rollback(&mut out);
        WRITER.write_transaction_commit(&mut out);
        assert_eq!(
            out,
            "BEGIN;SAVEPOINT  aROLLBACK TO SAVEPOINT  a;ROLLBACK;COMMIT;"
        );
    }
}
