#[cfg(test)]
mod tests {
    use indoc::indoc;
    use ydb_dialect::YdbSqlWriter;
    use ydb_dialect_core::{DataType, Field, IndexDef, Query, SqlWriter, TableDef, Value};

    const WRITER: YdbSqlWriter = YdbSqlWriter::new();

    fn quote(value: &str) -> String {
        let mut out = String::new();
        WRITER.write_identifier_quoted(&mut out, value);
        out
    }

    fn column_type(field: Field) -> String {
        let mut out = String::new();
        WRITER.write_column_type(&mut out, &field);
        out
    }

    #[test]
    fn quote_identifiers() {
        assert_eq!(quote("order"), "`order`");
        assert_eq!(quote("public.order"), "`public`.`order`");
        assert_eq!(quote("a.b.c"), "`a`.`b`.`c`");
        assert_eq!(quote("ünïcödé"), "`ünïcödé`");
    }

    #[test]
    fn quote_backticks() {
        assert_eq!(quote("a`b"), "`a``b`");
        assert_eq!(quote("a``b"), "`a``b`");
        assert_eq!(quote("a`"), "`a```");
    }

    #[test]
    fn quote_already_quoted() {
        assert_eq!(quote("`order`"), "`order`");
        assert_eq!(quote("`public`.`order`"), "`public`.`order`");
    }

    #[test]
    fn quote_empty() {
        assert_eq!(quote(""), "``");
    }

    #[test]
    fn integer_types() {
        assert_eq!(column_type(Field::new("a", DataType::Int).with_size(8)), "Int8");
        assert_eq!(column_type(Field::new("a", DataType::Int).with_size(16)), "Int8");
        assert_eq!(column_type(Field::new("a", DataType::Int).with_size(17)), "Int32");
        assert_eq!(column_type(Field::new("a", DataType::Int).with_size(32)), "Int32");
        assert_eq!(column_type(Field::new("a", DataType::Int).with_size(33)), "Int64");
        assert_eq!(column_type(Field::of::<i64>("a")), "Int64");
        assert_eq!(column_type(Field::new("a", DataType::Int)), "Int8");
    }

    #[test]
    fn unsigned_integer_types() {
        assert_eq!(column_type(Field::new("a", DataType::Uint).with_size(15)), "Int8");
        assert_eq!(column_type(Field::new("a", DataType::Uint).with_size(16)), "Int32");
        assert_eq!(column_type(Field::new("a", DataType::Uint).with_size(31)), "Int32");
        assert_eq!(column_type(Field::new("a", DataType::Uint).with_size(32)), "Int64");
        assert_eq!(column_type(Field::of::<u8>("a")), "Int8");
        assert_eq!(column_type(Field::of::<u32>("a")), "Int64");
    }

    #[test]
    fn other_types() {
        assert_eq!(column_type(Field::of::<bool>("a")), "Bool");
        assert_eq!(
            column_type(Field::new("a", DataType::Float).with_precision(10, 2)),
            "numeric(10, 2)"
        );
        assert_eq!(
            column_type(Field::new("a", DataType::Float).with_precision(10, 0)),
            "numeric(10)"
        );
        assert_eq!(column_type(Field::of::<f64>("a")), "decimal");
        assert_eq!(column_type(Field::of::<String>("a").with_size(255)), "varchar(255)");
        assert_eq!(column_type(Field::of::<Option<String>>("a")), "text");
        assert_eq!(
            column_type(Field::of::<time::PrimitiveDateTime>("a").with_precision(6, 0)),
            "Timestamp(6)"
        );
        assert_eq!(column_type(Field::of::<time::OffsetDateTime>("a")), "Timestamp");
        assert_eq!(column_type(Field::of::<Vec<u8>>("a")), "bytea");
    }

    #[test]
    fn custom_types() {
        let custom = |name: &'static str| Field::new("a", DataType::Custom(name.into()));
        assert_eq!(column_type(custom("Utf8")), "Utf8");
        assert_eq!(column_type(custom("Serial").with_size(64)), "Serial");
        assert_eq!(
            column_type(custom("Serial").with_size(64).auto_increment()),
            "Int64"
        );
        assert_eq!(
            column_type(
                custom("Serial")
                    .with_size(31)
                    .with_underlying(DataType::Uint)
                    .auto_increment()
            ),
            "Int32"
        );
        assert_eq!(
            column_type(custom("Int32").with_size(64).auto_increment()),
            "Int32"
        );
        assert_eq!(
            column_type(custom("pg_int32").with_size(64).auto_increment()),
            "pg_int32"
        );
    }

    #[test]
    fn bind_vars() {
        let mut query = Query::new("SELECT * FROM ");
        query.push_sql(&quote("orders"));
        query.push_sql(" WHERE id = ");
        query.bind(&WRITER, 42_i64);
        query.push_sql(" AND name = ");
        query.bind(&WRITER, "it's");
        assert_eq!(query.sql, "SELECT * FROM `orders` WHERE id = $1 AND name = $2");
        assert_eq!(query.params.len(), 2);

        let mut out = String::new();
        for i in [1, 9, 10, 123] {
            WRITER.write_bind_var(&mut out, i);
            out.push(' ');
        }
        assert_eq!(out, "$1 $9 $10 $123 ");
    }

    #[test]
    fn explain() {
        assert_eq!(
            WRITER.explain(
                "UPDATE t SET a = $1, b = $2 WHERE c = $10 AND d = $3",
                &[
                    Value::Boolean(Some(true)),
                    Value::Varchar(Some("o'k".into())),
                    Value::Null,
                ]
            ),
            "UPDATE t SET a = true, b = 'o''k' WHERE c = $10 AND d = NULL"
        );
        assert_eq!(
            WRITER.explain("SELECT $2, $1", &[Value::Int32(Some(1)), Value::Int64(Some(2))]),
            "SELECT 2, 1"
        );
        assert_eq!(WRITER.explain("SELECT 1", &[]), "SELECT 1");
    }

    #[test]
    fn inline_values() {
        assert_eq!(
            WRITER.inline_values(
                "INSERT INTO t (note, n) VALUES ('costs $1', $1)",
                &[Value::Int32(Some(5))]
            ),
            "INSERT INTO t (note, n) VALUES ('costs $1', 5)"
        );
        assert_eq!(
            WRITER.inline_values(
                "SELECT `col$1`, $2 FROM t WHERE a = 'it''s $2' AND b = $1",
                &[Value::Varchar(Some("x".into())), Value::Int64(Some(9))]
            ),
            "SELECT `col$1`, 9 FROM t WHERE a = 'it''s $2' AND b = 'x'"
        );
        assert_eq!(
            WRITER.explain("SELECT '$1', $1", &[Value::Int32(Some(5))]),
            "SELECT '5', 5"
        );
    }

    #[test]
    fn default_value() {
        let mut out = String::new();
        WRITER.write_default_value(&mut out, &Field::of::<i32>("a"));
        assert_eq!(out, "DEFAULT");
    }

    #[test]
    fn savepoints() {
        let mut out = String::new();
        WRITER.write_savepoint(&mut out, "sp1");
        assert_eq!(out, "SAVEPOINT sp1");
        let mut out = String::new();
        WRITER.write_rollback_to_savepoint(&mut out, "sp1");
        assert_eq!(out, "ROLLBACK TO SAVEPOINT sp1");
    }

    #[test]
    fn create_table() {
        let table = TableDef::new("orders")
            .with_schema("shop")
            .field(Field::of::<i64>("id").primary_key().auto_increment())
            .field(Field::of::<String>("customer").with_size(64))
            .field(Field::new("total", DataType::Float).with_precision(12, 2))
            .field(Field::of::<Option<time::PrimitiveDateTime>>("shipped_at"))
            .index(IndexDef::new("orders_customer", ["customer"]));
        let mut out = String::new();
        WRITER.write_create_table(&mut out, &table, false);
        assert_eq!(
            out,
            indoc! {"
                CREATE TABLE `shop`.`orders` (
                `id` Int64 PRIMARY KEY,
                `customer` varchar(64) NOT NULL,
                `total` numeric(12, 2) NOT NULL,
                `shipped_at` Timestamp
                );
            "}
            .trim()
        );
        let mut out = String::new();
        WRITER.write_create_index(&mut out, &table, &table.indexes[0]);
        assert_eq!(
            out,
            "CREATE INDEX `orders_customer` ON `shop`.`orders` (`customer`);"
        );
    }
}
