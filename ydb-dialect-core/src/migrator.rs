use crate::{Db, IndexDef, Result, TableDef};

#[derive(Debug, Default, Clone, Copy)]
pub struct MigratorConfig {
    /// Emit the indexes as separate `CREATE INDEX` statements after `CREATE TABLE`
    /// instead of declaring them inside it.
    pub create_index_after_create_table: bool,
}

/// Creates and drops tables and indexes of a `Db` session.
pub struct Migrator<'d> {
    db: &'d Db,
    config: MigratorConfig,
}

impl<'d> Migrator<'d> {
    pub fn new(db: &'d Db, config: MigratorConfig) -> Self {
        Self { db, config }
    }

    pub fn config(&self) -> &MigratorConfig {
        &self.config
    }

    /// Statements needed to create the table, in execution order.
    pub fn create_table_statements(&self, table: &TableDef) -> Vec<String> {
        let writer = self.db.sql_writer();
        let after = self.config.create_index_after_create_table;
        let mut statements = Vec::with_capacity(1 + table.indexes.len());
        let mut sql = String::new();
        writer.write_create_table(&mut sql, table, !after);
        statements.push(sql);
        if after {
            for index in &table.indexes {
                let mut sql = String::new();
                writer.write_create_index(&mut sql, table, index);
                statements.push(sql);
            }
        }
        statements
    }

    pub async fn create_table(&self, table: &TableDef) -> Result<()> {
        for sql in self.create_table_statements(table) {
            self.db.execute(sql.into()).await?;
        }
        log::info!("Created table `{}`", table.full_name());
        Ok(())
    }

    pub async fn drop_table(&self, table: &TableDef, if_exists: bool) -> Result<()> {
        let mut sql = String::new();
        self.db
            .sql_writer()
            .write_drop_table(&mut sql, table, if_exists);
        self.db.execute(sql.into()).await.map(|_| ())
    }

    pub async fn create_index(&self, table: &TableDef, index: &IndexDef) -> Result<()> {
        let mut sql = String::new();
        self.db
            .sql_writer()
            .write_create_index(&mut sql, table, index);
        self.db.execute(sql.into()).await.map(|_| ())
    }
}
