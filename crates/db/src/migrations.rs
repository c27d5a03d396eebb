use crate::Db;
use crate::error::Result;

impl Db {
    /// Creates the collection table and its lookup index when missing.
    pub fn migrate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {collection} (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              customer_number TEXT NOT NULL,
              tenant TEXT NOT NULL,
              timestamp TEXT NOT NULL,
              count INTEGER NOT NULL DEFAULT 1
            );
            CREATE INDEX IF NOT EXISTS idx_{collection}_customer_tenant
              ON {collection} (customer_number, tenant);
            "#,
            collection = self.collection
        ))?;
        tx.commit()?;
        Ok(())
    }
}
