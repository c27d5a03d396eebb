use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row, params};
use tracker_core::{NewTrackingRecord, RecordId, Tenant, TrackingRecord};

use crate::Db;
use crate::error::Result;

impl Db {
    /// First record matching the key exactly, oldest first.
    pub fn find_record(
        &self,
        customer_number: &str,
        tenant: Tenant,
    ) -> Result<Option<TrackingRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT id, customer_number, tenant, timestamp, count
            FROM {}
            WHERE customer_number = ?1 AND tenant = ?2
            ORDER BY id ASC
            LIMIT 1
            "#,
            self.collection
        ))?;
        let record = stmt
            .query_row(params![customer_number, tenant.as_str()], map_record)
            .optional()?;
        Ok(record)
    }

    /// Bumps `count`, refreshes `timestamp` and re-sets `tenant`. Returns the
    /// number of modified records.
    pub fn increment_record(&self, id: RecordId, tenant: Tenant, timestamp: &str) -> Result<u64> {
        let modified = self.conn.execute(
            &format!(
                r#"
                UPDATE {}
                SET count = count + 1, timestamp = ?2, tenant = ?3
                WHERE id = ?1
                "#,
                self.collection
            ),
            params![id.0, timestamp, tenant.as_str()],
        )?;
        Ok(modified as u64)
    }

    pub fn insert_record(&self, record: &NewTrackingRecord) -> Result<Option<RecordId>> {
        let inserted = self.conn.execute(
            &format!(
                r#"
                INSERT INTO {} (customer_number, tenant, timestamp, count)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                self.collection
            ),
            params![
                record.customer_number,
                record.tenant.as_str(),
                record.timestamp,
                record.count as i64,
            ],
        )?;
        if inserted == 0 {
            return Ok(None);
        }
        Ok(Some(RecordId(self.conn.last_insert_rowid())))
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<TrackingRecord> {
    let tenant: String = row.get(2)?;
    let tenant = tenant
        .parse::<Tenant>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(err)))?;
    Ok(TrackingRecord {
        id: RecordId(row.get(0)?),
        customer_number: row.get(1)?,
        tenant,
        timestamp: row.get(3)?,
        count: row.get::<_, i64>(4)?.max(0) as u64,
    })
}
