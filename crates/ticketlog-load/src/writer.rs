use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info};

use crate::errors::LoadError;
use crate::mapper::RowInsert;
use crate::schema;

/// Counts of rows that reached each table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub tickets: u64,
    pub performers: u64,
    /// Performer rows skipped because the id was already present.
    pub performers_ignored: u64,
    pub notes: u64,
    pub tasks: u64,
}

/// Owns the exclusive connection to the target store.
#[derive(Debug)]
pub struct TableWriter {
    conn: SqliteConnection,
    target: String,
}

impl TableWriter {
    /// Open (creating if needed) a SQLite file with foreign keys enforced.
    pub async fn open(path: &Path) -> Result<Self, LoadError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = options.connect().await?;
        Ok(Self {
            conn,
            target: path.display().to_string(),
        })
    }

    /// Private in-memory store, alive as long as the writer.
    pub async fn in_memory() -> Result<Self, LoadError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let conn = options.connect().await?;
        Ok(Self {
            conn,
            target: ":memory:".to_string(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Names of activity tables already present at the target.
    pub async fn existing_tables(&mut self) -> Result<Vec<String>, LoadError> {
        let names = sqlx::query_scalar::<_, String>(schema::EXISTING_TABLES)
            .fetch_all(&mut self.conn)
            .await?;
        Ok(names)
    }

    /// Create the four tables and commit. Refuses, before any DDL runs, when
    /// one of them already exists.
    pub async fn create_tables(&mut self) -> Result<(), LoadError> {
        let existing = self.existing_tables().await?;
        if !existing.is_empty() {
            return Err(LoadError::TargetConflict {
                target: self.target.clone(),
                tables: existing,
            });
        }

        let mut tx = self.conn.begin().await?;
        for statement in schema::CREATE_STATEMENTS {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        info!(store = %self.target, tables = ?schema::TABLES, "schema created");
        Ok(())
    }

    /// Apply every row in one transaction, committed once at the end. Deferred
    /// foreign keys are checked at that commit.
    pub async fn apply(&mut self, rows: &[RowInsert]) -> Result<WriteSummary, LoadError> {
        let mut summary = WriteSummary::default();
        let mut tx = self.conn.begin().await?;

        for row in rows {
            let affected = insert_row(&mut *tx, row).await?;
            match row {
                RowInsert::Ticket(_) => summary.tickets += affected,
                RowInsert::Performer(row) => {
                    if affected == 0 {
                        debug!(performer_id = row.performer_id, "performer already stored");
                        summary.performers_ignored += 1;
                    } else {
                        summary.performers += affected;
                    }
                }
                RowInsert::Note(_) => summary.notes += affected,
                RowInsert::Task(_) => summary.tasks += affected,
            }
        }

        tx.commit().await?;
        Ok(summary)
    }

    pub async fn close(self) -> Result<(), LoadError> {
        self.conn.close().await?;
        Ok(())
    }
}

async fn insert_row(conn: &mut SqliteConnection, row: &RowInsert) -> Result<u64, sqlx::Error> {
    let result = match row {
        RowInsert::Ticket(row) => {
            sqlx::query(schema::INSERT_TICKET)
                .bind(row.ticket_id)
                .bind(row.time_ticket_created.as_str())
                .bind(row.performed_at.as_str())
                .bind(row.performer_id)
                .bind(row.note_id)
                .bind(row.task_id)
                .execute(&mut *conn)
                .await?
        }
        RowInsert::Performer(row) => {
            sqlx::query(schema::INSERT_PERFORMER)
                .bind(row.performer_id)
                .bind(row.performer_type.as_str())
                .execute(&mut *conn)
                .await?
        }
        RowInsert::Note(row) => {
            sqlx::query(schema::INSERT_NOTE)
                .bind(row.note_id)
                .bind(row.note_type)
                .bind(row.ticket_id)
                .execute(&mut *conn)
                .await?
        }
        RowInsert::Task(row) => {
            sqlx::query(schema::INSERT_TASK)
                .bind(row.task_id)
                .bind(row.shipping_address.as_str())
                .bind(row.category.as_str())
                .bind(row.contacted_customer)
                .bind(row.issue_type.as_str())
                .bind(row.source)
                .bind(row.status.as_str())
                .bind(row.priority)
                .bind(row.task_group.as_str())
                .bind(row.agent_id)
                .bind(row.requester)
                .bind(row.product.as_str())
                .bind(row.ticket_id)
                .execute(&mut *conn)
                .await?
        }
    };
    Ok(result.rows_affected())
}
