//! Local Database Port
//!
//! The local database as seen through the external snapshot tool. The core
//! never reads or writes dump files itself.

use crate::domain::ports::CommandOutput;
use crate::error::SyncResult;

pub trait LocalDatabase: Send + Sync {
    /// Driver identifier of the default connection (e.g. "mysql")
    fn driver(&self) -> String;

    /// Dump the database into the snapshot directory as `<name>.sql.gz`
    fn create_snapshot(&self, name: &str, excluded_tables: &[String], compress: bool)
        -> CommandOutput;

    /// Apply `<name>.sql.gz` from the snapshot directory
    ///
    /// With `drop_tables_first` the tool drops every local table before
    /// loading; without it tables absent from the snapshot survive.
    fn load_snapshot(&self, name: &str, drop_tables_first: bool) -> CommandOutput;

    /// Tables currently present
    fn table_names(&self) -> SyncResult<Vec<String>>;

    /// Empty the given tables, keeping their schema
    fn truncate_tables(&self, tables: &[String]) -> CommandOutput;

    /// Drop the given tables
    fn drop_tables(&self, tables: &[String]) -> CommandOutput;
}
