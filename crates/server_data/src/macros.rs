/// Define read command group which uses the read connection pool.
#[macro_export]
macro_rules! define_cmd_wrapper_read {
    ($struct_name:ident) => {
        pub struct $struct_name<'a>(&'a $crate::db_manager::RouterDatabaseReadHandle);

        impl<'a> $struct_name<'a> {
            pub fn new(c: &'a $crate::db_manager::RouterDatabaseReadHandle) -> Self {
                Self(c)
            }

            #[allow(dead_code)]
            fn config(&self) -> &config::Config {
                self.0.config()
            }

            #[allow(dead_code)]
            fn content_service(&self) -> &dyn $crate::content::ContentService {
                self.0.content_service()
            }

            pub async fn db_read<
                T: FnOnce(
                        database::current::read::CurrentSyncReadCommands<'_>,
                    ) -> error_stack::Result<R, database::DieselDatabaseError>
                    + Send
                    + 'static,
                R: Send + 'static,
            >(
                &self,
                cmd: T,
            ) -> error_stack::Result<R, database::DieselDatabaseError> {
                self.0.reader().db_read(cmd).await
            }
        }
    };
}

/// Define write command group. Use only through
/// [crate::write_commands::WriteCommandRunnerHandle] so that writes
/// are serialized.
#[macro_export]
macro_rules! define_cmd_wrapper_write {
    ($struct_name:ident) => {
        pub struct $struct_name<'a>(&'a $crate::db_manager::RouterDatabaseWriteHandle);

        impl<'a> $struct_name<'a> {
            pub fn new(c: &'a $crate::db_manager::RouterDatabaseWriteHandle) -> Self {
                Self(c)
            }

            #[allow(dead_code)]
            fn config(&self) -> &config::Config {
                self.0.config()
            }

            #[allow(dead_code)]
            fn content_service(&self) -> &dyn $crate::content::ContentService {
                self.0.content_service()
            }

            #[allow(dead_code)]
            async fn db_read<
                T: FnOnce(
                        database::current::read::CurrentSyncReadCommands<'_>,
                    ) -> error_stack::Result<R, database::DieselDatabaseError>
                    + Send
                    + 'static,
                R: Send + 'static,
            >(
                &self,
                cmd: T,
            ) -> error_stack::Result<R, database::DieselDatabaseError> {
                self.0.reader().db_read(cmd).await
            }

            async fn db_transaction<
                T: FnOnce(
                        database::current::write::CurrentSyncWriteCommands<'_>,
                    ) -> std::result::Result<R, $crate::TransactionError>
                    + Send
                    + 'static,
                R: Send + 'static,
            >(
                &self,
                cmd: T,
            ) -> std::result::Result<R, $crate::TransactionError> {
                self.0.writer().db_transaction(cmd).await
            }
        }
    };
}

/// Macro for writing to current database with transaction.
/// Calls await automatically.
///
/// ```ignore
/// impl WriteCommandsTest<'_> {
///     pub async fn test(&self) -> server_data::result::Result<(), DataError> {
///         db_transaction!(self, move |mut cmds| {
///             Ok(())
///         })?;
///         Ok(())
///     }
/// }
/// ```
#[macro_export]
macro_rules! db_transaction {
    ($state:expr, move |mut $cmds:ident| $commands:expr) => {{
        $crate::IntoDataError::into_error(
            $state.db_transaction(move |mut $cmds| ($commands)).await,
        )
    }};
    ($state:expr, move |$cmds:ident| $commands:expr) => {{
        $crate::IntoDataError::into_error($state.db_transaction(move |$cmds| ($commands)).await)
    }};
}
