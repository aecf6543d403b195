/// Define struct which wraps a read connection.
#[macro_export]
macro_rules! define_current_read_commands {
    ($struct_name:ident) => {
        pub struct $struct_name<'a> {
            cmds: &'a mut $crate::DieselConnection,
        }

        impl<'a> $struct_name<'a> {
            pub fn new(cmds: &'a mut $crate::DieselConnection) -> Self {
                Self { cmds }
            }

            pub fn conn(&mut self) -> &mut $crate::DieselConnection {
                self.cmds
            }
        }
    };
}

/// Define struct which wraps the write connection. Write commands
/// can also read using [crate::current::read::CurrentSyncReadCommands].
#[macro_export]
macro_rules! define_current_write_commands {
    ($struct_name:ident) => {
        pub struct $struct_name<'a> {
            cmds: &'a mut $crate::DieselConnection,
        }

        impl<'a> $struct_name<'a> {
            pub fn new(cmds: &'a mut $crate::DieselConnection) -> Self {
                Self { cmds }
            }

            pub fn read(&mut self) -> $crate::current::read::CurrentSyncReadCommands<'_> {
                $crate::current::read::CurrentSyncReadCommands::new(self.cmds)
            }

            pub fn conn(&mut self) -> &mut $crate::DieselConnection {
                self.cmds
            }
        }
    };
}
