//! Static command table

/// Length of every command name
pub const NAME_LEN: usize = 3;

/// Largest argument field
pub const MAX_ARGS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandId {
    Led,
    Lcd,
    Bip,
    Old,
    Mot,
}

/// Name and argument count of one command
#[derive(Debug)]
pub struct CommandSpec {
    pub id: CommandId,
    pub name: &'static [u8; NAME_LEN],
    pub arg_len: usize,
}

impl CommandSpec {
    /// Exact body length this command accepts
    pub const fn body_len(&self) -> usize {
        NAME_LEN + self.arg_len
    }

    fn matches(&self, body: &[u8]) -> bool {
        body.len() == self.body_len() && body[..NAME_LEN] == self.name[..]
    }
}

pub static COMMANDS: [CommandSpec; 5] = [
    CommandSpec {
        id: CommandId::Led,
        name: b"led",
        arg_len: 2,
    },
    CommandSpec {
        id: CommandId::Lcd,
        name: b"lcd",
        arg_len: 4,
    },
    CommandSpec {
        id: CommandId::Bip,
        name: b"bip",
        arg_len: 1,
    },
    CommandSpec {
        id: CommandId::Old,
        name: b"old",
        arg_len: 4,
    },
    CommandSpec {
        id: CommandId::Mot,
        name: b"mot",
        arg_len: 4,
    },
];

/// First entry whose name and exact length match `body`
pub fn lookup(body: &[u8]) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.matches(body))
}
