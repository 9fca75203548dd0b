//! Ordered record of dispatched world commands.
//!
//! Because every engine pass iterates units by id, two runs fed the same
//! input events dispatch byte-identical command streams. The log's SHA-256
//! digest is the cheap way to compare a server run against a replay.

use sha2::{Digest, Sha256};

use crate::world::WorldCommand;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandLog {
    entries: Vec<WorldCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, command: WorldCommand) {
        self.entries.push(command);
    }

    pub fn entries(&self) -> &[WorldCommand] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// SHA-256 over a canonical little-endian encoding of every entry.
    ///
    /// Floats are hashed by bit pattern, so `0.1 + 0.2` and `0.3` differ.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for command in &self.entries {
            encode(&mut hasher, command);
        }
        hasher.finalize().into()
    }
}

fn encode(hasher: &mut Sha256, command: &WorldCommand) {
    let tag = command.tag().as_str().as_bytes();
    let variant: u8 = match command {
        WorldCommand::TimedSlow { .. } => 0,
        WorldCommand::ContinuousSlow { .. } => 1,
        WorldCommand::Buff { .. } => 2,
    };

    hasher.update([variant]);
    hasher.update((tag.len() as u32).to_le_bytes());
    hasher.update(tag);
    hasher.update(command.target().0.to_le_bytes());

    match command {
        WorldCommand::TimedSlow {
            slow_pct, duration, ..
        } => {
            hasher.update(slow_pct.to_bits().to_le_bytes());
            hasher.update((duration.as_millis() as u64).to_le_bytes());
        }
        WorldCommand::ContinuousSlow { slow_pct, .. } => {
            hasher.update(slow_pct.to_bits().to_le_bytes());
        }
        WorldCommand::Buff { fields, .. } => {
            hasher.update([fields.iter().count() as u8]);
            for (stat, value) in fields.iter() {
                hasher.update([stat as u8]);
                hasher.update(value.to_bits().to_le_bytes());
            }
        }
    }
}
